use std::cmp::Reverse;
use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{ShooterResult, Tier};
use crate::repository::consent::ConsentRepository;
use crate::repository::results::ResultRepository;

/// How participants flagged as minors appear in rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinorPolicy {
    /// Left out of every bucket.
    Exclude,
    /// Ranked in a protected bucket of their own, never in the skill tiers.
    OwnBucket,
}

#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    /// Rows kept per tier bucket.
    pub top_n: usize,
    pub minor_policy: MinorPolicy,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            minor_policy: MinorPolicy::Exclude,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankedEntry {
    /// 1-based position within the bucket.
    pub rank: u32,
    pub tier: Tier,
    pub result: ShooterResult,
}

#[derive(Debug, Clone)]
pub struct TierBucket {
    pub tier: Tier,
    pub entries: Vec<RankedEntry>,
}

impl TierBucket {
    pub fn champion(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }
}

/// Tier-partitioned rankings, buckets ordered strongest tier first.
#[derive(Debug, Clone)]
pub struct RankedView {
    pub buckets: Vec<TierBucket>,
}

impl RankedView {
    pub fn bucket(&self, tier: Tier) -> Option<&TierBucket> {
        self.buckets.iter().find(|b| b.tier == tier)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.entries.is_empty())
    }
}

/// Partition results into tier buckets, sort and truncate each one.
///
/// The single sort-partition routine behind every leaderboard view, so
/// the personalized and all-tiers renderings can never drift apart.
/// Ordering within a bucket is descending `(best_series,
/// accessory_tens)` with ascending participant id as the tie-break,
/// which keeps repeated queries over an unchanged store identical.
pub fn rank(
    results: &[ShooterResult],
    minors: &HashSet<i64>,
    config: &LeaderboardConfig,
    viewer_tier: Option<Tier>,
) -> RankedView {
    let mut tiers = vec![Tier::Professional, Tier::Advanced, Tier::Amateur];
    if config.minor_policy == MinorPolicy::OwnBucket {
        tiers.push(Tier::Minor);
    }
    if let Some(tier) = viewer_tier {
        tiers.retain(|t| *t == tier);
    }

    let buckets = tiers
        .into_iter()
        .map(|tier| {
            let mut entries: Vec<&ShooterResult> = results
                .iter()
                .filter(|r| Tier::classify(r.best_series, minors.contains(&r.participant_id)) == tier)
                .collect();

            entries.sort_by_key(|r| {
                (
                    Reverse(r.best_series),
                    Reverse(r.accessory_tens),
                    r.participant_id,
                )
            });
            entries.truncate(config.top_n);

            TierBucket {
                tier,
                entries: entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| RankedEntry {
                        rank: (i + 1) as u32,
                        tier,
                        result: r.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    RankedView { buckets }
}

/// Load the full store and rank it.
pub async fn load_and_rank(
    pool: &SqlitePool,
    config: &LeaderboardConfig,
    viewer_tier: Option<Tier>,
) -> Result<RankedView> {
    let results = ResultRepository::new(pool).list_all().await?;
    let minors = ConsentRepository::new(pool).minor_ids().await?;

    Ok(rank(&results, &minors, config, viewer_tier))
}

/// Tier a viewer's leaderboard is filtered to: their stored result's
/// tier, or Amateur when they have not submitted anything yet.
pub async fn viewer_tier(pool: &SqlitePool, participant_id: i64) -> Result<Tier> {
    let is_minor = ConsentRepository::new(pool).is_minor(participant_id).await?;
    let result = ResultRepository::new(pool).get(participant_id).await?;

    Ok(match result {
        Some(r) => Tier::classify(r.best_series, is_minor),
        None if is_minor => Tier::Minor,
        None => Tier::Amateur,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn result(id: i64, series: i64, tens: i64) -> ShooterResult {
        ShooterResult {
            participant_id: id,
            first_name: format!("Shooter{id}"),
            last_name: None,
            handle: None,
            best_series: series,
            accessory_tens: tens,
            updated_at: NaiveDateTime::default(),
        }
    }

    fn keys(bucket: &TierBucket) -> Vec<(i64, i64)> {
        bucket.entries.iter().map(|e| e.result.score_key()).collect()
    }

    #[test]
    fn partitions_and_sorts_within_buckets() {
        let results = vec![result(1, 93, 4), result(2, 93, 6), result(3, 80, 1)];
        let view = rank(&results, &HashSet::new(), &LeaderboardConfig::default(), None);

        let pro = view.bucket(Tier::Professional).unwrap();
        assert_eq!(keys(pro), vec![(93, 6), (93, 4)]);

        let advanced = view.bucket(Tier::Advanced).unwrap();
        assert_eq!(keys(advanced), vec![(80, 1)]);

        let amateur = view.bucket(Tier::Amateur).unwrap();
        assert!(amateur.entries.is_empty());
    }

    #[test]
    fn every_non_minor_lands_in_exactly_one_bucket() {
        let results: Vec<ShooterResult> = (0..=100).map(|s| result(s, s, 0)).collect();
        let config = LeaderboardConfig {
            top_n: 200,
            minor_policy: MinorPolicy::Exclude,
        };
        let view = rank(&results, &HashSet::new(), &config, None);

        let total: usize = view.buckets.iter().map(|b| b.entries.len()).sum();
        assert_eq!(total, results.len());
    }

    #[test]
    fn tie_break_is_deterministic() {
        let results = vec![result(7, 85, 3), result(2, 85, 3), result(5, 85, 3)];
        let config = LeaderboardConfig::default();

        let first = rank(&results, &HashSet::new(), &config, None);
        let second = rank(&results, &HashSet::new(), &config, None);

        let ids: Vec<i64> = first
            .bucket(Tier::Advanced)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.result.participant_id)
            .collect();
        assert_eq!(ids, vec![2, 5, 7]);

        let ids_again: Vec<i64> = second
            .bucket(Tier::Advanced)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.result.participant_id)
            .collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn buckets_truncate_to_top_n() {
        let results: Vec<ShooterResult> = (1..=15).map(|i| result(i, 50 + i, 0)).collect();
        let config = LeaderboardConfig {
            top_n: 10,
            minor_policy: MinorPolicy::Exclude,
        };
        let view = rank(&results, &HashSet::new(), &config, None);

        let amateur = view.bucket(Tier::Amateur).unwrap();
        assert_eq!(amateur.entries.len(), 10);
        // strongest survive the cut
        assert_eq!(amateur.entries[0].result.best_series, 65);
        assert_eq!(amateur.entries[9].result.best_series, 56);
    }

    #[test]
    fn viewer_tier_returns_single_bucket() {
        let results = vec![result(1, 95, 2), result(2, 85, 1), result(3, 40, 0)];
        let view = rank(
            &results,
            &HashSet::new(),
            &LeaderboardConfig::default(),
            Some(Tier::Advanced),
        );

        assert_eq!(view.buckets.len(), 1);
        assert_eq!(view.buckets[0].tier, Tier::Advanced);
        assert_eq!(keys(&view.buckets[0]), vec![(85, 1)]);
    }

    #[test]
    fn minors_never_appear_in_skill_buckets() {
        let results = vec![result(1, 95, 2), result(2, 96, 3)];
        let minors: HashSet<i64> = [2].into_iter().collect();

        let view = rank(&results, &minors, &LeaderboardConfig::default(), None);
        let pro = view.bucket(Tier::Professional).unwrap();
        assert_eq!(keys(pro), vec![(95, 2)]);
        assert!(view.bucket(Tier::Minor).is_none());
    }

    #[test]
    fn own_bucket_policy_ranks_minors_separately() {
        let results = vec![result(1, 95, 2), result(2, 96, 3), result(3, 40, 0)];
        let minors: HashSet<i64> = [2, 3].into_iter().collect();
        let config = LeaderboardConfig {
            top_n: 10,
            minor_policy: MinorPolicy::OwnBucket,
        };

        let view = rank(&results, &minors, &config, None);
        let juniors = view.bucket(Tier::Minor).unwrap();
        assert_eq!(keys(juniors), vec![(96, 3), (40, 0)]);
    }

    #[test]
    fn rank_numbers_are_one_based() {
        let results = vec![result(1, 70, 1), result(2, 60, 0)];
        let view = rank(&results, &HashSet::new(), &LeaderboardConfig::default(), None);

        let amateur = view.bucket(Tier::Amateur).unwrap();
        assert_eq!(amateur.entries[0].rank, 1);
        assert_eq!(amateur.entries[1].rank, 2);
        assert_eq!(amateur.champion().unwrap().result.participant_id, 1);
    }
}
