use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Tier;
use crate::services::leaderboard::{RankedEntry, RankedView, TierBucket};
use crate::services::report;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Viewer whose tier selects the bucket to show.
    pub participant_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub participant_id: i64,
    pub display_name: String,
    pub handle: Option<String>,
    pub best_series: i64,
    pub accessory_tens: i64,
    /// Rendered score figure, central-ten marker included for
    /// Professional rows only.
    pub display: String,
}

impl From<&RankedEntry> for LeaderboardEntry {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            participant_id: entry.result.participant_id,
            display_name: report::truncate_name(&entry.result.display_name()),
            handle: entry.result.handle.clone(),
            best_series: entry.result.best_series,
            accessory_tens: entry.result.accessory_tens,
            display: report::format_score(entry.result.best_series, entry.result.accessory_tens),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierBucketResponse {
    pub tier: Tier,
    pub title: String,
    pub entries: Vec<LeaderboardEntry>,
}

impl From<&TierBucket> for TierBucketResponse {
    fn from(bucket: &TierBucket) -> Self {
        Self {
            tier: bucket.tier,
            title: bucket.tier.title().to_string(),
            entries: bucket.entries.iter().map(LeaderboardEntry::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub buckets: Vec<TierBucketResponse>,
}

impl From<&RankedView> for LeaderboardResponse {
    fn from(view: &RankedView) -> Self {
        Self {
            buckets: view.buckets.iter().map(TierBucketResponse::from).collect(),
        }
    }
}
