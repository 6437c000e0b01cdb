use crate::models::{ShooterResult, Tier};
use crate::services::leaderboard::{RankedEntry, RankedView, TierBucket};

/// Display names longer than this are cut with an ellipsis.
const NAME_MAX_CHARS: usize = 20;

pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_MAX_CHARS {
        return name.to_string();
    }
    let cut: String = name.chars().take(NAME_MAX_CHARS).collect();
    format!("{cut}…")
}

/// Score figure for one result: `93-6x` at the central-ten level,
/// `92-5` below it. The marker only ever appears for Professional
/// scores because the tens mean a different thing there.
pub fn format_score(best_series: i64, accessory_tens: i64) -> String {
    if Tier::uses_central_tens(best_series) {
        format!("{best_series}-{accessory_tens}x")
    } else {
        format!("{best_series}-{accessory_tens}")
    }
}

fn tier_emoji(tier: Tier) -> &'static str {
    match tier {
        Tier::Professional => "👑",
        Tier::Advanced => "🥈",
        Tier::Amateur => "🥉",
        Tier::Minor => "🌟",
    }
}

fn entry_line(entry: &RankedEntry) -> String {
    format!(
        "{}. {}: {}",
        entry.rank,
        truncate_name(&entry.result.display_name()),
        format_score(entry.result.best_series, entry.result.accessory_tens),
    )
}

fn champion_line(tier: Tier, entry: &RankedEntry) -> String {
    let handle = entry
        .result
        .handle
        .as_deref()
        .map(|h| format!(" (@{h})"))
        .unwrap_or_default();

    format!(
        "{} {}: {}{} {}",
        tier_emoji(tier),
        tier.title(),
        truncate_name(&entry.result.display_name()),
        handle,
        format_score(entry.result.best_series, entry.result.accessory_tens),
    )
}

fn bucket_section(bucket: &TierBucket) -> String {
    let mut section = format!("{} {} {}\n", tier_emoji(bucket.tier), bucket.tier.title(), tier_emoji(bucket.tier));

    if bucket.entries.is_empty() {
        section.push_str("No results in this tier yet.\n");
    } else {
        for entry in &bucket.entries {
            section.push_str(&entry_line(entry));
            section.push('\n');
        }
    }

    section
}

/// Render the full publication message: champion headlines, the
/// per-tier tables, and an optional closing line.
pub fn render_publication(view: &RankedView, closing: Option<&str>) -> String {
    let mut message = String::from("🏅 Season champions 🏅\n\n");

    let champions: Vec<(Tier, &RankedEntry)> = view
        .buckets
        .iter()
        .filter_map(|b| b.champion().map(|e| (b.tier, e)))
        .collect();

    if champions.is_empty() {
        message.push_str("No participants in any tier yet.\n");
    } else {
        for (tier, entry) in champions {
            message.push_str(&champion_line(tier, entry));
            message.push('\n');
        }
    }

    message.push_str("\n📊 Full standings 📊\n\n");

    for bucket in &view.buckets {
        message.push_str(&bucket_section(bucket));
        message.push('\n');
    }

    if let Some(line) = closing {
        message.push_str(line);
        message.push('\n');
    }

    message
}

/// Render a single-tier leaderboard for the personalized view.
pub fn render_tier_view(view: &RankedView) -> String {
    let mut message = String::new();
    for bucket in &view.buckets {
        message.push_str(&bucket_section(bucket));
    }
    message
}

/// One participant's current result, as shown by the status query.
pub fn format_personal_result(result: &ShooterResult) -> String {
    if Tier::uses_central_tens(result.best_series) {
        format!(
            "Best series: {}, central tens: {}x",
            result.best_series, result.accessory_tens
        )
    } else {
        format!(
            "Best series: {}, tens: {}",
            result.best_series, result.accessory_tens
        )
    }
}

/// Pick the closing line for a period. Deterministic in the seed so a
/// retried publication sends the same message.
pub fn pick_closing_line(pool: &[String], seed: u64) -> Option<&str> {
    if pool.is_empty() {
        return None;
    }
    let index = (seed % pool.len() as u64) as usize;
    Some(pool[index].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::leaderboard::{LeaderboardConfig, rank};
    use chrono::NaiveDateTime;
    use std::collections::HashSet;

    fn result(id: i64, name: &str, series: i64, tens: i64) -> ShooterResult {
        ShooterResult {
            participant_id: id,
            first_name: name.to_string(),
            last_name: None,
            handle: None,
            best_series: series,
            accessory_tens: tens,
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn central_ten_marker_only_at_professional_level() {
        assert_eq!(format_score(93, 6), "93-6x");
        assert_eq!(format_score(92, 5), "92-5");
        assert_eq!(format_score(0, 0), "0-0");
    }

    #[test]
    fn long_names_truncate_with_ellipsis() {
        let long = "Maximilian Bartholomew III";
        let cut = truncate_name(long);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), 21);

        assert_eq!(truncate_name("Short Name"), "Short Name");
    }

    #[test]
    fn publication_contains_champions_and_tables() {
        let results = vec![
            result(1, "Pro", 95, 4),
            result(2, "Adv", 85, 2),
            result(3, "Ama", 60, 1),
        ];
        let view = rank(&results, &HashSet::new(), &LeaderboardConfig::default(), None);
        let message = render_publication(&view, Some("See you next season!"));

        assert!(message.contains("Season champions"));
        assert!(message.contains("👑 Professional: Pro 95-4x"));
        assert!(message.contains("🥈 Advanced: Adv 85-2"));
        assert!(message.contains("1. Ama: 60-1"));
        assert!(message.ends_with("See you next season!\n"));
    }

    #[test]
    fn marker_never_leaks_into_other_tiers() {
        let results = vec![result(1, "Adv", 92, 5)];
        let view = rank(&results, &HashSet::new(), &LeaderboardConfig::default(), None);
        let message = render_publication(&view, None);

        assert!(message.contains("92-5"));
        assert!(!message.contains("92-5x"));
    }

    #[test]
    fn champion_line_includes_handle_when_present() {
        let mut r = result(1, "Pro", 95, 4);
        r.handle = Some("deadeye".into());
        let view = rank(
            &[r],
            &HashSet::new(),
            &LeaderboardConfig::default(),
            None,
        );
        let message = render_publication(&view, None);
        assert!(message.contains("Pro (@deadeye) 95-4x"));
    }

    #[test]
    fn personal_result_wording_follows_threshold() {
        assert_eq!(
            format_personal_result(&result(1, "A", 93, 2)),
            "Best series: 93, central tens: 2x"
        );
        assert_eq!(
            format_personal_result(&result(1, "A", 92, 2)),
            "Best series: 92, tens: 2"
        );
    }

    #[test]
    fn closing_line_is_deterministic_in_seed() {
        let pool = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(pick_closing_line(&pool, 4), pick_closing_line(&pool, 4));
        assert_eq!(pick_closing_line(&pool, 4), Some("b"));
        assert_eq!(pick_closing_line(&[], 4), None);
    }
}
