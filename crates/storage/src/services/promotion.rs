use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ShooterResult, Tier};

#[derive(Debug, Clone)]
pub struct PromotionPolicy {
    /// Whether a first-ever submission landing directly in Advanced or
    /// Professional fires an event. Off by default: the baseline for a
    /// participant without a prior result is Amateur, but celebrating
    /// a debut is a per-community choice.
    pub promote_on_first: bool,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            promote_on_first: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PromotionEvent {
    pub previous_tier: Tier,
    pub new_tier: Tier,
}

/// Decide whether a successful submission moved the participant up the
/// skill ladder. Callers must only invoke this after an `Inserted` or
/// `Updated` outcome; a rejected submission cannot promote.
pub fn detect(
    previous: Option<&ShooterResult>,
    new_best_series: i64,
    is_minor: bool,
    policy: &PromotionPolicy,
) -> Option<PromotionEvent> {
    // Minors sit outside the skill ladder entirely.
    if is_minor {
        return None;
    }

    let new_tier = Tier::classify(new_best_series, false);
    let new_rank = new_tier.skill_rank()?;

    let previous_tier = match previous {
        Some(prev) => Tier::classify(prev.best_series, false),
        None if policy.promote_on_first => Tier::Amateur,
        None => return None,
    };

    let previous_rank = previous_tier.skill_rank()?;

    if new_rank > previous_rank {
        Some(PromotionEvent {
            previous_tier,
            new_tier,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn stored(series: i64, tens: i64) -> ShooterResult {
        ShooterResult {
            participant_id: 1,
            first_name: "Shooter".into(),
            last_name: None,
            handle: None,
            best_series: series,
            accessory_tens: tens,
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn crossing_a_boundary_fires() {
        let prev = stored(79, 2);
        let event = detect(Some(&prev), 85, false, &PromotionPolicy::default()).unwrap();
        assert_eq!(event.previous_tier, Tier::Amateur);
        assert_eq!(event.new_tier, Tier::Advanced);
    }

    #[test]
    fn double_jump_fires_once() {
        let prev = stored(60, 1);
        let event = detect(Some(&prev), 95, false, &PromotionPolicy::default()).unwrap();
        assert_eq!(event.previous_tier, Tier::Amateur);
        assert_eq!(event.new_tier, Tier::Professional);
    }

    #[test]
    fn improvement_within_tier_is_silent() {
        let prev = stored(81, 1);
        assert_eq!(detect(Some(&prev), 90, false, &PromotionPolicy::default()), None);
    }

    #[test]
    fn first_submission_silent_by_default() {
        assert_eq!(detect(None, 95, false, &PromotionPolicy::default()), None);
    }

    #[test]
    fn first_submission_fires_when_policy_enabled() {
        let policy = PromotionPolicy {
            promote_on_first: true,
        };
        let event = detect(None, 85, false, &policy).unwrap();
        assert_eq!(event.previous_tier, Tier::Amateur);
        assert_eq!(event.new_tier, Tier::Advanced);

        // an amateur debut is not a promotion even then
        assert_eq!(detect(None, 50, false, &policy), None);
    }

    #[test]
    fn minors_never_promote() {
        let prev = stored(60, 1);
        let policy = PromotionPolicy {
            promote_on_first: true,
        };
        assert_eq!(detect(Some(&prev), 95, true, &policy), None);
        assert_eq!(detect(None, 95, true, &policy), None);
    }
}
