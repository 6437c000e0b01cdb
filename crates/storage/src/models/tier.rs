use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Series value at which every shot is assumed to be a ten and the
/// accessory count switches to central tens. Also the lower bound of
/// the Professional tier; keeping both in one constant means the
/// display marker and the tier partition can never disagree.
pub const PROFESSIONAL_MIN: i64 = 93;

/// Lower bound of the Advanced tier.
pub const ADVANCED_MIN: i64 = 80;

/// Skill tier derived from a participant's best series.
///
/// Never persisted; recomputed from `best_series` (and the minor flag)
/// wherever it is needed. `Minor` is a protected category rather than
/// a skill level and takes precedence over any score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Amateur,
    Advanced,
    Professional,
    Minor,
}

impl Tier {
    pub fn classify(best_series: i64, is_minor: bool) -> Self {
        if is_minor {
            return Tier::Minor;
        }
        if best_series >= PROFESSIONAL_MIN {
            Tier::Professional
        } else if best_series >= ADVANCED_MIN {
            Tier::Advanced
        } else {
            Tier::Amateur
        }
    }

    /// Position in the skill ladder; `None` for the Minor category,
    /// which never takes part in promotion comparisons.
    pub fn skill_rank(&self) -> Option<u8> {
        match self {
            Tier::Amateur => Some(0),
            Tier::Advanced => Some(1),
            Tier::Professional => Some(2),
            Tier::Minor => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tier::Amateur => "Amateur",
            Tier::Advanced => "Advanced",
            Tier::Professional => "Professional",
            Tier::Minor => "Juniors",
        }
    }

    /// Tens recorded at or above the Professional threshold are central
    /// tens and are rendered with a distinguishing marker.
    pub fn uses_central_tens(best_series: i64) -> bool {
        best_series >= PROFESSIONAL_MIN
    }
}
