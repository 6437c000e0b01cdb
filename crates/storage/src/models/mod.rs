pub mod consent;
pub mod result;
pub mod score;
pub mod tier;

pub use consent::ConsentRecord;
pub use result::{NewResult, ShooterResult, UpsertOutcome};
pub use score::{ScoreError, validate_score};
pub use tier::Tier;
