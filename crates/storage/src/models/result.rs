use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A participant's single best result for the current scoring period.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShooterResult {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub handle: Option<String>,
    pub best_series: i64,
    pub accessory_tens: i64,
    pub updated_at: NaiveDateTime,
}

impl ShooterResult {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Sort key for the strictly-better ordering: lexicographic on
    /// `(best_series, accessory_tens)`.
    pub fn score_key(&self) -> (i64, i64) {
        (self.best_series, self.accessory_tens)
    }
}

/// A validated submission ready for the conditional upsert.
#[derive(Debug, Clone)]
pub struct NewResult {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub handle: Option<String>,
    pub best_series: i64,
    pub accessory_tens: i64,
}

impl NewResult {
    pub fn score_key(&self) -> (i64, i64) {
        (self.best_series, self.accessory_tens)
    }
}

/// Outcome of the conditional write against the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    /// First result for this participant.
    Inserted,
    /// Replaced a strictly worse stored result.
    Updated,
    /// Equal or worse than the stored result; store untouched.
    Rejected,
}
