use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Data-processing consent for one participant.
///
/// Revocation flips `consent_given` but keeps the row, so a revoked
/// participant stays distinguishable from one we have never seen.
/// The minor flag is only settable through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ConsentRecord {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub handle: Option<String>,
    pub consent_given: bool,
    pub is_minor: bool,
    pub recorded_at: NaiveDateTime,
}
