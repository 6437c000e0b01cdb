use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ShooterResult, Tier};
use crate::services::report;

/// A stored result as returned by the API, with the derived tier and
/// the rendered score figure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse {
    pub participant_id: i64,
    pub display_name: String,
    pub handle: Option<String>,
    pub best_series: i64,
    pub accessory_tens: i64,
    pub tier: Tier,
    /// Score rendered with the central-ten marker where applicable.
    pub display: String,
    pub updated_at: NaiveDateTime,
}

impl ResultResponse {
    pub fn from_result(result: &ShooterResult, is_minor: bool) -> Self {
        Self {
            participant_id: result.participant_id,
            display_name: result.display_name(),
            handle: result.handle.clone(),
            best_series: result.best_series,
            accessory_tens: result.accessory_tens,
            tier: Tier::classify(result.best_series, is_minor),
            display: report::format_score(result.best_series, result.accessory_tens),
            updated_at: result.updated_at,
        }
    }
}
