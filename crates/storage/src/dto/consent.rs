use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ConsentRecord;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GrantConsentRequest {
    pub participant_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 100))]
    pub handle: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConsentResponse {
    pub participant_id: i64,
    pub consent_given: bool,
    pub is_minor: bool,
    pub recorded_at: NaiveDateTime,
}

impl From<ConsentRecord> for ConsentResponse {
    fn from(record: ConsentRecord) -> Self {
        Self {
            participant_id: record.participant_id,
            consent_given: record.consent_given,
            is_minor: record.is_minor,
            recorded_at: record.recorded_at,
        }
    }
}
