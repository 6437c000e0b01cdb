use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::result::ResultResponse;
use crate::models::{NewResult, Tier, UpsertOutcome};
use crate::services::promotion::PromotionEvent;
use crate::services::submission::SubmissionOutcome;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitResultRequest {
    pub participant_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 100))]
    pub handle: Option<String>,
    /// Numeric range and consistency are checked by the score
    /// validator, which produces the user-facing rejection messages.
    pub best_series: i64,
    pub accessory_tens: i64,
}

impl SubmitResultRequest {
    pub fn into_new_result(self) -> NewResult {
        NewResult {
            participant_id: self.participant_id,
            first_name: self.first_name,
            last_name: self.last_name,
            handle: self.handle,
            best_series: self.best_series,
            accessory_tens: self.accessory_tens,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Recorded,
    NotAnImprovement,
    InvalidScore,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub status: SubmissionStatus,
    /// User-facing explanation suitable for relaying into the chat.
    pub message: String,
    pub outcome: Option<UpsertOutcome>,
    pub tier: Option<Tier>,
    pub promotion: Option<PromotionEvent>,
    /// The stored result a losing submission failed to beat.
    pub current: Option<ResultResponse>,
}

impl SubmissionResponse {
    pub fn from_outcome(outcome: SubmissionOutcome, is_minor: bool) -> Self {
        match outcome {
            SubmissionOutcome::Recorded {
                outcome,
                tier,
                promotion,
            } => {
                let message = match &promotion {
                    Some(event) => format!(
                        "Congratulations! You moved up to the {} tier!",
                        event.new_tier.title()
                    ),
                    None => "Your result has been recorded!".to_string(),
                };
                Self {
                    status: SubmissionStatus::Recorded,
                    message,
                    outcome: Some(outcome),
                    tier: Some(tier),
                    promotion,
                    current: None,
                }
            }
            SubmissionOutcome::NotAnImprovement { current } => Self {
                status: SubmissionStatus::NotAnImprovement,
                message: "Your new result does not beat your stored one. Keep practicing!"
                    .to_string(),
                outcome: Some(UpsertOutcome::Rejected),
                tier: None,
                promotion: None,
                current: Some(ResultResponse::from_result(&current, is_minor)),
            },
            SubmissionOutcome::InvalidScore(err) => Self {
                status: SubmissionStatus::InvalidScore,
                message: err.to_string(),
                outcome: None,
                tier: None,
                promotion: None,
                current: None,
            },
        }
    }
}
