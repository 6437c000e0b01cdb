use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::{NewResult, ScoreError, ShooterResult, Tier, UpsertOutcome, validate_score};
use crate::repository::consent::ConsentRepository;
use crate::repository::results::ResultRepository;
use crate::services::promotion::{self, PromotionEvent, PromotionPolicy};

/// What happened to a submission. Invalid scores and non-improvements
/// are expected outcomes of the flow, not errors; only store failures
/// surface as `Err`.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    Recorded {
        outcome: UpsertOutcome,
        tier: Tier,
        promotion: Option<PromotionEvent>,
    },
    NotAnImprovement {
        current: ShooterResult,
    },
    InvalidScore(ScoreError),
}

/// Run a validated submission through the conditional upsert and
/// promotion detection. Consent and membership gating happen at the
/// API boundary before this is called.
pub async fn submit_result(
    pool: &SqlitePool,
    new: &NewResult,
    policy: &PromotionPolicy,
) -> Result<SubmissionOutcome> {
    if let Err(err) = validate_score(new.best_series, new.accessory_tens) {
        return Ok(SubmissionOutcome::InvalidScore(err));
    }

    let is_minor = ConsentRepository::new(pool)
        .is_minor(new.participant_id)
        .await?;

    let (outcome, previous) = ResultRepository::new(pool).upsert_if_better(new).await?;

    match outcome {
        UpsertOutcome::Rejected => {
            // the conditional write only rejects when a result exists
            let current = previous.ok_or(StorageError::NotFound)?;
            Ok(SubmissionOutcome::NotAnImprovement { current })
        }
        UpsertOutcome::Inserted | UpsertOutcome::Updated => {
            let promotion = promotion::detect(previous.as_ref(), new.best_series, is_minor, policy);

            if let Some(event) = &promotion {
                tracing::info!(
                    participant_id = new.participant_id,
                    new_tier = event.new_tier.title(),
                    "participant promoted"
                );
            }

            Ok(SubmissionOutcome::Recorded {
                outcome,
                tier: Tier::classify(new.best_series, is_minor),
                promotion,
            })
        }
    }
}
