use sqlx::SqlitePool;
use storage::dto::submission::SubmissionResponse;
use storage::error::Result;
use storage::models::NewResult;
use storage::repository::consent::ConsentRepository;
use storage::services::promotion::PromotionPolicy;
use storage::services::submission;

/// Run a gated submission through the core flow and shape the response.
pub async fn submit(
    pool: &SqlitePool,
    new: NewResult,
    policy: &PromotionPolicy,
) -> Result<SubmissionResponse> {
    let is_minor = ConsentRepository::new(pool).is_minor(new.participant_id).await?;
    let outcome = submission::submit_result(pool, &new, policy).await?;

    Ok(SubmissionResponse::from_outcome(outcome, is_minor))
}
