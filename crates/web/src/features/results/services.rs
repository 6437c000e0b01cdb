use sqlx::SqlitePool;
use storage::dto::result::ResultResponse;
use storage::error::{Result, StorageError};
use storage::repository::consent::ConsentRepository;
use storage::repository::results::ResultRepository;

/// A participant's current stored result with its derived tier.
pub async fn get_result(pool: &SqlitePool, participant_id: i64) -> Result<ResultResponse> {
    let result = ResultRepository::new(pool)
        .get(participant_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let is_minor = ConsentRepository::new(pool).is_minor(participant_id).await?;

    Ok(ResultResponse::from_result(&result, is_minor))
}
