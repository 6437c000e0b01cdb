use sqlx::SqlitePool;
use storage::dto::result::ResultResponse;
use storage::error::Result;
use storage::repository::consent::ConsentRepository;
use storage::repository::results::ResultRepository;

/// Every stored result with its derived tier, unfiltered and untruncated.
pub async fn list_results(pool: &SqlitePool) -> Result<Vec<ResultResponse>> {
    let results = ResultRepository::new(pool).list_all().await?;
    let minors = ConsentRepository::new(pool).minor_ids().await?;

    let mut responses: Vec<ResultResponse> = results
        .iter()
        .map(|r| ResultResponse::from_result(r, minors.contains(&r.participant_id)))
        .collect();
    responses.sort_by(|a, b| {
        (b.best_series, b.accessory_tens).cmp(&(a.best_series, a.accessory_tens))
    });

    Ok(responses)
}

pub async fn override_result(
    pool: &SqlitePool,
    participant_id: i64,
    best_series: i64,
    accessory_tens: i64,
) -> Result<ResultResponse> {
    let result = ResultRepository::new(pool)
        .overwrite(participant_id, best_series, accessory_tens)
        .await?;
    let is_minor = ConsentRepository::new(pool).is_minor(participant_id).await?;

    tracing::info!(participant_id, best_series, accessory_tens, "result overridden by admin");

    Ok(ResultResponse::from_result(&result, is_minor))
}

pub async fn delete_result(pool: &SqlitePool, participant_id: i64) -> Result<()> {
    ResultRepository::new(pool).delete(participant_id).await?;

    tracing::info!(participant_id, "result deleted by admin");

    Ok(())
}

pub async fn set_minor(pool: &SqlitePool, participant_id: i64, is_minor: bool) -> Result<()> {
    ConsentRepository::new(pool)
        .set_minor(participant_id, is_minor)
        .await?;

    tracing::info!(participant_id, is_minor, "minor flag changed by admin");

    Ok(())
}
