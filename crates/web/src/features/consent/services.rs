use sqlx::SqlitePool;
use storage::dto::consent::{ConsentResponse, GrantConsentRequest};
use storage::error::Result;
use storage::repository::consent::ConsentRepository;

pub async fn grant(pool: &SqlitePool, request: &GrantConsentRequest) -> Result<ConsentResponse> {
    let record = ConsentRepository::new(pool)
        .grant(
            request.participant_id,
            &request.first_name,
            request.last_name.as_deref(),
            request.handle.as_deref(),
        )
        .await?;

    Ok(ConsentResponse::from(record))
}

pub async fn revoke(pool: &SqlitePool, participant_id: i64) -> Result<()> {
    ConsentRepository::new(pool).revoke(participant_id).await
}
