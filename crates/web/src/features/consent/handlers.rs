use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::consent::{ConsentResponse, GrantConsentRequest};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/consent",
    request_body = GrantConsentRequest,
    responses(
        (status = 200, description = "Consent recorded", body = ConsentResponse),
        (status = 400, description = "Malformed request")
    ),
    tag = "consent"
)]
pub async fn grant_consent(
    State(state): State<AppState>,
    Json(request): Json<GrantConsentRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let response = services::grant(state.db.pool(), &request).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/consent/{participant_id}",
    params(("participant_id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 204, description = "Consent revoked, record retained"),
        (status = 404, description = "No consent record for this participant")
    ),
    tag = "consent"
)]
pub async fn revoke_consent(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Response, WebError> {
    services::revoke(state.db.pool(), participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
