use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::admin::{OverrideResultRequest, SetMinorRequest};
use storage::dto::result::ResultResponse;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/results",
    responses(
        (status = 200, description = "All stored results", body = [ResultResponse]),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_results(State(state): State<AppState>) -> Result<Response, WebError> {
    let response = services::list_results(state.db.pool()).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/results/{participant_id}",
    params(("participant_id" = i64, Path, description = "Participant identifier")),
    request_body = OverrideResultRequest,
    responses(
        (status = 200, description = "Result overwritten", body = ResultResponse),
        (status = 404, description = "Participant has no stored result")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn override_result(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
    Json(request): Json<OverrideResultRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let response = services::override_result(
        state.db.pool(),
        participant_id,
        request.best_series,
        request.accessory_tens,
    )
    .await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/results/{participant_id}",
    params(("participant_id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 204, description = "Result deleted"),
        (status = 404, description = "Participant has no stored result")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn delete_result(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_result(state.db.pool(), participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/admin/participants/{participant_id}/minor",
    params(("participant_id" = i64, Path, description = "Participant identifier")),
    request_body = SetMinorRequest,
    responses(
        (status = 204, description = "Minor flag updated"),
        (status = 404, description = "No consent record for this participant")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn set_minor(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
    Json(request): Json<SetMinorRequest>,
) -> Result<Response, WebError> {
    services::set_minor(state.db.pool(), participant_id, request.is_minor).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
