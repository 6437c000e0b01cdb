use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::result::ResultResponse;

use crate::error::WebError;
use crate::gates;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/results/{participant_id}",
    params(("participant_id" = i64, Path, description = "Participant identifier")),
    responses(
        (status = 200, description = "Current stored result", body = ResultResponse),
        (status = 403, description = "Consent missing"),
        (status = 404, description = "No result submitted yet")
    ),
    tag = "results"
)]
pub async fn get_result(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<Response, WebError> {
    gates::ensure_consent(state.db.pool(), participant_id).await?;

    let response = services::get_result(state.db.pool(), participant_id).await?;

    Ok(Json(response).into_response())
}
