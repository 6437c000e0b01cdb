use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::submission::{SubmissionResponse, SubmitResultRequest};
use validator::Validate;

use crate::error::WebError;
use crate::gates;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = SubmitResultRequest,
    responses(
        (status = 200, description = "Submission processed", body = SubmissionResponse),
        (status = 400, description = "Malformed request"),
        (status = 403, description = "Consent missing or not a group member")
    ),
    tag = "submissions"
)]
pub async fn submit_result(
    State(state): State<AppState>,
    Json(request): Json<SubmitResultRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    state.roster.check(request.participant_id)?;
    gates::ensure_consent(state.db.pool(), request.participant_id).await?;

    let response = services::submit(
        state.db.pool(),
        request.into_new_result(),
        &state.promotion,
    )
    .await?;

    Ok(Json(response).into_response())
}
