use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::leaderboard::{LeaderboardQuery, LeaderboardResponse};

use crate::error::WebError;
use crate::gates;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Leaderboard for the viewer's tier", body = LeaderboardResponse),
        (status = 403, description = "Consent missing")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    gates::ensure_consent(state.db.pool(), query.participant_id).await?;

    let response =
        services::personal_view(state.db.pool(), &state.leaderboard, query.participant_id).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/all",
    responses(
        (status = 200, description = "All tier buckets", body = LeaderboardResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard_all(State(state): State<AppState>) -> Result<Response, WebError> {
    let response = services::full_view(state.db.pool(), &state.leaderboard).await?;

    Ok(Json(response).into_response())
}
