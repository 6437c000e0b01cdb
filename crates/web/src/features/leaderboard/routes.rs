use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{get_leaderboard, get_leaderboard_all};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/all", get(get_leaderboard_all))
}
