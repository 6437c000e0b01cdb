use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::get_result;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:participant_id", get(get_result))
}
