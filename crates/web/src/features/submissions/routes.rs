use axum::{Router, routing::post};

use crate::state::AppState;

use super::handlers::submit_result;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_result))
}
