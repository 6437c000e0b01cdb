use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::middleware::auth::require_api_key;
use crate::state::AppState;

use super::handlers::{delete_result, list_results, override_result, set_minor};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/results", get(list_results))
        .route(
            "/results/:participant_id",
            put(override_result).delete(delete_result),
        )
        .route("/participants/:participant_id/minor", put(set_minor))
        .layer(middleware::from_fn_with_state(state, require_api_key))
}
