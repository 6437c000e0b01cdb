use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::handlers::{grant_consent, revoke_consent};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(grant_consent))
        .route("/:participant_id", delete(revoke_consent))
}
