use axum::{
    Router,
    routing::{get, post},
};

use crate::assets::serve_embedded;
use crate::handler::{AppState, create_submission, healthcheck, list_submissions};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/forms", post(create_submission))
        .route("/api/forms", get(list_submissions))
        .fallback(serve_embedded)
}
