use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::api::ApiResponse;
use crate::db::Database;
use crate::error::SubmissionError;
use crate::validate::{SubmissionPayload, validate};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "ok": true }))
}

pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Response, SubmissionError> {
    let new = validate(payload).map_err(SubmissionError::Validation)?;
    let stored = state.db.insert_submission(&new).await?;

    info!(id = stored.id, "stored submission");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(stored))).into_response())
}

pub async fn list_submissions(State(state): State<AppState>) -> Result<Response, SubmissionError> {
    let submissions = state.db.list_submissions().await?;

    info!(count = submissions.len(), "listed submissions");
    Ok((StatusCode::OK, Json(ApiResponse::new(submissions))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let cfg = Config::new(":memory:", None, 0);
        let db = Arc::new(Database::new(&cfg).await.unwrap());
        AppState { db }
    }

    async fn test_app() -> axum::Router {
        routes::routes().with_state(test_state().await)
    }

    async fn post_form(app: &axum::Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/forms")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = test_app().await;
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn valid_submission_is_stored_and_echoed() {
        let app = test_app().await;
        let (status, body) = post_form(
            &app,
            json!({ "name": "Alice Smith", "email": "alice@example.com", "message": "hi" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["name"], json!("Alice Smith"));
        assert_eq!(body["data"]["email"], json!("alice@example.com"));
        assert_eq!(body["data"]["message"], json!("hi"));
        assert!(body["data"]["id"].is_i64());
        assert!(body["data"]["createdAt"].is_string());
        assert!(body["data"]["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn invalid_submission_returns_errors_and_stores_nothing() {
        let app = test_app().await;
        let (status, body) = post_form(&app, json!({ "name": "Al", "email": "nope" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e.as_str().unwrap().contains("Name")));
        assert!(errors.iter().any(|e| e.as_str().unwrap() == "Invalid email"));

        let (_, listing) = get_json(&app, "/api/forms").await;
        assert_eq!(listing["data"], json!([]));
    }

    #[tokio::test]
    async fn email_is_normalized_before_storage() {
        let app = test_app().await;
        let (status, body) =
            post_form(&app, json!({ "name": "Alice", "email": " User@Example.com " })).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["email"], json!("user@example.com"));
        assert_eq!(body["data"]["message"], json!(""));
    }

    #[tokio::test]
    async fn store_failure_returns_opaque_500() {
        let state = test_state().await;
        let app = routes::routes().with_state(state.clone());
        state
            .db
            .connection()
            .execute("DROP TABLE submissions", ())
            .await
            .unwrap();

        let (status, body) = post_form(&app, json!({ "name": "Alice", "email": "a@b.co" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Server error" }));

        let (status, body) = get_json(&app, "/api/forms").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Server error" }));
    }

    #[tokio::test]
    async fn listing_returns_newest_first() {
        let app = test_app().await;
        for i in 1..=3 {
            let (status, _) = post_form(
                &app,
                json!({ "name": format!("Sender {i}"), "email": format!("s{i}@example.com") }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = get_json(&app, "/api/forms").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let listed = body["data"].as_array().unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0]["name"], json!("Sender 3"));
        assert_eq!(listed[2]["name"], json!("Sender 1"));
    }
}
