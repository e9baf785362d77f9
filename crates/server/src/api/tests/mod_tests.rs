use super::*;
use axum::{
    body::{self, Body},
    http::Request,
};
use roster::{RosterConfig, SHARED_PASSWORD};
use tower::ServiceExt;
use viewer_api::ViewerContext;

use crate::config::Settings;

fn test_app() -> Router {
    let viewer = ViewerContext::new(RosterConfig::default()).expect("viewer");
    let state = AppState::new(viewer, &Settings::default());
    crate::build_router(Arc::new(state))
}

async fn json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

async fn open(app: &Router) -> SessionId {
    let request = Request::post("/api/session")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    json::<SessionOpened>(response).await.session_id
}

async fn call(app: &Router, method: &str, path: &str, session_id: SessionId) -> axum::response::Response {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(SESSION_HEADER, session_id.to_string())
        .body(Body::empty())
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

async fn login_with(app: &Router, session_id: SessionId, password: &str) -> axum::response::Response {
    let request = Request::post("/api/login")
        .header(SESSION_HEADER, session_id.to_string())
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "alice", "password": password }).to_string(),
        ))
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

#[test]
fn error_codes_map_to_statuses() {
    assert_eq!(status_for(ErrorCode::InvalidCredentials), StatusCode::UNAUTHORIZED);
    assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
    assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(status_for(ErrorCode::Validation), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_for(ErrorCode::Internal),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn json_flow_pages_through_roster() {
    let app = test_app();
    let session_id = open(&app).await;

    let response = login_with(&app, session_id, SHARED_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first: PageView = json(response).await;
    assert_eq!(first.page, 1);
    assert_eq!(first.participants.len(), 4);
    assert_eq!(first.total_pages, first.total_participants.div_ceil(4));
    assert!(!first.can_go_back);

    let back: PageView = json(call(&app, "POST", "/api/back", session_id).await).await;
    assert_eq!(back.page, 1);

    for _ in 0..first.total_pages + 2 {
        let response = call(&app, "POST", "/api/next", session_id).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let last: PageView = json(call(&app, "POST", "/api/next", session_id).await).await;
    assert_eq!(last.page, last.total_pages);
    assert!(!last.can_go_next);
    assert_eq!(
        last.participants.len(),
        last.total_participants - 4 * (last.total_pages - 1)
    );

    let current: PageView = json(call(&app, "GET", "/api/page", session_id).await).await;
    assert_eq!(current, last);
}

#[tokio::test]
async fn wrong_password_returns_invalid_credentials() {
    let app = test_app();
    let session_id = open(&app).await;

    let response = login_with(&app, session_id, "guess").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err: ApiError = json(response).await;
    assert_eq!(err.code, ErrorCode::InvalidCredentials);

    let response = call(&app, "GET", "/api/page", session_id).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err: ApiError = json(response).await;
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn missing_or_malformed_session_header_is_validation_error() {
    let app = test_app();
    let request = Request::get("/api/page").body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::get("/api/page")
        .header(SESSION_HEADER, "nope")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = test_app();
    let session_id = open(&app).await;

    let response = call(&app, "DELETE", "/api/session", session_id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = call(&app, "DELETE", "/api/session", session_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = call(&app, "GET", "/api/page", session_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
