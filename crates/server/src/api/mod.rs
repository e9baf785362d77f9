use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::SessionId,
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, NavDirection, PageView, SessionOpened},
};
use viewer_api::{current_page, end_session, navigate, open_session, submit_login};

use crate::app_state::AppState;

pub(crate) const SESSION_HEADER: &str = "x-session-id";

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/session", post(create_session).delete(delete_session))
        .route("/login", post(login))
        .route("/page", get(page))
        .route("/back", post(back))
        .route("/next", post(next))
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn failure(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

fn session_from_headers(headers: &HeaderMap) -> ApiResult<SessionId> {
    let raw = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            failure(ApiError::new(
                ErrorCode::Validation,
                format!("missing {SESSION_HEADER} header"),
            ))
        })?;
    raw.parse()
        .map_err(|_| failure(ApiError::new(ErrorCode::Validation, "malformed session id")))
}

async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionOpened>)> {
    let session_id = open_session(&state.viewer).await.map_err(failure)?;
    Ok((StatusCode::CREATED, Json(SessionOpened { session_id })))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let session_id = session_from_headers(&headers)?;
    if end_session(&state.viewer, session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(failure(ApiError::new(
            ErrorCode::NotFound,
            "session not found",
        )))
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<PageView>> {
    let session_id = session_from_headers(&headers)?;
    let view = submit_login(&state.viewer, session_id, &req.username, &req.password)
        .await
        .map_err(failure)?;
    Ok(Json(view))
}

async fn page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<PageView>> {
    let session_id = session_from_headers(&headers)?;
    let view = current_page(&state.viewer, session_id)
        .await
        .map_err(failure)?;
    Ok(Json(view))
}

async fn back(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<PageView>> {
    step(&state, &headers, NavDirection::Back).await
}

async fn next(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<PageView>> {
    step(&state, &headers, NavDirection::Next).await
}

async fn step(
    state: &AppState,
    headers: &HeaderMap,
    direction: NavDirection,
) -> ApiResult<Json<PageView>> {
    let session_id = session_from_headers(headers)?;
    let view = navigate(&state.viewer, session_id, direction)
        .await
        .map_err(failure)?;
    Ok(Json(view))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
