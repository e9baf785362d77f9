use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use shared::{domain::SessionId, error::ErrorCode, protocol::NavDirection};
use tracing::debug;
use viewer_api::{
    check_credentials, current_view, end_session, navigate, open_session, submit_login,
    SessionView,
};

use crate::{
    api::{failure, ApiResult},
    app_state::AppState,
    render,
};

pub(crate) const SESSION_COOKIE: &str = "roster_session";

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

async fn live_session(state: &AppState, headers: &HeaderMap) -> Option<SessionId> {
    let session_id = session_cookie(headers)?;
    state
        .viewer
        .sessions
        .contains(session_id)
        .await
        .then_some(session_id)
}

fn set_session_cookie(response: &mut Response, session_id: SessionId) {
    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

pub(crate) async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    // Sessions are only opened by an accepted login; anonymous visitors just see the form.
    let Some(session_id) = live_session(&state, &headers).await else {
        return Ok(Html(render::login_page(&state.branding, None)).into_response());
    };
    let page = match current_view(&state.viewer, session_id)
        .await
        .map_err(failure)?
    {
        SessionView::SignedOut => render::login_page(&state.branding, None),
        SessionView::Roster(view) => render::participants_page(&state.branding, &view),
    };
    Ok(Html(page).into_response())
}

fn rejected_login(state: &AppState, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(render::login_page(&state.branding, Some(message))),
    )
        .into_response()
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let (session_id, fresh) = match live_session(&state, &headers).await {
        Some(session_id) => (session_id, false),
        None => {
            if let Err(err) = check_credentials(&state.viewer, &form.username, &form.password) {
                return Ok(rejected_login(&state, &err.message));
            }
            (open_session(&state.viewer).await.map_err(failure)?, true)
        }
    };
    let mut response =
        match submit_login(&state.viewer, session_id, &form.username, &form.password).await {
            Ok(_) => Redirect::to("/").into_response(),
            Err(err) if err.code == ErrorCode::InvalidCredentials => {
                rejected_login(&state, &err.message)
            }
            Err(err) => return Err(failure(err)),
        };
    if fresh {
        set_session_cookie(&mut response, session_id);
    }
    Ok(response)
}

pub(crate) async fn back(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    step(&state, &headers, NavDirection::Back).await
}

pub(crate) async fn next(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    step(&state, &headers, NavDirection::Next).await
}

async fn step(state: &AppState, headers: &HeaderMap, direction: NavDirection) -> Redirect {
    if let Some(session_id) = live_session(state, headers).await {
        if let Err(err) = navigate(&state.viewer, session_id, direction).await {
            debug!(%session_id, code = ?err.code, "navigation ignored");
        }
    }
    Redirect::to("/")
}

pub(crate) async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(session_id) = session_cookie(&headers) {
        end_session(&state.viewer, session_id).await;
    }
    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("roster_session=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
    );
    response
}

pub(crate) async fn logo(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read(&state.logo_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
