use std::sync::Arc;

use chrono::{Duration, Utc};
use roster::RosterConfig;
use shared::{
    domain::SessionId,
    error::{ApiError, ErrorCode},
    protocol::{NavDirection, PageView},
};
use tracing::{debug, info, warn};

pub mod session;
pub mod store;

pub use session::{credentials_match, LoginOutcome, SessionState};
pub use store::SessionStore;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials, please try again.";

#[derive(Clone)]
pub struct ViewerContext {
    pub sessions: SessionStore,
    pub roster: Arc<RosterConfig>,
}

impl ViewerContext {
    pub fn new(roster: RosterConfig) -> Result<Self, ApiError> {
        roster
            .validate()
            .map_err(|e| ApiError::new(ErrorCode::Internal, e.to_string()))?;
        Ok(Self {
            sessions: SessionStore::new(),
            roster: Arc::new(roster),
        })
    }
}

/// What a surface should draw for a session right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    SignedOut,
    Roster(PageView),
}

pub async fn open_session(ctx: &ViewerContext) -> Result<SessionId, ApiError> {
    let state = {
        let mut rng = rand::thread_rng();
        SessionState::open(&mut rng, &ctx.roster, Utc::now()).map_err(internal)?
    };
    let session_id = SessionId::new_random();
    let participants = state.participants().len();
    ctx.sessions.insert(session_id, state).await;
    info!(%session_id, participants, "session opened");
    Ok(session_id)
}

pub async fn submit_login(
    ctx: &ViewerContext,
    session_id: SessionId,
    username: &str,
    password: &str,
) -> Result<PageView, ApiError> {
    let roster = Arc::clone(&ctx.roster);
    let outcome = ctx
        .sessions
        .with_session(session_id, |state| {
            state.touch(Utc::now());
            match state.login(username, password, &roster) {
                LoginOutcome::Accepted => Ok(state.page_view()),
                LoginOutcome::Rejected => Err(ApiError::new(
                    ErrorCode::InvalidCredentials,
                    INVALID_CREDENTIALS_MESSAGE,
                )),
            }
        })
        .await
        .ok_or_else(session_not_found)?;

    match &outcome {
        Ok(view) => info!(%session_id, total_pages = view.total_pages, "login accepted"),
        Err(_) => warn!(%session_id, "login rejected"),
    }
    outcome
}

/// Checks credentials without a session, so callers can open one only for accepted logins.
pub fn check_credentials(ctx: &ViewerContext, username: &str, password: &str) -> Result<(), ApiError> {
    if credentials_match(username, password, &ctx.roster) {
        return Ok(());
    }
    warn!("login rejected without a session");
    Err(ApiError::new(
        ErrorCode::InvalidCredentials,
        INVALID_CREDENTIALS_MESSAGE,
    ))
}

pub async fn navigate(
    ctx: &ViewerContext,
    session_id: SessionId,
    direction: NavDirection,
) -> Result<PageView, ApiError> {
    ctx.sessions
        .with_session(session_id, |state| {
            state.touch(Utc::now());
            if !state.is_authenticated() {
                return Err(unauthorized());
            }
            let moved = match direction {
                NavDirection::Back => state.back(),
                NavDirection::Next => state.next(),
            };
            debug!(
                %session_id,
                ?direction,
                moved,
                page = state.current_page(),
                "navigation"
            );
            Ok(state.page_view())
        })
        .await
        .ok_or_else(session_not_found)?
}

pub async fn go_back(ctx: &ViewerContext, session_id: SessionId) -> Result<PageView, ApiError> {
    navigate(ctx, session_id, NavDirection::Back).await
}

pub async fn go_next(ctx: &ViewerContext, session_id: SessionId) -> Result<PageView, ApiError> {
    navigate(ctx, session_id, NavDirection::Next).await
}

pub async fn current_page(ctx: &ViewerContext, session_id: SessionId) -> Result<PageView, ApiError> {
    match current_view(ctx, session_id).await? {
        SessionView::Roster(view) => Ok(view),
        SessionView::SignedOut => Err(unauthorized()),
    }
}

pub async fn current_view(
    ctx: &ViewerContext,
    session_id: SessionId,
) -> Result<SessionView, ApiError> {
    ctx.sessions
        .with_session(session_id, |state| {
            state.touch(Utc::now());
            if state.is_authenticated() {
                SessionView::Roster(state.page_view())
            } else {
                SessionView::SignedOut
            }
        })
        .await
        .ok_or_else(session_not_found)
}

/// Returns false when the session was already gone.
pub async fn end_session(ctx: &ViewerContext, session_id: SessionId) -> bool {
    let removed = ctx.sessions.remove(session_id).await.is_some();
    if removed {
        info!(%session_id, "session ended");
    }
    removed
}

pub async fn expire_idle_sessions(ctx: &ViewerContext, ttl: Duration) -> usize {
    let expired = ctx.sessions.prune_idle(Utc::now(), ttl).await;
    for session_id in &expired {
        info!(%session_id, "session expired");
    }
    expired.len()
}

fn session_not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "session not found")
}

fn unauthorized() -> ApiError {
    ApiError::new(ErrorCode::Unauthorized, "log in to view participants")
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
