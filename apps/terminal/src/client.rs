use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::SessionId,
    error::{ApiError, ApiException},
    protocol::{LoginRequest, PageView, SessionOpened},
};
use tracing::{debug, warn};

const SESSION_HEADER: &str = "x-session-id";

pub struct ViewerClient {
    http: Client,
    server_url: String,
    session_id: Option<SessionId>,
}

impl ViewerClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
            session_id: None,
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub async fn open_session(&mut self) -> Result<SessionId> {
        let res = self
            .http
            .post(format!("{}/api/session", self.server_url))
            .send()
            .await?;
        let body: SessionOpened = decode(res).await?;
        debug!(session_id = %body.session_id, "session opened");
        self.session_id = Some(body.session_id);
        Ok(body.session_id)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<PageView> {
        let session_id = match self.session_id {
            Some(id) => id,
            None => self.open_session().await?,
        };
        let res = self
            .http
            .post(format!("{}/api/login", self.server_url))
            .header(SESSION_HEADER, session_id.to_string())
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        decode(res).await
    }

    /// Like `login`, but ends the server-side session when the login is rejected.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<PageView> {
        match self.login(username, password).await {
            Ok(view) => Ok(view),
            Err(err) => {
                if let Err(close_err) = self.close().await {
                    warn!(%close_err, "failed to end rejected session");
                }
                Err(err)
            }
        }
    }

    pub async fn page(&self) -> Result<PageView> {
        let res = self
            .http
            .get(format!("{}/api/page", self.server_url))
            .header(SESSION_HEADER, self.require_session()?.to_string())
            .send()
            .await?;
        decode(res).await
    }

    pub async fn next(&self) -> Result<PageView> {
        self.step("next").await
    }

    pub async fn back(&self) -> Result<PageView> {
        self.step("back").await
    }

    pub async fn close(&mut self) -> Result<()> {
        let Some(session_id) = self.session_id.take() else {
            return Ok(());
        };
        self.http
            .delete(format!("{}/api/session", self.server_url))
            .header(SESSION_HEADER, session_id.to_string())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn step(&self, action: &str) -> Result<PageView> {
        let res = self
            .http
            .post(format!("{}/api/{action}", self.server_url))
            .header(SESSION_HEADER, self.require_session()?.to_string())
            .send()
            .await?;
        decode(res).await
    }

    fn require_session(&self) -> Result<SessionId> {
        self.session_id
            .ok_or_else(|| anyhow!("no session; log in first"))
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    if res.status().is_success() {
        return Ok(res.json().await?);
    }
    let status = res.status();
    match res.json::<ApiError>().await {
        Ok(err) => Err(ApiException::from(err).into()),
        Err(_) => Err(anyhow!("server returned {status}")),
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
