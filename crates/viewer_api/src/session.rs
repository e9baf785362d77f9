use chrono::{DateTime, Utc};
use rand::Rng;
use roster::{generate_participants, page_bounds, RosterConfig, RosterError};
use shared::{domain::ParticipantRecord, protocol::PageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected,
}

pub fn credentials_match(username: &str, password: &str, config: &RosterConfig) -> bool {
    !username.trim().is_empty() && password == config.password
}

#[derive(Debug, Clone)]
pub struct SessionState {
    authenticated: bool,
    current_page: usize,
    participants: Vec<ParticipantRecord>,
    page_size: usize,
    username: Option<String>,
    last_seen: DateTime<Utc>,
}

impl SessionState {
    pub fn open<R: Rng + ?Sized>(
        rng: &mut R,
        config: &RosterConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, RosterError> {
        let mut state = Self {
            authenticated: false,
            current_page: 1,
            participants: Vec::new(),
            page_size: config.page_size,
            username: None,
            last_seen: now,
        };
        state.ensure_participants(rng, config)?;
        Ok(state)
    }

    /// Generates the roster on first call; later calls leave it untouched.
    pub fn ensure_participants<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &RosterConfig,
    ) -> Result<bool, RosterError> {
        if !self.participants.is_empty() {
            return Ok(false);
        }
        self.participants = generate_participants(rng, config)?;
        self.page_size = config.page_size;
        self.current_page = 1;
        Ok(true)
    }

    pub fn login(&mut self, username: &str, password: &str, config: &RosterConfig) -> LoginOutcome {
        let username = username.trim();
        if !credentials_match(username, password, config) {
            self.authenticated = false;
            return LoginOutcome::Rejected;
        }
        self.authenticated = true;
        self.current_page = 1;
        self.username = Some(username.to_string());
        LoginOutcome::Accepted
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Returns whether the page moved.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn page_slice(&self) -> &[ParticipantRecord] {
        &self.participants[page_bounds(self.current_page, self.page_size, self.participants.len())]
    }

    pub fn page_view(&self) -> PageView {
        PageView {
            page: self.current_page,
            total_pages: self.total_pages(),
            total_participants: self.participants.len(),
            username: self.username.clone(),
            participants: self.page_slice().to_vec(),
            can_go_back: self.can_go_back(),
            can_go_next: self.can_go_next(),
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        roster::total_pages(self.participants.len(), self.page_size)
    }

    pub fn participants(&self) -> &[ParticipantRecord] {
        &self.participants
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
