use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantRecord, SessionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpened {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Back,
    Next,
}

/// Field labels shown for every participant, in display order.
pub const CARD_LABELS: [&str; 5] = ["Name", "Company", "Role", "Email", "Ticket type"];

/// Everything a surface needs to draw one page of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub page: usize,
    pub total_pages: usize,
    pub total_participants: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub participants: Vec<ParticipantRecord>,
    pub can_go_back: bool,
    pub can_go_next: bool,
}

impl PageView {
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
