use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One attendee card. Built once by the generator and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    pub company: String,
    pub role: String,
    pub email: String,
    pub ticket_type: String,
}

impl ParticipantRecord {
    /// Field values in the same order as `protocol::CARD_LABELS`.
    pub fn field_values(&self) -> [&str; 5] {
        [
            &self.name,
            &self.company,
            &self.role,
            &self.email,
            &self.ticket_type,
        ]
    }
}
