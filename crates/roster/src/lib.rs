use std::ops::{Range, RangeInclusive};

use rand::{seq::SliceRandom, Rng};
use shared::domain::ParticipantRecord;
use thiserror::Error;
use tracing::debug;

pub const SHARED_PASSWORD: &str = "AgenticAndRobotic";
pub const PAGE_SIZE: usize = 4;
pub const MIN_PARTICIPANTS: usize = 18;
pub const MAX_PARTICIPANTS: usize = 26;
pub const EMAIL_DOMAIN_SUFFIX: &str = ".com";

pub const FIRST_NAMES: [&str; 26] = [
    "Alex", "Blair", "Casey", "Dana", "Evan", "Finley", "Gray", "Hadley", "Indigo", "Jordan",
    "Kai", "Logan", "Morgan", "Nico", "Oakley", "Parker", "Quinn", "Reese", "Sawyer", "Taylor",
    "Umber", "Val", "Winter", "Xen", "Yael", "Zion",
];

pub const LAST_NAMES: [&str; 26] = [
    "Archer", "Bennett", "Campbell", "Diaz", "Ellis", "Foster", "Garcia", "Hayes", "Iverson",
    "Johnson", "Keller", "Lee", "Morris", "Nguyen", "Olsen", "Porter", "Quintero", "Robinson",
    "Steele", "Turner", "Underwood", "Vega", "Walker", "Xu", "Young", "Zimmerman",
];

pub const COMPANIES: [&str; 26] = [
    "Apex Dynamics",
    "Brightpath AI",
    "CloudForge Labs",
    "Delta Quanta",
    "Evolvix Solutions",
    "FusionEdge Tech",
    "GreenHill Analytics",
    "Hyperion Robotics",
    "IonSphere Ventures",
    "JadeStream Inc",
    "Kinetic Nodes",
    "Luminary Works",
    "MetaPulse Systems",
    "NorthBridge Labs",
    "Optima Robotics",
    "Photon Creek",
    "QuantumShift",
    "RedOak Digital",
    "StellarSight",
    "TerraForge",
    "UrbanMint",
    "VaporTrail Tech",
    "Waveform AI",
    "XyloSoft",
    "YieldSphere",
    "ZenithWorks",
];

pub const ROLES: [&str; 6] = [
    "Software Engineer",
    "Data Scientist",
    "Automation Architect",
    "Business Analyst",
    "Product Manager",
    "DevOps Engineer",
];

pub const TICKET_TYPES: [&str; 3] = ["Standard", "VIP", "Speaker"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("participant range {min}..={max} is empty")]
    EmptyRange { min: usize, max: usize },
    #[error("pools hold {pool_size} entries but up to {requested} participants were requested")]
    PoolTooSmall { requested: usize, pool_size: usize },
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Fixed knobs of the roster. Not read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub password: String,
    pub page_size: usize,
    pub min_participants: usize,
    pub max_participants: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            password: SHARED_PASSWORD.to_string(),
            page_size: PAGE_SIZE,
            min_participants: MIN_PARTICIPANTS,
            max_participants: MAX_PARTICIPANTS,
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.page_size == 0 {
            return Err(RosterError::ZeroPageSize);
        }
        if self.min_participants == 0 || self.min_participants > self.max_participants {
            return Err(RosterError::EmptyRange {
                min: self.min_participants,
                max: self.max_participants,
            });
        }
        check_pool_capacity(self.max_participants)
    }

    pub fn participant_range(&self) -> RangeInclusive<usize> {
        self.min_participants..=self.max_participants
    }

    pub fn total_pages(&self, participant_count: usize) -> usize {
        total_pages(participant_count, self.page_size)
    }
}

/// Smallest of the three sampled pools; every participant consumes one entry of each.
pub fn pool_capacity() -> usize {
    FIRST_NAMES.len().min(LAST_NAMES.len()).min(COMPANIES.len())
}

fn check_pool_capacity(requested: usize) -> Result<(), RosterError> {
    let pool_size = pool_capacity();
    if requested > pool_size {
        return Err(RosterError::PoolTooSmall {
            requested,
            pool_size,
        });
    }
    Ok(())
}

pub fn generate_participants<R: Rng + ?Sized>(
    rng: &mut R,
    config: &RosterConfig,
) -> Result<Vec<ParticipantRecord>, RosterError> {
    config.validate()?;
    let count = rng.gen_range(config.participant_range());
    generate_participants_with_count(rng, count)
}

pub fn generate_participants_with_count<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Result<Vec<ParticipantRecord>, RosterError> {
    check_pool_capacity(count)?;

    let mut first_names = FIRST_NAMES.to_vec();
    let mut last_names = LAST_NAMES.to_vec();
    let mut companies = COMPANIES.to_vec();
    first_names.shuffle(rng);
    last_names.shuffle(rng);
    companies.shuffle(rng);

    let participants: Vec<ParticipantRecord> = (0..count)
        .map(|i| build_participant(i, first_names[i], last_names[i], companies[i]))
        .collect();
    debug!(count, "generated participant roster");
    Ok(participants)
}

fn build_participant(index: usize, first: &str, last: &str, company: &str) -> ParticipantRecord {
    ParticipantRecord {
        name: format!("{first} {last}"),
        company: company.to_string(),
        role: ROLES[index % ROLES.len()].to_string(),
        email: build_email(first, last, company),
        ticket_type: TICKET_TYPES[index % TICKET_TYPES.len()].to_string(),
    }
}

pub fn build_email(first: &str, last: &str, company: &str) -> String {
    format!(
        "{}.{}@{}{EMAIL_DOMAIN_SUFFIX}",
        first.to_lowercase(),
        last.to_lowercase(),
        normalize_company(company)
    )
}

pub fn normalize_company(company: &str) -> String {
    company
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn total_pages(participant_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    participant_count.div_ceil(page_size)
}

/// Index range of `page` (1-based), clamped to `len`. Out-of-range pages yield an empty range.
pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
