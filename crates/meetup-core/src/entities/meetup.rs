//! Meetup entity - a scheduled gathering at one venue, for one event,
//! between two timestamps, with a participant cap and a single organizer

use std::fmt;
use std::str::FromStr;

use crate::entities::JoinedPerson;
use crate::error::DomainError;
use crate::value_objects::Interval;

/// Meetup lifecycle status
///
/// The only transition is `Open -> Cancelled`; cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeetupStatus {
    #[default]
    Open,
    Cancelled,
}

impl MeetupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MeetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetupStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown meetup status: {other}"
            ))),
        }
    }
}

/// Venue reference carried on a meetup snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetupVenue {
    pub id: i64,
    pub name: String,
}

/// Event reference carried on a meetup snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetupEvent {
    pub id: i64,
    pub name: String,
}

/// Organizer reference carried on a meetup snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetupOrganizer {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Inputs for creating a new meetup
#[derive(Debug, Clone)]
pub struct MeetupConfig {
    pub name: String,
    pub venue_id: i64,
    pub event_id: i64,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer_id: i64,
}

/// Meetup entity
///
/// Entities returned to callers are by-value snapshots at read time; the
/// venue/event/organizer references and the joined-persons projection are
/// filled by the storage layer on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meetup {
    /// Assigned on first save; zero until then
    pub id: i64,
    pub name: String,
    pub venue: MeetupVenue,
    pub event: MeetupEvent,
    pub start_ts: i64,
    pub end_ts: i64,
    pub max_persons: i32,
    pub organizer: MeetupOrganizer,
    /// `None` when the viewer is not allowed to see the list
    pub joined_persons: Option<Vec<JoinedPerson>>,
    pub joined_persons_count: i32,
    pub is_joined: bool,
    pub status: MeetupStatus,
    pub cancelled_reason: Option<String>,
    pub cancelled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Meetup {
    /// Create a new open meetup from validated inputs
    pub fn new(cfg: MeetupConfig) -> Result<Self, DomainError> {
        if cfg.name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if cfg.venue_id <= 0 || cfg.event_id <= 0 || cfg.organizer_id <= 0 {
            return Err(DomainError::Validation(
                "venue, event and organizer ids are required".to_string(),
            ));
        }
        if cfg.max_persons < 1 {
            return Err(DomainError::Validation(
                "max_persons must be at least 1".to_string(),
            ));
        }
        let interval = Interval::new(cfg.start_ts, cfg.end_ts)?;

        Ok(Self {
            id: 0,
            name: cfg.name,
            venue: MeetupVenue {
                id: cfg.venue_id,
                ..MeetupVenue::default()
            },
            event: MeetupEvent {
                id: cfg.event_id,
                ..MeetupEvent::default()
            },
            start_ts: interval.start(),
            end_ts: interval.end(),
            max_persons: cfg.max_persons,
            organizer: MeetupOrganizer {
                id: cfg.organizer_id,
                ..MeetupOrganizer::default()
            },
            joined_persons: Some(Vec::new()),
            joined_persons_count: 0,
            is_joined: false,
            status: MeetupStatus::Open,
            cancelled_reason: None,
            cancelled_at: None,
            created_at: 0,
            updated_at: 0,
        })
    }

    /// The meetup interval as a validated half-open interval
    pub fn interval(&self) -> Result<Interval, DomainError> {
        Interval::new(self.start_ts, self.end_ts)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == MeetupStatus::Cancelled
    }

    /// Whether the meetup has started as of `now` (epoch seconds)
    pub fn has_started(&self, now: i64) -> bool {
        now >= self.start_ts
    }

    /// Whether the meetup has finished as of `now` (epoch seconds)
    pub fn has_finished(&self, now: i64) -> bool {
        now >= self.end_ts
    }

    /// Whether the participant cap is reached
    pub fn is_full(&self) -> bool {
        self.joined_persons_count >= self.max_persons
    }

    /// Strip fields that are visible only to the organizer and participants
    ///
    /// The status itself stays visible; the joined-persons list and the
    /// cancellation metadata do not.
    pub fn redact_for_outsider(&mut self) {
        self.joined_persons = None;
        self.cancelled_reason = None;
        self.cancelled_at = None;
    }
}
