//! Event row model

use sqlx::FromRow;

use meetup_core::entities::Event;

/// Database model for the event table
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            name: row.name,
        }
    }
}
