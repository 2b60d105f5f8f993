//! Event aggregate.
//!
//! Payloads are asserted against the shared DTO schemas before they reach
//! these types, so construction here only converts representations: date
//! strings become UTC instants and the id becomes an [`EventId`].

use chrono::{DateTime, Utc};
use events_dto::validators::{parse_date, to_iso_string};
use events_dto::{CreateEventDto, EventDto, EventId, UpdateEventDto};

use super::Error;

fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, Error> {
    parse_date(raw).ok_or_else(|| Error::bad_request(format!("Invalid date '{raw}'.")))
}

/// Stored event.
///
/// ## Invariants
/// - `id` is assigned by the repository and never changes.
/// - `date` is held in UTC and always emitted in canonical ISO form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    first_name: String,
    last_name: String,
    email: String,
    date: DateTime<Utc>,
}

impl Event {
    /// Attach a repository-assigned id to a new event.
    pub fn from_new(id: EventId, event: NewEvent) -> Self {
        let NewEvent {
            first_name,
            last_name,
            email,
            date,
        } = event;
        Self {
            id,
            first_name,
            last_name,
            email,
            date,
        }
    }

    /// Rebuild an event from stored parts.
    pub fn from_parts(
        id: EventId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            date,
        }
    }

    /// Repository-assigned identifier.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Given name of the attendee.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name of the attendee.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Contact address of the attendee.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// When the event takes place, in UTC.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Overwrite the fields present in `changes`; absent fields are kept.
    pub fn apply(&mut self, changes: EventChanges) {
        let EventChanges {
            first_name,
            last_name,
            email,
            date,
        } = changes;
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(date) = date {
            self.date = date;
        }
    }

    /// Wire representation with the date in canonical ISO form.
    pub fn to_dto(&self) -> EventDto {
        EventDto {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            date: to_iso_string(&self.date),
        }
    }
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        event.to_dto()
    }
}

/// Event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

impl TryFrom<CreateEventDto> for NewEvent {
    type Error = Error;

    fn try_from(dto: CreateEventDto) -> Result<Self, Self::Error> {
        let date = parse_event_date(&dto.date)?;
        Ok(Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            date,
        })
    }
}

/// Partial update of an event. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl TryFrom<UpdateEventDto> for EventChanges {
    type Error = Error;

    fn try_from(dto: UpdateEventDto) -> Result<Self, Self::Error> {
        let date = dto.date.as_deref().map(parse_event_date).transpose()?;
        Ok(Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            date,
        })
    }
}
