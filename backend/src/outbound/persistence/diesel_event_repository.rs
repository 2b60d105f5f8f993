//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use events_dto::EventId;
use tracing::debug;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, NewEvent};

use super::models::{EventRow, EventUpsert, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    EventRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => EventRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => EventRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EventRepositoryError::connection("database connection error")
        }
        _ => EventRepositoryError::query("database error"),
    }
}

fn row_to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    let id = EventId::new(row.id).map_err(|err| {
        EventRepositoryError::query(format!("stored event has invalid id {}: {err}", row.id))
    })?;
    Ok(Event::from_parts(
        id,
        row.first_name,
        row.last_name,
        row.email,
        row.date,
    ))
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEventRow {
            first_name: &event.first_name,
            last_name: &event.last_name,
            email: &event.email,
            date: event.date,
        };

        let inserted: EventRow = diesel::insert_into(events::table)
            .values(&row)
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_event(inserted)
    }

    async fn find(&self) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .order(events::id.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn find_one(&self, id: EventId) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EventRow> = events::table
            .find(id.get())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_event).transpose()
    }

    async fn save(&self, event: &Event) -> Result<Event, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = EventUpsert {
            id: event.id().get(),
            first_name: event.first_name(),
            last_name: event.last_name(),
            email: event.email(),
            date: event.date(),
        };

        let saved: EventRow = diesel::insert_into(events::table)
            .values(&row)
            .on_conflict(events::id)
            .do_update()
            .set((
                events::first_name.eq(excluded(events::first_name)),
                events::last_name.eq(excluded(events::last_name)),
                events::email.eq(excluded(events::email)),
                events::date.eq(excluded(events::date)),
            ))
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_event(saved)
    }

    async fn remove(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(events::table.find(event.id().get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
