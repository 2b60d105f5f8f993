//! Diesel row structs for the `events` table.
//!
//! Internal to the persistence adapter; the domain never sees these types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::events;

/// Row read from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Insert without an id; the sequence assigns one.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub date: DateTime<Utc>,
}

/// Full row written by upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct EventUpsert<'a> {
    pub id: i64,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub date: DateTime<Utc>,
}
