//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Stored events. `id` comes from a `BIGSERIAL` sequence.
    events (id) {
        id -> Int8,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        date -> Timestamptz,
    }
}
