//! Integration tests for `DieselEventRepository` against embedded PostgreSQL.
//!
//! Each test boots its own cluster through `pg-embed-setup-unpriv`, applies
//! the embedded migrations with the production migration runner and drives
//! the repository on a dedicated Tokio runtime.

use chrono::{DateTime, TimeZone, Utc};
use events_backend::domain::ports::EventRepository;
use events_backend::domain::{Event, EventChanges, NewEvent};
use events_backend::outbound::persistence::{
    DbPool, DieselEventRepository, PoolConfig, run_pending_migrations,
};
use events_dto::EventId;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, recreate_database};

const TEST_DB: &str = "diesel_event_repository_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselEventRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let connection = cluster.connection();
    recreate_database(&connection.database_url("postgres"), TEST_DB)?;
    let database_url = connection.database_url(TEST_DB);

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&database_url).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselEventRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

fn new_event(first_name: &str, date: DateTime<Utc>) -> NewEvent {
    NewEvent {
        first_name: first_name.to_owned(),
        last_name: "Doe".to_owned(),
        email: format!("{}@mail.com", first_name.to_lowercase()),
        date,
    }
}

impl TestContext {
    fn create(&self, first_name: &str, date: DateTime<Utc>) -> Event {
        self.runtime
            .block_on(self.repository.create(new_event(first_name, date)))
            .expect("create event")
    }

    fn find_one(&self, id: EventId) -> Option<Event> {
        self.runtime
            .block_on(self.repository.find_one(id))
            .expect("find event")
    }
}

#[rstest]
fn create_assigns_increasing_ids(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_assigns_increasing_ids skipped");
        return;
    };

    let first = context.create("John", at(2022, 4, 13, 20));
    let second = context.create("Jane", at(2022, 5, 1, 9));

    assert!(second.id().get() > first.id().get());
    assert_eq!(first.first_name(), "John");
    assert_eq!(first.email(), "john@mail.com");
    assert_eq!(context.find_one(first.id()), Some(first.clone()));
    assert_eq!(
        first.to_dto().date,
        "2022-04-13T20:00:00.000Z",
        "timestamptz round-trip keeps the instant"
    );
}

#[rstest]
fn save_updates_in_place_and_keeps_the_id(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: save_updates_in_place_and_keeps_the_id skipped");
        return;
    };

    let mut event = context.create("John", at(2022, 4, 13, 20));
    let id = event.id();
    event.apply(EventChanges {
        last_name: Some("Smith".to_owned()),
        date: Some(at(2023, 1, 2, 3)),
        ..EventChanges::default()
    });

    let saved = context
        .runtime
        .block_on(context.repository.save(&event))
        .expect("save event");

    assert_eq!(saved.id(), id);
    assert_eq!(saved.last_name(), "Smith");
    assert_eq!(saved.first_name(), "John");
    let stored = context.find_one(id).expect("event still stored");
    assert_eq!(stored, saved);
    let all = context
        .runtime
        .block_on(context.repository.find())
        .expect("list events");
    assert_eq!(all.len(), 1);
}

#[rstest]
fn save_inserts_an_unknown_id(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: save_inserts_an_unknown_id skipped");
        return;
    };

    let id = EventId::new(500).expect("positive id");
    let event = Event::from_parts(id, "Rafael", "Nadal", "test@test.es", at(2022, 4, 9, 19));

    let saved = context
        .runtime
        .block_on(context.repository.save(&event))
        .expect("upsert event");

    assert_eq!(saved, event);
    assert_eq!(context.find_one(id), Some(event));
}

#[rstest]
fn find_lists_events_in_ascending_id_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_lists_events_in_ascending_id_order skipped");
        return;
    };

    let created: Vec<EventId> = ["Ana", "Ben", "Cy"]
        .into_iter()
        .enumerate()
        .map(|(offset, name)| {
            let day = u32::try_from(offset).expect("small offset") + 1;
            context.create(name, at(2022, 6, day, 12)).id()
        })
        .collect();

    let listed: Vec<EventId> = context
        .runtime
        .block_on(context.repository.find())
        .expect("list events")
        .iter()
        .map(Event::id)
        .collect();

    assert_eq!(listed, created);
    assert!(listed.windows(2).all(|pair| pair[0].get() < pair[1].get()));
}

#[rstest]
fn remove_deletes_the_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: remove_deletes_the_row skipped");
        return;
    };

    let kept = context.create("Keep", at(2022, 7, 1, 8));
    let doomed = context.create("Drop", at(2022, 7, 2, 8));

    context
        .runtime
        .block_on(context.repository.remove(&doomed))
        .expect("remove event");

    assert_eq!(context.find_one(doomed.id()), None);
    assert_eq!(context.find_one(kept.id()), Some(kept));
}

#[rstest]
fn find_one_returns_none_for_missing_ids(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_one_returns_none_for_missing_ids skipped");
        return;
    };

    assert_eq!(context.find_one(EventId::new(999).expect("positive id")), None);
}
