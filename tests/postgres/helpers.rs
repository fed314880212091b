//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Each test gets its own schema on the server named by
//! [`TEST_DATABASE_URL_ENV`]. Tests return early when the variable is unset.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use eyre::WrapErr;
use mockable::Clock;
use rstest::fixture;
use taskboard::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{OwnerId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    services::{CreateSubtaskRequest, CreateTaskRequest, TaskLifecycleService},
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Environment variable naming the server used by these tests.
pub const TEST_DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

/// SQL to create the tasks table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2025-01-01-000000_create_tasks/up.sql");

/// Service type used by `PostgreSQL` integration tests.
pub type PgService = TaskLifecycleService<PostgresTaskRepository, TickingClock>;

/// Clock that moves one second forward on every reading.
///
/// Whole seconds survive the microsecond precision of `TIMESTAMPTZ`, and the
/// strictly increasing readings keep creation order deterministic.
#[derive(Debug)]
pub struct TickingClock {
    next: Mutex<DateTime<Utc>>,
}

impl TickingClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock");
        let now = *next;
        *next += Duration::seconds(1);
        now
    }
}

/// Points every pooled connection at the test's schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Schema created for one test and dropped with everything in it afterwards.
pub struct TestSchema {
    database_url: String,
    name: String,
}

impl TestSchema {
    fn create(database_url: &str) -> Result<Self, eyre::Report> {
        let name = format!("taskboard_test_{}", Uuid::new_v4().simple());
        let mut conn = PgConnection::establish(database_url)
            .wrap_err_with(|| format!("connect to {TEST_DATABASE_URL_ENV}"))?;
        let prepare = format!("CREATE SCHEMA {name}; SET search_path TO {name};");
        conn.batch_execute(&prepare)?;
        conn.batch_execute(CREATE_TASKS_SQL).wrap_err("apply tasks migration")?;
        Ok(Self {
            database_url: database_url.to_owned(),
            name,
        })
    }

    fn pool(&self) -> Result<TaskPgPool, eyre::Report> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        let pool = Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath(self.name.clone())))
            .build(manager)?;
        Ok(pool)
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.database_url)
            .map_err(eyre::Report::from)
            .and_then(|mut conn| {
                conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name))
                    .map_err(eyre::Report::from)
            });
        if let Err(err) = dropped {
            tracing::warn!(schema = %self.name, error = %err, "failed to drop test schema");
        }
    }
}

/// Service and repository over a freshly migrated schema.
pub struct PgContext {
    /// Service under test.
    pub service: PgService,
    /// Repository backing the service.
    pub repository: Arc<PostgresTaskRepository>,
    _schema: TestSchema,
}

/// Provides a migrated schema, or `None` when no server is configured.
///
/// # Errors
///
/// Returns an error if the server is configured but cannot be prepared.
#[fixture]
pub fn pg_context() -> Result<Option<PgContext>, eyre::Report> {
    init_tracing();
    let Ok(database_url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        tracing::warn!("{TEST_DATABASE_URL_ENV} is unset; skipping PostgreSQL test");
        return Ok(None);
    };

    let schema = TestSchema::create(&database_url)?;
    let repository = Arc::new(PostgresTaskRepository::new(schema.pool()?));
    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid clock start"))?;
    Ok(Some(PgContext {
        service: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(TickingClock::starting_at(start)),
        ),
        repository,
        _schema: schema,
    }))
}

/// Provides an owner identity for tests.
#[fixture]
pub fn owner() -> OwnerId {
    OwnerId::new()
}

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a top-level task with the given title.
///
/// # Errors
///
/// Returns an error if validation or storage fails.
pub async fn create_task(
    service: &PgService,
    owner: OwnerId,
    title: &str,
) -> Result<Task, eyre::Report> {
    Ok(service
        .create_task(owner, CreateTaskRequest::new(title))
        .await?)
}

/// Creates a subtask with the given title under `parent`.
///
/// # Errors
///
/// Returns an error if validation or storage fails.
pub async fn create_subtask(
    service: &PgService,
    owner: OwnerId,
    parent: &Task,
    title: &str,
) -> Result<Task, eyre::Report> {
    Ok(service
        .create_subtask(owner, CreateSubtaskRequest::new(parent.id(), title))
        .await?)
}

/// Builds a task that bypasses the service, for storing rows directly.
///
/// # Errors
///
/// Returns an error if `title` is invalid.
pub fn persisted_task(
    owner_id: OwnerId,
    parent_id: Option<TaskId>,
    title: &str,
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
) -> Result<Task, eyre::Report> {
    let created_at = Utc
        .with_ymd_and_hms(2025, 2, 1, 8, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid creation time"))?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        owner_id,
        parent_id,
        title: TaskTitle::new(title)?,
        description: None,
        priority: TaskPriority::Low,
        status,
        due_date: None,
        completed_at,
        created_at,
        updated_at: created_at,
    }))
}
