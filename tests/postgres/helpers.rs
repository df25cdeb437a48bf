//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{Connection, PgConnection};
use mockable::Clock;
use once_cell::sync::Lazy;
use std::env;
use std::io;
use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Runtime;

/// Boxed error type shared by the integration suites.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection pool type shared by every adapter under test.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "TEST_DATABASE_URL";

/// SQL creating the directory and counter tables.
pub const DIRECTORY_SQL: &str =
    include_str!("../../migrations/2026-07-20-000000_create_directory_and_sequences/up.sql");

/// SQL creating the notification table and its dedup index.
pub const NOTIFICATIONS_SQL: &str =
    include_str!("../../migrations/2026-07-20-000001_create_notifications/up.sql");

/// SQL creating the requisition and purchase request tables.
pub const WORKFLOW_DOCUMENTS_SQL: &str =
    include_str!("../../migrations/2026-07-21-000000_create_workflow_documents/up.sql");

/// SQL creating the purchase order and invoice tables.
pub const ORDERING_SQL: &str =
    include_str!("../../migrations/2026-07-28-000000_create_ordering/up.sql");

/// SQL creating the stock, restock, and issue log tables.
pub const INVENTORY_SQL: &str =
    include_str!("../../migrations/2026-07-28-000001_create_inventory/up.sql");

/// Reset statement dropping every table the migrations create.
const RESET_SQL: &str = "
    DROP TABLE IF EXISTS issue_logs CASCADE;
    DROP TABLE IF EXISTS restocks CASCADE;
    DROP TABLE IF EXISTS stock_items CASCADE;
    DROP TABLE IF EXISTS invoices CASCADE;
    DROP TABLE IF EXISTS purchase_orders CASCADE;
    DROP TABLE IF EXISTS purchase_requests CASCADE;
    DROP TABLE IF EXISTS requisitions CASCADE;
    DROP TABLE IF EXISTS notifications CASCADE;
    DROP TABLE IF EXISTS user_accounts CASCADE;
    DROP TABLE IF EXISTS sequences CASCADE;
";

/// The suites share one database, so they run one at a time.
static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// A freshly migrated test database held exclusively for one test.
pub struct TestDatabase {
    /// Pool connected to the migrated database.
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

/// Connects to the configured test database and resets its schema.
///
/// Returns `None` when `TEST_DATABASE_URL` is unset, letting the test pass
/// without a database.
///
/// # Errors
///
/// Returns an error when the connection, reset, or migration fails.
pub fn test_database() -> Result<Option<TestDatabase>, BoxError> {
    let Ok(url) = env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let guard = DB_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let mut connection = PgConnection::establish(&url)?;
    connection.batch_execute(RESET_SQL)?;
    connection.batch_execute(DIRECTORY_SQL)?;
    connection.batch_execute(NOTIFICATIONS_SQL)?;
    connection.batch_execute(WORKFLOW_DOCUMENTS_SQL)?;
    connection.batch_execute(ORDERING_SQL)?;
    connection.batch_execute(INVENTORY_SQL)?;
    drop(connection);

    let pool = Pool::builder()
        .max_size(2)
        .build(ConnectionManager::new(url))?;
    Ok(Some(TestDatabase {
        pool,
        _guard: guard,
    }))
}

/// Clock pinned to a fixed instant, matching the in-memory suites.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Provides the pinned test clock.
#[must_use]
pub fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 8, 24, 10, 30, 0)
            .single()
            .expect("valid instant"),
    )
}

/// The date the pinned clock reports.
#[must_use]
pub fn today() -> NaiveDate {
    clock().0.date_naive()
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[rstest::fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
