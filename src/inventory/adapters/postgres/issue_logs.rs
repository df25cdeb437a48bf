//! `PostgreSQL` issue log repository implementation.

use super::{
    models::{IssueLogRow, NewIssueLogRow},
    schema::issue_logs,
    stock::InventoryPgPool,
};
use crate::directory::domain::EmailAddress;
use crate::inventory::{
    domain::{IssueLog, IssueLogId, IssueLogStatus, PersistedIssueLogData, StockItemId},
    ports::{IssueLogRepository, IssueLogRepositoryError, IssueLogRepositoryResult},
};
use crate::sequence::domain::DocumentRef;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed issue log repository.
#[derive(Debug, Clone)]
pub struct PostgresIssueLogRepository {
    pool: InventoryPgPool,
}

impl PostgresIssueLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InventoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IssueLogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IssueLogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IssueLogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IssueLogRepositoryError::persistence)?
    }
}

#[async_trait]
impl IssueLogRepository for PostgresIssueLogRepository {
    async fn store(&self, log: &IssueLog) -> IssueLogRepositoryResult<()> {
        let log_id = log.id();
        let new_row = to_new_row(log)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(issue_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IssueLogRepositoryError::DuplicateIssueLog(log_id)
                    }
                    _ => IssueLogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, log: &IssueLog) -> IssueLogRepositoryResult<()> {
        let log_id = log.id();
        let row = to_new_row(log)?;

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(issue_logs::table.filter(issue_logs::id.eq(log_id.into_inner())))
                    .set((
                        issue_logs::returned.eq(row.returned),
                        issue_logs::lost_or_damaged.eq(row.lost_or_damaged),
                        issue_logs::returned_at.eq(row.returned_at),
                        issue_logs::status.eq(row.status),
                    ))
                    .execute(connection)
                    .map_err(IssueLogRepositoryError::persistence)?;
            if updated == 0 {
                return Err(IssueLogRepositoryError::NotFound(log_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: IssueLogId) -> IssueLogRepositoryResult<Option<IssueLog>> {
        self.run_blocking(move |connection| {
            let row = issue_logs::table
                .filter(issue_logs::id.eq(id.into_inner()))
                .select(IssueLogRow::as_select())
                .first::<IssueLogRow>(connection)
                .optional()
                .map_err(IssueLogRepositoryError::persistence)?;
            row.map(row_to_log).transpose()
        })
        .await
    }

    async fn find_by_source(
        &self,
        source: DocumentRef,
    ) -> IssueLogRepositoryResult<Vec<IssueLog>> {
        let payload =
            serde_json::to_value(source).map_err(IssueLogRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = issue_logs::table
                .filter(issue_logs::source.eq(&payload))
                .order(issue_logs::issued_at.asc())
                .select(IssueLogRow::as_select())
                .load::<IssueLogRow>(connection)
                .map_err(IssueLogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_log).collect()
        })
        .await
    }
}

fn to_new_row(log: &IssueLog) -> IssueLogRepositoryResult<NewIssueLogRow> {
    let source = serde_json::to_value(log.source()).map_err(IssueLogRepositoryError::persistence)?;
    let issued = i32::try_from(log.issued()).map_err(IssueLogRepositoryError::persistence)?;
    let returned = i32::try_from(log.returned()).map_err(IssueLogRepositoryError::persistence)?;
    let lost_or_damaged =
        i32::try_from(log.lost_or_damaged()).map_err(IssueLogRepositoryError::persistence)?;

    Ok(NewIssueLogRow {
        id: log.id().into_inner(),
        item: log.item().into_inner(),
        source,
        issued,
        returned,
        lost_or_damaged,
        issued_to: log.issued_to().as_str().to_owned(),
        issued_at: log.issued_at(),
        returned_at: log.returned_at(),
        status: log.status().as_str().to_owned(),
    })
}

fn row_to_log(row: IssueLogRow) -> IssueLogRepositoryResult<IssueLog> {
    let source = serde_json::from_value::<DocumentRef>(row.source)
        .map_err(IssueLogRepositoryError::invalid_persisted_data)?;
    let status = IssueLogStatus::try_from(row.status.as_str())
        .map_err(IssueLogRepositoryError::invalid_persisted_data)?;
    let issued =
        u32::try_from(row.issued).map_err(IssueLogRepositoryError::invalid_persisted_data)?;
    let returned =
        u32::try_from(row.returned).map_err(IssueLogRepositoryError::invalid_persisted_data)?;
    let lost_or_damaged = u32::try_from(row.lost_or_damaged)
        .map_err(IssueLogRepositoryError::invalid_persisted_data)?;
    let issued_to = EmailAddress::new(row.issued_to)
        .map_err(IssueLogRepositoryError::invalid_persisted_data)?;

    let data = PersistedIssueLogData {
        id: IssueLogId::from_uuid(row.id),
        item: StockItemId::from_uuid(row.item),
        source,
        issued,
        returned,
        lost_or_damaged,
        issued_to,
        issued_at: row.issued_at,
        returned_at: row.returned_at,
        status,
    };
    Ok(IssueLog::from_persisted(data))
}
