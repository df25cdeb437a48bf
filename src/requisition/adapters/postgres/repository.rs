//! `PostgreSQL` requisition repository implementation.

use super::{
    models::{NewRequisitionRow, RequisitionRow},
    schema::requisitions,
};
use crate::directory::domain::UserId;
use crate::requisition::{
    domain::{
        PersistedRequisitionData, Requisition, RequisitionId, RequisitionLine, RequisitionStatus,
    },
    ports::{RequisitionRepository, RequisitionRepositoryError, RequisitionRepositoryResult},
};
use crate::sequence::domain::{CategoryKind, CategoryRef, DocumentCode};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// Connection pool alias for the requisition context.
pub type RequisitionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed requisition repository.
#[derive(Debug, Clone)]
pub struct PostgresRequisitionRepository {
    pool: RequisitionPgPool,
}

impl PostgresRequisitionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RequisitionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RequisitionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RequisitionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RequisitionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RequisitionRepositoryError::persistence)?
    }
}

/// Changeset covering the mutable requisition columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = requisitions)]
struct RequisitionChangeset {
    pub category_kind: String,
    pub category_ref: uuid::Uuid,
    pub required_by: chrono::NaiveDate,
    pub lines: Value,
    pub approved_by: Option<uuid::Uuid>,
    pub issued_by: Option<uuid::Uuid>,
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
    pub issued_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub remark: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl RequisitionRepository for PostgresRequisitionRepository {
    async fn store(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()> {
        let requisition_id = requisition.id();
        let new_row = to_new_row(requisition)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(requisitions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RequisitionRepositoryError::Duplicate(requisition_id)
                    }
                    _ => RequisitionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, requisition: &Requisition) -> RequisitionRepositoryResult<()> {
        let requisition_id = requisition.id();
        let changeset = to_changeset(requisition)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                requisitions::table.filter(requisitions::id.eq(requisition_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(RequisitionRepositoryError::persistence)?;
            if updated == 0 {
                return Err(RequisitionRepositoryError::NotFound(requisition_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: RequisitionId,
    ) -> RequisitionRepositoryResult<Option<Requisition>> {
        self.run_blocking(move |connection| {
            let row = requisitions::table
                .filter(requisitions::id.eq(id.into_inner()))
                .select(RequisitionRow::as_select())
                .first::<RequisitionRow>(connection)
                .optional()
                .map_err(RequisitionRepositoryError::persistence)?;
            row.map(row_to_requisition).transpose()
        })
        .await
    }

    async fn remove(&self, id: RequisitionId) -> RequisitionRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                requisitions::table.filter(requisitions::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(RequisitionRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RequisitionRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn lines_to_value(lines: &[RequisitionLine]) -> RequisitionRepositoryResult<Value> {
    serde_json::to_value(lines).map_err(RequisitionRepositoryError::persistence)
}

fn to_new_row(requisition: &Requisition) -> RequisitionRepositoryResult<NewRequisitionRow> {
    Ok(NewRequisitionRow {
        id: requisition.id().into_inner(),
        code: requisition.code().as_str().to_owned(),
        category_kind: requisition.category().kind().as_str().to_owned(),
        category_ref: requisition.category().id(),
        required_by: requisition.required_by(),
        lines: lines_to_value(requisition.lines())?,
        requested_by: requisition.requested_by().into_inner(),
        status: requisition.status().as_str().to_owned(),
        remark: requisition.remark().map(str::to_owned),
        created_at: requisition.created_at(),
        updated_at: requisition.updated_at(),
    })
}

fn to_changeset(requisition: &Requisition) -> RequisitionRepositoryResult<RequisitionChangeset> {
    Ok(RequisitionChangeset {
        category_kind: requisition.category().kind().as_str().to_owned(),
        category_ref: requisition.category().id(),
        required_by: requisition.required_by(),
        lines: lines_to_value(requisition.lines())?,
        approved_by: requisition.approved_by().map(UserId::into_inner),
        issued_by: requisition.issued_by().map(UserId::into_inner),
        decided_at: requisition.decided_at(),
        issued_at: requisition.issued_at(),
        status: requisition.status().as_str().to_owned(),
        remark: requisition.remark().map(str::to_owned),
        updated_at: requisition.updated_at(),
    })
}

fn row_to_requisition(row: RequisitionRow) -> RequisitionRepositoryResult<Requisition> {
    let code = DocumentCode::from_stored(row.code)
        .map_err(RequisitionRepositoryError::invalid_persisted_data)?;
    let category_kind = CategoryKind::try_from(row.category_kind.as_str())
        .map_err(RequisitionRepositoryError::invalid_persisted_data)?;
    let status = RequisitionStatus::try_from(row.status.as_str())
        .map_err(RequisitionRepositoryError::invalid_persisted_data)?;
    let lines: Vec<RequisitionLine> = serde_json::from_value(row.lines)
        .map_err(RequisitionRepositoryError::invalid_persisted_data)?;

    let data = PersistedRequisitionData {
        id: RequisitionId::from_uuid(row.id),
        code,
        category: CategoryRef::new(category_kind, row.category_ref),
        required_by: row.required_by,
        lines,
        requested_by: UserId::from_uuid(row.requested_by),
        approved_by: row.approved_by.map(UserId::from_uuid),
        issued_by: row.issued_by.map(UserId::from_uuid),
        decided_at: row.decided_at,
        issued_at: row.issued_at,
        status,
        remark: row.remark,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Requisition::from_persisted(data))
}
