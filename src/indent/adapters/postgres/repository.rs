//! `PostgreSQL` purchase request repository implementation.

use super::{
    models::{NewPurchaseRequestRow, PurchaseRequestRow},
    schema::purchase_requests,
};
use crate::directory::domain::UserId;
use crate::indent::{
    domain::{
        PersistedPurchaseRequestData, PurchaseRequest, PurchaseRequestId, PurchaseRequestKind,
        PurchaseRequestLine, PurchaseRequestStatus,
    },
    ports::{
        PurchaseRequestRepository, PurchaseRequestRepositoryError,
        PurchaseRequestRepositoryResult,
    },
};
use crate::sequence::domain::{CategoryKind, CategoryRef, DocumentCode};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// Connection pool alias for the purchase request context.
pub type PurchaseRequestPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed purchase request repository.
#[derive(Debug, Clone)]
pub struct PostgresPurchaseRequestRepository {
    pool: PurchaseRequestPgPool,
}

impl PostgresPurchaseRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PurchaseRequestPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PurchaseRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PurchaseRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(PurchaseRequestRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PurchaseRequestRepositoryError::persistence)?
    }
}

/// Changeset covering the mutable purchase request columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = purchase_requests)]
struct PurchaseRequestChangeset {
    pub category_kind: String,
    pub category_ref: uuid::Uuid,
    pub required_by: chrono::NaiveDate,
    pub lines: Value,
    pub approved_by: Option<uuid::Uuid>,
    pub ordered_by: Option<uuid::Uuid>,
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ordered_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub remark: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl PurchaseRequestRepository for PostgresPurchaseRequestRepository {
    async fn store(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()> {
        let request_id = request.id();
        let new_row = to_new_row(request)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(purchase_requests::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PurchaseRequestRepositoryError::Duplicate(request_id)
                    }
                    _ => PurchaseRequestRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<()> {
        let request_id = request.id();
        let changeset = to_changeset(request)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                purchase_requests::table
                    .filter(purchase_requests::id.eq(request_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(PurchaseRequestRepositoryError::persistence)?;
            if updated == 0 {
                return Err(PurchaseRequestRepositoryError::NotFound(request_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: PurchaseRequestId,
    ) -> PurchaseRequestRepositoryResult<Option<PurchaseRequest>> {
        self.run_blocking(move |connection| {
            let row = purchase_requests::table
                .filter(purchase_requests::id.eq(id.into_inner()))
                .select(PurchaseRequestRow::as_select())
                .first::<PurchaseRequestRow>(connection)
                .optional()
                .map_err(PurchaseRequestRepositoryError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn remove(&self, id: PurchaseRequestId) -> PurchaseRequestRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                purchase_requests::table
                    .filter(purchase_requests::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(PurchaseRequestRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(PurchaseRequestRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn lines_to_value(lines: &[PurchaseRequestLine]) -> PurchaseRequestRepositoryResult<Value> {
    serde_json::to_value(lines).map_err(PurchaseRequestRepositoryError::persistence)
}

fn to_new_row(request: &PurchaseRequest) -> PurchaseRequestRepositoryResult<NewPurchaseRequestRow> {
    Ok(NewPurchaseRequestRow {
        id: request.id().into_inner(),
        code: request.code().as_str().to_owned(),
        kind: request.kind().as_str().to_owned(),
        category_kind: request.category().kind().as_str().to_owned(),
        category_ref: request.category().id(),
        required_by: request.required_by(),
        lines: lines_to_value(request.lines())?,
        requested_by: request.requested_by().into_inner(),
        status: request.status().as_str().to_owned(),
        remark: request.remark().map(str::to_owned),
        created_at: request.created_at(),
        updated_at: request.updated_at(),
    })
}

fn to_changeset(
    request: &PurchaseRequest,
) -> PurchaseRequestRepositoryResult<PurchaseRequestChangeset> {
    Ok(PurchaseRequestChangeset {
        category_kind: request.category().kind().as_str().to_owned(),
        category_ref: request.category().id(),
        required_by: request.required_by(),
        lines: lines_to_value(request.lines())?,
        approved_by: request.approved_by().map(UserId::into_inner),
        ordered_by: request.ordered_by().map(UserId::into_inner),
        decided_at: request.decided_at(),
        ordered_at: request.ordered_at(),
        status: request.status().as_str().to_owned(),
        remark: request.remark().map(str::to_owned),
        updated_at: request.updated_at(),
    })
}

fn row_to_request(row: PurchaseRequestRow) -> PurchaseRequestRepositoryResult<PurchaseRequest> {
    let code = DocumentCode::from_stored(row.code)
        .map_err(PurchaseRequestRepositoryError::invalid_persisted_data)?;
    let kind = PurchaseRequestKind::try_from(row.kind.as_str())
        .map_err(PurchaseRequestRepositoryError::invalid_persisted_data)?;
    let category_kind = CategoryKind::try_from(row.category_kind.as_str())
        .map_err(PurchaseRequestRepositoryError::invalid_persisted_data)?;
    let status = PurchaseRequestStatus::try_from(row.status.as_str())
        .map_err(PurchaseRequestRepositoryError::invalid_persisted_data)?;
    let lines: Vec<PurchaseRequestLine> = serde_json::from_value(row.lines)
        .map_err(PurchaseRequestRepositoryError::invalid_persisted_data)?;

    let data = PersistedPurchaseRequestData {
        id: PurchaseRequestId::from_uuid(row.id),
        code,
        kind,
        category: CategoryRef::new(category_kind, row.category_ref),
        required_by: row.required_by,
        lines,
        requested_by: UserId::from_uuid(row.requested_by),
        approved_by: row.approved_by.map(UserId::from_uuid),
        ordered_by: row.ordered_by.map(UserId::from_uuid),
        decided_at: row.decided_at,
        ordered_at: row.ordered_at,
        status,
        remark: row.remark,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(PurchaseRequest::from_persisted(data))
}
