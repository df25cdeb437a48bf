//! `PostgreSQL` restock repository implementation.

use super::{
    models::{NewRestockRow, RestockRow},
    schema::restocks,
    stock::InventoryPgPool,
};
use crate::directory::domain::UserId;
use crate::inventory::{
    domain::{MaintenanceWindow, PersistedRestockData, Restock, RestockId, StockItemId},
    ports::{RestockRepository, RestockRepositoryError, RestockRepositoryResult},
};
use crate::sequence::domain::DocumentCode;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed restock repository.
#[derive(Debug, Clone)]
pub struct PostgresRestockRepository {
    pool: InventoryPgPool,
}

impl PostgresRestockRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InventoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RestockRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RestockRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RestockRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RestockRepositoryError::persistence)?
    }
}

#[async_trait]
impl RestockRepository for PostgresRestockRepository {
    async fn store(&self, restock: &Restock) -> RestockRepositoryResult<()> {
        let restock_id = restock.id();
        let new_row = to_new_row(restock)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(restocks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RestockRepositoryError::DuplicateRestock(restock_id)
                    }
                    _ => RestockRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: RestockId) -> RestockRepositoryResult<Option<Restock>> {
        self.run_blocking(move |connection| {
            let row = restocks::table
                .filter(restocks::id.eq(id.into_inner()))
                .select(RestockRow::as_select())
                .first::<RestockRow>(connection)
                .optional()
                .map_err(RestockRepositoryError::persistence)?;
            row.map(row_to_restock).transpose()
        })
        .await
    }

    async fn maintenance_due(
        &self,
        window: &MaintenanceWindow,
    ) -> RestockRepositoryResult<Vec<Restock>> {
        let start = window.start();
        let end = window.end();
        self.run_blocking(move |connection| {
            let rows = restocks::table
                .filter(restocks::maintenance_date.ge(start))
                .filter(restocks::maintenance_date.lt(end))
                .order(restocks::maintenance_date.asc())
                .select(RestockRow::as_select())
                .load::<RestockRow>(connection)
                .map_err(RestockRepositoryError::persistence)?;
            rows.into_iter().map(row_to_restock).collect()
        })
        .await
    }
}

fn to_new_row(restock: &Restock) -> RestockRepositoryResult<NewRestockRow> {
    let quantity =
        i32::try_from(restock.quantity()).map_err(RestockRepositoryError::persistence)?;
    Ok(NewRestockRow {
        id: restock.id().into_inner(),
        code: restock.code().as_str().to_owned(),
        item: restock.item().into_inner(),
        description: restock.description().map(str::to_owned),
        quantity,
        unit: restock.unit().to_owned(),
        grade: restock.grade().map(str::to_owned),
        cas_number: restock.cas_number().map(str::to_owned),
        hazard_class: restock.hazard_class().map(str::to_owned),
        vendor: restock.vendor(),
        invoice_reference: restock.invoice_reference().map(str::to_owned),
        expiry_date: restock.expiry_date(),
        maintenance_date: restock.maintenance_date(),
        recorded_by: restock.recorded_by().into_inner(),
        created_at: restock.created_at(),
    })
}

fn row_to_restock(row: RestockRow) -> RestockRepositoryResult<Restock> {
    let code = DocumentCode::from_stored(row.code)
        .map_err(RestockRepositoryError::invalid_persisted_data)?;
    let quantity =
        u32::try_from(row.quantity).map_err(RestockRepositoryError::invalid_persisted_data)?;

    let data = PersistedRestockData {
        id: RestockId::from_uuid(row.id),
        code,
        item: StockItemId::from_uuid(row.item),
        description: row.description,
        quantity,
        unit: row.unit,
        grade: row.grade,
        cas_number: row.cas_number,
        hazard_class: row.hazard_class,
        vendor: row.vendor,
        invoice_reference: row.invoice_reference,
        expiry_date: row.expiry_date,
        maintenance_date: row.maintenance_date,
        recorded_by: UserId::from_uuid(row.recorded_by),
        created_at: row.created_at,
    };
    Ok(Restock::from_persisted(data))
}
