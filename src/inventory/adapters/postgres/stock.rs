//! `PostgreSQL` stock repository implementation.

use super::{
    models::{NewStockItemRow, StockItemRow},
    schema::stock_items,
};
use crate::inventory::{
    domain::{ItemClass, PersistedStockItemData, StockItem, StockItemId},
    ports::{StockRepository, StockRepositoryError, StockRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by inventory adapters.
pub type InventoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed stock repository.
#[derive(Debug, Clone)]
pub struct PostgresStockRepository {
    pool: InventoryPgPool,
}

impl PostgresStockRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InventoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StockRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StockRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StockRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StockRepositoryError::persistence)?
    }
}

#[async_trait]
impl StockRepository for PostgresStockRepository {
    async fn store(&self, item: &StockItem) -> StockRepositoryResult<()> {
        let item_id = item.id();
        let code = item.code().to_owned();
        let new_row = to_new_row(item)?;

        self.run_blocking(move |connection| {
            // The unique index on code still enforces the invariant in the
            // window between this check and the insert; the pre-check only
            // improves the reported error.
            let duplicate = stock_items::table
                .filter(stock_items::code.eq(&code))
                .count()
                .get_result::<i64>(connection)
                .map_err(StockRepositoryError::persistence)?;
            if duplicate > 0 {
                return Err(StockRepositoryError::DuplicateItemCode(code.clone()));
            }

            diesel::insert_into(stock_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_code_unique_violation(info.as_ref()) =>
                    {
                        StockRepositoryError::DuplicateItemCode(code.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StockRepositoryError::DuplicateItem(item_id)
                    }
                    _ => StockRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn update(&self, item: &StockItem) -> StockRepositoryResult<()> {
        let item_id = item.id();
        let row = to_new_row(item)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                stock_items::table.filter(stock_items::id.eq(item_id.into_inner())),
            )
            .set((
                stock_items::class.eq(row.class),
                stock_items::code.eq(row.code),
                stock_items::name.eq(row.name),
                stock_items::unit.eq(row.unit),
                stock_items::quantity.eq(row.quantity),
                stock_items::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(StockRepositoryError::persistence)?;
            if updated == 0 {
                return Err(StockRepositoryError::NotFound(item_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: StockItemId) -> StockRepositoryResult<Option<StockItem>> {
        self.run_blocking(move |connection| {
            let row = stock_items::table
                .filter(stock_items::id.eq(id.into_inner()))
                .select(StockItemRow::as_select())
                .first::<StockItemRow>(connection)
                .optional()
                .map_err(StockRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn find_by_code(&self, code: &str) -> StockRepositoryResult<Option<StockItem>> {
        let code = code.to_owned();
        self.run_blocking(move |connection| {
            let row = stock_items::table
                .filter(stock_items::code.eq(&code))
                .select(StockItemRow::as_select())
                .first::<StockItemRow>(connection)
                .optional()
                .map_err(StockRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }
}

fn to_new_row(item: &StockItem) -> StockRepositoryResult<NewStockItemRow> {
    let quantity =
        i32::try_from(item.quantity()).map_err(StockRepositoryError::persistence)?;
    Ok(NewStockItemRow {
        id: item.id().into_inner(),
        class: item.class().as_str().to_owned(),
        code: item.code().to_owned(),
        name: item.name().to_owned(),
        unit: item.unit().to_owned(),
        quantity,
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    })
}

fn row_to_item(row: StockItemRow) -> StockRepositoryResult<StockItem> {
    let class = ItemClass::try_from(row.class.as_str())
        .map_err(StockRepositoryError::invalid_persisted_data)?;
    let quantity =
        u32::try_from(row.quantity).map_err(StockRepositoryError::invalid_persisted_data)?;

    let data = PersistedStockItemData {
        id: StockItemId::from_uuid(row.id),
        class,
        code: row.code,
        name: row.name,
        unit: row.unit,
        quantity,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(StockItem::from_persisted(data))
}

fn is_code_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_stock_items_code_unique")
}
