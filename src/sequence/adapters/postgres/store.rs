//! `PostgreSQL` counter store implementation.

use super::schema::sequences;
use crate::sequence::{
    domain::SequencePrefix,
    ports::{SequenceStore, SequenceStoreError, SequenceStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by sequence adapters.
pub type SequencePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed counter store.
///
/// Increments happen in a single upsert statement, so concurrent callers for
/// the same prefix serialise on the row lock and each observe a distinct
/// value.
#[derive(Debug, Clone)]
pub struct PostgresSequenceStore {
    pool: SequencePgPool,
}

impl PostgresSequenceStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SequencePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SequenceStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SequenceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SequenceStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SequenceStoreError::persistence)?
    }
}

#[async_trait]
impl SequenceStore for PostgresSequenceStore {
    async fn next(&self, prefix: &SequencePrefix) -> SequenceStoreResult<u64> {
        let key = prefix.as_str().to_owned();
        self.run_blocking(move |connection| {
            let value = diesel::insert_into(sequences::table)
                .values((sequences::prefix.eq(&key), sequences::counter.eq(1_i64)))
                .on_conflict(sequences::prefix)
                .do_update()
                .set(sequences::counter.eq(sequences::counter + 1))
                .returning(sequences::counter)
                .get_result::<i64>(connection)
                .map_err(SequenceStoreError::persistence)?;
            u64::try_from(value).map_err(SequenceStoreError::persistence)
        })
        .await
    }
}
