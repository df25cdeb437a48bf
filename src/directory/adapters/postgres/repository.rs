//! `PostgreSQL` user directory implementation.

use super::{
    models::{NewUserAccountRow, UserAccountRow},
    schema::user_accounts,
};
use crate::directory::{
    domain::{EmailAddress, PersistedAccountData, Role, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: DirectoryPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn store(&self, account: &UserAccount) -> UserDirectoryResult<()> {
        let account_id = account.id();
        let email = account.email().clone();
        let new_row = to_new_row(account)?;

        self.run_blocking(move |connection| {
            // The unique index still enforces integrity in the window between
            // this check and the insert; the pre-check only improves the
            // reported error.
            let existing = find_row_by_email(connection, &email)?;
            if existing.is_some() {
                return Err(UserDirectoryError::DuplicateEmail(email.clone()));
            }

            diesel::insert_into(user_accounts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserDirectoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserDirectoryError::DuplicateAccount(account_id)
                    }
                    _ => UserDirectoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserAccount>> {
        self.run_blocking(move |connection| {
            let row = user_accounts::table
                .filter(user_accounts::id.eq(id.into_inner()))
                .select(UserAccountRow::as_select())
                .first::<UserAccountRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserDirectoryResult<Option<UserAccount>> {
        let lookup_email = email.clone();
        self.run_blocking(move |connection| {
            let row = find_row_by_email(connection, &lookup_email)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn emails_with_role(&self, role: Role) -> UserDirectoryResult<Vec<EmailAddress>> {
        self.run_blocking(move |connection| {
            let query = diesel::sql_query(concat!(
                "SELECT id, display_name, email, roles, created_at, updated_at ",
                "FROM user_accounts WHERE roles @> $1 ORDER BY email",
            ))
            .bind::<diesel::sql_types::Jsonb, _>(serde_json::json!([role.as_str()]));

            let rows = query
                .get_results::<UserAccountRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    EmailAddress::new(row.email).map_err(UserDirectoryError::invalid_persisted_data)
                })
                .collect()
        })
        .await
    }
}

fn to_new_row(account: &UserAccount) -> UserDirectoryResult<NewUserAccountRow> {
    let roles =
        serde_json::to_value(account.roles()).map_err(UserDirectoryError::persistence)?;

    Ok(NewUserAccountRow {
        id: account.id().into_inner(),
        display_name: account.display_name().to_owned(),
        email: account.email().as_str().to_owned(),
        roles,
        created_at: account.created_at(),
        updated_at: account.updated_at(),
    })
}

fn row_to_account(row: UserAccountRow) -> UserDirectoryResult<UserAccount> {
    let UserAccountRow {
        id,
        display_name,
        email: persisted_email,
        roles: persisted_roles,
        created_at,
        updated_at,
    } = row;

    let email =
        EmailAddress::new(persisted_email).map_err(UserDirectoryError::invalid_persisted_data)?;
    let roles = serde_json::from_value::<Vec<Role>>(persisted_roles)
        .map_err(UserDirectoryError::invalid_persisted_data)?;

    let data = PersistedAccountData {
        id: UserId::from_uuid(id),
        display_name,
        email,
        roles,
        created_at,
        updated_at,
    };
    Ok(UserAccount::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_user_accounts_email_unique")
}

fn find_row_by_email(
    connection: &mut PgConnection,
    email: &EmailAddress,
) -> UserDirectoryResult<Option<UserAccountRow>> {
    user_accounts::table
        .filter(user_accounts::email.eq(email.as_str()))
        .select(UserAccountRow::as_select())
        .first::<UserAccountRow>(connection)
        .optional()
        .map_err(UserDirectoryError::persistence)
}
