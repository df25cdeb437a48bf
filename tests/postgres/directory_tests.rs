//! Tests for [`PostgresUserDirectory`].

use crate::postgres::helpers::{BoxError, clock, runtime, test_database};
use lavoisier::directory::{
    adapters::postgres::PostgresUserDirectory,
    domain::{EmailAddress, Role, UserAccount},
    ports::{UserDirectory, UserDirectoryError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn accounts_round_trip_with_their_roles(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let directory = PostgresUserDirectory::new(database.pool.clone());

    let account = UserAccount::new(
        "Devika",
        EmailAddress::new("devika@lab.example.org")?,
        [Role::Admin, Role::Faculty],
        &clock(),
    )?;
    rt.block_on(directory.store(&account))?;

    let by_id = rt
        .block_on(directory.find_by_id(account.id()))?
        .ok_or("account stored")?;
    assert_eq!(by_id, account);

    let by_email = rt
        .block_on(directory.find_by_email(account.email()))?
        .ok_or("account found by email")?;
    assert_eq!(by_email.id(), account.id());
    assert!(by_email.has_role(Role::Faculty));
    Ok(())
}

#[rstest]
fn role_lookup_returns_every_matching_address(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let directory = PostgresUserDirectory::new(database.pool.clone());

    for (name, email, role) in [
        ("Devika", "devika@lab.example.org", Role::Admin),
        ("Ravi", "ravi@lab.example.org", Role::Admin),
        ("Asha", "asha@lab.example.org", Role::LabAssistant),
    ] {
        let account = UserAccount::new(name, EmailAddress::new(email)?, [role], &clock())?;
        rt.block_on(directory.store(&account))?;
    }

    let admins = rt.block_on(directory.emails_with_role(Role::Admin))?;
    let addresses: Vec<&str> = admins.iter().map(EmailAddress::as_str).collect();
    assert_eq!(addresses.len(), 2);
    assert!(addresses.contains(&"devika@lab.example.org"));
    assert!(addresses.contains(&"ravi@lab.example.org"));
    Ok(())
}

#[rstest]
fn a_reused_email_address_is_rejected(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let directory = PostgresUserDirectory::new(database.pool.clone());

    let first = UserAccount::new(
        "Devika",
        EmailAddress::new("devika@lab.example.org")?,
        [Role::Admin],
        &clock(),
    )?;
    rt.block_on(directory.store(&first))?;

    let second = UserAccount::new(
        "Impostor",
        EmailAddress::new("devika@lab.example.org")?,
        [Role::Manager],
        &clock(),
    )?;
    let error = rt
        .block_on(directory.store(&second))
        .expect_err("unique email index");

    assert!(matches!(error, UserDirectoryError::DuplicateEmail(_)));
    Ok(())
}
