//! Tests for [`PostgresNotificationRepository`].

use crate::postgres::helpers::{BoxError, clock, runtime, test_database};
use chrono::Days;
use lavoisier::directory::domain::{Role, UserId};
use lavoisier::notification::{
    adapters::postgres::PostgresNotificationRepository,
    domain::{Notification, NotificationKind, NotificationParams},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn record(title: &str, expiry_days: u64) -> Result<Notification, BoxError> {
    Ok(Notification::new(
        NotificationParams {
            title: title.to_owned(),
            message: "The autoclave filter is due for replacement.".to_owned(),
            kind: NotificationKind::EquipmentMaintenance,
            actor: UserId::new(),
            subject: None,
            recipients: vec![Role::Admin, Role::LabAssistant],
            expires_at: Some(clock().0 + Days::new(expiry_days)),
        },
        &clock(),
    )?)
}

#[rstest]
fn records_round_trip_with_their_recipients(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresNotificationRepository::new(database.pool.clone());

    let notification = record("Maintenance Due: Autoclave", 7)?;
    rt.block_on(repository.store(&notification))?;

    let stored = rt
        .block_on(repository.find_by_id(notification.id()))?
        .ok_or("notification stored")?;
    assert_eq!(stored, notification);
    Ok(())
}

#[rstest]
fn the_dedup_index_rejects_a_same_day_duplicate(
    runtime: io::Result<Runtime>,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresNotificationRepository::new(database.pool.clone());

    rt.block_on(repository.store(&record("Maintenance Due: Autoclave", 7)?))?;
    let error = rt
        .block_on(repository.store(&record("Maintenance Due: Autoclave", 7)?))
        .expect_err("same title, kind, and day");

    assert!(matches!(
        error,
        NotificationRepositoryError::DuplicateSameDay { ref title, .. }
            if title == "Maintenance Due: Autoclave",
    ));
    Ok(())
}

#[rstest]
fn the_feed_filters_by_role_and_expiry(runtime: io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresNotificationRepository::new(database.pool.clone());

    let short_lived = record("Maintenance Due: Autoclave", 1)?;
    let long_lived = record("Maintenance Due: Centrifuge", 7)?;
    rt.block_on(repository.store(&short_lived))?;
    rt.block_on(repository.store(&long_lived))?;

    let now = clock().0;
    let fresh = rt.block_on(repository.find_for_roles(&[Role::Admin], now))?;
    assert_eq!(fresh.len(), 2);

    let later = now + Days::new(2);
    let remaining = rt.block_on(repository.find_for_roles(&[Role::Admin], later))?;
    let titles: Vec<&str> = remaining
        .iter()
        .map(Notification::title)
        .collect();
    assert_eq!(titles, vec!["Maintenance Due: Centrifuge"]);

    let unrelated = rt.block_on(repository.find_for_roles(&[Role::Stores], later))?;
    assert!(unrelated.is_empty());

    let purged = rt.block_on(repository.purge_expired(later))?;
    assert_eq!(purged, 1);
    Ok(())
}
