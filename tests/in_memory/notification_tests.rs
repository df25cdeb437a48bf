//! Fan-out tests over the in-memory notification store and mail relay.

use crate::in_memory::helpers::{BoxError, FixedClock, Lab, clock, lab, runtime};
use chrono::Days;
use lavoisier::directory::domain::{EmailAddress, Role};
use lavoisier::notification::{
    adapters::memory::RecordingMailer,
    domain::NotificationKind,
    services::{
        NotificationFanout, NotificationFanoutError, NotificationPublisher,
        PublishNotificationRequest, SenderIdentity,
    },
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn reminder(lab: &Lab, title: &str) -> PublishNotificationRequest {
    PublishNotificationRequest::new(
        title,
        "The autoclave filter is due for replacement.",
        NotificationKind::EquipmentMaintenance,
        lab.system_actor,
    )
    .with_recipients([Role::Admin])
}

#[rstest]
fn publishing_stores_the_record_and_mails_every_address(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    lab.seed_account(&rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    lab.seed_account(&rt, "Ravi", "ravi@lab.example.org", Role::Admin)?;
    lab.seed_account(&rt, "Farhan", "farhan@lab.example.org", Role::Manager)?;

    let published = rt.block_on(lab.fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))?;

    let notification = published.ok_or("notification published")?;
    assert_eq!(notification.title(), "Maintenance Due: Autoclave");
    let titles = lab.feed_titles(&rt, Role::Admin)?;
    assert_eq!(titles, vec!["Maintenance Due: Autoclave".to_owned()]);

    let sent = lab.mailer.sent()?;
    assert_eq!(sent.len(), 2);
    let recipients: Vec<&str> = sent.iter().map(|email| email.to.as_str()).collect();
    assert!(recipients.contains(&"devika@lab.example.org"));
    assert!(recipients.contains(&"ravi@lab.example.org"));
    assert!(!recipients.contains(&"farhan@lab.example.org"));
    for email in &sent {
        assert_eq!(email.from.as_str(), "stores@lab.example.org");
        assert_eq!(email.subject, "Maintenance Due: Autoclave");
    }
    Ok(())
}

#[rstest]
fn a_same_day_duplicate_suppresses_the_second_fan_out(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    lab.seed_account(&rt, "Devika", "devika@lab.example.org", Role::Admin)?;

    let first = rt.block_on(lab.fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))?;
    let second = rt.block_on(lab.fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))?;

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(lab.feed_titles(&rt, Role::Admin)?.len(), 1);
    assert_eq!(lab.mailer.sent()?.len(), 1);
    Ok(())
}

#[rstest]
fn unresolvable_roles_keep_the_record_but_report_the_gap(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;

    let error = rt
        .block_on(lab.fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))
        .expect_err("no admin accounts exist");

    assert!(matches!(
        error,
        NotificationFanoutError::NoRecipients { ref title } if title == "Maintenance Due: Autoclave",
    ));
    assert_eq!(lab.feed_titles(&rt, Role::Admin)?.len(), 1);
    assert!(lab.mailer.sent()?.is_empty());

    // The workflow-facing entry point tolerates the same gap.
    rt.block_on(
        lab.fanout
            .publish_event(reminder(&lab, "Maintenance Due: Centrifuge")),
    )?;
    Ok(())
}

#[rstest]
fn expired_records_drop_out_of_the_feed_and_purge(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    lab.seed_account(&rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    let now = clock().0;

    rt.block_on(
        lab.fanout.publish(
            reminder(&lab, "Maintenance Due: Autoclave").with_expiry(now + Days::new(1)),
        ),
    )?;
    rt.block_on(
        lab.fanout.publish(
            reminder(&lab, "Maintenance Due: Centrifuge").with_expiry(now + Days::new(7)),
        ),
    )?;

    // A fan-out two days later sees only the longer-lived record.
    let later = NotificationFanout::new(
        Arc::clone(&lab.notifications),
        Arc::clone(&lab.directory),
        Arc::new(RecordingMailer::new()),
        Arc::new(FixedClock(now + Days::new(2))),
        SenderIdentity::new(EmailAddress::new("stores@lab.example.org")?, "Laboratory Stores"),
    );
    let titles: Vec<String> = rt
        .block_on(later.feed_for_roles(&[Role::Admin]))?
        .iter()
        .map(|notification| notification.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Maintenance Due: Centrifuge".to_owned()]);

    let purged = rt.block_on(later.purge_expired())?;
    assert_eq!(purged, 1);
    Ok(())
}

#[rstest]
fn a_failing_mail_relay_never_fails_the_publish(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    lab.seed_account(&rt, "Devika", "devika@lab.example.org", Role::Admin)?;
    let fanout = NotificationFanout::new(
        Arc::clone(&lab.notifications),
        Arc::clone(&lab.directory),
        Arc::new(RecordingMailer::failing()),
        Arc::new(clock()),
        SenderIdentity::new(EmailAddress::new("stores@lab.example.org")?, "Laboratory Stores"),
    );

    let published = rt.block_on(fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))?;

    assert!(published.is_some());
    assert_eq!(lab.feed_titles(&rt, Role::Admin)?.len(), 1);
    Ok(())
}

#[rstest]
fn dismissing_removes_a_record_from_the_feed(
    runtime: io::Result<Runtime>,
    lab: Lab,
) -> Result<(), BoxError> {
    let rt = runtime?;
    lab.seed_account(&rt, "Devika", "devika@lab.example.org", Role::Admin)?;

    let published = rt
        .block_on(lab.fanout.publish(reminder(&lab, "Maintenance Due: Autoclave")))?
        .ok_or("notification published")?;
    rt.block_on(lab.fanout.dismiss(published.id()))?;

    assert!(lab.feed_titles(&rt, Role::Admin)?.is_empty());
    Ok(())
}
