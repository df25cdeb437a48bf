//! Periodic maintenance-due scan.

use crate::directory::domain::{Role, UserId};
use crate::inventory::{
    domain::MaintenanceWindow,
    ports::{
        RestockRepository, RestockRepositoryError, StockRepository, StockRepositoryError,
    },
};
use crate::notification::{
    domain::NotificationKind,
    services::{NotificationFanoutError, NotificationPublisher, PublishNotificationRequest},
};
use crate::sequence::domain::{DocumentKind, DocumentRef};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Display name used when a due entry references an uncatalogued item.
const UNKNOWN_EQUIPMENT: &str = "Unknown Equipment";

/// Service-level errors for the maintenance scan.
#[derive(Debug, Error)]
pub enum MaintenanceScanError {
    /// Restock lookup failed.
    #[error(transparent)]
    Restocks(#[from] RestockRepositoryError),
    /// Stock lookup failed.
    #[error(transparent)]
    Stock(#[from] StockRepositoryError),
    /// Notification fan-out failed.
    #[error(transparent)]
    Notification(#[from] NotificationFanoutError),
}

/// Result type for the maintenance scan.
pub type MaintenanceScanResult<T> = Result<T, MaintenanceScanError>;

/// Tally of a single maintenance scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceScanOutcome {
    /// Inward entries whose maintenance date fell inside the window.
    pub due: usize,
    /// Reminders published this pass.
    pub published: usize,
    /// Reminders suppressed as same-day duplicates.
    pub suppressed: usize,
}

/// Scans inward entries for equipment maintenance falling due and raises a
/// reminder for each.
///
/// Reminders are addressed to lab assistants and administrators. Same-day
/// duplicate suppression in the notification store keeps repeated passes
/// from raising the same reminder twice in one day.
#[derive(Clone)]
pub struct MaintenanceScanner<R, S, P, C>
where
    R: RestockRepository,
    S: StockRepository,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    restocks: Arc<R>,
    stock: Arc<S>,
    publisher: Arc<P>,
    clock: Arc<C>,
    system_actor: UserId,
}

impl<R, S, P, C> MaintenanceScanner<R, S, P, C>
where
    R: RestockRepository,
    S: StockRepository,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a maintenance scanner attributing reminders to `system_actor`.
    #[must_use]
    pub fn new(
        restocks: Arc<R>,
        stock: Arc<S>,
        publisher: Arc<P>,
        clock: Arc<C>,
        system_actor: UserId,
    ) -> Self {
        Self {
            restocks,
            stock,
            publisher,
            clock,
            system_actor,
        }
    }

    /// Runs one scan pass over the current maintenance window.
    ///
    /// # Errors
    ///
    /// Propagates repository and fan-out errors, including unresolvable
    /// recipient roles.
    pub async fn run_once(&self) -> MaintenanceScanResult<MaintenanceScanOutcome> {
        let today = self.clock.utc().date_naive();
        let window = MaintenanceWindow::around(today);
        let due = self.restocks.maintenance_due(&window).await?;

        let mut outcome = MaintenanceScanOutcome {
            due: due.len(),
            ..MaintenanceScanOutcome::default()
        };
        for restock in due {
            let name = match self.stock.find_by_id(restock.item()).await? {
                Some(item) => item.name().to_owned(),
                None => UNKNOWN_EQUIPMENT.to_owned(),
            };
            let due_on = restock
                .maintenance_date()
                .map_or_else(|| "unscheduled".to_owned(), |date| date.to_string());
            let title = format!("Maintenance Due: {name}");
            let message = format!(
                "Maintenance for {} (inward {}) falls due on {}.",
                name,
                restock.code(),
                due_on,
            );
            let published = self
                .publisher
                .publish(
                    PublishNotificationRequest::new(
                        title,
                        message,
                        NotificationKind::EquipmentMaintenance,
                        self.system_actor,
                    )
                    .with_subject(DocumentRef::new(
                        DocumentKind::Inward,
                        restock.id().into_inner(),
                    ))
                    .with_recipients([Role::LabAssistant, Role::Admin]),
                )
                .await?;
            match published {
                Some(notification) => {
                    debug!(
                        title = notification.title(),
                        code = restock.code().as_str(),
                        "maintenance reminder raised"
                    );
                    outcome.published = outcome.published.saturating_add(1);
                }
                None => {
                    outcome.suppressed = outcome.suppressed.saturating_add(1);
                }
            }
        }

        info!(
            due = outcome.due,
            published = outcome.published,
            suppressed = outcome.suppressed,
            "maintenance scan completed"
        );
        Ok(outcome)
    }
}
