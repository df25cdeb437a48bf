//! Inward stock recording.

use crate::directory::domain::Role;
use crate::inventory::{
    domain::{InventoryDomainError, Restock, RestockParams, StockItemId},
    ports::{
        RestockRepository, RestockRepositoryError, StockRepository, StockRepositoryError,
    },
};
use crate::notification::{
    domain::NotificationKind,
    services::{NotificationFanoutError, NotificationPublisher, PublishNotificationRequest},
};
use crate::sequence::{
    domain::{DocumentKind, DocumentRef},
    ports::{DocumentNumbering, SequenceStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for inward stock recording.
#[derive(Debug, Error)]
pub enum RestockingError {
    /// Domain validation or stock arithmetic failed.
    #[error(transparent)]
    Domain(#[from] InventoryDomainError),
    /// Restock persistence failed.
    #[error(transparent)]
    Restocks(#[from] RestockRepositoryError),
    /// Stock persistence failed.
    #[error(transparent)]
    Stock(#[from] StockRepositoryError),
    /// Inward code generation failed.
    #[error(transparent)]
    Numbering(#[from] SequenceStoreError),
    /// Notification fan-out failed.
    #[error(transparent)]
    Notification(#[from] NotificationFanoutError),
    /// The replenished item is not catalogued.
    #[error("stock item not found: {0}")]
    ItemNotFound(StockItemId),
}

/// Result type for inward stock recording.
pub type RestockingResult<T> = Result<T, RestockingError>;

/// Inward stock recording service.
#[derive(Clone)]
pub struct RestockingService<R, S, G, P, C>
where
    R: RestockRepository,
    S: StockRepository,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    restocks: Arc<R>,
    stock: Arc<S>,
    numbering: Arc<G>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, S, G, P, C> RestockingService<R, S, G, P, C>
where
    R: RestockRepository,
    S: StockRepository,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates an inward stock recording service.
    #[must_use]
    pub fn new(
        restocks: Arc<R>,
        stock: Arc<S>,
        numbering: Arc<G>,
        publisher: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            restocks,
            stock,
            numbering,
            publisher,
            clock,
        }
    }

    /// Records an inward stock entry under a fresh inward code, increments
    /// the item level, and fans out the inward notification.
    ///
    /// The writes are sequential without a cross-document transaction; a
    /// failure after the entry is stored leaves the entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`RestockingError::ItemNotFound`] for an uncatalogued item
    /// and propagates numbering, domain, and persistence errors.
    pub async fn record_restock(&self, params: RestockParams) -> RestockingResult<Restock> {
        let mut item = self
            .stock
            .find_by_id(params.item)
            .await?
            .ok_or(RestockingError::ItemNotFound(params.item))?;

        let code = self.numbering.monthly_code(DocumentKind::Inward).await?;
        let actor = params.recorded_by;
        let quantity = params.quantity;
        let restock = Restock::new(code, params, &*self.clock)?;
        self.restocks.store(&restock).await?;

        item.receive(quantity, &*self.clock)?;
        self.stock.update(&item).await?;

        let message = format!(
            "An inward entry of {} {} of {} has been recorded under {}.",
            restock.quantity(),
            restock.unit(),
            item.name(),
            restock.code(),
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Inward Created",
                    message,
                    NotificationKind::InwardCreated,
                    actor,
                )
                    .with_subject(DocumentRef::new(
                        DocumentKind::Inward,
                        restock.id().into_inner(),
                    ))
                    .with_recipients([Role::Admin, Role::Manager]),
            )
            .await?;

        debug!(
            code = restock.code().as_str(),
            item = %item.id(),
            quantity,
            "inward stock recorded"
        );
        Ok(restock)
    }
}
