//! Purchase request lifecycle orchestration.
//!
//! Drives a purchase request from creation through approval to ordering and
//! final hand-over, persisting each transition and fanning out the matching
//! workflow notification. The two document flavours share every step; only
//! the generated code tag and the notification vocabulary differ.

use crate::directory::{
    domain::{Role, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::indent::{
    domain::{
        AmendPurchaseRequestParams, IndentDomainError, PurchaseRequest, PurchaseRequestDecision,
        PurchaseRequestId, PurchaseRequestParams,
    },
    ports::{PurchaseRequestRepository, PurchaseRequestRepositoryError},
};
use crate::notification::{
    domain::NotificationKind,
    services::{NotificationFanoutError, NotificationPublisher, PublishNotificationRequest},
};
use crate::sequence::{
    domain::DocumentRef,
    ports::{DocumentNumbering, SequenceStoreError},
};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for the purchase request workflow.
#[derive(Debug, Error)]
pub enum PurchaseRequestWorkflowError {
    /// Domain validation or a status transition failed.
    #[error(transparent)]
    Domain(#[from] IndentDomainError),
    /// Purchase request persistence failed.
    #[error(transparent)]
    Repository(#[from] PurchaseRequestRepositoryError),
    /// The user directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Document code generation failed.
    #[error(transparent)]
    Numbering(#[from] SequenceStoreError),
    /// The notification fan-out failed.
    #[error(transparent)]
    Notification(#[from] NotificationFanoutError),
    /// The purchase request does not exist.
    #[error("purchase request not found: {0}")]
    NotFound(PurchaseRequestId),
    /// A referenced account is not in the directory.
    #[error("user account not found: {0}")]
    UnknownAccount(UserId),
}

/// Result type for purchase request workflow operations.
pub type PurchaseRequestWorkflowResult<T> = Result<T, PurchaseRequestWorkflowError>;

/// Orchestrates the purchase request lifecycle across persistence, the user
/// directory, document numbering, and notification fan-out.
#[derive(Clone)]
pub struct PurchaseRequestWorkflow<R, D, G, P, C>
where
    R: PurchaseRequestRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    requests: Arc<R>,
    directory: Arc<D>,
    numbering: Arc<G>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, D, G, P, C> PurchaseRequestWorkflow<R, D, G, P, C>
where
    R: PurchaseRequestRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a purchase request workflow service.
    #[must_use]
    pub const fn new(
        requests: Arc<R>,
        directory: Arc<D>,
        numbering: Arc<G>,
        publisher: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            requests,
            directory,
            numbering,
            publisher,
            clock,
        }
    }

    /// Creates a purchase request: generates the flavour's monthly code,
    /// persists, and notifies administrators and managers.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::UnknownAccount`] for an
    /// unregistered requester and [`PurchaseRequestWorkflowError::Domain`]
    /// for an invalid required date or line set.
    pub async fn create(
        &self,
        params: PurchaseRequestParams,
    ) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        let requester = self.account(params.requested_by).await?;
        let kind = params.kind;
        let line_count = params.lines.len();
        let code = self.numbering.monthly_code(kind.document_kind()).await?;
        let request = PurchaseRequest::new(code, params, &*self.clock)?;
        self.requests.store(&request).await?;

        let message = format!(
            "{} with {line_count} items has been requested by {}.",
            kind.display_name(),
            requester.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    format!("{} Created", kind.display_name()),
                    message,
                    kind.created_kind(),
                    requester.id(),
                )
                .with_subject(subject(&request))
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(request.required_by())),
            )
            .await?;
        debug!(code = %request.code(), kind = %request.kind(), "purchase request created");
        Ok(request)
    }

    /// Amends a pending purchase request and notifies administrators and
    /// managers.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::NotFound`] for an unknown
    /// request and [`PurchaseRequestWorkflowError::Domain`] once the
    /// request has left `Pending`.
    pub async fn amend(
        &self,
        id: PurchaseRequestId,
        params: AmendPurchaseRequestParams,
        actor: UserId,
    ) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        let editor = self.account(actor).await?;
        let mut request = self.load(id).await?;
        request.amend(params, &*self.clock)?;
        self.requests.update(&request).await?;

        let kind = request.kind();
        let message = format!(
            "{} has been updated by {}.",
            kind.display_name(),
            editor.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    format!("{} Updated", kind.display_name()),
                    message,
                    kind.updated_kind(),
                    editor.id(),
                )
                .with_subject(subject(&request))
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(request.required_by())),
            )
            .await?;
        debug!(code = %request.code(), "purchase request amended");
        Ok(request)
    }

    /// Deletes a pending purchase request and notifies administrators and
    /// managers.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::NotFound`] for an unknown
    /// request and [`PurchaseRequestWorkflowError::Domain`] once the
    /// request has left `Pending`.
    pub async fn delete(
        &self,
        id: PurchaseRequestId,
        actor: UserId,
    ) -> PurchaseRequestWorkflowResult<()> {
        let editor = self.account(actor).await?;
        let request = self.load(id).await?;
        request.ensure_deletable()?;

        let kind = request.kind();
        let document = subject(&request);
        let required_by = request.required_by();
        self.requests.remove(id).await?;

        let message = format!(
            "{} has been deleted by {}.",
            kind.display_name(),
            editor.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    format!("{} Deleted", kind.display_name()),
                    message,
                    kind.deleted_kind(),
                    editor.id(),
                )
                .with_subject(document)
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(required_by)),
            )
            .await?;
        debug!(code = %request.code(), "purchase request deleted");
        Ok(())
    }

    /// Approves or rejects a pending purchase request, recording the
    /// approver and decision timestamp.
    ///
    /// Approval notifies the requester's role plus the lab assistants;
    /// rejection notifies the requester's role only.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::Domain`] with the from/to
    /// states when the request has already been decided.
    pub async fn decide(
        &self,
        id: PurchaseRequestId,
        decision: PurchaseRequestDecision,
        approver: UserId,
        remark: Option<String>,
    ) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        let deciding = self.account(approver).await?;
        let mut request = self.load(id).await?;
        let requester = self.account(request.requested_by()).await?;
        request.decide(decision, approver, remark, &*self.clock)?;
        self.requests.update(&request).await?;

        let kind = request.kind();
        let mut recipients = requester_roles(&requester);
        let (title, notification_kind, verb) = match decision {
            PurchaseRequestDecision::Approve => {
                if !recipients.contains(&Role::LabAssistant) {
                    recipients.push(Role::LabAssistant);
                }
                (
                    format!("{} Approved", kind.display_name()),
                    kind.approved_kind(),
                    "approved",
                )
            }
            PurchaseRequestDecision::Reject => (
                format!("{} Rejected", kind.display_name()),
                kind.rejected_kind(),
                "rejected",
            ),
        };
        let message = format!(
            "{} has been {verb} by {}.",
            kind.display_name(),
            deciding.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(title, message, notification_kind, requester.id())
                    .with_subject(subject(&request))
                    .with_recipients(recipients)
                    .with_expiry(expiry(request.required_by())),
            )
            .await?;
        debug!(
            code = %request.code(),
            status = request.status().as_str(),
            "purchase request decided"
        );
        Ok(request)
    }

    /// Records that an order was raised against an approved request and
    /// notifies the stores, faculty, and administrators.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::Domain`] unless the request
    /// is `Approved`.
    pub async fn mark_ordered(
        &self,
        id: PurchaseRequestId,
        orderer: UserId,
    ) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        let ordering = self.account(orderer).await?;
        let mut request = self.load(id).await?;
        request.mark_ordered(orderer, &*self.clock)?;
        self.requests.update(&request).await?;

        let kind = request.kind();
        let message = format!(
            "{} has been ordered by {}.",
            kind.display_name(),
            ordering.display_name()
        );
        self.publish_progress(
            &request,
            format!("{} Ordered", kind.display_name()),
            message,
            kind.ordered_kind(),
            ordering.id(),
        )
        .await?;
        debug!(code = %request.code(), "purchase request ordered");
        Ok(request)
    }

    /// Records that the ordered items were handed over, closing the
    /// request, and notifies the stores, faculty, and administrators.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseRequestWorkflowError::Domain`] unless the request
    /// is `Ordered`.
    pub async fn mark_issued(
        &self,
        id: PurchaseRequestId,
    ) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        let mut request = self.load(id).await?;
        let requester = self.account(request.requested_by()).await?;
        request.mark_issued(&*self.clock)?;
        self.requests.update(&request).await?;

        let kind = request.kind();
        let message = format!("{} has been issued.", kind.display_name());
        self.publish_progress(
            &request,
            format!("{} Issued", kind.display_name()),
            message,
            kind.issued_kind(),
            requester.id(),
        )
        .await?;
        debug!(code = %request.code(), "purchase request issued");
        Ok(request)
    }

    async fn publish_progress(
        &self,
        request: &PurchaseRequest,
        title: String,
        message: String,
        kind: NotificationKind,
        actor: UserId,
    ) -> PurchaseRequestWorkflowResult<()> {
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(title, message, kind, actor)
                    .with_subject(subject(request))
                    .with_recipients([Role::Stores, Role::Faculty, Role::Admin])
                    .with_expiry(expiry(request.required_by())),
            )
            .await?;
        Ok(())
    }

    async fn load(&self, id: PurchaseRequestId) -> PurchaseRequestWorkflowResult<PurchaseRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or(PurchaseRequestWorkflowError::NotFound(id))
    }

    async fn account(&self, id: UserId) -> PurchaseRequestWorkflowResult<UserAccount> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(PurchaseRequestWorkflowError::UnknownAccount(id))
    }
}

/// Roles a decision notification addresses for the given requester.
fn requester_roles(requester: &UserAccount) -> Vec<Role> {
    if requester.has_role(Role::Faculty) {
        vec![Role::Faculty]
    } else {
        vec![Role::LabAssistant]
    }
}

/// Notifications about a purchase request lapse one day after its required
/// date.
fn expiry(required_by: NaiveDate) -> DateTime<Utc> {
    required_by
        .checked_add_days(Days::new(1))
        .unwrap_or(required_by)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn subject(request: &PurchaseRequest) -> DocumentRef {
    DocumentRef::new(request.kind().document_kind(), request.id().into_inner())
}
