//! Requisition lifecycle orchestration.
//!
//! Drives a requisition from creation through approval, stock issue, and
//! return, persisting each transition and fanning out the matching
//! workflow notification. Stock movements go through the inventory issue
//! service so that issue logs and stock levels stay consistent with the
//! requisition's per-line bookkeeping.

use crate::directory::{
    domain::{Role, UserAccount, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::inventory::{
    domain::{IssueLogId, IssueLogStatus, StockItemId},
    ports::{IssueLogRepository, StockRepository, StockRepositoryError},
    services::{LogIssueRequest, StockIssueError, StockIssueService},
};
use crate::notification::{
    domain::NotificationKind,
    services::{NotificationFanoutError, NotificationPublisher, PublishNotificationRequest},
};
use crate::requisition::{
    domain::{
        AmendRequisitionParams, LineIssue, LineReturn, Requisition, RequisitionDecision,
        RequisitionDomainError, RequisitionId, RequisitionParams,
    },
    ports::{RequisitionRepository, RequisitionRepositoryError},
};
use crate::sequence::{
    domain::{DocumentKind, DocumentRef},
    ports::{DocumentNumbering, SequenceStoreError},
};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for the requisition workflow.
#[derive(Debug, Error)]
pub enum RequisitionWorkflowError {
    /// Domain validation or a status transition failed.
    #[error(transparent)]
    Domain(#[from] RequisitionDomainError),
    /// Requisition persistence failed.
    #[error(transparent)]
    Repository(#[from] RequisitionRepositoryError),
    /// Stock persistence failed during the availability check.
    #[error(transparent)]
    Stock(#[from] StockRepositoryError),
    /// Issuing or returning stock failed.
    #[error(transparent)]
    Issue(#[from] StockIssueError),
    /// The user directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Document code generation failed.
    #[error(transparent)]
    Numbering(#[from] SequenceStoreError),
    /// The notification fan-out failed.
    #[error(transparent)]
    Notification(#[from] NotificationFanoutError),
    /// The requisition does not exist.
    #[error("requisition not found: {0}")]
    NotFound(RequisitionId),
    /// A referenced account is not in the directory.
    #[error("user account not found: {0}")]
    UnknownAccount(UserId),
    /// A requested line references an uncatalogued item.
    #[error("stock item not found: {0}")]
    UnknownItem(StockItemId),
    /// The current stock level cannot cover a requested line.
    #[error("insufficient stock of {name}: {available} available, {requested} requested")]
    InsufficientStock {
        /// Display name of the item that fell short.
        name: String,
        /// Units currently in stock.
        available: u32,
        /// Units the line asked for.
        requested: u32,
    },
}

/// Result type for requisition workflow operations.
pub type RequisitionWorkflowResult<T> = Result<T, RequisitionWorkflowError>;

/// Orchestrates the requisition lifecycle across persistence, stock, the
/// user directory, document numbering, and notification fan-out.
#[derive(Clone)]
pub struct RequisitionWorkflow<R, S, L, D, G, P, C>
where
    R: RequisitionRepository,
    S: StockRepository,
    L: IssueLogRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    requisitions: Arc<R>,
    stock: Arc<S>,
    issue: StockIssueService<S, L, C>,
    directory: Arc<D>,
    numbering: Arc<G>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, S, L, D, G, P, C> RequisitionWorkflow<R, S, L, D, G, P, C>
where
    R: RequisitionRepository,
    S: StockRepository,
    L: IssueLogRepository,
    D: UserDirectory,
    G: DocumentNumbering,
    P: NotificationPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a requisition workflow service.
    #[must_use]
    pub fn new(
        requisitions: Arc<R>,
        stock: Arc<S>,
        issue_logs: Arc<L>,
        directory: Arc<D>,
        numbering: Arc<G>,
        publisher: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        let issue = StockIssueService::new(Arc::clone(&stock), issue_logs, Arc::clone(&clock));
        Self {
            requisitions,
            stock,
            issue,
            directory,
            numbering,
            publisher,
            clock,
        }
    }

    /// Creates a requisition: checks every line against the current stock
    /// level, generates the monthly code, persists, and notifies
    /// administrators and managers.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::UnknownItem`] or
    /// [`RequisitionWorkflowError::InsufficientStock`] when a line cannot
    /// be served, and [`RequisitionWorkflowError::Domain`] for an invalid
    /// required date or line set.
    pub async fn create(
        &self,
        params: RequisitionParams,
    ) -> RequisitionWorkflowResult<Requisition> {
        let requester = self.account(params.requested_by).await?;
        for draft in &params.lines {
            let item = self
                .stock
                .find_by_id(draft.item)
                .await?
                .ok_or(RequisitionWorkflowError::UnknownItem(draft.item))?;
            if item.quantity() < draft.quantity_required {
                return Err(RequisitionWorkflowError::InsufficientStock {
                    name: item.name().to_owned(),
                    available: item.quantity(),
                    requested: draft.quantity_required,
                });
            }
        }

        let line_count = params.lines.len();
        let code = self.numbering.monthly_code(DocumentKind::Requisition).await?;
        let requisition = Requisition::new(code, params, &*self.clock)?;
        self.requisitions.store(&requisition).await?;

        let message = format!(
            "Requisition with {line_count} items has been requested by {}.",
            requester.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Requisition Created",
                    message,
                    NotificationKind::RequisitionCreated,
                    requester.id(),
                )
                .with_subject(subject(&requisition))
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(requisition.required_by())),
            )
            .await?;
        debug!(code = %requisition.code(), "requisition created");
        Ok(requisition)
    }

    /// Amends a pending requisition and notifies administrators and
    /// managers.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::NotFound`] for an unknown
    /// requisition and [`RequisitionWorkflowError::Domain`] once the
    /// requisition has left `Pending`.
    pub async fn amend(
        &self,
        id: RequisitionId,
        params: AmendRequisitionParams,
        actor: UserId,
    ) -> RequisitionWorkflowResult<Requisition> {
        let editor = self.account(actor).await?;
        let mut requisition = self.load(id).await?;
        requisition.amend(params, &*self.clock)?;
        self.requisitions.update(&requisition).await?;

        let message = format!(
            "Requisition has been updated by {}.",
            editor.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Requisition Updated",
                    message,
                    NotificationKind::RequisitionUpdated,
                    editor.id(),
                )
                .with_subject(subject(&requisition))
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(requisition.required_by())),
            )
            .await?;
        debug!(code = %requisition.code(), "requisition amended");
        Ok(requisition)
    }

    /// Deletes a pending requisition and notifies administrators and
    /// managers.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::NotFound`] for an unknown
    /// requisition and [`RequisitionWorkflowError::Domain`] once the
    /// requisition has left `Pending`.
    pub async fn delete(&self, id: RequisitionId, actor: UserId) -> RequisitionWorkflowResult<()> {
        let editor = self.account(actor).await?;
        let requisition = self.load(id).await?;
        requisition.ensure_deletable()?;

        let document = subject(&requisition);
        let required_by = requisition.required_by();
        self.requisitions.remove(id).await?;

        let message = format!(
            "Requisition has been deleted by {}.",
            editor.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Requisition Deleted",
                    message,
                    NotificationKind::RequisitionDeleted,
                    editor.id(),
                )
                .with_subject(document)
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(required_by)),
            )
            .await?;
        debug!(code = %requisition.code(), "requisition deleted");
        Ok(())
    }

    /// Approves or rejects a pending requisition, recording the approver
    /// and decision timestamp.
    ///
    /// Approval notifies the requester's role plus the lab assistants;
    /// rejection notifies the requester's role only.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::Domain`] with the from/to
    /// states when the requisition has already been decided.
    pub async fn decide(
        &self,
        id: RequisitionId,
        decision: RequisitionDecision,
        approver: UserId,
        remark: Option<String>,
    ) -> RequisitionWorkflowResult<Requisition> {
        let deciding = self.account(approver).await?;
        let mut requisition = self.load(id).await?;
        let requester = self.account(requisition.requested_by()).await?;
        requisition.decide(decision, approver, remark, &*self.clock)?;
        self.requisitions.update(&requisition).await?;

        let mut recipients = requester_roles(&requester);
        let (title, kind, verb) = match decision {
            RequisitionDecision::Approve => {
                if !recipients.contains(&Role::LabAssistant) {
                    recipients.push(Role::LabAssistant);
                }
                (
                    "Requisition Approved",
                    NotificationKind::RequisitionApproved,
                    "approved",
                )
            }
            RequisitionDecision::Reject => (
                "Requisition Rejected",
                NotificationKind::RequisitionRejected,
                "rejected",
            ),
        };
        let message = format!(
            "Requisition has been {verb} by {}.",
            deciding.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(title, message, kind, requester.id())
                    .with_subject(subject(&requisition))
                    .with_recipients(recipients)
                    .with_expiry(expiry(requisition.required_by())),
            )
            .await?;
        debug!(
            code = %requisition.code(),
            status = requisition.status().as_str(),
            "requisition decided"
        );
        Ok(requisition)
    }

    /// Issues stock against an approved requisition: records per-line
    /// issued quantities, decrements stock, opens an issue log per line,
    /// and notifies the lab assistants, faculty, and administrators.
    ///
    /// Line validation happens before any stock is touched; a quantity of
    /// zero or a line not on the requisition leaves stock unchanged. The
    /// per-line stock writes that follow are sequential without a
    /// cross-document transaction.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::Domain`] unless the
    /// requisition is `Approved`, and [`RequisitionWorkflowError::Issue`]
    /// when the stock level cannot cover a line.
    pub async fn issue(
        &self,
        id: RequisitionId,
        issues: &[LineIssue],
        issuer: UserId,
    ) -> RequisitionWorkflowResult<Requisition> {
        let mut requisition = self.load(id).await?;
        let requester = self.account(requisition.requested_by()).await?;
        requisition.issue_lines(issues, issuer, &*self.clock)?;

        let source = subject(&requisition);
        for entry in issues {
            let line = requisition
                .line(entry.line)
                .ok_or(RequisitionDomainError::UnknownLine(entry.line))?;
            self.issue
                .log_issue(LogIssueRequest {
                    item: line.item(),
                    source,
                    quantity: entry.quantity,
                    issued_to: requester.email().clone(),
                })
                .await?;
        }
        self.requisitions.update(&requisition).await?;

        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Requisition Issued",
                    "Requisition has been issued.",
                    NotificationKind::RequisitionIssued,
                    requester.id(),
                )
                .with_subject(source)
                .with_recipients([Role::LabAssistant, Role::Faculty, Role::Admin])
                .with_expiry(expiry(requisition.required_by())),
            )
            .await?;
        debug!(code = %requisition.code(), lines = issues.len(), "requisition issued");
        Ok(requisition)
    }

    /// Marks an issued requisition as returned: records per-line returned
    /// and lost-or-damaged quantities, closes the matching issue logs,
    /// restores returned stock, and notifies administrators and managers.
    ///
    /// Lines whose class was written off at issue time have no
    /// outstanding log; their returned units are added straight back to
    /// stock.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionWorkflowError::Domain`] unless the
    /// requisition is `Issued` or when a return exceeds what was issued.
    pub async fn mark_returned(
        &self,
        id: RequisitionId,
        returns: &[LineReturn],
    ) -> RequisitionWorkflowResult<Requisition> {
        let mut requisition = self.load(id).await?;
        let requester = self.account(requisition.requested_by()).await?;
        requisition.record_returns(returns, &*self.clock)?;

        let source = subject(&requisition);
        let logs = self.issue.logs_for_source(source).await?;
        let mut closed: Vec<IssueLogId> = Vec::new();
        for entry in returns {
            let line = requisition
                .line(entry.line)
                .ok_or(RequisitionDomainError::UnknownLine(entry.line))?;
            let open_log = logs.iter().find(|log| {
                log.item() == line.item()
                    && log.status() == IssueLogStatus::Outstanding
                    && !closed.contains(&log.id())
            });
            if let Some(log) = open_log {
                self.issue
                    .close_log(log.id(), entry.returned, entry.lost_or_damaged)
                    .await?;
                closed.push(log.id());
            } else {
                self.issue.return_to_stock(line.item(), entry.returned).await?;
            }
        }
        self.requisitions.update(&requisition).await?;

        let message = format!(
            "Requisition has been marked as returned by {}.",
            requester.display_name()
        );
        self.publisher
            .publish_event(
                PublishNotificationRequest::new(
                    "Requisition Returned",
                    message,
                    NotificationKind::RequisitionReturned,
                    requester.id(),
                )
                .with_subject(source)
                .with_recipients([Role::Admin, Role::Manager])
                .with_expiry(expiry(requisition.required_by())),
            )
            .await?;
        debug!(code = %requisition.code(), "requisition returned");
        Ok(requisition)
    }

    async fn load(&self, id: RequisitionId) -> RequisitionWorkflowResult<Requisition> {
        self.requisitions
            .find_by_id(id)
            .await?
            .ok_or(RequisitionWorkflowError::NotFound(id))
    }

    async fn account(&self, id: UserId) -> RequisitionWorkflowResult<UserAccount> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(RequisitionWorkflowError::UnknownAccount(id))
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

/// Notifications about a requisition lapse one day after its required date.
fn expiry(required_by: NaiveDate) -> DateTime<Utc> {
    required_by
        .checked_add_days(Days::new(1))
        .unwrap_or(required_by)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn subject(requisition: &Requisition) -> DocumentRef {
    DocumentRef::new(DocumentKind::Requisition, requisition.id().into_inner())
}
