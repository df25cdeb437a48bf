//! Shared world state for requisition approval BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use lavoisier::directory::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, Role, UserAccount},
    ports::UserDirectory,
};
use lavoisier::inventory::{
    adapters::memory::{InMemoryIssueLogRepository, InMemoryStockRepository},
    domain::{ItemClass, StockItem},
    ports::StockRepository,
};
use lavoisier::notification::{
    adapters::memory::{InMemoryNotificationRepository, RecordingMailer},
    services::{NotificationFanout, SenderIdentity},
};
use lavoisier::requisition::{
    adapters::memory::InMemoryRequisitionRepository,
    domain::{Requisition, RequisitionLineDraft, RequisitionParams},
    services::{RequisitionWorkflow, RequisitionWorkflowError},
};
use lavoisier::sequence::{
    adapters::memory::InMemorySequenceStore,
    domain::{CategoryKind, CategoryRef},
    services::CodeGenerator,
};
use mockable::DefaultClock;
use rstest::fixture;
use uuid::Uuid;

/// Fan-out service used by the BDD world.
pub type WorldFanout = NotificationFanout<
    InMemoryNotificationRepository,
    InMemoryUserDirectory,
    RecordingMailer,
    DefaultClock,
>;

/// Workflow service under test.
pub type WorldWorkflow = RequisitionWorkflow<
    InMemoryRequisitionRepository,
    InMemoryStockRepository,
    InMemoryIssueLogRepository,
    InMemoryUserDirectory,
    CodeGenerator<InMemorySequenceStore, DefaultClock>,
    WorldFanout,
    DefaultClock,
>;

/// Scenario world for requisition approval behaviour tests.
pub struct RequisitionWorld {
    /// The requisition workflow under test.
    pub workflow: WorldWorkflow,
    /// User directory backing the workflow.
    pub directory: Arc<InMemoryUserDirectory>,
    /// Stock catalogue backing the workflow.
    pub stock: Arc<InMemoryStockRepository>,
    /// Fan-out service backing the workflow.
    pub fanout: Arc<WorldFanout>,
    /// Account raising requisitions.
    pub requester: Option<UserAccount>,
    /// Administrator deciding requisitions.
    pub approver: Option<UserAccount>,
    /// Catalogued items by display name.
    pub items: HashMap<String, StockItem>,
    /// The requisition the scenario drives.
    pub requisition: Option<Requisition>,
    /// Result of the last create attempt.
    pub last_create_result: Option<Result<Requisition, RequisitionWorkflowError>>,
    /// Result of the last decision attempt.
    pub last_decide_result: Option<Result<Requisition, RequisitionWorkflowError>>,
}

impl RequisitionWorld {
    /// Creates a world with freshly wired in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let directory = Arc::new(InMemoryUserDirectory::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let stock = Arc::new(InMemoryStockRepository::new());
        let fanout = Arc::new(NotificationFanout::new(
            notifications,
            Arc::clone(&directory),
            Arc::new(RecordingMailer::new()),
            Arc::clone(&clock),
            SenderIdentity::new(
                EmailAddress::new("stores@lab.example.org").expect("valid address"),
                "Laboratory Stores",
            ),
        ));
        let workflow = RequisitionWorkflow::new(
            Arc::new(InMemoryRequisitionRepository::new()),
            Arc::clone(&stock),
            Arc::new(InMemoryIssueLogRepository::new()),
            Arc::clone(&directory),
            Arc::new(CodeGenerator::new(
                Arc::new(InMemorySequenceStore::new()),
                Arc::clone(&clock),
            )),
            Arc::clone(&fanout),
            clock,
        );
        Self {
            workflow,
            directory,
            stock,
            fanout,
            requester: None,
            approver: None,
            items: HashMap::new(),
            requisition: None,
            last_create_result: None,
            last_decide_result: None,
        }
    }

    /// Registers and remembers an account under the given role.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is invalid or already stored.
    pub fn seed_account(
        &self,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserAccount, eyre::Report> {
        let account = UserAccount::new(
            name,
            EmailAddress::new(email).map_err(|err| eyre::eyre!("invalid address: {err}"))?,
            [role],
            &DefaultClock,
        )
        .map_err(|err| eyre::eyre!("invalid account: {err}"))?;
        run_async(self.directory.store(&account))
            .map_err(|err| eyre::eyre!("store account: {err}"))?;
        Ok(account)
    }

    /// Catalogues and remembers a stock item.
    ///
    /// # Errors
    ///
    /// Returns an error when the item is invalid or already stored.
    pub fn seed_item(&mut self, name: &str, quantity: u32) -> Result<(), eyre::Report> {
        let item = StockItem::new(
            ItemClass::Glasswares,
            format!("GL-{}", self.items.len()),
            name,
            "piece",
            quantity,
            &DefaultClock,
        )
        .map_err(|err| eyre::eyre!("invalid item: {err}"))?;
        run_async(self.stock.store(&item)).map_err(|err| eyre::eyre!("store item: {err}"))?;
        self.items.insert(name.to_owned(), item);
        Ok(())
    }

    /// Builds requisition params for a single line against a seeded item.
    ///
    /// # Errors
    ///
    /// Returns an error when the item or requester is missing from the world.
    pub fn single_line_params(
        &self,
        item_name: &str,
        quantity: u32,
    ) -> Result<RequisitionParams, eyre::Report> {
        let item = self
            .items
            .get(item_name)
            .ok_or_else(|| eyre::eyre!("item '{item_name}' not seeded"))?;
        let requester = self
            .requester
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no requester in scenario world"))?;
        Ok(RequisitionParams {
            category: CategoryRef::new(CategoryKind::Practical, Uuid::new_v4()),
            required_by: required_by(),
            lines: vec![RequisitionLineDraft {
                item: item.id(),
                class: item.class(),
                unit: "piece".to_owned(),
                quantity_required: quantity,
                description: "undergraduate practicals".to_owned(),
                remark: None,
            }],
            requested_by: requester.id(),
            remark: None,
        })
    }
}

impl Default for RequisitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RequisitionWorld {
    RequisitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// A required date comfortably in the future.
fn required_by() -> NaiveDate {
    Utc::now().date_naive() + Days::new(7)
}
