//! Shared test helpers for in-memory adapter integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use lavoisier::directory::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, Role, UserAccount, UserId},
    ports::UserDirectory,
};
use lavoisier::indent::{
    adapters::memory::InMemoryPurchaseRequestRepository, services::PurchaseRequestWorkflow,
};
use lavoisier::inventory::{
    adapters::memory::{
        InMemoryIssueLogRepository, InMemoryRestockRepository, InMemoryStockRepository,
    },
    domain::{ItemClass, StockItem},
    ports::StockRepository,
    services::{MaintenanceScanner, RestockingService},
};
use lavoisier::notification::{
    adapters::memory::{InMemoryNotificationRepository, RecordingMailer},
    services::{NotificationFanout, SenderIdentity},
};
use lavoisier::ordering::{
    adapters::memory::{InMemoryInvoiceRepository, InMemoryOrderRepository},
    services::ProcurementWorkflow,
};
use lavoisier::requisition::{
    adapters::memory::InMemoryRequisitionRepository, services::RequisitionWorkflow,
};
use lavoisier::sequence::{adapters::memory::InMemorySequenceStore, services::CodeGenerator};
use mockable::Clock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Boxed error type shared by the integration suites.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Clock pinned to a fixed instant, for deterministic codes and windows.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fan-out service over the in-memory adapters.
pub type TestFanout = NotificationFanout<
    InMemoryNotificationRepository,
    InMemoryUserDirectory,
    RecordingMailer,
    FixedClock,
>;

/// Code generator over the in-memory counter store.
pub type TestNumbering = CodeGenerator<InMemorySequenceStore, FixedClock>;

/// Requisition workflow over the in-memory adapters.
pub type TestRequisitionWorkflow = RequisitionWorkflow<
    InMemoryRequisitionRepository,
    InMemoryStockRepository,
    InMemoryIssueLogRepository,
    InMemoryUserDirectory,
    TestNumbering,
    TestFanout,
    FixedClock,
>;

/// Purchase request workflow over the in-memory adapters.
pub type TestPurchaseRequestWorkflow = PurchaseRequestWorkflow<
    InMemoryPurchaseRequestRepository,
    InMemoryUserDirectory,
    TestNumbering,
    TestFanout,
    FixedClock,
>;

/// Procurement workflow over the in-memory adapters.
pub type TestProcurementWorkflow = ProcurementWorkflow<
    InMemoryOrderRepository,
    InMemoryInvoiceRepository,
    InMemoryUserDirectory,
    TestNumbering,
    TestFanout,
    FixedClock,
>;

/// Inward stock recording service over the in-memory adapters.
pub type TestRestockingService = RestockingService<
    InMemoryRestockRepository,
    InMemoryStockRepository,
    TestNumbering,
    TestFanout,
    FixedClock,
>;

/// Maintenance scanner over the in-memory adapters.
pub type TestScanner = MaintenanceScanner<
    InMemoryRestockRepository,
    InMemoryStockRepository,
    TestFanout,
    FixedClock,
>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides the pinned test clock.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 8, 24, 10, 30, 0)
            .single()
            .expect("valid instant"),
    )
}

/// The date the pinned clock reports.
pub fn today() -> NaiveDate {
    clock().0.date_naive()
}

/// Every in-memory adapter and service wired together, the way the
/// application assembles them.
pub struct Lab {
    /// User directory.
    pub directory: Arc<InMemoryUserDirectory>,
    /// Notification store.
    pub notifications: Arc<InMemoryNotificationRepository>,
    /// Recording mail relay.
    pub mailer: Arc<RecordingMailer>,
    /// Fan-out service.
    pub fanout: Arc<TestFanout>,
    /// Counter store behind the code generator.
    pub sequences: Arc<InMemorySequenceStore>,
    /// Code generator.
    pub numbering: Arc<TestNumbering>,
    /// Stock catalogue.
    pub stock: Arc<InMemoryStockRepository>,
    /// Inward entries.
    pub restocks: Arc<InMemoryRestockRepository>,
    /// Issue logs.
    pub issue_logs: Arc<InMemoryIssueLogRepository>,
    /// Requisition store.
    pub requisitions: Arc<InMemoryRequisitionRepository>,
    /// Purchase request store.
    pub requests: Arc<InMemoryPurchaseRequestRepository>,
    /// Purchase order store.
    pub orders: Arc<InMemoryOrderRepository>,
    /// Invoice store.
    pub invoices: Arc<InMemoryInvoiceRepository>,
    /// Requisition workflow.
    pub requisition_workflow: TestRequisitionWorkflow,
    /// Purchase request workflow.
    pub request_workflow: TestPurchaseRequestWorkflow,
    /// Procurement workflow.
    pub procurement: TestProcurementWorkflow,
    /// Inward stock recording service.
    pub restocking: TestRestockingService,
    /// Maintenance scanner.
    pub scanner: TestScanner,
    /// Actor the scanner attributes reminders to.
    pub system_actor: UserId,
}

impl Lab {
    /// Wires every in-memory adapter and service against the pinned clock.
    #[must_use]
    pub fn new() -> Self {
        let shared_clock = Arc::new(clock());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let mailer = Arc::new(RecordingMailer::new());
        let fanout = Arc::new(NotificationFanout::new(
            Arc::clone(&notifications),
            Arc::clone(&directory),
            Arc::clone(&mailer),
            Arc::clone(&shared_clock),
            SenderIdentity::new(
                EmailAddress::new("stores@lab.example.org").expect("valid address"),
                "Laboratory Stores",
            ),
        ));
        let sequences = Arc::new(InMemorySequenceStore::new());
        let numbering = Arc::new(CodeGenerator::new(
            Arc::clone(&sequences),
            Arc::clone(&shared_clock),
        ));
        let stock = Arc::new(InMemoryStockRepository::new());
        let restocks = Arc::new(InMemoryRestockRepository::new());
        let issue_logs = Arc::new(InMemoryIssueLogRepository::new());
        let requisitions = Arc::new(InMemoryRequisitionRepository::new());
        let requests = Arc::new(InMemoryPurchaseRequestRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let invoices = Arc::new(InMemoryInvoiceRepository::new());
        let system_actor = UserId::new();

        let requisition_workflow = RequisitionWorkflow::new(
            Arc::clone(&requisitions),
            Arc::clone(&stock),
            Arc::clone(&issue_logs),
            Arc::clone(&directory),
            Arc::clone(&numbering),
            Arc::clone(&fanout),
            Arc::clone(&shared_clock),
        );
        let request_workflow = PurchaseRequestWorkflow::new(
            Arc::clone(&requests),
            Arc::clone(&directory),
            Arc::clone(&numbering),
            Arc::clone(&fanout),
            Arc::clone(&shared_clock),
        );
        let procurement = ProcurementWorkflow::new(
            Arc::clone(&orders),
            Arc::clone(&invoices),
            Arc::clone(&directory),
            Arc::clone(&numbering),
            Arc::clone(&fanout),
            Arc::clone(&shared_clock),
        );
        let restocking = RestockingService::new(
            Arc::clone(&restocks),
            Arc::clone(&stock),
            Arc::clone(&numbering),
            Arc::clone(&fanout),
            Arc::clone(&shared_clock),
        );
        let scanner = MaintenanceScanner::new(
            Arc::clone(&restocks),
            Arc::clone(&stock),
            Arc::clone(&fanout),
            Arc::clone(&shared_clock),
            system_actor,
        );

        Self {
            directory,
            notifications,
            mailer,
            fanout,
            sequences,
            numbering,
            stock,
            restocks,
            issue_logs,
            requisitions,
            requests,
            orders,
            invoices,
            requisition_workflow,
            request_workflow,
            procurement,
            restocking,
            scanner,
            system_actor,
        }
    }

    /// Registers an account under the given role.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is invalid or already stored.
    pub fn seed_account(
        &self,
        rt: &Runtime,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserAccount, BoxError> {
        let account = UserAccount::new(
            name,
            EmailAddress::new(email)?,
            [role],
            &clock(),
        )?;
        rt.block_on(self.directory.store(&account))?;
        Ok(account)
    }

    /// Catalogues a stock item with an initial level.
    ///
    /// # Errors
    ///
    /// Returns an error when the item is invalid or already stored.
    pub fn seed_item(
        &self,
        rt: &Runtime,
        class: ItemClass,
        code: &str,
        name: &str,
        quantity: u32,
    ) -> Result<StockItem, BoxError> {
        let item = StockItem::new(class, code, name, "piece", quantity, &clock())?;
        rt.block_on(self.stock.store(&item))?;
        Ok(item)
    }

    /// Titles currently on the in-app feed for a role, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the feed lookup fails.
    pub fn feed_titles(&self, rt: &Runtime, role: Role) -> Result<Vec<String>, BoxError> {
        Ok(rt
            .block_on(self.fanout.feed_for_roles(&[role]))?
            .iter()
            .map(|notification| notification.title().to_owned())
            .collect())
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a freshly wired laboratory for each test.
#[fixture]
pub fn lab() -> Lab {
    Lab::new()
}
