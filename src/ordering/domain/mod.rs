//! Purchase order and invoice domain model.

mod error;
mod ids;
mod invoice;
mod line;
mod money;
mod order;
mod status;

pub(crate) use error::MAX_NOTES_LENGTH;
pub use error::{OrderingDomainError, ParseInvoiceStatusError, ParseOrderStatusError};
pub use ids::{InvoiceId, PurchaseOrderId, VendorId};
pub use invoice::{Invoice, InvoiceParams, PersistedInvoiceData};
pub use line::{OrderLine, OrderLineDraft};
pub use money::Money;
pub use order::{PersistedPurchaseOrderData, PurchaseOrder, PurchaseOrderParams};
pub use status::{InvoiceDecision, InvoiceStatus, OrderDecision, OrderStatus};
