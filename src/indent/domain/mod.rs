//! Purchase request domain model.

mod error;
mod ids;
mod kind;
mod line;
mod request;
mod status;

pub use error::{
    IndentDomainError, ParsePurchaseRequestKindError, ParsePurchaseRequestStatusError,
};
pub use ids::{PurchaseRequestId, PurchaseRequestLineId};
pub use kind::PurchaseRequestKind;
pub use line::{PurchaseRequestLine, PurchaseRequestLineDraft};
pub use request::{
    AmendPurchaseRequestParams, PersistedPurchaseRequestData, PurchaseRequest,
    PurchaseRequestParams,
};
pub use status::{PurchaseRequestDecision, PurchaseRequestStatus};
