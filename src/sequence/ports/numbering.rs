//! Driving port for document numbering.

use crate::sequence::domain::{CategoryKind, DocumentCode, DocumentKind, GroupKey, OrderNumber};
use async_trait::async_trait;

use super::SequenceStoreResult;

/// Issues workflow document numbers.
///
/// Workflow contexts depend on this seam instead of a concrete generator so
/// numbering can be mocked in service tests.
#[async_trait]
pub trait DocumentNumbering: Send + Sync {
    /// Issues the next monthly code for a document kind.
    ///
    /// # Errors
    ///
    /// Returns [`super::SequenceStoreError`] when the counter store fails.
    async fn monthly_code(&self, kind: DocumentKind) -> SequenceStoreResult<DocumentCode>;

    /// Issues the next order number for a budget category, scoped by the
    /// optional grouping key and the current financial year.
    ///
    /// # Errors
    ///
    /// Returns [`super::SequenceStoreError`] when the counter store fails.
    async fn order_number(
        &self,
        category: CategoryKind,
        group_key: Option<&GroupKey>,
    ) -> SequenceStoreResult<OrderNumber>;
}
