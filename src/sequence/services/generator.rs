//! Code generation service drawing from the counter store.

use crate::sequence::{
    domain::{
        CategoryKind, DocumentCode, DocumentKind, FinancialYear, GroupKey, InstitutionTag,
        OrderNumber, SequencePrefix,
    },
    ports::{DocumentNumbering, SequenceStore, SequenceStoreResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// Generates document codes and order numbers.
///
/// Each generated value draws the next counter for its prefix, so codes are
/// unique and strictly increasing per document kind and month, and order
/// numbers per institution, category, grouping key, and financial year.
#[derive(Clone)]
pub struct CodeGenerator<S, C>
where
    S: SequenceStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    institution: InstitutionTag,
}

impl<S, C> CodeGenerator<S, C>
where
    S: SequenceStore,
    C: Clock + Send + Sync,
{
    /// Creates a generator with the default institution tag.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            institution: InstitutionTag::default(),
        }
    }

    /// Replaces the institution tag used in order numbers.
    #[must_use]
    pub fn with_institution(mut self, institution: InstitutionTag) -> Self {
        self.institution = institution;
        self
    }

    /// Returns the institution tag used in order numbers.
    #[must_use]
    pub const fn institution(&self) -> &InstitutionTag {
        &self.institution
    }
}

#[async_trait]
impl<S, C> DocumentNumbering for CodeGenerator<S, C>
where
    S: SequenceStore,
    C: Clock + Send + Sync,
{
    async fn monthly_code(&self, kind: DocumentKind) -> SequenceStoreResult<DocumentCode> {
        let today = self.clock.utc().date_naive();
        let prefix = SequencePrefix::monthly(kind, today);
        let counter = self.store.next(&prefix).await?;
        Ok(DocumentCode::compose(kind, today, counter))
    }

    async fn order_number(
        &self,
        category: CategoryKind,
        group_key: Option<&GroupKey>,
    ) -> SequenceStoreResult<OrderNumber> {
        let financial_year = FinancialYear::from_date(self.clock.utc().date_naive());
        let prefix = SequencePrefix::order(&self.institution, category, group_key, financial_year);
        let counter = self.store.next(&prefix).await?;
        Ok(OrderNumber::compose(
            &self.institution,
            category,
            group_key,
            counter,
            financial_year,
        ))
    }
}
