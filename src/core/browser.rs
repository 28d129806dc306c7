use crate::core::store::QuotationStore;
use crate::domain::model::{LineAmounts, Quotation};
use crate::utils::error::{QuoteError, Result};
use rust_decimal::Decimal;

/// One stored quotation with its recomputed amounts, ready for display.
#[derive(Debug, Clone)]
pub struct QuotationView {
    pub quotation: Quotation,
    /// Parallel to `quotation.items`.
    pub lines: Vec<LineAmounts>,
    pub grand_total: Decimal,
}

impl QuotationView {
    fn from_quotation(quotation: Quotation) -> Self {
        let lines: Vec<LineAmounts> = quotation.items.iter().map(|i| i.amounts()).collect();
        let grand_total = lines.iter().map(|l| l.total).sum();
        Self {
            quotation,
            lines,
            grand_total,
        }
    }
}

/// Read-only access to the store; never mutates it.
pub struct QuotationBrowser<'a> {
    store: &'a QuotationStore,
}

impl<'a> QuotationBrowser<'a> {
    pub fn new(store: &'a QuotationStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<QuotationView>> {
        let loaded = self.store.load()?;
        Ok(loaded
            .quotations
            .into_iter()
            .map(QuotationView::from_quotation)
            .collect())
    }

    /// Looks up a quotation by id, for the on-demand re-render action.
    pub fn find(&self, id: u64) -> Result<Quotation> {
        self.store
            .load()?
            .quotations
            .into_iter()
            .find(|q| q.id == id)
            .ok_or(QuoteError::NotFound { id })
    }
}
