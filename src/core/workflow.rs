use crate::core::store::QuotationStore;
use crate::domain::model::{Client, LineItem, Quotation};
use crate::render::QuoteRenderer;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_quantity, validate_unit_price, Validate,
};
use std::fs;
use std::path::{Path, PathBuf};

/// The operator's submitted form state: client fields plus at least one
/// complete line item.
#[derive(Debug, Clone)]
pub struct QuotationForm {
    pub client: Client,
    pub items: Vec<LineItem>,
}

impl Validate for QuotationForm {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("client.name", &self.client.name)?;
        validate_non_empty_string("client.tax_id", &self.client.tax_id)?;
        validate_non_empty_string("client.phone", &self.client.phone)?;
        validate_non_empty_string("client.email", &self.client.email)?;
        validate_non_empty_string("client.address", &self.client.address)?;

        if self.items.is_empty() {
            return Err(crate::utils::error::QuoteError::ValidationError {
                field: "items".to_string(),
                reason: "a quotation needs at least one line item".to_string(),
            });
        }
        for (i, item) in self.items.iter().enumerate() {
            validate_non_empty_string(&format!("items[{}].description", i), &item.description)?;
            validate_unit_price(&format!("items[{}].unit_price", i), item.unit_price)?;
            validate_quantity(&format!("items[{}].quantity", i), item.quantity)?;
        }
        Ok(())
    }
}

/// Result of submitting a form. `render_error` is set when the quotation was
/// persisted but its PDF could not be produced; the record is kept either way.
#[derive(Debug)]
pub struct EntryOutcome {
    pub quotation: Quotation,
    pub pdf_path: Option<PathBuf>,
    pub render_error: Option<String>,
}

pub struct EntryWorkflow<'a> {
    store: &'a QuotationStore,
    renderer: &'a QuoteRenderer,
    output_dir: PathBuf,
}

impl<'a> EntryWorkflow<'a> {
    pub fn new(
        store: &'a QuotationStore,
        renderer: &'a QuoteRenderer,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// Validates the form, persists the new quotation, then renders its PDF.
    /// A render failure after the append does not roll the record back.
    pub fn submit(&self, form: QuotationForm) -> Result<EntryOutcome> {
        form.validate()?;

        let quotation = self.store.append_and_persist(form.client, form.items)?;
        tracing::info!("stored quotation #{}", quotation.id);

        let (pdf_path, render_error) = match self.render_to_file(&quotation) {
            Ok(path) => {
                tracing::info!("rendered {}", path.display());
                (Some(path), None)
            }
            Err(e) => {
                tracing::error!(
                    "quotation #{} was saved but its PDF failed: {}",
                    quotation.id,
                    e
                );
                (None, Some(e.to_string()))
            }
        };

        Ok(EntryOutcome {
            quotation,
            pdf_path,
            render_error,
        })
    }

    /// Renders a quotation and writes `cotizacion_<id>.pdf` into the output
    /// directory, overwriting any previous file of the same name.
    pub fn render_to_file(&self, quotation: &Quotation) -> Result<PathBuf> {
        let bytes = self.renderer.render(quotation)?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("cotizacion_{}.pdf", quotation.id));
        fs::write(&path, bytes)?;
        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
