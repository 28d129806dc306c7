pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

pub use crate::core::{
    EntryOutcome, EntryWorkflow, QuotationBrowser, QuotationForm, QuotationStore,
};
pub use config::{AppConfig, Cli, Command};
pub use domain::model::{Client, LineItem, Quotation};
pub use render::QuoteRenderer;
pub use utils::error::{QuoteError, Result};
