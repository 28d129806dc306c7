pub mod browser;
pub mod store;
pub mod workflow;

pub use browser::{QuotationBrowser, QuotationView};
pub use store::{LoadedStore, QuotationStore, StoreRecovery};
pub use workflow::{EntryOutcome, EntryWorkflow, QuotationForm};
