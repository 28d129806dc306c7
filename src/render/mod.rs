//! Fixed-layout PDF rendering for quotations.

mod page;
mod pdf;

pub use pdf::QuoteRenderer;
