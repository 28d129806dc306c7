use crate::domain::model::{Client, LineItem, Quotation};
use crate::utils::error::Result;
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Flat-file store for quotations: one pretty-printed JSON array, read in
/// full and rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct QuotationStore {
    path: PathBuf,
}

/// How `load` obtained its contents when the file was not a readable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRecovery {
    /// No file yet; a fresh store starts empty.
    MissingFile,
    /// The file existed but did not parse; its contents were discarded.
    CorruptFile { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadedStore {
    pub quotations: Vec<Quotation>,
    pub recovery: Option<StoreRecovery>,
}

impl QuotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full store. A missing file yields an empty store; an
    /// unparsable file yields an empty store with a `CorruptFile` marker so
    /// callers can decide how loudly to treat the data loss. Other I/O
    /// failures are hard errors.
    pub fn load(&self) -> Result<LoadedStore> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(LoadedStore {
                    quotations: Vec::new(),
                    recovery: Some(StoreRecovery::MissingFile),
                });
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<Quotation>>(&raw) {
            Ok(quotations) => Ok(LoadedStore {
                quotations,
                recovery: None,
            }),
            Err(e) => {
                tracing::warn!(
                    "store file {} is not a valid quotation list, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(LoadedStore {
                    quotations: Vec::new(),
                    recovery: Some(StoreRecovery::CorruptFile {
                        reason: e.to_string(),
                    }),
                })
            }
        }
    }

    /// Serializes the full sequence pretty-printed and overwrites the file.
    pub fn save(&self, quotations: &[Quotation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(quotations)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    /// Appends a new quotation with `id = len + 1` and today's date, persists
    /// the whole sequence, and returns the new record.
    pub fn append_and_persist(&self, client: Client, items: Vec<LineItem>) -> Result<Quotation> {
        let mut loaded = self.load()?;
        let quotation = Quotation {
            id: loaded.quotations.len() as u64 + 1,
            date: Some(Local::now().format("%d/%m/%Y").to_string()),
            client,
            items,
        };
        loaded.quotations.push(quotation.clone());
        self.save(&loaded.quotations)?;
        tracing::debug!(
            "persisted quotation #{} ({} total)",
            quotation.id,
            loaded.quotations.len()
        );
        Ok(quotation)
    }
}
