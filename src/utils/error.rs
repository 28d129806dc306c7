use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Validation error: {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("PDF rendering error: {message}")]
    RenderError { message: String },

    #[error("Quotation {id} not found")]
    NotFound { id: u64 },
}

pub type Result<T> = std::result::Result<T, QuoteError>;
