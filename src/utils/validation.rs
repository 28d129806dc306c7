use crate::utils::error::{QuoteError, Result};
use rust_decimal::Decimal;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuoteError::ValidationError {
            field: field_name.to_string(),
            reason: "value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QuoteError::ValidationError {
            field: field_name.to_string(),
            reason: "path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QuoteError::ValidationError {
            field: field_name.to_string(),
            reason: "path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_quantity(field_name: &str, quantity: u32) -> Result<()> {
    if quantity < 1 {
        return Err(QuoteError::ValidationError {
            field: field_name.to_string(),
            reason: "quantity must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unit_price(field_name: &str, price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(QuoteError::ValidationError {
            field: field_name.to_string(),
            reason: "unit price cannot be negative".to_string(),
        });
    }
    Ok(())
}
