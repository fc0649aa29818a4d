use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Degenerate escalation rate in {context}: {rate} (must be greater than -100%)")]
    DegenerateRate { context: String, rate: Decimal },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::SerializationError(e.to_string())
    }
}
