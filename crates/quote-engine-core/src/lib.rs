pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;

pub use error::QuoteError;
pub use pricing::compute_schedule;
pub use types::*;

/// Standard result type for all quote-engine operations
pub type QuoteResult<T> = Result<T, QuoteError>;
