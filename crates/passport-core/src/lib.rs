pub mod benchmark;
pub mod error;
pub mod ratios;
pub mod report;
pub mod scoring;
pub mod simulate;
pub mod statement;
pub mod trend;
pub mod types;

pub use error::PassportError;
pub use types::*;

/// Standard result type for all engine operations
pub type PassportResult<T> = Result<T, PassportError>;
