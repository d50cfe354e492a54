//! Error types for protocol values.

use thiserror::Error;

/// Failure to interpret a numeric reply code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    /// The input was not a decimal number.
    #[error("not a numeric reply: {0:?}")]
    NotNumeric(String),
    /// The number is not a reply this crate knows about.
    #[error("unknown numeric reply {0:03}")]
    Unknown(u16),
}
