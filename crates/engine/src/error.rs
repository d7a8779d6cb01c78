//! The module contains the errors the expense domain can throw.

use thiserror::Error;

/// Engine custom errors.
///
/// Debt calculation itself is total over well-formed input; errors only
/// surface from currency lookups and expense validation.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
}
