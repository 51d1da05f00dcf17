//! Domain-level errors

use itertools::Itertools;
use thiserror::Error;

/// Domain errors represent violated rules about printers, selections and plans.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("duplicate printer id in config: {0}")]
    DuplicatePrinterId(u32),

    #[error("empty printer selection")]
    EmptySelection,

    #[error("invalid printer id: {0:?}")]
    InvalidPrinterId(String),

    #[error("unknown printer id(s): {}", format_ids(.0))]
    UnknownPrinters(Vec<u32>),

    #[error("invalid delay: {0} (must be a finite number of seconds >= 0)")]
    InvalidDelay(f64),
}

impl DomainError {
    /// Whether this error comes from resolving a printer selection.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            DomainError::EmptySelection
                | DomainError::InvalidPrinterId(_)
                | DomainError::UnknownPrinters(_)
        )
    }
}

fn format_ids(ids: &[u32]) -> String {
    ids.iter().join(", ")
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
