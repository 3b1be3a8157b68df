//! Common error types for chart analysis

use thiserror::Error;

/// Common result type for chart analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the analysis core
///
/// Every variant is a caller or input defect. Degenerate (all-zero) strength
/// totals are not errors and never reach this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Input does not map to a known stem, branch or element
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Chart does not consist of exactly four well-formed pillars
    #[error("Malformed chart: {0}")]
    MalformedChart(String),

    /// Scoring configuration rejected (weights, unknown strategies)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by the external calendar oracle
    #[error("Calendar oracle error: {0}")]
    Oracle(#[from] anyhow::Error),
}
