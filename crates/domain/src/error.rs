//! Domain validation error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced when constructing or validating domain documents.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Check-out must be strictly after check-in.
    #[error("Invalid stay: check-out {check_out} must be after check-in {check_in}")]
    EmptyStay {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// Monetary amount must be greater than zero.
    #[error("Invalid amount: {cents} cents (must be greater than 0)")]
    NonPositiveAmount { cents: i64 },

    /// A room needs at least one bed.
    #[error("Invalid bed count: {beds} (must be at least 1)")]
    InvalidBedCount { beds: u32 },
}
