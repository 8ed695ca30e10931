//! Error types for the ledger boundary

use super::types::RecordId;
use thiserror::Error;

/// Errors surfaced by ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Record id is unknown to the contract
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// The user declined the signing request in their wallet.
    /// Distinguished so it maps to its own user-facing message.
    #[error("Transaction rejected by user")]
    UserRejected,

    /// Contract call reverted or returned an error
    #[error("Contract error: {0}")]
    Contract(String),

    /// Transport-level failure reaching the ledger node
    #[error("Network error: {0}")]
    Network(String),
}

impl LedgerError {
    /// Whether this failure is the distinguished signing-refusal case
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, LedgerError::UserRejected)
    }
}
