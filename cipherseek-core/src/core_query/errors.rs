//! Error types for the query lifecycle

use crate::core_gateway::GatewayError;
use crate::core_ledger::LedgerError;
use crate::core_oracle::OracleError;
use thiserror::Error;

/// Result type for lifecycle operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while driving a query through its lifecycle
#[derive(Debug, Error)]
pub enum QueryError {
    /// Blocked before any network call (wallet disconnected, re-entry)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Encryption gateway failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Ledger failure
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Decryption oracle failure
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl QueryError {
    /// Whether the root cause is a declined signing request.
    ///
    /// Attestation failures arrive stringified from the coordinator, so the
    /// rejection marker is matched in the message there.
    pub fn is_user_rejection(&self) -> bool {
        match self {
            QueryError::Ledger(e) => e.is_user_rejection(),
            QueryError::Oracle(OracleError::AttestationFailed(msg)) => {
                msg.contains("rejected by user")
            }
            _ => false,
        }
    }

    /// Human-readable message for a status notice. `fallback` is the
    /// operation-specific generic message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            QueryError::Precondition(msg) => msg.clone(),
            _ if self.is_user_rejection() => "Transaction rejected by user".to_string(),
            QueryError::Gateway(GatewayError::InitializationFailed(_)) => {
                "Encryption service initialization failed".to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejection_via_ledger() {
        let err = QueryError::Ledger(LedgerError::UserRejected);
        assert!(err.is_user_rejection());
        assert_eq!(err.user_message("Search failed"), "Transaction rejected by user");
    }

    #[test]
    fn test_user_rejection_via_attestation() {
        let err = QueryError::Oracle(OracleError::AttestationFailed(
            "Transaction rejected by user".to_string(),
        ));
        assert!(err.is_user_rejection());
    }

    #[test]
    fn test_generic_failures_use_fallback() {
        let err = QueryError::Ledger(LedgerError::Network("timeout".to_string()));
        assert!(!err.is_user_rejection());
        assert_eq!(err.user_message("Search failed"), "Search failed");

        let err = QueryError::Oracle(OracleError::Decryption("bad handle".to_string()));
        assert_eq!(err.user_message("Decryption failed"), "Decryption failed");
    }

    #[test]
    fn test_precondition_message_passes_through() {
        let err = QueryError::Precondition("Connect wallet first".to_string());
        assert_eq!(err.user_message("Search failed"), "Connect wallet first");
    }

    #[test]
    fn test_initialization_failure_message() {
        let err = QueryError::Gateway(GatewayError::InitializationFailed("down".to_string()));
        assert_eq!(
            err.user_message("Search failed"),
            "Encryption service initialization failed"
        );
    }
}
