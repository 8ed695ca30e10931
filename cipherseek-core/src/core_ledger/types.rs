//! Core data types for the ledger boundary

use super::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Account identity on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    /// Create a new address
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque unique identifier of a ledger record, chosen by the submitter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new record id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to an encrypted value held by the ledger.
///
/// Only the encryption/decryption service can interpret it; the client
/// treats it as a pass-through token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiphertextHandle(pub String);

impl CiphertextHandle {
    /// Create a new handle
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Get the handle string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// On-ledger state of a single record, as returned by `get_record`.
///
/// The submission proof is consumed at creation and never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordState {
    /// Human-readable title, public
    pub label: String,

    /// Reference to the encrypted payload, immutable once created
    pub ciphertext_handle: CiphertextHandle,

    /// Public classification tag
    pub category: String,

    /// Free-text note attached at creation
    pub note: String,

    /// Creation timestamp in seconds, set by the ledger
    pub created_at: u64,

    /// Submitting account
    pub creator: Address,

    /// Flips true exactly once, when a decryption proof has been attested
    pub verified: bool,

    /// Authenticated plaintext; present only when `verified` is true
    pub clear_value: Option<u64>,
}

/// Arguments for creating a new record on the ledger
#[derive(Debug, Clone)]
pub struct CreateRecord {
    /// Caller-chosen unique id
    pub id: RecordId,
    /// Public title
    pub label: String,
    /// Encrypted payload
    pub ciphertext: Vec<u8>,
    /// Attestation accompanying the ciphertext, consumed at creation
    pub proof: Vec<u8>,
    /// Public category code
    pub category: u32,
    /// Initial flag value
    pub initial_flag: u32,
    /// Free-text note
    pub note: String,
    /// Submitting account
    pub creator: Address,
}

type TxFuture = Pin<Box<dyn Future<Output = Result<(), LedgerError>> + Send>>;

/// Handle to a broadcast-but-not-yet-final transaction.
///
/// The record (or verification) is durable only after `confirm` resolves.
pub struct TxHandle {
    hash: String,
    outcome: TxFuture,
}

impl TxHandle {
    /// Create a handle whose finality is decided by the given future
    pub fn new(
        hash: impl Into<String>,
        outcome: impl Future<Output = Result<(), LedgerError>> + Send + 'static,
    ) -> Self {
        Self {
            hash: hash.into(),
            outcome: Box::pin(outcome),
        }
    }

    /// Create a handle that is already final
    pub fn ready(hash: impl Into<String>) -> Self {
        Self::new(hash, async { Ok(()) })
    }

    /// Transaction hash assigned at broadcast time
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Await transaction finality
    pub async fn confirm(self) -> Result<(), LedgerError> {
        self.outcome.await
    }
}

impl fmt::Debug for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxHandle").field("hash", &self.hash).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtype_display() {
        assert_eq!(Address::new("0xabc").to_string(), "0xabc");
        assert_eq!(RecordId::new("sub-1").as_str(), "sub-1");
        assert_eq!(CiphertextHandle::new("0xfeed").to_string(), "0xfeed");
    }

    #[tokio::test]
    async fn test_tx_handle_ready_confirms() {
        let tx = TxHandle::ready("0x01");
        assert_eq!(tx.hash(), "0x01");
        assert!(tx.confirm().await.is_ok());
    }

    #[tokio::test]
    async fn test_tx_handle_propagates_failure() {
        let tx = TxHandle::new("0x02", async {
            Err(LedgerError::Contract("revert".to_string()))
        });
        assert!(matches!(tx.confirm().await, Err(LedgerError::Contract(_))));
    }
}
