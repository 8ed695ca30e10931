//! LedgerContract trait - abstraction over the remote contract surface
//!
//! This trait mirrors the consumed contract interface one-to-one, enabling:
//! - A real RPC-backed implementation outside this crate
//! - Testability via `MemoryLedger`
//! - Reduced coupling in the query lifecycle
//!
//! # Architecture
//!
//! ```text
//! QueryLifecycle
//!       |
//!       v
//! LedgerReader / LedgerWriter
//!       |
//!       v
//! LedgerContract (trait)
//!       |
//!       +---> RPC adapter (production)
//!       |
//!       +---> MemoryLedger (for testing)
//! ```

use super::errors::LedgerError;
use super::types::{Address, CiphertextHandle, CreateRecord, RecordId, RecordState, TxHandle};
use async_trait::async_trait;

/// Abstraction over the append-only ledger contract
#[async_trait]
pub trait LedgerContract: Send + Sync {
    /// Address the contract is deployed at
    async fn contract_address(&self) -> Result<Address, LedgerError>;

    /// Enumerate all known record ids.
    ///
    /// Order carries no meaning beyond insertion.
    async fn list_record_ids(&self) -> Result<Vec<RecordId>, LedgerError>;

    /// Read a single record's public state
    ///
    /// # Errors
    ///
    /// `LedgerError::NotFound` if the id is unknown
    async fn get_record(&self, id: &RecordId) -> Result<RecordState, LedgerError>;

    /// Create a new record. The returned handle must be awaited for
    /// finality before the record is considered durable.
    async fn create_record(&self, req: CreateRecord) -> Result<TxHandle, LedgerError>;

    /// Look up the opaque ciphertext handle for a record
    async fn encrypted_handle(&self, id: &RecordId) -> Result<CiphertextHandle, LedgerError>;

    /// Record an authenticated cleartext on-chain, flipping `verified`.
    /// Signer-bound; requires a signing account.
    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values_encoded: &str,
        proof: &[u8],
    ) -> Result<TxHandle, LedgerError>;

    /// Liveness probe. Failure is a status condition, never a data error.
    async fn is_available(&self) -> Result<bool, LedgerError>;
}
