//! Capability views over a `LedgerContract`
//!
//! A `LedgerReader` carries no signing key and only lists, reads and probes.
//! A `LedgerWriter` is bound to a signer address and can create records and
//! submit verification proofs.

use super::contract::LedgerContract;
use super::errors::LedgerError;
use super::types::{Address, CiphertextHandle, CreateRecord, RecordId, RecordState, TxHandle};
use std::sync::Arc;

/// Read-only view: lists and reads records, checks availability
#[derive(Clone)]
pub struct LedgerReader {
    contract: Arc<dyn LedgerContract>,
}

impl LedgerReader {
    /// Create a reader over the given contract
    pub fn new(contract: Arc<dyn LedgerContract>) -> Self {
        Self { contract }
    }

    /// Address the contract is deployed at
    pub async fn contract_address(&self) -> Result<Address, LedgerError> {
        self.contract.contract_address().await
    }

    /// Enumerate all known record ids
    pub async fn list_record_ids(&self) -> Result<Vec<RecordId>, LedgerError> {
        self.contract.list_record_ids().await
    }

    /// Read a single record's public state
    pub async fn get_record(&self, id: &RecordId) -> Result<RecordState, LedgerError> {
        self.contract.get_record(id).await
    }

    /// Look up the ciphertext handle for a record
    pub async fn encrypted_handle(&self, id: &RecordId) -> Result<CiphertextHandle, LedgerError> {
        self.contract.encrypted_handle(id).await
    }

    /// Liveness probe
    pub async fn is_available(&self) -> Result<bool, LedgerError> {
        self.contract.is_available().await
    }
}

/// Signer-bound view: can create records and submit verification proofs
#[derive(Clone)]
pub struct LedgerWriter {
    contract: Arc<dyn LedgerContract>,
    signer: Address,
}

impl LedgerWriter {
    /// Create a writer bound to the given signer address
    pub fn new(contract: Arc<dyn LedgerContract>, signer: Address) -> Self {
        Self { contract, signer }
    }

    /// The bound signing account
    pub fn signer(&self) -> &Address {
        &self.signer
    }

    /// Create a new record. The id is caller-chosen and must be unique;
    /// the returned handle must be awaited for finality.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_record(
        &self,
        id: RecordId,
        label: String,
        ciphertext: Vec<u8>,
        proof: Vec<u8>,
        category: u32,
        initial_flag: u32,
        note: String,
    ) -> Result<TxHandle, LedgerError> {
        self.contract
            .create_record(CreateRecord {
                id,
                label,
                ciphertext,
                proof,
                category,
                initial_flag,
                note,
                creator: self.signer.clone(),
            })
            .await
    }

    /// Submit an authenticated cleartext plus decryption proof
    pub async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values_encoded: &str,
        proof: &[u8],
    ) -> Result<TxHandle, LedgerError> {
        self.contract
            .submit_verification(id, clear_values_encoded, proof)
            .await
    }

    /// Read back a record state (writers can read too)
    pub async fn get_record(&self, id: &RecordId) -> Result<RecordState, LedgerError> {
        self.contract.get_record(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_ledger::memory::MemoryLedger;

    #[tokio::test]
    async fn test_reader_and_writer_share_contract_state() {
        let ledger = Arc::new(MemoryLedger::new(Address::new("0xcontract")));
        let reader = LedgerReader::new(ledger.clone());
        let writer = LedgerWriter::new(ledger, Address::new("0xalice"));

        let tx = writer
            .create_record(
                RecordId::new("sub-1"),
                "Keyword search: 7".to_string(),
                b"ct1:7:aa".to_vec(),
                b"proof".to_vec(),
                2,
                0,
                "category: 2".to_string(),
            )
            .await
            .unwrap();
        tx.confirm().await.unwrap();

        let ids = reader.list_record_ids().await.unwrap();
        assert_eq!(ids, vec![RecordId::new("sub-1")]);

        let state = reader.get_record(&RecordId::new("sub-1")).await.unwrap();
        assert_eq!(state.creator, Address::new("0xalice"));
        assert_eq!(state.category, "2");
        assert!(!state.verified);
    }

    #[tokio::test]
    async fn test_record_not_durable_before_confirm() {
        let ledger = Arc::new(MemoryLedger::new(Address::new("0xcontract")));
        let reader = LedgerReader::new(ledger.clone());
        let writer = LedgerWriter::new(ledger, Address::new("0xalice"));

        let tx = writer
            .create_record(
                RecordId::new("sub-2"),
                "label".to_string(),
                b"ct1:1:bb".to_vec(),
                b"proof".to_vec(),
                1,
                0,
                String::new(),
            )
            .await
            .unwrap();

        // Broadcast but not final: the record must not be visible yet
        assert!(reader.list_record_ids().await.unwrap().is_empty());

        tx.confirm().await.unwrap();
        assert_eq!(reader.list_record_ids().await.unwrap().len(), 1);
    }
}
