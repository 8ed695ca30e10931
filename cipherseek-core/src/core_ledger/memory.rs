//! In-memory `LedgerContract` for testing
//!
//! Mimics the remote contract's observable behavior: creates are durable
//! only after the returned `TxHandle` confirms, verification flips the
//! `verified` bit exactly once, and the mock can be switched into
//! signature-rejection or unavailable modes to drive failure paths.

use super::contract::LedgerContract;
use super::errors::LedgerError;
use super::types::{Address, CiphertextHandle, CreateRecord, RecordId, RecordState, TxHandle};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<RecordId, RecordState>,
    order: Vec<RecordId>,
    reject_signatures: bool,
    unavailable: bool,
    fail_verification: bool,
}

/// In-memory ledger contract
pub struct MemoryLedger {
    address: Address,
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLedger {
    /// Create an empty ledger deployed at the given address
    pub fn new(address: Address) -> Self {
        Self {
            address,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Make every signer-bound call fail as a user rejection
    pub fn set_reject_signatures(&self, reject: bool) {
        self.inner.lock().unwrap().reject_signatures = reject;
    }

    /// Toggle the availability probe
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }

    /// Make verification transactions revert at confirmation time
    pub fn set_fail_verification(&self, fail: bool) {
        self.inner.lock().unwrap().fail_verification = fail;
    }

    /// Number of records currently stored
    pub fn record_count(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    fn handle_for(ciphertext: &[u8]) -> CiphertextHandle {
        CiphertextHandle::new(format!("0x{}", hex::encode(ciphertext)))
    }

    fn tx_hash() -> String {
        let bytes: [u8; 16] = rand::rng().random();
        format!("0x{}", hex::encode(bytes))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

#[async_trait]
impl LedgerContract for MemoryLedger {
    async fn contract_address(&self) -> Result<Address, LedgerError> {
        Ok(self.address.clone())
    }

    async fn list_record_ids(&self) -> Result<Vec<RecordId>, LedgerError> {
        Ok(self.inner.lock().unwrap().order.clone())
    }

    async fn get_record(&self, id: &RecordId) -> Result<RecordState, LedgerError> {
        let inner = self.inner.lock().unwrap();
        inner
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    async fn create_record(&self, req: CreateRecord) -> Result<TxHandle, LedgerError> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.reject_signatures {
                return Err(LedgerError::UserRejected);
            }
            if inner.records.contains_key(&req.id) {
                return Err(LedgerError::Contract(format!(
                    "record id already exists: {}",
                    req.id
                )));
            }
        }

        // The record becomes visible only once the transaction confirms
        let inner = self.inner.clone();
        Ok(TxHandle::new(Self::tx_hash(), async move {
            let mut inner = inner.lock().unwrap();
            let state = RecordState {
                label: req.label,
                ciphertext_handle: Self::handle_for(&req.ciphertext),
                category: req.category.to_string(),
                note: req.note,
                created_at: Self::now_secs(),
                creator: req.creator,
                verified: false,
                clear_value: None,
            };
            inner.records.insert(req.id.clone(), state);
            inner.order.push(req.id);
            Ok(())
        }))
    }

    async fn encrypted_handle(&self, id: &RecordId) -> Result<CiphertextHandle, LedgerError> {
        let inner = self.inner.lock().unwrap();
        inner
            .records
            .get(id)
            .map(|r| r.ciphertext_handle.clone())
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values_encoded: &str,
        _proof: &[u8],
    ) -> Result<TxHandle, LedgerError> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.reject_signatures {
                return Err(LedgerError::UserRejected);
            }
            if !inner.records.contains_key(id) {
                return Err(LedgerError::NotFound(id.clone()));
            }
        }

        let clear_values: HashMap<String, u64> = serde_json::from_str(clear_values_encoded)
            .map_err(|e| LedgerError::Contract(format!("bad clear-value encoding: {}", e)))?;

        let inner = self.inner.clone();
        let id = id.clone();
        Ok(TxHandle::new(Self::tx_hash(), async move {
            let mut inner = inner.lock().unwrap();
            if inner.fail_verification {
                return Err(LedgerError::Contract(
                    "verification proof rejected".to_string(),
                ));
            }
            let record = inner
                .records
                .get_mut(&id)
                .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
            let clear = clear_values
                .get(record.ciphertext_handle.as_str())
                .copied()
                .ok_or_else(|| {
                    LedgerError::Contract("no clear value for record handle".to_string())
                })?;
            record.verified = true;
            record.clear_value = Some(clear);
            Ok(())
        }))
    }

    async fn is_available(&self) -> Result<bool, LedgerError> {
        Ok(!self.inner.lock().unwrap().unavailable)
    }
}
