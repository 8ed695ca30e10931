//! Mock DecryptionOracle for testing
//!
//! Understands the mock gateway's transparent ciphertext scheme: a handle
//! is `0x` + hex of `ct1:<plaintext>:<nonce>`, so the plaintext can be
//! recovered without shared state. Explicit overrides take precedence.

use super::errors::OracleError;
use super::oracle::{DecryptionOracle, DecryptionOutcome};
use crate::core_ledger::{Address, CiphertextHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock DecryptionOracle for testing without a real oracle service
pub struct MockOracle {
    calls: AtomicUsize,
    fail_reveal: AtomicBool,
    overrides: Mutex<HashMap<CiphertextHandle, u64>>,
}

impl MockOracle {
    /// Create a new mock oracle
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_reveal: AtomicBool::new(false),
            overrides: Mutex::new(HashMap::new()),
        }
    }

    /// Number of reveal requests received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make reveal requests fail
    pub fn set_fail_reveal(&self, fail: bool) {
        self.fail_reveal.store(fail, Ordering::SeqCst);
    }

    /// Pin a cleartext for a specific handle, bypassing handle parsing
    pub fn set_clear_value(&self, handle: CiphertextHandle, value: u64) {
        self.overrides.lock().unwrap().insert(handle, value);
    }

    fn parse_handle(handle: &CiphertextHandle) -> Result<u64, OracleError> {
        let hex_part = handle
            .as_str()
            .strip_prefix("0x")
            .ok_or_else(|| OracleError::Decryption(format!("malformed handle: {}", handle)))?;
        let bytes = hex::decode(hex_part)
            .map_err(|e| OracleError::Decryption(format!("malformed handle: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| OracleError::Decryption(format!("malformed handle: {}", e)))?;

        let mut parts = text.split(':');
        match (parts.next(), parts.next()) {
            (Some("ct1"), Some(plaintext)) => plaintext
                .parse::<u64>()
                .map_err(|e| OracleError::Decryption(format!("malformed handle: {}", e))),
            _ => Err(OracleError::Decryption(format!(
                "unknown ciphertext scheme in handle: {}",
                handle
            ))),
        }
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecryptionOracle for MockOracle {
    async fn reveal(
        &self,
        handles: &[CiphertextHandle],
        _recipient: &Address,
    ) -> Result<DecryptionOutcome, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reveal.load(Ordering::SeqCst) {
            return Err(OracleError::Decryption("mock oracle failure".to_string()));
        }

        let overrides = self.overrides.lock().unwrap();
        let mut clear_values = HashMap::new();
        for handle in handles {
            let value = match overrides.get(handle) {
                Some(value) => *value,
                None => Self::parse_handle(handle)?,
            };
            clear_values.insert(handle.clone(), value);
        }

        Ok(DecryptionOutcome {
            clear_values,
            proof: b"mock-decryption-proof".to_vec(),
        })
    }
}
