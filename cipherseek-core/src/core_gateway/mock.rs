//! Mock EncryptionProvider for testing
//!
//! Produces transparent "ciphertexts" of the form `ct1:<plaintext>:<nonce>`
//! so the mock oracle can recover the plaintext from a ciphertext handle
//! without shared state. Not encryption; test plumbing only.

use super::errors::GatewayError;
use super::provider::{EncryptedInput, EncryptionProvider};
use crate::core_ledger::Address;
use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Mock EncryptionProvider for testing without a real parameter service
pub struct MockEncryptionProvider {
    handshakes: AtomicUsize,
    fail_handshake: AtomicBool,
}

impl MockEncryptionProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            handshakes: AtomicUsize::new(0),
            fail_handshake: AtomicBool::new(false),
        }
    }

    /// Number of handshakes performed so far
    pub fn handshake_count(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }

    /// Make the next handshakes fail
    pub fn set_fail_handshake(&self, fail: bool) {
        self.fail_handshake.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockEncryptionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncryptionProvider for MockEncryptionProvider {
    async fn handshake(&self) -> Result<(), GatewayError> {
        self.handshakes.fetch_add(1, Ordering::SeqCst);
        if self.fail_handshake.load(Ordering::SeqCst) {
            return Err(GatewayError::InitializationFailed(
                "mock handshake failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn encrypt(
        &self,
        _recipient: &Address,
        _account: &Address,
        plaintext: u64,
    ) -> Result<EncryptedInput, GatewayError> {
        let nonce: [u8; 8] = rand::rng().random();
        let ciphertext = format!("ct1:{}:{}", plaintext, hex::encode(nonce)).into_bytes();
        let proof_bytes: [u8; 16] = rand::rng().random();
        Ok(EncryptedInput {
            ciphertext,
            proof: proof_bytes.to_vec(),
        })
    }
}
