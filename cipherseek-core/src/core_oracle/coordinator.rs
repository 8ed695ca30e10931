//! DecryptionCoordinator - two-phase decrypt + attest handshake
//!
//! Phase one asks the oracle for cleartext and a proof; phase two submits
//! the proof on-chain through a caller-supplied callback. Success is
//! reported only after the attestation transaction is final, so a caller
//! never observes a half-verified result.

use super::errors::OracleError;
use super::oracle::DecryptionOracle;
use crate::core_ledger::{Address, CiphertextHandle, LedgerError, TxHandle};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Coordinates the off-chain decrypt and on-chain attest steps
#[derive(Clone)]
pub struct DecryptionCoordinator {
    oracle: Arc<dyn DecryptionOracle>,
}

impl DecryptionCoordinator {
    /// Create a coordinator over the given oracle
    pub fn new(oracle: Arc<dyn DecryptionOracle>) -> Self {
        Self { oracle }
    }

    /// Decrypt the given handles and attest the result on-chain.
    ///
    /// `on_attest` receives the JSON-encoded clear values and the proof,
    /// and must broadcast the verification transaction. Its `TxHandle` is
    /// confirmed here; any failure along the way surfaces as
    /// `OracleError::AttestationFailed` and no value should be trusted.
    ///
    /// Already-verified records must be short-circuited by the caller;
    /// this method always consults the oracle.
    pub async fn verify_decryption<F, Fut>(
        &self,
        handles: &[CiphertextHandle],
        recipient: &Address,
        on_attest: F,
    ) -> Result<HashMap<CiphertextHandle, u64>, OracleError>
    where
        F: FnOnce(String, Vec<u8>) -> Fut + Send,
        Fut: Future<Output = Result<TxHandle, LedgerError>> + Send,
    {
        let outcome = self.oracle.reveal(handles, recipient).await?;
        debug!(handles = handles.len(), "Oracle returned cleartext, attesting on-chain");

        let encoded: HashMap<&str, u64> = outcome
            .clear_values
            .iter()
            .map(|(handle, value)| (handle.as_str(), *value))
            .collect();
        let clear_values_encoded =
            serde_json::to_string(&encoded).map_err(|e| OracleError::Encoding(e.to_string()))?;

        let tx = on_attest(clear_values_encoded, outcome.proof)
            .await
            .map_err(|e| OracleError::AttestationFailed(e.to_string()))?;
        tx.confirm()
            .await
            .map_err(|e| OracleError::AttestationFailed(e.to_string()))?;

        Ok(outcome.clear_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_oracle::mock::MockOracle;

    fn handle_for(plaintext: u64) -> CiphertextHandle {
        let ciphertext = format!("ct1:{}:00", plaintext);
        CiphertextHandle::new(format!("0x{}", hex::encode(ciphertext.as_bytes())))
    }

    #[tokio::test]
    async fn test_success_requires_attestation() {
        let oracle = Arc::new(MockOracle::new());
        let coordinator = DecryptionCoordinator::new(oracle.clone());
        let handle = handle_for(42);

        let clear = coordinator
            .verify_decryption(&[handle.clone()], &Address::new("0xc"), |encoded, _proof| {
                // The encoded payload carries the per-handle cleartext
                let parsed: HashMap<String, u64> = serde_json::from_str(&encoded).unwrap();
                assert_eq!(parsed.len(), 1);
                async { Ok(TxHandle::ready("0xtx")) }
            })
            .await
            .unwrap();

        assert_eq!(clear.get(&handle), Some(&42));
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_attestation_broadcast_failure() {
        let coordinator = DecryptionCoordinator::new(Arc::new(MockOracle::new()));
        let handle = handle_for(7);

        let err = coordinator
            .verify_decryption(&[handle], &Address::new("0xc"), |_encoded, _proof| async {
                Err(LedgerError::UserRejected)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OracleError::AttestationFailed(_)));
    }

    #[tokio::test]
    async fn test_attestation_confirm_failure() {
        let coordinator = DecryptionCoordinator::new(Arc::new(MockOracle::new()));
        let handle = handle_for(7);

        let err = coordinator
            .verify_decryption(&[handle], &Address::new("0xc"), |_encoded, _proof| async {
                Ok(TxHandle::new("0xtx", async {
                    Err(LedgerError::Contract("revert".to_string()))
                }))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OracleError::AttestationFailed(_)));
    }

    #[tokio::test]
    async fn test_oracle_failure_skips_attestation() {
        let oracle = Arc::new(MockOracle::new());
        oracle.set_fail_reveal(true);
        let coordinator = DecryptionCoordinator::new(oracle);
        let handle = handle_for(7);

        let err = coordinator
            .verify_decryption(&[handle], &Address::new("0xc"), |_encoded, _proof| async {
                panic!("attestation must not run when the oracle fails");
                #[allow(unreachable_code)]
                Ok(TxHandle::ready("0xtx"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OracleError::Decryption(_)));
    }
}
