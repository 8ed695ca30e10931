//! DecryptionOracle trait - abstraction over the off-chain decryption service

use super::errors::OracleError;
use crate::core_ledger::{Address, CiphertextHandle};
use async_trait::async_trait;
use std::collections::HashMap;

/// Cleartext result plus the proof to be attested on-chain
#[derive(Debug, Clone)]
pub struct DecryptionOutcome {
    /// Cleartext per requested handle
    pub clear_values: HashMap<CiphertextHandle, u64>,
    /// Decryption proof; worthless until attested on-chain
    pub proof: Vec<u8>,
}

/// Abstraction over the decryption oracle
#[async_trait]
pub trait DecryptionOracle: Send + Sync {
    /// Request cleartext for the given handles under the recipient's
    /// authority. The returned values are unauthenticated until the
    /// accompanying proof has been attested on-chain.
    async fn reveal(
        &self,
        handles: &[CiphertextHandle],
        recipient: &Address,
    ) -> Result<DecryptionOutcome, OracleError>;
}
