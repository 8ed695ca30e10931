//! EncryptionProvider trait - abstraction over the remote encryption service
//!
//! The cryptographic scheme itself lives behind this seam; the core only
//! orchestrates calls to it.

use super::errors::GatewayError;
use crate::core_ledger::Address;
use async_trait::async_trait;

/// Ciphertext plus the attestation the ledger consumes at record creation
#[derive(Debug, Clone)]
pub struct EncryptedInput {
    /// Encrypted payload
    pub ciphertext: Vec<u8>,
    /// Input proof, consumed once at creation and not retained
    pub proof: Vec<u8>,
}

/// Abstraction over the remote encryption-parameter service
#[async_trait]
pub trait EncryptionProvider: Send + Sync {
    /// Perform the one-time parameter handshake.
    ///
    /// Callers go through `EncryptionGateway::initialize`, which guarantees
    /// at most one handshake runs at a time.
    async fn handshake(&self) -> Result<(), GatewayError>;

    /// Encrypt a plaintext integer for the given recipient context.
    ///
    /// Pure request/response; independent calls may run in parallel.
    async fn encrypt(
        &self,
        recipient: &Address,
        account: &Address,
        plaintext: u64,
    ) -> Result<EncryptedInput, GatewayError>;
}
