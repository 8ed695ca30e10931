//! Error types for the encryption gateway

use thiserror::Error;

/// Errors surfaced by the encryption gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The parameter-service handshake failed. Retryable on the next
    /// qualifying trigger; never fatal.
    #[error("Encryption service initialization failed: {0}")]
    InitializationFailed(String),

    /// `encrypt` was called before a successful handshake
    #[error("Encryption gateway not initialized")]
    NotInitialized,

    /// The encryption request itself failed
    #[error("Encryption failed: {0}")]
    Encryption(String),
}
