//! Error types for the decryption oracle boundary

use thiserror::Error;

/// Errors surfaced by the decryption coordinator
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle could not decrypt the requested handles
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Clear values could not be encoded for on-chain submission
    #[error("Clear-value encoding failed: {0}")]
    Encoding(String),

    /// The on-chain attestation step was not accepted. The result must
    /// not be trusted; the record stays unverified.
    #[error("Attestation failed: {0}")]
    AttestationFailed(String),
}
