//! EncryptionGateway - initialization guard over an `EncryptionProvider`
//!
//! Wraps the stateful parameter handshake so that concurrent callers
//! collapse onto a single in-flight attempt, and refuses `encrypt` before
//! the handshake has succeeded.

use super::errors::GatewayError;
use super::provider::{EncryptedInput, EncryptionProvider};
use crate::core_ledger::Address;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Gateway to the remote encryption service
pub struct EncryptionGateway {
    provider: Arc<dyn EncryptionProvider>,

    /// Initialization flag. The mutex is held across the handshake, which
    /// is the one place the design requires mutual exclusion: a second
    /// concurrent `initialize` blocks here and then observes the winner's
    /// outcome instead of starting its own handshake.
    initialized: Mutex<bool>,
}

impl EncryptionGateway {
    /// Create a gateway over the given provider
    pub fn new(provider: Arc<dyn EncryptionProvider>) -> Self {
        Self {
            provider,
            initialized: Mutex::new(false),
        }
    }

    /// Perform the one-time handshake. Idempotent: re-invocation while
    /// already initialized or while another handshake is in flight is a
    /// no-op for the caller.
    ///
    /// On failure the flag stays false, so the next trigger retries.
    pub async fn initialize(&self) -> Result<(), GatewayError> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            debug!("Encryption gateway already initialized");
            return Ok(());
        }

        self.provider.handshake().await?;
        *initialized = true;
        info!("Encryption gateway initialized");
        Ok(())
    }

    /// Whether a handshake has completed successfully
    pub async fn is_initialized(&self) -> bool {
        *self.initialized.lock().await
    }

    /// Encrypt a plaintext integer under the recipient context.
    ///
    /// # Errors
    ///
    /// `GatewayError::NotInitialized` before a successful `initialize`.
    pub async fn encrypt(
        &self,
        recipient: &Address,
        account: &Address,
        plaintext: u64,
    ) -> Result<EncryptedInput, GatewayError> {
        if !self.is_initialized().await {
            return Err(GatewayError::NotInitialized);
        }
        self.provider.encrypt(recipient, account, plaintext).await
    }
}
