//! Encryption gateway: provider trait, initialization guard and mock

pub mod errors;
pub mod gateway;
pub mod mock;
pub mod provider;

// Re-exports
pub use errors::GatewayError;
pub use gateway::EncryptionGateway;
pub use mock::MockEncryptionProvider;
pub use provider::{EncryptedInput, EncryptionProvider};
