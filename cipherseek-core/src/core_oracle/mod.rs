//! Decryption oracle boundary: oracle trait, two-phase coordinator and mock

pub mod coordinator;
pub mod errors;
pub mod mock;
pub mod oracle;

// Re-exports
pub use coordinator::DecryptionCoordinator;
pub use errors::OracleError;
pub use mock::MockOracle;
pub use oracle::{DecryptionOracle, DecryptionOutcome};
