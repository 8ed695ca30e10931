//! Cipherseek core - confidential keyword search over an encrypted ledger
//!
//! Submissions are encrypted client-side, recorded on a ledger behind the
//! [`core_ledger::LedgerContract`] seam, and revealed through an attested
//! decryption flow driven by [`core_query::QueryLifecycle`].

pub mod config;
pub mod core_gateway;
pub mod core_ledger;
pub mod core_oracle;
pub mod core_query;
pub mod logging;
pub mod metrics;

pub use config::Config;
pub use core_gateway::{EncryptionGateway, EncryptionProvider, GatewayError, MockEncryptionProvider};
pub use core_ledger::{
    Address, CiphertextHandle, LedgerContract, LedgerError, MemoryLedger, RecordId,
};
pub use core_oracle::{DecryptionCoordinator, DecryptionOracle, MockOracle, OracleError};
pub use core_query::{
    CategoryFilter, QueryError, QueryLifecycle, QuerySubmission, Record, SearchPhase, StaticWallet,
    StatusKind, StatusNotice, ViewState, WalletSession,
};
pub use logging::{init_logging_with_config, LogConfig, LogLevel};
