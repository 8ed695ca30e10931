//! Ledger boundary: contract trait, capability views and in-memory mock
//!
//! Record truth lives in the external ledger; everything in this module is
//! either a view onto it (`LedgerReader`/`LedgerWriter`) or a stand-in for
//! it (`MemoryLedger`).

pub mod client;
pub mod contract;
pub mod errors;
pub mod memory;
pub mod types;

// Re-exports
pub use client::{LedgerReader, LedgerWriter};
pub use contract::LedgerContract;
pub use errors::LedgerError;
pub use memory::MemoryLedger;
pub use types::{Address, CiphertextHandle, CreateRecord, RecordId, RecordState, TxHandle};
