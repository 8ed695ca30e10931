//! Query lifecycle - orchestration for confidential searches
//!
//! This module coordinates `core_gateway`, `core_ledger` and `core_oracle`
//! to drive a submission from draft to confirmed record and a record from
//! unverified to attested plaintext, exposing a serializable `ViewState`
//! for presentation.

pub mod errors;
pub mod lifecycle;
pub mod types;
pub mod view;
pub mod wallet;

#[cfg(test)]
mod tests;

// Re-exports
pub use errors::{QueryError, QueryResult};
pub use lifecycle::QueryLifecycle;
pub use types::{
    CategoryFilter, QuerySubmission, Record, RecordPhase, SearchPhase, StatusKind, StatusNotice,
};
pub use view::ViewState;
pub use wallet::{StaticWallet, WalletSession};
