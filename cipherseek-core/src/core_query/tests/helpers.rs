//! Shared fixtures for lifecycle tests

use crate::config::Config;
use crate::core_gateway::MockEncryptionProvider;
use crate::core_ledger::{Address, MemoryLedger};
use crate::core_oracle::MockOracle;
use crate::core_query::lifecycle::QueryLifecycle;
use crate::core_query::wallet::StaticWallet;
use std::sync::Arc;

/// A lifecycle wired to mocks, with handles kept for inspection
pub struct Fixture {
    pub wallet: Arc<StaticWallet>,
    pub provider: Arc<MockEncryptionProvider>,
    pub ledger: Arc<MemoryLedger>,
    pub oracle: Arc<MockOracle>,
    pub lifecycle: Arc<QueryLifecycle>,
}

/// Build a fixture with a connected wallet
pub fn fixture() -> Fixture {
    fixture_with_wallet(Arc::new(StaticWallet::connected(Address::new("0xalice"))))
}

/// Build a fixture with a disconnected wallet
pub fn disconnected_fixture() -> Fixture {
    fixture_with_wallet(Arc::new(StaticWallet::disconnected()))
}

fn fixture_with_wallet(wallet: Arc<StaticWallet>) -> Fixture {
    let provider = Arc::new(MockEncryptionProvider::new());
    let ledger = Arc::new(MemoryLedger::new(Address::new("0xcontract")));
    let oracle = Arc::new(MockOracle::new());

    let lifecycle = Arc::new(QueryLifecycle::new(
        Arc::new(Config::default()),
        wallet.clone(),
        provider.clone(),
        ledger.clone(),
        oracle.clone(),
    ));

    Fixture {
        wallet,
        provider,
        ledger,
        oracle,
        lifecycle,
    }
}
