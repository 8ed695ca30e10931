//! Wallet collaborator boundary
//!
//! Connection management lives outside this crate; the lifecycle only needs
//! to know whether an account is connected and what its address is.

use crate::core_ledger::Address;
use std::sync::RwLock;

/// External wallet/account collaborator
pub trait WalletSession: Send + Sync {
    /// Whether an account is currently connected
    fn is_connected(&self) -> bool;

    /// Address of the connected account, if any
    fn address(&self) -> Option<Address>;
}

/// Wallet holding a directly-settable account, for tests and the CLI
pub struct StaticWallet {
    account: RwLock<Option<Address>>,
}

impl StaticWallet {
    /// Create a disconnected wallet
    pub fn disconnected() -> Self {
        Self {
            account: RwLock::new(None),
        }
    }

    /// Create a wallet already connected to the given address
    pub fn connected(address: Address) -> Self {
        Self {
            account: RwLock::new(Some(address)),
        }
    }

    /// Connect to an account
    pub fn connect(&self, address: Address) {
        *self.account.write().unwrap() = Some(address);
    }

    /// Disconnect the current account
    pub fn disconnect(&self) {
        *self.account.write().unwrap() = None;
    }
}

impl WalletSession for StaticWallet {
    fn is_connected(&self) -> bool {
        self.account.read().unwrap().is_some()
    }

    fn address(&self) -> Option<Address> {
        self.account.read().unwrap().clone()
    }
}
