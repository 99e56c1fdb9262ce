//! Account ledger implementation
//!
//! In-memory map of address to balance. Accounts are created on first
//! credit and never removed.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// A miner account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    address: String,
    balance: f64,
}

impl Account {
    /// Create an empty account
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_balance(address, 0.0)
    }

    /// Create an account holding a starting balance
    pub fn with_balance(address: impl Into<String>, balance: f64) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add `amount` to the balance
    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }
}

/// Set of all accounts
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Build a ledger from existing accounts
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.address.clone(), account))
                .collect(),
        }
    }

    /// Credit an account, creating it if absent. Returns the new balance.
    pub fn credit(&mut self, address: &str, amount: f64) -> f64 {
        let account = self
            .accounts
            .entry(address.to_string())
            .or_insert_with(|| Account::new(address));
        account.credit(amount);
        account.balance
    }

    /// Balance of an address; unknown addresses hold zero
    pub fn balance(&self, address: &str) -> f64 {
        self.accounts.get(address).map_or(0.0, Account::balance)
    }

    /// Get an account if it exists
    pub fn get(&self, address: &str) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Check if an account exists
    pub fn contains(&self, address: &str) -> bool {
        self.accounts.contains_key(address)
    }

    /// Iterate over all accounts
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> f64 {
        self.accounts.values().map(Account::balance).sum()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
