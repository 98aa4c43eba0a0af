//! External fungible-asset interface
//!
//! The settlement core moves the reference asset through an [`AssetLedger`]
//! it consumes but does not implement. Deposits pull funds from the company
//! into the treasury custody account via allowance-based `transfer_from`;
//! withdrawals and salary payments push funds back out via `transfer`.
//!
//! [`InMemoryAssetLedger`] is the reference implementation used by tests and
//! embedders that do not bring their own asset backend. Its `mint` is
//! test-oriented seeding, not part of the settlement surface.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced by asset transfers
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: i64, approved: i64 },

    #[error("transfer amount must be positive, got {amount}")]
    NonPositiveAmount { amount: i64 },
}

/// Fungible-asset interface the settlement core settles against
///
/// Semantics mirror a standard fungible-token surface: balances per account,
/// owner-approved allowances, and atomic transfers that either fully apply
/// or fail with no balance change.
pub trait AssetLedger {
    /// Balance of `account` in asset units (cents)
    fn balance_of(&self, account: &str) -> i64;

    /// Move `amount` from `from` to `to`
    fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(), AssetError>;

    /// Approve `spender` to pull up to `amount` from `owner`
    fn approve(&mut self, owner: &str, spender: &str, amount: i64);

    /// Remaining allowance granted by `owner` to `spender`
    fn allowance(&self, owner: &str, spender: &str) -> i64;

    /// Pull `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), AssetError>;
}

/// In-memory reference asset ledger
///
/// # Example
/// ```
/// use payroll_core_rs::{AssetLedger, InMemoryAssetLedger};
///
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.mint("acme", 10_000);
/// ledger.transfer("acme", "treasury", 4_000).unwrap();
///
/// assert_eq!(ledger.balance_of("acme"), 6_000);
/// assert_eq!(ledger.balance_of("treasury"), 4_000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryAssetLedger {
    /// Account balances (cents)
    balances: HashMap<String, i64>,

    /// owner -> spender -> remaining allowance
    allowances: HashMap<String, HashMap<String, i64>>,
}

impl InMemoryAssetLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air (test seeding)
    pub fn mint(&mut self, account: &str, amount: i64) {
        *self.balances.entry(account.to_string()).or_insert(0) += amount;
    }

    /// Total units in circulation (conservation checks)
    pub fn total_supply(&self) -> i64 {
        self.balances.values().sum()
    }

    fn debit(&mut self, account: &str, amount: i64) -> Result<(), AssetError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(AssetError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        *self.balances.entry(account.to_string()).or_insert(0) -= amount;
        Ok(())
    }

    fn credit(&mut self, account: &str, amount: i64) {
        *self.balances.entry(account.to_string()).or_insert(0) += amount;
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn balance_of(&self, account: &str) -> i64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(), AssetError> {
        if amount <= 0 {
            return Err(AssetError::NonPositiveAmount { amount });
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn approve(&mut self, owner: &str, spender: &str, amount: i64) {
        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
    }

    fn allowance(&self, owner: &str, spender: &str) -> i64 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<(), AssetError> {
        if amount <= 0 {
            return Err(AssetError::NonPositiveAmount { amount });
        }
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(AssetError::InsufficientAllowance {
                required: amount,
                approved,
            });
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        self.allowances
            .entry(from.to_string())
            .or_default()
            .insert(spender.to_string(), approved - amount);
        Ok(())
    }
}
