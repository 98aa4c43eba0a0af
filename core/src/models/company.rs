//! Company model
//!
//! Represents a payroll-paying entity. Each company has:
//! - A treasury balance (i64 cents) held in the engine's custody
//! - A display name and the registering admin account
//! - A count of currently active contributors
//!
//! The balance is mutated only by that company's own deposit, withdraw and
//! salary-processing calls; there is no cross-company balance coupling.
//!
//! CRITICAL: All money values are i64 (cents); the balance never goes
//! negative (there is no credit facility).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during company balance operations
#[derive(Debug, Error, PartialEq)]
pub enum CompanyError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },
}

/// A registered company and its treasury accounting
///
/// # Example
/// ```
/// use payroll_core_rs::Company;
///
/// let mut company = Company::new("acme", "Acme Corp", "acme", 1_000);
/// company.credit(5_000);
/// company.debit(2_000).unwrap();
/// assert_eq!(company.balance(), 3_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Account address identifying the company (unique key)
    address: String,

    /// Display name (non-empty, validated at the entrypoint)
    name: String,

    /// Treasury balance in custody (i64 cents, never negative)
    balance: i64,

    /// Number of currently active contributors
    contributor_count: usize,

    /// Companies are active from creation; no deactivation path is exposed
    is_active: bool,

    /// The registering account (company self-administration)
    admin: String,

    /// Registration timestamp (seconds)
    registered_at: u64,
}

impl Company {
    /// Create a new active company with a zero balance
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        admin: impl Into<String>,
        registered_at: u64,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            balance: 0,
            contributor_count: 0,
            is_active: true,
            admin: admin.into(),
            registered_at,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current treasury balance (cents)
    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn contributor_count(&self) -> usize {
        self.contributor_count
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn registered_at(&self) -> u64 {
        self.registered_at
    }

    /// Check whether the balance covers `amount`
    pub fn can_cover(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Add `amount` to the treasury balance
    pub fn credit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Remove `amount` from the treasury balance
    ///
    /// # Errors
    /// Returns [`CompanyError::InsufficientBalance`] if the balance does not
    /// cover the amount; the balance is left unchanged.
    pub fn debit(&mut self, amount: i64) -> Result<(), CompanyError> {
        if self.balance < amount {
            return Err(CompanyError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Record that a contributor was added
    pub(crate) fn contributor_added(&mut self) {
        self.contributor_count += 1;
    }

    /// Record that a contributor was removed
    pub(crate) fn contributor_removed(&mut self) {
        self.contributor_count = self.contributor_count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company() {
        let company = Company::new("acme", "Acme Corp", "acme", 42);
        assert_eq!(company.address(), "acme");
        assert_eq!(company.name(), "Acme Corp");
        assert_eq!(company.balance(), 0);
        assert_eq!(company.contributor_count(), 0);
        assert!(company.is_active());
        assert_eq!(company.admin(), "acme");
        assert_eq!(company.registered_at(), 42);
    }

    #[test]
    fn test_credit_debit() {
        let mut company = Company::new("acme", "Acme Corp", "acme", 0);
        company.credit(1_000);
        assert_eq!(company.balance(), 1_000);

        company.debit(400).unwrap();
        assert_eq!(company.balance(), 600);
    }

    #[test]
    fn test_debit_insufficient() {
        let mut company = Company::new("acme", "Acme Corp", "acme", 0);
        company.credit(100);

        let err = company.debit(500).unwrap_err();
        assert_eq!(
            err,
            CompanyError::InsufficientBalance {
                required: 500,
                available: 100,
            }
        );
        // Balance unchanged on failure
        assert_eq!(company.balance(), 100);
    }

    #[test]
    fn test_debit_exact_balance() {
        let mut company = Company::new("acme", "Acme Corp", "acme", 0);
        company.credit(100);
        company.debit(100).unwrap();
        assert_eq!(company.balance(), 0);
    }

    #[test]
    fn test_contributor_count() {
        let mut company = Company::new("acme", "Acme Corp", "acme", 0);
        company.contributor_added();
        company.contributor_added();
        company.contributor_removed();
        assert_eq!(company.contributor_count(), 1);

        // Never underflows
        company.contributor_removed();
        company.contributor_removed();
        assert_eq!(company.contributor_count(), 0);
    }
}
