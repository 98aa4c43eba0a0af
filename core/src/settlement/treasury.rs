//! Treasury protocol: deposits and withdrawals
//!
//! Per-company balance accounting built atop [`AssetLedger`] transfers.
//!
//! # Settlement Flow
//!
//! ```text
//! deposit:   company account --transfer_from (allowance)--> custody account
//!            then company.balance += amount
//! withdraw:  custody account --transfer--> company account
//!            then company.balance -= amount
//! ```
//!
//! # Critical Invariants
//!
//! - **Atomicity**: the internal balance is committed only after the external
//!   transfer succeeded; a failed transfer leaves no state change
//! - **Net-deposit bound**: the balance can never exceed the sum of net
//!   deposits, because every credit is backed by a completed pull into
//!   custody and every debit by a completed push out of it

use crate::asset::{AssetError, AssetLedger};
use crate::models::company::{Company, CompanyError};
use thiserror::Error;

/// Errors that can occur during deposits and withdrawals
#[derive(Debug, Error, PartialEq)]
pub enum TreasuryError {
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: i64 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] AssetError),
}

impl From<CompanyError> for TreasuryError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::InsufficientBalance {
                required,
                available,
            } => TreasuryError::InsufficientBalance {
                required,
                available,
            },
        }
    }
}

/// Pull `amount` from the company's account into treasury custody
///
/// The company must have pre-approved the custody account for at least
/// `amount` on the asset ledger. On success the company's treasury balance
/// is credited by exactly `amount`.
///
/// # Errors
///
/// - [`TreasuryError::InvalidAmount`] if `amount <= 0`
/// - [`TreasuryError::TransferFailed`] if the allowance or the company's
///   asset balance is insufficient; **no state changes occur**
///
/// # Example
/// ```
/// use payroll_core_rs::{AssetLedger, Company, InMemoryAssetLedger};
/// use payroll_core_rs::settlement::treasury;
///
/// let mut company = Company::new("acme", "Acme Corp", "acme", 0);
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.mint("acme", 10_000);
/// ledger.approve("acme", "custody", 10_000);
///
/// treasury::deposit(&mut company, &mut ledger, "custody", 4_000).unwrap();
/// assert_eq!(company.balance(), 4_000);
/// assert_eq!(ledger.balance_of("custody"), 4_000);
/// ```
pub fn deposit(
    company: &mut Company,
    ledger: &mut dyn AssetLedger,
    custody: &str,
    amount: i64,
) -> Result<(), TreasuryError> {
    if amount <= 0 {
        return Err(TreasuryError::InvalidAmount { amount });
    }

    // External pull first; commit the balance only after it succeeded
    ledger.transfer_from(custody, company.address(), custody, amount)?;
    company.credit(amount);

    Ok(())
}

/// Push `amount` from treasury custody back to the company's account
///
/// # Errors
///
/// - [`TreasuryError::InvalidAmount`] if `amount <= 0`
/// - [`TreasuryError::InsufficientBalance`] if `amount` exceeds the
///   company's treasury balance; **no state changes occur**
pub fn withdraw(
    company: &mut Company,
    ledger: &mut dyn AssetLedger,
    custody: &str,
    amount: i64,
) -> Result<(), TreasuryError> {
    if amount <= 0 {
        return Err(TreasuryError::InvalidAmount { amount });
    }
    if !company.can_cover(amount) {
        return Err(TreasuryError::InsufficientBalance {
            required: amount,
            available: company.balance(),
        });
    }

    ledger.transfer(custody, company.address(), amount)?;
    company.debit(amount)?;

    Ok(())
}
