//! Salary-processing protocol
//!
//! The core settlement operation: pay one contributor one period's salary
//! out of the owning company's treasury balance.
//!
//! # Settlement Flow
//!
//! ```text
//! 1. Contributor must be active
//! 2. Wall-clock time must have reached the due time
//! 3. Company balance must cover the salary
//! 4. Transfer salary: custody account -> contributor account
//! 5. Commit: debit company, advance schedule, stamp last processed time
//! ```
//!
//! Preconditions are checked in order and each is a distinct hard failure
//! with no partial effect. The schedule advances by exactly one frequency
//! unit from the *previous due time* (never from "now"), so late processing
//! does not drift later payments.
//!
//! The caller authorization check (owning company or automation agent) is an
//! access-control concern and lives in the engine entrypoint, not here.

use crate::asset::{AssetError, AssetLedger};
use crate::models::company::{Company, CompanyError};
use crate::models::contributor::Contributor;
use thiserror::Error;

/// Errors that can occur during salary processing
#[derive(Debug, Error, PartialEq)]
pub enum PayrollError {
    #[error("contributor {contributor} is not active")]
    ContributorNotActive { contributor: String },

    /// The source system signals "not yet due" as "already processed":
    /// a second call inside the same period is, from its point of view, a
    /// re-processing of a payment that already happened.
    #[error("payment already processed for {contributor}; next due at {due}")]
    PaymentAlreadyProcessed { contributor: String, due: u64 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] AssetError),
}

impl From<CompanyError> for PayrollError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::InsufficientBalance {
                required,
                available,
            } => PayrollError::InsufficientBalance {
                required,
                available,
            },
        }
    }
}

/// Outcome of a successfully processed salary payment
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryReceipt {
    /// Amount paid (cents)
    pub amount: i64,

    /// Processing timestamp
    pub paid_at: u64,

    /// The contributor's new due time (previous due + one frequency)
    pub next_payment_due: u64,

    /// Opaque reference to the executed asset transfer
    pub tx_reference: String,
}

/// Attempt to process one salary payment
///
/// On success the company is debited, the salary lands on the contributor's
/// asset account, and the contributor's schedule advances drift-free. On any
/// failure **no state changes occur** - balances, schedule and ledger are
/// exactly as before the call.
///
/// # Example
/// ```
/// use payroll_core_rs::{AssetLedger, Company, Contributor, InMemoryAssetLedger};
/// use payroll_core_rs::settlement::payroll;
///
/// let mut company = Company::new("acme", "Acme Corp", "acme", 0);
/// company.credit(500_000);
/// let mut contributor = Contributor::new("alice", "Alice", 100_000, 86_400, 0);
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.mint("custody", 500_000);
///
/// let receipt =
///     payroll::process_salary(&mut company, &mut contributor, &mut ledger, "custody", 86_400)
///         .unwrap();
///
/// assert_eq!(receipt.amount, 100_000);
/// assert_eq!(company.balance(), 400_000);
/// assert_eq!(ledger.balance_of("alice"), 100_000);
/// assert_eq!(contributor.next_payment_due(), 2 * 86_400);
/// ```
pub fn process_salary(
    company: &mut Company,
    contributor: &mut Contributor,
    ledger: &mut dyn AssetLedger,
    custody: &str,
    now: u64,
) -> Result<SalaryReceipt, PayrollError> {
    if !contributor.is_active() {
        return Err(PayrollError::ContributorNotActive {
            contributor: contributor.address().to_string(),
        });
    }
    if now < contributor.next_payment_due() {
        return Err(PayrollError::PaymentAlreadyProcessed {
            contributor: contributor.address().to_string(),
            due: contributor.next_payment_due(),
        });
    }

    let salary = contributor.salary();
    if !company.can_cover(salary) {
        return Err(PayrollError::InsufficientBalance {
            required: salary,
            available: company.balance(),
        });
    }

    // External transfer first; commit internal state only after it succeeded
    ledger.transfer(custody, contributor.address(), salary)?;

    company.debit(salary)?;
    contributor.record_payment(now);

    Ok(SalaryReceipt {
        amount: salary,
        paid_at: now,
        next_payment_due: contributor.next_payment_due(),
        tx_reference: format!("xfer:{}:{}:{}", company.address(), contributor.address(), now),
    })
}
