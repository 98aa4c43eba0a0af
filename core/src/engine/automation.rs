//! Automation agent - batch salary trigger
//!
//! An optional external trigger that sweeps all registered companies and
//! processes every due salary under the Automation role. The agent owns no
//! state invariants of its own: each payment goes through the same
//! `process_salary` entrypoint as a manual company call and is subject to
//! the identical precondition checks.
//!
//! Individual payment failures (typically an underfunded company) do not
//! abort the sweep; they are collected so the operator can act on them.

use crate::access::Role;
use crate::asset::AssetLedger;

use super::core::{EngineError, PayrollEngine};

/// A payment settled by a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPayment {
    pub company: String,
    pub contributor: String,
    pub amount: i64,
    pub payment_id: String,
}

/// A due payment the sweep could not settle
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPayment {
    pub company: String,
    pub contributor: String,
    pub reason: EngineError,
}

/// Statistics from one automation sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    /// Number of payments settled this sweep
    pub processed_count: usize,

    /// Total value settled (cents)
    pub processed_value: i64,

    /// Payments settled this sweep
    pub processed: Vec<ProcessedPayment>,

    /// Due payments that failed their precondition checks
    pub skipped: Vec<SkippedPayment>,
}

/// The automation trigger account
///
/// # Example
///
/// ```rust,ignore
/// let agent = AutomationAgent::new("keeper");
/// engine.set_automation_contract("admin", "keeper")?;
/// let result = agent.run(&mut engine)?;
/// println!("settled {} payments", result.processed_count);
/// ```
#[derive(Debug, Clone)]
pub struct AutomationAgent {
    account: String,
}

impl AutomationAgent {
    /// Create an agent triggering from `account`
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// The account this agent calls from
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Process every due salary across all companies
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnauthorizedAccess`] if the agent's account does not
    ///   hold the Automation role; nothing is attempted
    /// - [`EngineError::EnginePaused`] while the engine is paused
    ///
    /// Per-payment failures are collected in the result, not returned as
    /// errors.
    pub fn run<L: AssetLedger>(
        &self,
        engine: &mut PayrollEngine<L>,
    ) -> Result<SweepResult, EngineError> {
        if !engine.has_role(Role::Automation, &self.account) {
            return Err(EngineError::UnauthorizedAccess {
                account: self.account.clone(),
                role: Role::Automation,
            });
        }
        if engine.is_paused() {
            return Err(EngineError::EnginePaused);
        }

        let mut result = SweepResult::default();
        for company in engine.company_addresses() {
            for contributor in engine.active_contributors(&company) {
                if !engine.is_payment_due(&contributor) {
                    continue;
                }
                match engine.process_salary(&self.account, &contributor) {
                    Ok(payment) => {
                        result.processed_count += 1;
                        result.processed_value += payment.amount();
                        result.processed.push(ProcessedPayment {
                            company: company.clone(),
                            contributor,
                            amount: payment.amount(),
                            payment_id: payment.payment_id().to_string(),
                        });
                    }
                    Err(reason) => {
                        result.skipped.push(SkippedPayment {
                            company: company.clone(),
                            contributor,
                            reason,
                        });
                    }
                }
            }
        }
        Ok(result)
    }
}
