//! Payroll engine - the public entrypoint facade
//!
//! Every mutating entrypoint follows the same shape:
//!
//! 1. Reject recursive entry (reentrancy guard)
//! 2. Reject while paused (for the gated operations)
//! 3. Assert the caller's role
//! 4. Validate arguments
//! 5. Check domain preconditions
//! 6. Execute the external asset transfer, then commit internal state
//! 7. Emit exactly one event
//!
//! Any failure aborts the whole call with no state change and no event.
//! The engine is a single-threaded, totally-ordered state machine: each call
//! runs to completion (commit or full rollback) before the next begins.

use crate::access::{AccessController, AccessError, Role};
use crate::asset::{AssetError, AssetLedger};
use crate::core::time::Clock;
use crate::models::company::Company;
use crate::models::contributor::{
    Contributor, MAX_PAYMENT_FREQUENCY, MIN_PAYMENT_FREQUENCY,
};
use crate::models::event::{Event, EventLog};
use crate::models::payment::{PaymentLedger, PaymentRecord};
use crate::models::state::SettlementState;
use crate::settlement::{payroll, treasury, PayrollError, TreasuryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Engine configuration
///
/// # Example
/// ```
/// use payroll_core_rs::EngineConfig;
///
/// let config = EngineConfig::new("admin", "treasury").with_start_time(1_700_000_000);
/// assert_eq!(config.start_time, 1_700_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bootstrap admin account
    pub admin: String,

    /// Treasury custody account on the asset ledger; deposits are pulled
    /// into it and payments are paid out of it
    pub custody_account: String,

    /// Clock start, seconds since the unix epoch
    pub start_time: u64,
}

impl EngineConfig {
    /// Create a configuration with the clock starting at 0
    pub fn new(admin: impl Into<String>, custody_account: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            custody_account: custody_account.into(),
            start_time: 0,
        }
    }

    /// Set the clock start time
    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = start_time;
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by the engine entrypoints
///
/// Every variant is a hard rejection of the whole operation; no partial
/// effect ever persists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("unauthorized access: account {account} does not hold the {role} role")]
    UnauthorizedAccess { account: String, role: Role },

    #[error("invalid address: {address:?}")]
    InvalidAddress { address: String },

    #[error("invalid amount: zero value or empty name")]
    InvalidAmount,

    #[error("invalid frequency: {frequency}s outside allowed range [{min}s, {max}s]")]
    InvalidFrequency { frequency: u64, min: u64, max: u64 },

    #[error("company {company} already registered")]
    CompanyAlreadyRegistered { company: String },

    #[error("contributor {contributor} is already active")]
    ContributorAlreadyActive { contributor: String },

    #[error("contributor {contributor} is not active")]
    ContributorNotActive { contributor: String },

    /// Raised when a salary is not yet due. The name follows the settlement
    /// protocol's view: a second call inside the same period re-processes a
    /// payment that already happened.
    #[error("payment already processed for {contributor}; next due at {due}")]
    PaymentAlreadyProcessed { contributor: String, due: u64 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("asset transfer failed: {0}")]
    TransferFailed(AssetError),

    #[error("engine is paused")]
    EnginePaused,

    #[error("engine is not paused")]
    EngineNotPaused,

    #[error("reentrant call rejected")]
    ReentrantCall,

    #[error("snapshot integrity check failed")]
    CorruptSnapshot,
}

impl From<AccessError> for EngineError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UnauthorizedAccess { account, role } => {
                EngineError::UnauthorizedAccess { account, role }
            }
        }
    }
}

impl From<TreasuryError> for EngineError {
    fn from(err: TreasuryError) -> Self {
        match err {
            TreasuryError::InvalidAmount { .. } => EngineError::InvalidAmount,
            TreasuryError::InsufficientBalance {
                required,
                available,
            } => EngineError::InsufficientBalance {
                required,
                available,
            },
            TreasuryError::TransferFailed(cause) => EngineError::TransferFailed(cause),
        }
    }
}

impl From<PayrollError> for EngineError {
    fn from(err: PayrollError) -> Self {
        match err {
            PayrollError::ContributorNotActive { contributor } => {
                EngineError::ContributorNotActive { contributor }
            }
            PayrollError::PaymentAlreadyProcessed { contributor, due } => {
                EngineError::PaymentAlreadyProcessed { contributor, due }
            }
            PayrollError::InsufficientBalance {
                required,
                available,
            } => EngineError::InsufficientBalance {
                required,
                available,
            },
            PayrollError::TransferFailed(cause) => EngineError::TransferFailed(cause),
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// The payroll settlement engine
///
/// Owns the registries, the payment ledger, the role registry, the clock and
/// the asset ledger it settles against.
///
/// # Example
///
/// ```rust
/// use payroll_core_rs::{AssetLedger, EngineConfig, InMemoryAssetLedger, PayrollEngine};
///
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.mint("acme", 1_000_000);
///
/// let mut engine = PayrollEngine::new(EngineConfig::new("admin", "treasury"), ledger);
/// engine.register_company("acme", "Acme Corp").unwrap();
///
/// engine.ledger_mut().approve("acme", "treasury", 500_000);
/// engine.deposit("acme", 500_000).unwrap();
///
/// assert_eq!(engine.company_details("acme").unwrap().balance(), 500_000);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine<L: AssetLedger> {
    config: EngineConfig,
    clock: Clock,
    state: SettlementState,
    access: AccessController,
    ledger: L,
    payments: PaymentLedger,
    events: EventLog,
    paused: bool,
    /// Reentrancy guard: set for the duration of every mutating entrypoint
    in_call: bool,
    staking_contract: Option<String>,
    loan_contract: Option<String>,
    automation_contract: Option<String>,
}

impl<L: AssetLedger> PayrollEngine<L> {
    /// Create an engine with an empty registry
    ///
    /// # Panics
    /// Panics if the admin or custody account is empty.
    pub fn new(config: EngineConfig, ledger: L) -> Self {
        assert!(!config.admin.is_empty(), "admin account must be non-empty");
        assert!(
            !config.custody_account.is_empty(),
            "custody account must be non-empty"
        );
        let clock = Clock::new(config.start_time);
        let access = AccessController::bootstrap(config.admin.clone());
        Self {
            config,
            clock,
            state: SettlementState::new(),
            access,
            ledger,
            payments: PaymentLedger::new(),
            events: EventLog::new(),
            paused: false,
            in_call: false,
            staking_contract: None,
            loan_contract: None,
            automation_contract: None,
        }
    }

    // ------------------------------------------------------------------
    // Registry entrypoints
    // ------------------------------------------------------------------

    /// Register the caller as a company
    ///
    /// Grants the Company role and creates the record with a zero balance.
    ///
    /// # Errors
    /// - [`EngineError::InvalidAddress`] for an empty caller address
    /// - [`EngineError::InvalidAmount`] for an empty name
    /// - [`EngineError::CompanyAlreadyRegistered`] on duplicate registration
    pub fn register_company(&mut self, caller: &str, name: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.register_company_inner(caller, name);
        self.end_call();
        result
    }

    fn register_company_inner(&mut self, caller: &str, name: &str) -> Result<(), EngineError> {
        if caller.is_empty() {
            return Err(EngineError::InvalidAddress {
                address: caller.to_string(),
            });
        }
        if name.is_empty() {
            return Err(EngineError::InvalidAmount);
        }
        if self.state.company_exists(caller) {
            return Err(EngineError::CompanyAlreadyRegistered {
                company: caller.to_string(),
            });
        }

        let now = self.clock.now();
        self.state
            .insert_company(Company::new(caller, name, caller, now));
        self.access.grant_unchecked(Role::Company, caller);
        self.events.log(Event::CompanyRegistered {
            company: caller.to_string(),
            name: name.to_string(),
            timestamp: now,
        });
        Ok(())
    }

    /// Add (or reactivate) a contributor for the calling company
    ///
    /// The first payment becomes due one full frequency after the add.
    ///
    /// # Errors
    /// - [`EngineError::UnauthorizedAccess`] if the caller is not a company
    /// - [`EngineError::InvalidAddress`] for an empty contributor address
    /// - [`EngineError::InvalidAmount`] for an empty name or zero salary
    /// - [`EngineError::InvalidFrequency`] outside
    ///   [[`MIN_PAYMENT_FREQUENCY`], [`MAX_PAYMENT_FREQUENCY`]]
    /// - [`EngineError::ContributorAlreadyActive`] if the address is already
    ///   actively employed (by this or any other company)
    pub fn add_contributor(
        &mut self,
        caller: &str,
        contributor: &str,
        name: &str,
        salary: i64,
        frequency: u64,
    ) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.add_contributor_inner(caller, contributor, name, salary, frequency);
        self.end_call();
        result
    }

    fn add_contributor_inner(
        &mut self,
        caller: &str,
        contributor: &str,
        name: &str,
        salary: i64,
        frequency: u64,
    ) -> Result<(), EngineError> {
        self.require_active_company(caller)?;
        if contributor.is_empty() {
            return Err(EngineError::InvalidAddress {
                address: contributor.to_string(),
            });
        }
        if name.is_empty() || salary <= 0 {
            return Err(EngineError::InvalidAmount);
        }
        if !(MIN_PAYMENT_FREQUENCY..=MAX_PAYMENT_FREQUENCY).contains(&frequency) {
            return Err(EngineError::InvalidFrequency {
                frequency,
                min: MIN_PAYMENT_FREQUENCY,
                max: MAX_PAYMENT_FREQUENCY,
            });
        }
        if self.state.company_of(contributor).is_some() {
            return Err(EngineError::ContributorAlreadyActive {
                contributor: contributor.to_string(),
            });
        }

        let now = self.clock.now();
        let reactivated = match self.state.get_contributor_mut(caller, contributor) {
            Some(record) => {
                record.reactivate(name, salary, frequency, now);
                true
            }
            None => false,
        };
        if reactivated {
            self.state.set_company_of(contributor, caller);
        } else {
            self.state.insert_contributor(
                caller,
                Contributor::new(contributor, name, salary, frequency, now),
            );
        }
        self.state
            .get_company_mut(caller)
            .expect("company checked above")
            .contributor_added();
        self.access.grant_unchecked(Role::Contributor, contributor);
        self.events.log(Event::ContributorAdded {
            company: caller.to_string(),
            contributor: contributor.to_string(),
            name: name.to_string(),
            salary,
            timestamp: now,
        });
        Ok(())
    }

    /// Remove (deactivate) a contributor of the calling company
    ///
    /// The record and its payment history survive; the address can be
    /// re-added later, which reactivates the record with fresh attributes.
    /// The Contributor role is retained: removal is deactivation, not
    /// deletion.
    pub fn remove_contributor(&mut self, caller: &str, contributor: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.remove_contributor_inner(caller, contributor);
        self.end_call();
        result
    }

    fn remove_contributor_inner(
        &mut self,
        caller: &str,
        contributor: &str,
    ) -> Result<(), EngineError> {
        self.require_active_company(caller)?;

        match self.state.get_contributor_mut(caller, contributor) {
            Some(record) if record.is_active() => record.deactivate(),
            _ => {
                return Err(EngineError::ContributorNotActive {
                    contributor: contributor.to_string(),
                })
            }
        }
        self.state.clear_company_of(contributor);
        self.state
            .get_company_mut(caller)
            .expect("company checked above")
            .contributor_removed();
        self.events.log(Event::ContributorRemoved {
            company: caller.to_string(),
            contributor: contributor.to_string(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Treasury entrypoints
    // ------------------------------------------------------------------

    /// Pull `amount` from the caller's asset account into treasury custody
    ///
    /// The caller must have pre-approved the custody account on the asset
    /// ledger for at least `amount`.
    pub fn deposit(&mut self, caller: &str, amount: i64) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.deposit_inner(caller, amount);
        self.end_call();
        result
    }

    fn deposit_inner(&mut self, caller: &str, amount: i64) -> Result<(), EngineError> {
        self.ensure_not_paused()?;
        self.require_active_company(caller)?;

        let company = self
            .state
            .get_company_mut(caller)
            .expect("company checked above");
        treasury::deposit(company, &mut self.ledger, &self.config.custody_account, amount)?;

        self.events.log(Event::FundsDeposited {
            company: caller.to_string(),
            amount,
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    /// Push `amount` from treasury custody back to the caller's account
    pub fn withdraw(&mut self, caller: &str, amount: i64) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.withdraw_inner(caller, amount);
        self.end_call();
        result
    }

    fn withdraw_inner(&mut self, caller: &str, amount: i64) -> Result<(), EngineError> {
        self.ensure_not_paused()?;
        self.require_active_company(caller)?;

        let company = self
            .state
            .get_company_mut(caller)
            .expect("company checked above");
        treasury::withdraw(company, &mut self.ledger, &self.config.custody_account, amount)?;

        self.events.log(Event::FundsWithdrawn {
            company: caller.to_string(),
            amount,
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scheduler entrypoint
    // ------------------------------------------------------------------

    /// Process one due salary payment for `contributor`
    ///
    /// The caller must be the owning company, or hold the Automation role
    /// (the automation path resolves the owning company from the registry
    /// and is subject to the identical remaining preconditions).
    ///
    /// Preconditions, checked in order, each a distinct hard failure:
    /// caller authorization, contributor active, payment due, balance
    /// sufficient. On success the salary settles custody -> contributor,
    /// the schedule advances drift-free, and a payment record is appended.
    pub fn process_salary(
        &mut self,
        caller: &str,
        contributor: &str,
    ) -> Result<PaymentRecord, EngineError> {
        self.begin_call()?;
        let result = self.process_salary_inner(caller, contributor);
        self.end_call();
        result
    }

    fn process_salary_inner(
        &mut self,
        caller: &str,
        contributor: &str,
    ) -> Result<PaymentRecord, EngineError> {
        self.ensure_not_paused()?;

        let is_automation = self.access.has_role(Role::Automation, caller);
        if !is_automation && !self.access.has_role(Role::Company, caller) {
            return Err(EngineError::UnauthorizedAccess {
                account: caller.to_string(),
                role: Role::Company,
            });
        }

        // A company may only process its own contributors; the automation
        // agent resolves the owning company from the back-reference.
        let company_addr = if is_automation {
            self.state
                .company_of(contributor)
                .ok_or_else(|| EngineError::ContributorNotActive {
                    contributor: contributor.to_string(),
                })?
                .to_string()
        } else {
            caller.to_string()
        };

        let now = self.clock.now();
        let (company, record) = self
            .state
            .company_and_contributor_mut(&company_addr, contributor)
            .ok_or_else(|| EngineError::ContributorNotActive {
                contributor: contributor.to_string(),
            })?;

        let receipt = payroll::process_salary(
            company,
            record,
            &mut self.ledger,
            &self.config.custody_account,
            now,
        )?;

        let payment = self
            .payments
            .append(
                &company_addr,
                contributor,
                receipt.amount,
                now,
                receipt.tx_reference.clone(),
            )
            .clone();
        self.events.log(Event::PaymentProcessed {
            company: company_addr,
            contributor: contributor.to_string(),
            amount: receipt.amount,
            payment_id: payment.payment_id().to_string(),
            timestamp: now,
        });
        Ok(payment)
    }

    // ------------------------------------------------------------------
    // Pause / circuit-breaker
    // ------------------------------------------------------------------

    /// Halt salary processing, deposits and withdrawals (admin only)
    ///
    /// Reads stay available while paused. The clock keeps running: a
    /// contributor whose due time elapses while paused becomes immediately
    /// payable after [`PayrollEngine::unpause`].
    pub fn pause(&mut self, caller: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.pause_inner(caller);
        self.end_call();
        result
    }

    fn pause_inner(&mut self, caller: &str) -> Result<(), EngineError> {
        self.access.require_role(Role::Admin, caller)?;
        if self.paused {
            return Err(EngineError::EnginePaused);
        }
        self.paused = true;
        self.events.log(Event::Paused {
            by: caller.to_string(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    /// Resume normal operation (admin only); no state is lost
    pub fn unpause(&mut self, caller: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.unpause_inner(caller);
        self.end_call();
        result
    }

    fn unpause_inner(&mut self, caller: &str) -> Result<(), EngineError> {
        self.access.require_role(Role::Admin, caller)?;
        if !self.paused {
            return Err(EngineError::EngineNotPaused);
        }
        self.paused = false;
        self.events.log(Event::Unpaused {
            by: caller.to_string(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collaborator wiring (admin only)
    // ------------------------------------------------------------------

    /// Record the staking module's address (wiring only; admin only)
    pub fn set_staking_contract(&mut self, caller: &str, address: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.set_wiring(caller, address, |engine, addr| {
            engine.staking_contract = Some(addr);
        });
        self.end_call();
        result
    }

    /// Record the loan module's address (wiring only; admin only)
    pub fn set_loan_contract(&mut self, caller: &str, address: &str) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.set_wiring(caller, address, |engine, addr| {
            engine.loan_contract = Some(addr);
        });
        self.end_call();
        result
    }

    fn set_wiring(
        &mut self,
        caller: &str,
        address: &str,
        store: impl FnOnce(&mut Self, String),
    ) -> Result<(), EngineError> {
        self.access.require_role(Role::Admin, caller)?;
        if address.is_empty() {
            return Err(EngineError::InvalidAddress {
                address: address.to_string(),
            });
        }
        store(self, address.to_string());
        Ok(())
    }

    /// Designate the automation agent account (admin only)
    ///
    /// Atomically revokes the Automation role from the previous holder
    /// before granting it to `address`, so at most one live automation
    /// agent exists at any time.
    pub fn set_automation_contract(
        &mut self,
        caller: &str,
        address: &str,
    ) -> Result<(), EngineError> {
        self.begin_call()?;
        let result = self.set_automation_contract_inner(caller, address);
        self.end_call();
        result
    }

    fn set_automation_contract_inner(
        &mut self,
        caller: &str,
        address: &str,
    ) -> Result<(), EngineError> {
        self.access.require_role(Role::Admin, caller)?;
        if address.is_empty() {
            return Err(EngineError::InvalidAddress {
                address: address.to_string(),
            });
        }
        let previous = self.access.set_automation_agent(address);
        self.automation_contract = Some(address.to_string());
        self.events.log(Event::AutomationAgentChanged {
            previous,
            agent: address.to_string(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Role management (admin only)
    // ------------------------------------------------------------------

    /// Grant `role` to `account`; caller must be an admin
    pub fn grant_role(&mut self, caller: &str, role: Role, account: &str) -> Result<(), EngineError> {
        if account.is_empty() {
            return Err(EngineError::InvalidAddress {
                address: account.to_string(),
            });
        }
        self.access.grant_role(caller, role, account)?;
        Ok(())
    }

    /// Revoke `role` from `account`; caller must be an admin
    pub fn revoke_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
    ) -> Result<(), EngineError> {
        self.access.revoke_role(caller, role, account)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read operations (available while paused)
    // ------------------------------------------------------------------

    /// Company record, if registered
    pub fn company_details(&self, company: &str) -> Option<&Company> {
        self.state.get_company(company)
    }

    /// Contributor record for a (company, contributor) pair
    pub fn contributor_details(&self, company: &str, contributor: &str) -> Option<&Contributor> {
        self.state.get_contributor(company, contributor)
    }

    /// Ordered payment history (oldest first) for a pair; side-effect free
    pub fn payment_history(&self, company: &str, contributor: &str) -> Vec<&PaymentRecord> {
        self.payments.history(company, contributor)
    }

    /// Look up a payment by its globally unique id
    pub fn payment(&self, payment_id: &str) -> Option<&PaymentRecord> {
        self.payments.get(payment_id)
    }

    /// Addresses of a company's active contributors, sorted
    pub fn active_contributors(&self, company: &str) -> Vec<String> {
        self.state.active_contributors(company)
    }

    /// Addresses of all registered companies, sorted
    pub fn company_addresses(&self) -> Vec<String> {
        self.state.company_addresses()
    }

    /// Whether `contributor`'s next payment is due at the current time
    pub fn is_payment_due(&self, contributor: &str) -> bool {
        match self.state.company_of(contributor) {
            Some(company) => self
                .state
                .get_contributor(company, contributor)
                .map(|r| r.is_due(self.clock.now()))
                .unwrap_or(false),
            None => false,
        }
    }

    /// Whether a `process_salary` call for `contributor` would settle now
    /// (due AND the owning company's balance covers the salary)
    pub fn can_process_salary(&self, contributor: &str) -> bool {
        let Some(company_addr) = self.state.company_of(contributor) else {
            return false;
        };
        let Some(record) = self.state.get_contributor(company_addr, contributor) else {
            return false;
        };
        let Some(company) = self.state.get_company(company_addr) else {
            return false;
        };
        record.is_due(self.clock.now()) && company.can_cover(record.salary())
    }

    /// Whether `account` holds `role`
    pub fn has_role(&self, role: Role, account: &str) -> bool {
        self.access.has_role(role, account)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current automation agent account, if designated
    pub fn automation_agent(&self) -> Option<&str> {
        self.access.automation_agent()
    }

    pub fn staking_contract(&self) -> Option<&str> {
        self.staking_contract.as_deref()
    }

    pub fn loan_contract(&self) -> Option<&str> {
        self.loan_contract.as_deref()
    }

    /// All events emitted so far, in emission order
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// The asset ledger the engine settles against
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable asset ledger access (approvals, test seeding)
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Current engine time (seconds)
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Advance the engine clock by `secs`
    pub fn advance_time(&mut self, secs: u64) {
        self.clock.advance(secs);
    }

    /// Set the engine clock to an absolute timestamp (never backwards)
    pub fn set_time(&mut self, at: u64) {
        self.clock.set(at);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Internal guards
    // ------------------------------------------------------------------

    fn begin_call(&mut self) -> Result<(), EngineError> {
        if self.in_call {
            return Err(EngineError::ReentrantCall);
        }
        self.in_call = true;
        Ok(())
    }

    fn end_call(&mut self) {
        self.in_call = false;
    }

    fn ensure_not_paused(&self) -> Result<(), EngineError> {
        if self.paused {
            return Err(EngineError::EnginePaused);
        }
        Ok(())
    }

    /// Caller must hold the Company role and have an active company record
    fn require_active_company(&self, caller: &str) -> Result<(), EngineError> {
        self.access.require_role(Role::Company, caller)?;
        match self.state.get_company(caller) {
            Some(company) if company.is_active() => Ok(()),
            _ => Err(EngineError::UnauthorizedAccess {
                account: caller.to_string(),
                role: Role::Company,
            }),
        }
    }

    // Checkpoint support (see checkpoint.rs)

    pub(super) fn parts(
        &self,
    ) -> (
        &EngineConfig,
        &Clock,
        &SettlementState,
        &AccessController,
        &PaymentLedger,
        &EventLog,
        bool,
        [Option<&str>; 3],
    ) {
        (
            &self.config,
            &self.clock,
            &self.state,
            &self.access,
            &self.payments,
            &self.events,
            self.paused,
            [
                self.staking_contract.as_deref(),
                self.loan_contract.as_deref(),
                self.automation_contract.as_deref(),
            ],
        )
    }

    pub(super) fn from_parts(
        config: EngineConfig,
        ledger: L,
        clock: Clock,
        state: SettlementState,
        access: AccessController,
        payments: PaymentLedger,
        events: EventLog,
        paused: bool,
        wiring: [Option<String>; 3],
    ) -> Self {
        let [staking_contract, loan_contract, automation_contract] = wiring;
        Self {
            config,
            clock,
            state,
            access,
            ledger,
            payments,
            events,
            paused,
            in_call: false,
            staking_contract,
            loan_contract,
            automation_contract,
        }
    }
}
