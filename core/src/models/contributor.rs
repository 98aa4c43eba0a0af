//! Contributor model and the payment schedule state machine
//!
//! A contributor is a worker receiving scheduled salary payments from exactly
//! one company at a time. The schedule has three states:
//!
//! - `Inactive`: removed (or never added)
//! - `ActiveWaiting`: active, next payment not yet due
//! - `ActiveDue`: active and wall-clock time has reached the due time
//!
//! `ActiveDue` is a computed predicate, not stored state: the record only
//! carries `next_payment_due` and the comparison happens at call time.
//!
//! Schedule advancement is drift-free: a successful payment advances the due
//! time by exactly one frequency unit *from the previous due time*, never
//! from the processing time, so late processing does not push later payments
//! out.

use serde::{Deserialize, Serialize};

/// Minimum allowed payment frequency: 1 day in seconds
pub const MIN_PAYMENT_FREQUENCY: u64 = 24 * 60 * 60;

/// Maximum allowed payment frequency: 30 days in seconds
pub const MAX_PAYMENT_FREQUENCY: u64 = 30 * 24 * 60 * 60;

/// Computed schedule state of a contributor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStatus {
    /// Removed or never added
    Inactive,

    /// Active, payment not yet due
    ActiveWaiting,

    /// Active and payable (now >= next_payment_due)
    ActiveDue,
}

/// A contributor record owned by a single company
///
/// # Example
/// ```
/// use payroll_core_rs::{Contributor, ScheduleStatus};
///
/// let contributor = Contributor::new("alice", "Alice", 100_000, 86_400, 1_000);
/// assert_eq!(contributor.next_payment_due(), 87_400);
/// assert_eq!(contributor.status(1_000), ScheduleStatus::ActiveWaiting);
/// assert_eq!(contributor.status(87_400), ScheduleStatus::ActiveDue);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Account address the salary is paid to
    address: String,

    /// Display name (non-empty, validated at the entrypoint)
    name: String,

    /// Salary per period (i64 cents, > 0)
    salary: i64,

    /// Interval between payments, in seconds, within
    /// [MIN_PAYMENT_FREQUENCY, MAX_PAYMENT_FREQUENCY]
    payment_frequency: u64,

    /// false after removal; re-adding reactivates the record
    is_active: bool,

    /// Timestamp at or after which the next salary is payable
    next_payment_due: u64,

    /// Timestamp of the last processed payment, 0 if never paid
    last_processed_time: u64,

    /// Timestamp the record was (last) activated
    added_at: u64,
}

impl Contributor {
    /// Create an active contributor with the first payment due one full
    /// frequency from `now`
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        salary: i64,
        payment_frequency: u64,
        now: u64,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            salary,
            payment_frequency,
            is_active: true,
            next_payment_due: now + payment_frequency,
            last_processed_time: 0,
            added_at: now,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Salary per period (cents)
    pub fn salary(&self) -> i64 {
        self.salary
    }

    /// Interval between payments (seconds)
    pub fn payment_frequency(&self) -> u64 {
        self.payment_frequency
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn next_payment_due(&self) -> u64 {
        self.next_payment_due
    }

    /// 0 if never paid
    pub fn last_processed_time(&self) -> u64 {
        self.last_processed_time
    }

    pub fn added_at(&self) -> u64 {
        self.added_at
    }

    /// Whether the salary is payable at `now`
    pub fn is_due(&self, now: u64) -> bool {
        self.is_active && now >= self.next_payment_due
    }

    /// Computed schedule state at `now`
    pub fn status(&self, now: u64) -> ScheduleStatus {
        if !self.is_active {
            ScheduleStatus::Inactive
        } else if now >= self.next_payment_due {
            ScheduleStatus::ActiveDue
        } else {
            ScheduleStatus::ActiveWaiting
        }
    }

    /// Record a processed payment at `now`
    ///
    /// Advances the due time by exactly one frequency unit from the previous
    /// due time (anti-drift) and stamps `last_processed_time = now`.
    pub(crate) fn record_payment(&mut self, now: u64) {
        self.next_payment_due += self.payment_frequency;
        self.last_processed_time = now;
    }

    /// Deactivate the record (removal); fields and history are retained
    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Reactivate a removed record with fresh attributes
    ///
    /// The new name/salary/frequency overwrite the old ones, the schedule
    /// restarts at `now + frequency`, and the never-paid marker is reset so
    /// the prior tenure's due time cannot make a rehire instantly payable.
    pub(crate) fn reactivate(
        &mut self,
        name: impl Into<String>,
        salary: i64,
        payment_frequency: u64,
        now: u64,
    ) {
        self.name = name.into();
        self.salary = salary;
        self.payment_frequency = payment_frequency;
        self.is_active = true;
        self.next_payment_due = now + payment_frequency;
        self.last_processed_time = 0;
        self.added_at = now;
    }
}
