//! Payment records and the append-only payment ledger
//!
//! Every successful salary processing appends exactly one [`PaymentRecord`].
//! Records are immutable once created: the ledger exposes no mutation or
//! deletion API. History reads are side-effect free and re-readable.
//!
//! Records are keyed globally by a collision-free payment id (UUID, minted
//! the same way transaction ids are) and carry a monotonic sequence number
//! for ordering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable record of one processed salary payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Globally unique payment identifier (UUID)
    payment_id: String,

    /// Monotonic sequence number assigned by the ledger (1-based)
    seq: u64,

    /// Paying company address
    company: String,

    /// Paid contributor address
    contributor: String,

    /// Amount paid (i64 cents)
    amount: i64,

    /// Processing timestamp (seconds)
    timestamp: u64,

    /// Always true for appended records; retained for interface fidelity
    /// with external indexers that expect the flag
    processed: bool,

    /// Opaque reference to the executed asset transfer
    tx_reference: String,
}

impl PaymentRecord {
    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn contributor(&self) -> &str {
        &self.contributor
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn processed(&self) -> bool {
        self.processed
    }

    pub fn tx_reference(&self) -> &str {
        &self.tx_reference
    }
}

/// Append-only store of payment records
///
/// Indexed globally by payment id and per (company, contributor) pair in
/// append order (oldest first).
///
/// # Example
/// ```
/// use payroll_core_rs::PaymentLedger;
///
/// let mut ledger = PaymentLedger::new();
/// let id = ledger
///     .append("acme", "alice", 100_000, 1_000, "xfer:acme:alice:1000")
///     .payment_id()
///     .to_string();
///
/// assert_eq!(ledger.history("acme", "alice").len(), 1);
/// assert!(ledger.get(&id).is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentLedger {
    /// All records in global append order; seq == index + 1
    records: Vec<PaymentRecord>,

    /// company -> contributor -> indices into `records`
    by_pair: HashMap<String, HashMap<String, Vec<usize>>>,

    /// payment id -> index into `records`
    by_id: HashMap<String, usize>,
}

impl PaymentLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a successfully processed payment
    ///
    /// Mints the payment id and sequence number; returns the stored record.
    pub fn append(
        &mut self,
        company: &str,
        contributor: &str,
        amount: i64,
        timestamp: u64,
        tx_reference: impl Into<String>,
    ) -> &PaymentRecord {
        let index = self.records.len();
        let record = PaymentRecord {
            payment_id: uuid::Uuid::new_v4().to_string(),
            seq: index as u64 + 1,
            company: company.to_string(),
            contributor: contributor.to_string(),
            amount,
            timestamp,
            processed: true,
            tx_reference: tx_reference.into(),
        };
        self.by_id.insert(record.payment_id.clone(), index);
        self.by_pair
            .entry(company.to_string())
            .or_default()
            .entry(contributor.to_string())
            .or_default()
            .push(index);
        self.records.push(record);
        &self.records[index]
    }

    /// Rebuild a ledger from records in global append order (snapshot restore)
    pub(crate) fn from_records(records: Vec<PaymentRecord>) -> Self {
        let mut ledger = Self::new();
        for (index, record) in records.into_iter().enumerate() {
            ledger.by_id.insert(record.payment_id.clone(), index);
            ledger
                .by_pair
                .entry(record.company.clone())
                .or_default()
                .entry(record.contributor.clone())
                .or_default()
                .push(index);
            ledger.records.push(record);
        }
        ledger
    }

    /// Ordered history (oldest first) for a (company, contributor) pair
    pub fn history(&self, company: &str, contributor: &str) -> Vec<&PaymentRecord> {
        self.by_pair
            .get(company)
            .and_then(|contributors| contributors.get(contributor))
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Look up a record by its globally unique payment id
    pub fn get(&self, payment_id: &str) -> Option<&PaymentRecord> {
        self.by_id.get(payment_id).map(|&i| &self.records[i])
    }

    /// All records in global append order
    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    /// Number of records ever appended
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total value ever paid out by `company` (cents)
    pub fn total_paid_by(&self, company: &str) -> i64 {
        self.records
            .iter()
            .filter(|r| r.company == company)
            .map(|r| r.amount)
            .sum()
    }
}
