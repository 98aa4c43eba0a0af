//! Checkpoint - save/load engine state
//!
//! Serializes the complete engine state (minus the external asset ledger,
//! which the host owns) so the host can persist it as a single blob in
//! whatever durable storage it provides.
//!
//! # Critical Invariants
//!
//! - **Integrity**: every snapshot carries a SHA-256 hash over its canonical
//!   JSON form; restore rejects a snapshot whose content does not match
//! - **Completeness**: restoring reproduces every observable - balances,
//!   schedules, history, roles, pause flag, wiring and the event log
//! - **Determinism**: all collections are serialized in sorted order

use crate::access::Role;
use crate::asset::AssetLedger;
use crate::core::time::Clock;
use crate::models::company::Company;
use crate::models::contributor::Contributor;
use crate::models::event::{Event, EventLog};
use crate::models::payment::{PaymentLedger, PaymentRecord};
use crate::models::state::SettlementState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::core::{EngineConfig, EngineError, PayrollEngine};

/// A contributor record together with its owning company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorEntry {
    pub company: String,
    pub record: Contributor,
}

/// Role registry snapshot (member lists sorted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolesSnapshot {
    pub admins: Vec<String>,
    pub companies: Vec<String>,
    pub contributors: Vec<String>,
    pub automation: Option<String>,
}

/// Complete engine state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Engine configuration at snapshot time
    pub config: EngineConfig,

    /// Clock position at snapshot time
    pub taken_at: u64,

    /// Pause flag
    pub paused: bool,

    /// All companies, sorted by address
    pub companies: Vec<Company>,

    /// All contributor records (active and removed), sorted by
    /// (company, contributor)
    pub contributors: Vec<ContributorEntry>,

    /// All payment records in global append order
    pub payments: Vec<PaymentRecord>,

    /// Role registry
    pub roles: RolesSnapshot,

    /// Collaborator wiring: staking, loan, automation
    pub staking_contract: Option<String>,
    pub loan_contract: Option<String>,
    pub automation_contract: Option<String>,

    /// Full event log in emission order
    pub events: Vec<Event>,

    /// SHA-256 over the canonical JSON form of this snapshot with this
    /// field empty
    pub state_hash: String,
}

impl StateSnapshot {
    /// Hash of the snapshot content (the `state_hash` field excluded)
    pub fn compute_hash(&self) -> String {
        let mut unhashed = self.clone();
        unhashed.state_hash = String::new();
        let canonical =
            serde_json::to_string(&unhashed).expect("snapshot serialization cannot fail");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Whether the stored hash matches the content
    pub fn verify(&self) -> bool {
        self.state_hash == self.compute_hash()
    }
}

impl<L: AssetLedger> PayrollEngine<L> {
    /// Capture the complete engine state
    pub fn snapshot(&self) -> StateSnapshot {
        let (config, clock, state, access, payments, events, paused, wiring) = self.parts();

        let companies: Vec<Company> = state
            .company_addresses()
            .iter()
            .filter_map(|addr| state.get_company(addr).cloned())
            .collect();

        let mut contributors: Vec<ContributorEntry> = Vec::new();
        for company in state.company_addresses() {
            for record in state.contributors_of(&company) {
                contributors.push(ContributorEntry {
                    company: company.clone(),
                    record: record.clone(),
                });
            }
        }

        let roles = RolesSnapshot {
            admins: access.accounts_with_role(Role::Admin),
            companies: access.accounts_with_role(Role::Company),
            contributors: access.accounts_with_role(Role::Contributor),
            automation: access.automation_agent().map(|s| s.to_string()),
        };

        let [staking_contract, loan_contract, automation_contract] = wiring;
        let mut snapshot = StateSnapshot {
            config: config.clone(),
            taken_at: clock.now(),
            paused,
            companies,
            contributors,
            payments: payments.records().to_vec(),
            roles,
            staking_contract: staking_contract.map(|s| s.to_string()),
            loan_contract: loan_contract.map(|s| s.to_string()),
            automation_contract: automation_contract.map(|s| s.to_string()),
            events: events.events().to_vec(),
            state_hash: String::new(),
        };
        snapshot.state_hash = snapshot.compute_hash();
        snapshot
    }

    /// Rebuild an engine from a snapshot and the host's asset ledger
    ///
    /// # Errors
    /// Returns [`EngineError::CorruptSnapshot`] if the integrity hash does
    /// not match the snapshot content.
    pub fn restore(ledger: L, snapshot: &StateSnapshot) -> Result<Self, EngineError> {
        if !snapshot.verify() {
            return Err(EngineError::CorruptSnapshot);
        }

        let mut state = SettlementState::new();
        for company in &snapshot.companies {
            state.insert_company(company.clone());
        }
        for entry in &snapshot.contributors {
            state.insert_contributor(&entry.company, entry.record.clone());
        }

        let access = crate::access::AccessController::from_parts(
            snapshot.roles.admins.clone(),
            snapshot.roles.companies.clone(),
            snapshot.roles.contributors.clone(),
            snapshot.roles.automation.clone(),
        );

        let mut events = EventLog::new();
        for event in &snapshot.events {
            events.log(event.clone());
        }

        Ok(Self::from_parts(
            snapshot.config.clone(),
            ledger,
            Clock::new(snapshot.taken_at),
            state,
            access,
            PaymentLedger::from_records(snapshot.payments.clone()),
            events,
            snapshot.paused,
            [
                snapshot.staking_contract.clone(),
                snapshot.loan_contract.clone(),
                snapshot.automation_contract.clone(),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::InMemoryAssetLedger;

    fn engine_with_state() -> PayrollEngine<InMemoryAssetLedger> {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint("acme", 1_000_000);
        let mut engine = PayrollEngine::new(EngineConfig::new("admin", "treasury"), ledger);
        engine.register_company("acme", "Acme Corp").unwrap();
        engine.ledger_mut().approve("acme", "treasury", 500_000);
        engine.deposit("acme", 500_000).unwrap();
        engine
            .add_contributor("acme", "alice", "Alice", 100_000, 86_400)
            .unwrap();
        engine
    }

    #[test]
    fn test_snapshot_hash_verifies() {
        let engine = engine_with_state();
        let snapshot = engine.snapshot();
        assert!(snapshot.verify());
    }

    #[test]
    fn test_tampered_snapshot_detected() {
        let engine = engine_with_state();
        let mut snapshot = engine.snapshot();
        snapshot.paused = true;
        assert!(!snapshot.verify());
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint("zeta", 1_000);
        ledger.mint("acme", 1_000);
        let mut engine = PayrollEngine::new(EngineConfig::new("admin", "treasury"), ledger);
        engine.register_company("zeta", "Zeta Inc").unwrap();
        engine.register_company("acme", "Acme Corp").unwrap();

        let snapshot = engine.snapshot();
        let addresses: Vec<&str> = snapshot.companies.iter().map(|c| c.address()).collect();
        assert_eq!(addresses, vec!["acme", "zeta"]);
    }
}
