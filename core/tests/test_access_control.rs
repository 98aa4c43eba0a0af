//! Access control tests
//!
//! Role grants and revocations, the single-holder automation role, and
//! collaborator wiring validation.

use payroll_core_rs::{EngineConfig, EngineError, Event, InMemoryAssetLedger, PayrollEngine, Role};

fn new_engine() -> PayrollEngine<InMemoryAssetLedger> {
    PayrollEngine::new(
        EngineConfig::new("admin", "treasury"),
        InMemoryAssetLedger::new(),
    )
}

// ============================================================================
// Role Management
// ============================================================================

#[test]
fn test_bootstrap_admin() {
    let engine = new_engine();
    assert!(engine.has_role(Role::Admin, "admin"));
    assert!(!engine.has_role(Role::Company, "admin"));
}

#[test]
fn test_admin_grants_and_revokes() {
    let mut engine = new_engine();
    engine.grant_role("admin", Role::Admin, "admin2").unwrap();
    assert!(engine.has_role(Role::Admin, "admin2"));

    engine.revoke_role("admin", Role::Admin, "admin2").unwrap();
    assert!(!engine.has_role(Role::Admin, "admin2"));
}

#[test]
fn test_non_admin_cannot_grant() {
    let mut engine = new_engine();
    engine.register_company("acme", "Acme Corp").unwrap();

    assert_eq!(
        engine.grant_role("acme", Role::Admin, "acme"),
        Err(EngineError::UnauthorizedAccess {
            account: "acme".to_string(),
            role: Role::Admin,
        })
    );
    assert!(!engine.has_role(Role::Admin, "acme"));
}

#[test]
fn test_grant_empty_account_rejected() {
    let mut engine = new_engine();
    assert!(matches!(
        engine.grant_role("admin", Role::Company, ""),
        Err(EngineError::InvalidAddress { .. })
    ));
}

#[test]
fn test_roles_granted_on_registration_paths() {
    let mut ledger = InMemoryAssetLedger::new();
    ledger.mint("acme", 1_000_000);
    let mut engine = PayrollEngine::new(EngineConfig::new("admin", "treasury"), ledger);

    engine.register_company("acme", "Acme Corp").unwrap();
    assert!(engine.has_role(Role::Company, "acme"));

    engine
        .add_contributor("acme", "alice", "Alice", 1_000, 86_400)
        .unwrap();
    assert!(engine.has_role(Role::Contributor, "alice"));
}

// ============================================================================
// Automation Role (single holder)
// ============================================================================

#[test]
fn test_set_automation_contract() {
    let mut engine = new_engine();
    engine.set_automation_contract("admin", "keeper").unwrap();

    assert!(engine.has_role(Role::Automation, "keeper"));
    assert_eq!(engine.automation_agent(), Some("keeper"));
    assert_eq!(
        engine.events().last().unwrap(),
        &Event::AutomationAgentChanged {
            previous: None,
            agent: "keeper".to_string(),
            timestamp: 0,
        }
    );
}

#[test]
fn test_reassigning_automation_revokes_previous() {
    let mut engine = new_engine();
    engine.set_automation_contract("admin", "keeper_1").unwrap();
    engine.set_automation_contract("admin", "keeper_2").unwrap();

    assert!(!engine.has_role(Role::Automation, "keeper_1"));
    assert!(engine.has_role(Role::Automation, "keeper_2"));
    assert_eq!(
        engine.events().last().unwrap(),
        &Event::AutomationAgentChanged {
            previous: Some("keeper_1".to_string()),
            agent: "keeper_2".to_string(),
            timestamp: 0,
        }
    );
}

#[test]
fn test_set_automation_requires_admin() {
    let mut engine = new_engine();
    assert_eq!(
        engine.set_automation_contract("mallory", "keeper"),
        Err(EngineError::UnauthorizedAccess {
            account: "mallory".to_string(),
            role: Role::Admin,
        })
    );
}

// ============================================================================
// Collaborator Wiring
// ============================================================================

#[test]
fn test_set_staking_and_loan_contracts() {
    let mut engine = new_engine();
    engine.set_staking_contract("admin", "staking_v1").unwrap();
    engine.set_loan_contract("admin", "loan_v1").unwrap();

    assert_eq!(engine.staking_contract(), Some("staking_v1"));
    assert_eq!(engine.loan_contract(), Some("loan_v1"));

    // Rewiring replaces the stored address
    engine.set_staking_contract("admin", "staking_v2").unwrap();
    assert_eq!(engine.staking_contract(), Some("staking_v2"));
}

#[test]
fn test_wiring_rejects_empty_address() {
    let mut engine = new_engine();
    assert!(matches!(
        engine.set_staking_contract("admin", ""),
        Err(EngineError::InvalidAddress { .. })
    ));
    assert!(matches!(
        engine.set_loan_contract("admin", ""),
        Err(EngineError::InvalidAddress { .. })
    ));
    assert!(matches!(
        engine.set_automation_contract("admin", ""),
        Err(EngineError::InvalidAddress { .. })
    ));
    assert_eq!(engine.staking_contract(), None);
}

#[test]
fn test_wiring_requires_admin() {
    let mut engine = new_engine();
    assert_eq!(
        engine.set_staking_contract("mallory", "staking_v1"),
        Err(EngineError::UnauthorizedAccess {
            account: "mallory".to_string(),
            role: Role::Admin,
        })
    );
    assert_eq!(
        engine.set_loan_contract("mallory", "loan_v1"),
        Err(EngineError::UnauthorizedAccess {
            account: "mallory".to_string(),
            role: Role::Admin,
        })
    );
}
