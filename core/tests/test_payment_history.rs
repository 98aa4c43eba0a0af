//! Payment history tests
//!
//! The append-only payment ledger: ordering, immutability of reads,
//! per-pair isolation and global id lookup.

use payroll_core_rs::{
    AssetLedger, EngineConfig, Event, InMemoryAssetLedger, PayrollEngine, MIN_PAYMENT_FREQUENCY,
};

const SALARY: i64 = 1_000;
const DAY: u64 = MIN_PAYMENT_FREQUENCY;

fn engine_with_payroll() -> PayrollEngine<InMemoryAssetLedger> {
    let mut ledger = InMemoryAssetLedger::new();
    ledger.mint("acme", 1_000_000);
    let mut engine = PayrollEngine::new(EngineConfig::new("admin", "treasury"), ledger);
    engine.register_company("acme", "Acme Corp").unwrap();
    engine.ledger_mut().approve("acme", "treasury", 1_000_000);
    engine.deposit("acme", SALARY * 100).unwrap();
    engine
        .add_contributor("acme", "alice", "Alice", SALARY, DAY)
        .unwrap();
    engine
        .add_contributor("acme", "bob", "Bob", SALARY * 3, DAY)
        .unwrap();
    engine
}

#[test]
fn test_record_fields() {
    let mut engine = engine_with_payroll();
    engine.advance_time(DAY);
    let payment = engine.process_salary("acme", "alice").unwrap();

    assert_eq!(payment.company(), "acme");
    assert_eq!(payment.contributor(), "alice");
    assert_eq!(payment.amount(), SALARY);
    assert_eq!(payment.timestamp(), DAY);
    assert!(payment.processed());
    assert_eq!(payment.seq(), 1);
    assert!(!payment.tx_reference().is_empty());
}

#[test]
fn test_history_ordered_oldest_first() {
    let mut engine = engine_with_payroll();
    for _ in 0..3 {
        engine.advance_time(DAY);
        engine.process_salary("acme", "alice").unwrap();
    }

    let history = engine.payment_history("acme", "alice");
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].timestamp(), DAY);
    assert_eq!(history[1].timestamp(), 2 * DAY);
    assert_eq!(history[2].timestamp(), 3 * DAY);
    assert!(history[0].seq() < history[1].seq());
    assert!(history[1].seq() < history[2].seq());
}

#[test]
fn test_history_rereadable_without_side_effects() {
    let mut engine = engine_with_payroll();
    engine.advance_time(DAY);
    engine.process_salary("acme", "alice").unwrap();

    let first = engine
        .payment_history("acme", "alice")
        .iter()
        .map(|r| r.payment_id().to_string())
        .collect::<Vec<_>>();
    let second = engine
        .payment_history("acme", "alice")
        .iter()
        .map(|r| r.payment_id().to_string())
        .collect::<Vec<_>>();
    assert_eq!(first, second);
}

#[test]
fn test_history_isolated_per_pair() {
    let mut engine = engine_with_payroll();
    engine.advance_time(DAY);
    engine.process_salary("acme", "alice").unwrap();
    engine.process_salary("acme", "bob").unwrap();

    let alice = engine.payment_history("acme", "alice");
    let bob = engine.payment_history("acme", "bob");
    assert_eq!(alice.len(), 1);
    assert_eq!(bob.len(), 1);
    assert_eq!(alice[0].amount(), SALARY);
    assert_eq!(bob[0].amount(), SALARY * 3);
    assert!(engine.payment_history("acme", "carol").is_empty());
}

#[test]
fn test_payment_ids_globally_unique_and_resolvable() {
    let mut engine = engine_with_payroll();
    let mut ids = Vec::new();
    for _ in 0..5 {
        engine.advance_time(DAY);
        ids.push(
            engine
                .process_salary("acme", "alice")
                .unwrap()
                .payment_id()
                .to_string(),
        );
    }

    let unique: std::collections::HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 5);

    for id in &ids {
        let record = engine.payment(id).unwrap();
        assert_eq!(record.payment_id(), id);
    }
    assert!(engine.payment("no-such-payment").is_none());
}

#[test]
fn test_history_survives_contributor_removal() {
    let mut engine = engine_with_payroll();
    engine.advance_time(DAY);
    engine.process_salary("acme", "alice").unwrap();
    engine.remove_contributor("acme", "alice").unwrap();

    // Removal deactivates the record but never touches history
    assert_eq!(engine.payment_history("acme", "alice").len(), 1);
}

#[test]
fn test_payment_event_carries_payment_id() {
    let mut engine = engine_with_payroll();
    engine.advance_time(DAY);
    let payment = engine.process_salary("acme", "alice").unwrap();

    match engine.events().last().unwrap() {
        Event::PaymentProcessed {
            company,
            contributor,
            amount,
            payment_id,
            timestamp,
        } => {
            assert_eq!(company, "acme");
            assert_eq!(contributor, "alice");
            assert_eq!(*amount, SALARY);
            assert_eq!(payment_id, payment.payment_id());
            assert_eq!(*timestamp, DAY);
        }
        other => panic!("expected PaymentProcessed, got {:?}", other),
    }
}
