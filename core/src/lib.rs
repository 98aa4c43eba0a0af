//! Payroll Settlement Core - Rust Engine
//!
//! Deterministic payroll settlement engine: companies fund a treasury balance
//! in a single reference asset and the engine disburses exact salary amounts
//! to registered contributors on fixed intervals, recording every payment.
//!
//! # Architecture
//!
//! - **core**: Time management (deterministic wall-clock)
//! - **access**: Role registry gating every mutating entrypoint
//! - **asset**: External fungible-asset interface + in-memory reference ledger
//! - **models**: Domain types (Company, Contributor, PaymentRecord, State)
//! - **settlement**: Treasury and salary-processing protocols
//! - **engine**: Public entrypoint facade, pause gate, checkpointing, automation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents); company balances are never negative
//! 2. Every entrypoint is atomic: full commit or full rollback, no partial state
//! 3. Payment history is append-only and never mutated
//! 4. Schedule advancement is drift-free: next due time is computed from the
//!    previous due time, never from the processing time

// Module declarations
pub mod access;
pub mod asset;
pub mod core;
pub mod engine;
pub mod models;
pub mod settlement;

// Re-exports for convenience
pub use access::{AccessController, AccessError, Role};
pub use asset::{AssetError, AssetLedger, InMemoryAssetLedger};
pub use core::time::Clock;
pub use engine::{
    AutomationAgent, EngineConfig, EngineError, PayrollEngine, ProcessedPayment, SkippedPayment,
    StateSnapshot, SweepResult,
};
pub use models::{
    company::{Company, CompanyError},
    contributor::{Contributor, ScheduleStatus, MAX_PAYMENT_FREQUENCY, MIN_PAYMENT_FREQUENCY},
    event::{Event, EventLog},
    payment::{PaymentLedger, PaymentRecord},
    state::SettlementState,
};
pub use settlement::{PayrollError, SalaryReceipt, TreasuryError};
