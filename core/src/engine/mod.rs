//! Engine - public entrypoint facade
//!
//! Wires access control, the pause gate, the reentrancy guard, the clock and
//! the settlement protocols into the externally visible API.
//!
//! See `core.rs` for the entrypoints, `checkpoint.rs` for snapshotting and
//! `automation.rs` for the batch payment trigger.

pub mod automation;
pub mod checkpoint;
pub mod core;

// Re-export main types for convenience
pub use automation::{AutomationAgent, ProcessedPayment, SkippedPayment, SweepResult};
pub use checkpoint::{ContributorEntry, RolesSnapshot, StateSnapshot};
pub use core::{EngineConfig, EngineError, PayrollEngine};
