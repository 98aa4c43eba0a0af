//! Settlement protocols
//!
//! The two money-moving protocols of the core, both following the same
//! atomicity discipline: validate every precondition, execute the external
//! asset transfer, and only then commit internal state. A transfer failure
//! therefore leaves no partial state behind.

pub mod payroll;
pub mod treasury;

pub use payroll::{PayrollError, SalaryReceipt};
pub use treasury::TreasuryError;
