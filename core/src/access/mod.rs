//! Role-based access control
//!
//! Every state-mutating entrypoint in the engine first asserts that the
//! caller holds the role required for that operation. A failed assertion
//! rejects the whole operation with no partial effect.
//!
//! Roles:
//! - **Admin**: bootstraps the system, wires collaborator contracts,
//!   pauses/unpauses
//! - **Company**: granted automatically on company registration
//! - **Contributor**: granted automatically when a contributor is added
//! - **Automation**: held by at most one account at a time; assigning a new
//!   automation agent revokes the previous holder

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// The distinct roles recognized by the settlement core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Company,
    Contributor,
    Automation,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Company => write!(f, "COMPANY"),
            Role::Contributor => write!(f, "CONTRIBUTOR"),
            Role::Automation => write!(f, "AUTOMATION"),
        }
    }
}

/// Errors raised by role checks and role management
#[derive(Debug, Error, PartialEq)]
pub enum AccessError {
    #[error("unauthorized access: account {account} does not hold the {role} role")]
    UnauthorizedAccess { account: String, role: Role },
}

/// Role registry: (role, account) set membership
///
/// The Automation role has single-holder semantics; all other roles are
/// plain sets.
///
/// # Example
/// ```
/// use payroll_core_rs::{AccessController, Role};
///
/// let mut access = AccessController::bootstrap("admin");
/// assert!(access.has_role(Role::Admin, "admin"));
///
/// access.grant_role("admin", Role::Company, "acme").unwrap();
/// assert!(access.has_role(Role::Company, "acme"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessController {
    admins: HashSet<String>,
    companies: HashSet<String>,
    contributors: HashSet<String>,
    /// At most one automation agent at a time
    automation: Option<String>,
}

impl AccessController {
    /// Create a registry with a single bootstrap admin
    pub fn bootstrap(admin: impl Into<String>) -> Self {
        let mut admins = HashSet::new();
        admins.insert(admin.into());
        Self {
            admins,
            companies: HashSet::new(),
            contributors: HashSet::new(),
            automation: None,
        }
    }

    /// Rebuild a registry from its member lists (snapshot restore)
    pub(crate) fn from_parts(
        admins: Vec<String>,
        companies: Vec<String>,
        contributors: Vec<String>,
        automation: Option<String>,
    ) -> Self {
        Self {
            admins: admins.into_iter().collect(),
            companies: companies.into_iter().collect(),
            contributors: contributors.into_iter().collect(),
            automation,
        }
    }

    /// Check whether `account` holds `role`
    pub fn has_role(&self, role: Role, account: &str) -> bool {
        match role {
            Role::Admin => self.admins.contains(account),
            Role::Company => self.companies.contains(account),
            Role::Contributor => self.contributors.contains(account),
            Role::Automation => self.automation.as_deref() == Some(account),
        }
    }

    /// Assert that `account` holds `role`
    ///
    /// # Errors
    /// Returns [`AccessError::UnauthorizedAccess`] when the account does not
    /// hold the role.
    pub fn require_role(&self, role: Role, account: &str) -> Result<(), AccessError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(AccessError::UnauthorizedAccess {
                account: account.to_string(),
                role,
            })
        }
    }

    /// Grant `role` to `account`; caller must be an admin
    ///
    /// Granting Automation routes through the single-holder assignment and
    /// revokes the previous holder.
    pub fn grant_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
    ) -> Result<(), AccessError> {
        self.require_role(Role::Admin, caller)?;
        self.grant_unchecked(role, account);
        Ok(())
    }

    /// Revoke `role` from `account`; caller must be an admin
    pub fn revoke_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
    ) -> Result<(), AccessError> {
        self.require_role(Role::Admin, caller)?;
        self.revoke_unchecked(role, account);
        Ok(())
    }

    /// Grant a role without an admin check
    ///
    /// Used by the engine for the automatic grants on registration paths,
    /// where the authorization was already established by the entrypoint.
    pub(crate) fn grant_unchecked(&mut self, role: Role, account: &str) {
        match role {
            Role::Admin => {
                self.admins.insert(account.to_string());
            }
            Role::Company => {
                self.companies.insert(account.to_string());
            }
            Role::Contributor => {
                self.contributors.insert(account.to_string());
            }
            Role::Automation => {
                self.automation = Some(account.to_string());
            }
        }
    }

    /// Revoke a role without an admin check
    pub(crate) fn revoke_unchecked(&mut self, role: Role, account: &str) {
        match role {
            Role::Admin => {
                self.admins.remove(account);
            }
            Role::Company => {
                self.companies.remove(account);
            }
            Role::Contributor => {
                self.contributors.remove(account);
            }
            Role::Automation => {
                if self.automation.as_deref() == Some(account) {
                    self.automation = None;
                }
            }
        }
    }

    /// Assign the automation agent, returning the previous holder
    ///
    /// The previous holder's Automation role is revoked atomically with the
    /// grant, so at most one live automation agent exists at any time.
    pub(crate) fn set_automation_agent(&mut self, account: &str) -> Option<String> {
        self.automation.replace(account.to_string())
    }

    /// Current automation agent, if any
    pub fn automation_agent(&self) -> Option<&str> {
        self.automation.as_deref()
    }

    /// All accounts holding `role`, sorted (deterministic iteration)
    pub fn accounts_with_role(&self, role: Role) -> Vec<String> {
        let mut accounts: Vec<String> = match role {
            Role::Admin => self.admins.iter().cloned().collect(),
            Role::Company => self.companies.iter().cloned().collect(),
            Role::Contributor => self.contributors.iter().cloned().collect(),
            Role::Automation => self.automation.iter().cloned().collect(),
        };
        accounts.sort();
        accounts
    }
}
