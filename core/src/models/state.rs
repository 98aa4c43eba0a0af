//! Settlement registry state
//!
//! The keyed registries at the heart of the settlement core: companies by
//! address, contributors by (company, contributor) pair, and the
//! contributor-to-company back-reference. All access is mediated through
//! this type's operations; there is no ambient global state.
//!
//! # Critical Invariants
//!
//! 1. A company is created exactly once and never deleted
//! 2. A contributor address maps to at most one company at a time (the
//!    back-reference tracks the *active* assignment only)
//! 3. Contributor removal deactivates the record; it is never deleted

use crate::models::company::Company;
use crate::models::contributor::Contributor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of companies, contributors and their relationships
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementState {
    /// All companies, indexed by address
    companies: HashMap<String, Company>,

    /// company address -> contributor address -> record
    contributors: HashMap<String, HashMap<String, Contributor>>,

    /// Active back-reference: contributor address -> employing company
    contributor_to_company: HashMap<String, String>,
}

impl SettlementState {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a company record exists for `address`
    pub fn company_exists(&self, address: &str) -> bool {
        self.companies.contains_key(address)
    }

    /// Get a company by address
    pub fn get_company(&self, address: &str) -> Option<&Company> {
        self.companies.get(address)
    }

    /// Get a mutable company by address
    pub fn get_company_mut(&mut self, address: &str) -> Option<&mut Company> {
        self.companies.get_mut(address)
    }

    /// Insert a newly registered company
    ///
    /// # Panics
    /// Panics if a record already exists for the address; the entrypoint
    /// checks for duplicates before inserting.
    pub fn insert_company(&mut self, company: Company) {
        let address = company.address().to_string();
        assert!(
            !self.companies.contains_key(&address),
            "company {} already registered",
            address
        );
        self.companies.insert(address, company);
    }

    /// Get a contributor record for a (company, contributor) pair
    pub fn get_contributor(&self, company: &str, contributor: &str) -> Option<&Contributor> {
        self.contributors
            .get(company)
            .and_then(|records| records.get(contributor))
    }

    /// Get a mutable contributor record for a (company, contributor) pair
    pub fn get_contributor_mut(
        &mut self,
        company: &str,
        contributor: &str,
    ) -> Option<&mut Contributor> {
        self.contributors
            .get_mut(company)
            .and_then(|records| records.get_mut(contributor))
    }

    /// Mutable access to a company and one of its contributors at once
    ///
    /// Needed by salary processing, which debits the company and advances
    /// the contributor's schedule in one atomic effect.
    pub fn company_and_contributor_mut(
        &mut self,
        company: &str,
        contributor: &str,
    ) -> Option<(&mut Company, &mut Contributor)> {
        let record = self
            .contributors
            .get_mut(company)
            .and_then(|records| records.get_mut(contributor))?;
        let company = self.companies.get_mut(company)?;
        Some((company, record))
    }

    /// Insert a contributor record, setting the back-reference for active
    /// records (inactive records are only re-inserted on snapshot restore)
    pub fn insert_contributor(&mut self, company: &str, record: Contributor) {
        let contributor = record.address().to_string();
        let active = record.is_active();
        self.contributors
            .entry(company.to_string())
            .or_default()
            .insert(contributor.clone(), record);
        if active {
            self.contributor_to_company
                .insert(contributor, company.to_string());
        }
    }

    /// Company currently employing `contributor`, if any
    pub fn company_of(&self, contributor: &str) -> Option<&str> {
        self.contributor_to_company
            .get(contributor)
            .map(|s| s.as_str())
    }

    /// Set the active back-reference for a (re)activated contributor
    pub fn set_company_of(&mut self, contributor: &str, company: &str) {
        self.contributor_to_company
            .insert(contributor.to_string(), company.to_string());
    }

    /// Clear the back-reference when a contributor is removed
    pub fn clear_company_of(&mut self, contributor: &str) {
        self.contributor_to_company.remove(contributor);
    }

    /// Addresses of all registered companies, sorted (deterministic order)
    pub fn company_addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.companies.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    /// Addresses of a company's *active* contributors, sorted
    pub fn active_contributors(&self, company: &str) -> Vec<String> {
        let mut addresses: Vec<String> = self
            .contributors
            .get(company)
            .map(|records| {
                records
                    .values()
                    .filter(|c| c.is_active())
                    .map(|c| c.address().to_string())
                    .collect()
            })
            .unwrap_or_default();
        addresses.sort();
        addresses
    }

    /// All contributor records of a company (active and removed), sorted by
    /// address
    pub fn contributors_of(&self, company: &str) -> Vec<&Contributor> {
        let mut records: Vec<&Contributor> = self
            .contributors
            .get(company)
            .map(|m| m.values().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| a.address().cmp(b.address()));
        records
    }

    /// Number of registered companies
    pub fn num_companies(&self) -> usize {
        self.companies.len()
    }

    /// Sum of all company treasury balances (invariant checking)
    pub fn total_balance(&self) -> i64 {
        self.companies.values().map(|c| c.balance()).sum()
    }
}
