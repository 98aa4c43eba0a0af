//! Event emission for external observers
//!
//! Every successful state transition emits exactly one typed event. The log
//! is append-only and not essential to core correctness; it exists for
//! external observers (dashboards, indexers) and for auditing. Failed
//! operations emit nothing.

use serde::{Deserialize, Serialize};

/// A notification emitted after a successful state transition
///
/// All events carry the wall-clock timestamp of the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A company registered itself
    CompanyRegistered {
        company: String,
        name: String,
        timestamp: u64,
    },

    /// A contributor was added (or reactivated) for a company
    ContributorAdded {
        company: String,
        contributor: String,
        name: String,
        salary: i64,
        timestamp: u64,
    },

    /// A contributor was removed (deactivated)
    ContributorRemoved {
        company: String,
        contributor: String,
        timestamp: u64,
    },

    /// A company pulled funds into treasury custody
    FundsDeposited {
        company: String,
        amount: i64,
        timestamp: u64,
    },

    /// A company withdrew funds from treasury custody
    FundsWithdrawn {
        company: String,
        amount: i64,
        timestamp: u64,
    },

    /// A salary payment settled
    PaymentProcessed {
        company: String,
        contributor: String,
        amount: i64,
        payment_id: String,
        timestamp: u64,
    },

    /// The admin paused mutating operations
    Paused { by: String, timestamp: u64 },

    /// The admin resumed mutating operations
    Unpaused { by: String, timestamp: u64 },

    /// The automation agent was (re)assigned
    AutomationAgentChanged {
        previous: Option<String>,
        agent: String,
        timestamp: u64,
    },
}

impl Event {
    /// Wall-clock timestamp of the transition this event records
    pub fn timestamp(&self) -> u64 {
        match self {
            Event::CompanyRegistered { timestamp, .. } => *timestamp,
            Event::ContributorAdded { timestamp, .. } => *timestamp,
            Event::ContributorRemoved { timestamp, .. } => *timestamp,
            Event::FundsDeposited { timestamp, .. } => *timestamp,
            Event::FundsWithdrawn { timestamp, .. } => *timestamp,
            Event::PaymentProcessed { timestamp, .. } => *timestamp,
            Event::Paused { timestamp, .. } => *timestamp,
            Event::Unpaused { timestamp, .. } => *timestamp,
            Event::AutomationAgentChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Company the event concerns, when it concerns one
    pub fn company(&self) -> Option<&str> {
        match self {
            Event::CompanyRegistered { company, .. } => Some(company.as_str()),
            Event::ContributorAdded { company, .. } => Some(company.as_str()),
            Event::ContributorRemoved { company, .. } => Some(company.as_str()),
            Event::FundsDeposited { company, .. } => Some(company.as_str()),
            Event::FundsWithdrawn { company, .. } => Some(company.as_str()),
            Event::PaymentProcessed { company, .. } => Some(company.as_str()),
            _ => None,
        }
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get all events in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get events concerning a specific company
    pub fn events_for_company(&self, company: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.company() == Some(company))
            .collect()
    }
}
