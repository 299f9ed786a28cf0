//! Contacts
//!
//! Contact management lives elsewhere; the engine only reads a contact's id
//! and role to decide who may pay on a policy in cancellation-pending status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ContactId, PortError};

/// Role a contact plays on policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactRole {
    /// Agent of record
    Agent,
    /// Named insured
    #[serde(rename = "Named Insured")]
    NamedInsured,
}

impl ContactRole {
    /// Returns the name stored on contact records
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::Agent => "Agent",
            ContactRole::NamedInsured => "Named Insured",
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactRole {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Agent" => Ok(ContactRole::Agent),
            "Named Insured" => Ok(ContactRole::NamedInsured),
            other => Err(PortError::validation(format!("unknown contact role '{}'", other))),
        }
    }
}

/// A person or organization attached to policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub role: ContactRole,
}

impl Contact {
    /// Creates a new contact
    pub fn new(name: impl Into<String>, role: ContactRole) -> Self {
        Self {
            id: ContactId::new_v7(),
            name: name.into(),
            role,
        }
    }

    /// Creates a new agent contact
    pub fn agent(name: impl Into<String>) -> Self {
        Self::new(name, ContactRole::Agent)
    }

    /// Creates a new named insured contact
    pub fn named_insured(name: impl Into<String>) -> Self {
        Self::new(name, ContactRole::NamedInsured)
    }

    pub fn is_agent(&self) -> bool {
        self.role == ContactRole::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_different_roles_are_distinct_contacts() {
        let agent = Contact::agent("John Doe");
        let insured = Contact::named_insured("John Doe");

        assert_ne!(agent.id, insured.id);
        assert!(agent.is_agent());
        assert!(!insured.is_agent());
    }

    #[test]
    fn test_role_serializes_with_stored_name() {
        let json = serde_json::to_string(&ContactRole::NamedInsured).unwrap();
        assert_eq!(json, "\"Named Insured\"");
        assert_eq!(ContactRole::NamedInsured.as_str().parse::<ContactRole>().unwrap(), ContactRole::NamedInsured);
    }
}
