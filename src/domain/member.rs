//! Library member
//!
//! Members are registered once and never mutated or deleted; loans and
//! waitlists refer to them by identifier.

use serde::{Deserialize, Serialize};

use super::id::MemberId;

/// A registered library member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Given name, trimmed
    pub first_name: String,

    /// Family name, trimmed
    pub last_name: String,
}

impl Member {
    /// Creates a new member with a fresh identifier
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: MemberId::generate(),
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
        }
    }

    /// Returns `"First Last"` for display
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
