//! Domain rule violations
//!
//! Every rejection the transition engine can produce. These are values
//! returned to the dispatcher, never panics, and a rejected action leaves
//! the state exactly as it was.

use thiserror::Error;

use super::id::{BookId, MemberId};

/// A circulation rule violation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("a book titled \"{title}\" already exists")]
    DuplicateTitle { title: String },

    #[error("book {0} not found")]
    BookNotFound(BookId),

    #[error("member {0} not found")]
    MemberNotFound(MemberId),

    #[error("\"{title}\" is already on loan")]
    AlreadyOnLoan { title: String },

    #[error("\"{title}\" is not currently on loan")]
    NotOnLoan { title: String },

    #[error("member {member_id} is already on the waitlist for \"{title}\"")]
    AlreadyWaitlisted { member_id: MemberId, title: String },
}

impl DomainError {
    /// Stable machine-readable tag for each variant
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::DuplicateTitle { .. } => "duplicate-title",
            DomainError::BookNotFound(_) => "book-not-found",
            DomainError::MemberNotFound(_) => "member-not-found",
            DomainError::AlreadyOnLoan { .. } => "already-on-loan",
            DomainError::NotOnLoan { .. } => "not-on-loan",
            DomainError::AlreadyWaitlisted { .. } => "already-waitlisted",
        }
    }
}
