//! Book catalog entry
//!
//! A book tracks its circulation status alongside the catalog data: the
//! active loan (if any), the FIFO waitlist of members waiting for it, and
//! a running checkout count used by the popularity report.

use serde::{Deserialize, Serialize};

use super::id::{BookId, MemberId};
use super::loan::Loan;

/// Circulation status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookStatus {
    /// On the shelf, ready to lend
    #[default]
    Available,
    /// Checked out to a member
    OnLoan,
}

impl BookStatus {
    /// Returns true if the book can be lent right now
    pub fn is_available(&self) -> bool {
        matches!(self, BookStatus::Available)
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::OnLoan => write!(f, "on loan"),
        }
    }
}

/// A book in the catalog
///
/// Invariant: `status` is `OnLoan` exactly when `current_loan` is set, and
/// the loan's `book_id` matches this book. The transition engine maintains
/// this; nothing else mutates books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier
    pub id: BookId,

    /// Title, trimmed; case-insensitively unique across the catalog
    pub title: String,

    /// Author, trimmed
    pub author: String,

    /// Free-form tags in entry order; blanks are dropped at creation
    #[serde(default)]
    pub tags: Vec<String>,

    /// Circulation status
    pub status: BookStatus,

    /// How many times this book has been lent out (never decreases)
    pub checkout_count: u32,

    /// The active loan, present exactly while `status` is `OnLoan`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_loan: Option<Loan>,

    /// Members waiting for this book, in request order
    #[serde(default)]
    pub waitlist: Vec<MemberId>,
}

impl Book {
    /// Creates a new available book with a fresh identifier
    pub fn new(title: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: BookId::generate(),
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
            tags: normalize_tags(tags),
            status: BookStatus::Available,
            checkout_count: 0,
            current_loan: None,
            waitlist: Vec::new(),
        }
    }

    /// Case-insensitive title comparison (trimmed, diacritic-sensitive)
    pub fn title_matches(&self, other: &str) -> bool {
        self.title.to_lowercase() == other.trim().to_lowercase()
    }

    /// Returns true if the member is already queued for this book
    pub fn is_waitlisted(&self, member_id: &MemberId) -> bool {
        self.waitlist.contains(member_id)
    }

    /// Returns true if the member currently holds this book
    pub fn is_borrowed_by(&self, member_id: &MemberId) -> bool {
        self.current_loan
            .as_ref()
            .is_some_and(|loan| &loan.member_id == member_id)
    }
}

/// Trims tags and drops empty tokens, preserving order and duplicates
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
