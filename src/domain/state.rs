//! Library snapshot and the state transition engine
//!
//! The entire library is one value: `{books, members, loans}`. Actions are
//! applied by a pure reducer that either produces a complete new snapshot
//! or rejects with a [`DomainError`] and leaves the input untouched. There
//! is no partial effect: a transition commits wholly or not at all.

use serde::{Deserialize, Serialize};

use super::book::{Book, BookStatus};
use super::error::DomainError;
use super::id::{BookId, MemberId};
use super::loan::{today, Loan};
use super::member::Member;

/// The whole library at one instant
///
/// Replaced wholesale by every transition; never mutated in place outside
/// the reducer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LibraryState {
    /// The catalog
    #[serde(default)]
    pub books: Vec<Book>,

    /// Registered members
    #[serde(default)]
    pub members: Vec<Member>,

    /// Active loans, exactly one per on-loan book
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl LibraryState {
    /// Looks up a book by identifier
    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Looks up a member by identifier
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    fn book_index(&self, id: &BookId) -> Option<usize> {
        self.books.iter().position(|b| &b.id == id)
    }
}

/// An action dispatched against the library
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Catalog a new book
    AddBook {
        title: String,
        author: String,
        tags: Vec<String>,
    },

    /// Register a new member
    AddMember {
        first_name: String,
        last_name: String,
    },

    /// Lend an available book to a member, due in seven days
    LendBook { book_id: BookId, member_id: MemberId },

    /// Return an on-loan book, auto-lending to the waitlist head if present
    ReturnBook { book_id: BookId },

    /// Queue a member at the end of a book's waitlist
    AddToWaitlist { book_id: BookId, member_id: MemberId },

    /// Replace the whole state (startup only, from the persistence boundary)
    LoadState(LibraryState),
}

/// Applies one action to a snapshot, producing the next snapshot
///
/// # Errors
///
/// Returns a [`DomainError`] when the action violates a circulation rule;
/// the input state is untouched in that case.
pub fn apply(state: &LibraryState, action: Action) -> Result<LibraryState, DomainError> {
    match action {
        Action::AddBook {
            title,
            author,
            tags,
        } => add_book(state, title, author, tags),
        Action::AddMember {
            first_name,
            last_name,
        } => Ok(add_member(state, first_name, last_name)),
        Action::LendBook { book_id, member_id } => lend_book(state, book_id, member_id),
        Action::ReturnBook { book_id } => return_book(state, book_id),
        Action::AddToWaitlist { book_id, member_id } => {
            add_to_waitlist(state, book_id, member_id)
        }
        Action::LoadState(snapshot) => Ok(snapshot),
    }
}

fn add_book(
    state: &LibraryState,
    title: String,
    author: String,
    tags: Vec<String>,
) -> Result<LibraryState, DomainError> {
    let trimmed = title.trim();
    if state.books.iter().any(|b| b.title_matches(trimmed)) {
        return Err(DomainError::DuplicateTitle {
            title: trimmed.to_string(),
        });
    }

    let mut next = state.clone();
    next.books.push(Book::new(trimmed, author, tags));
    Ok(next)
}

fn add_member(state: &LibraryState, first_name: String, last_name: String) -> LibraryState {
    let mut next = state.clone();
    next.members.push(Member::new(first_name, last_name));
    next
}

fn lend_book(
    state: &LibraryState,
    book_id: BookId,
    member_id: MemberId,
) -> Result<LibraryState, DomainError> {
    let idx = state
        .book_index(&book_id)
        .ok_or_else(|| DomainError::BookNotFound(book_id.clone()))?;

    if state.member(&member_id).is_none() {
        return Err(DomainError::MemberNotFound(member_id));
    }

    if state.books[idx].status == BookStatus::OnLoan {
        return Err(DomainError::AlreadyOnLoan {
            title: state.books[idx].title.clone(),
        });
    }

    let loan = Loan::new(book_id, member_id, today());

    let mut next = state.clone();
    let book = &mut next.books[idx];
    book.status = BookStatus::OnLoan;
    book.checkout_count += 1;
    book.current_loan = Some(loan.clone());
    next.loans.push(loan);
    Ok(next)
}

fn return_book(state: &LibraryState, book_id: BookId) -> Result<LibraryState, DomainError> {
    let idx = state
        .book_index(&book_id)
        .ok_or_else(|| DomainError::BookNotFound(book_id.clone()))?;

    if state.books[idx].status != BookStatus::OnLoan {
        return Err(DomainError::NotOnLoan {
            title: state.books[idx].title.clone(),
        });
    }

    let mut next = state.clone();
    next.loans.retain(|loan| loan.book_id != book_id);

    let book = &mut next.books[idx];
    if book.waitlist.is_empty() {
        book.status = BookStatus::Available;
        book.current_loan = None;
    } else {
        // Atomic return-and-auto-lend: the waitlist head becomes the new
        // borrower in the same transition.
        let next_member = book.waitlist.remove(0);
        let loan = Loan::new(book_id, next_member, today());
        book.checkout_count += 1;
        book.current_loan = Some(loan.clone());
        next.loans.push(loan);
    }
    Ok(next)
}

fn add_to_waitlist(
    state: &LibraryState,
    book_id: BookId,
    member_id: MemberId,
) -> Result<LibraryState, DomainError> {
    let idx = state
        .book_index(&book_id)
        .ok_or_else(|| DomainError::BookNotFound(book_id.clone()))?;

    if state.member(&member_id).is_none() {
        return Err(DomainError::MemberNotFound(member_id));
    }

    if state.books[idx].is_waitlisted(&member_id) {
        return Err(DomainError::AlreadyWaitlisted {
            member_id,
            title: state.books[idx].title.clone(),
        });
    }

    let mut next = state.clone();
    next.books[idx].waitlist.push(member_id);
    Ok(next)
}
