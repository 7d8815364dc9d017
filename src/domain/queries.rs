//! Read-only derivations over a snapshot
//!
//! Everything here is a pure function of `&LibraryState` (and an explicit
//! `today` where dates matter). Nothing mutates; linear scans are fine at
//! this scale.

use chrono::NaiveDate;
use serde::Serialize;

use super::book::{Book, BookStatus};
use super::id::{BookId, MemberId};
use super::loan::Loan;
use super::state::LibraryState;

/// Sentinel for lookups that miss
const UNKNOWN: &str = "Unknown";

/// All active loans held by one member
pub fn loans_for_member<'a>(state: &'a LibraryState, member_id: &MemberId) -> Vec<&'a Loan> {
    state
        .loans
        .iter()
        .filter(|loan| &loan.member_id == member_id)
        .collect()
}

/// `"First Last"`, or `"Unknown"` when the member is not registered
pub fn member_display_name(state: &LibraryState, member_id: &MemberId) -> String {
    state
        .member(member_id)
        .map(|m| m.display_name())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// The book's title, or `"Unknown"` when the book is not cataloged
pub fn book_title(state: &LibraryState, book_id: &BookId) -> String {
    state
        .book(book_id)
        .map(|b| b.title.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// One row of the overdue report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueEntry {
    pub loan: Loan,
    pub title: String,
    pub author: String,
    pub member_name: String,
    pub days_overdue: i64,
}

/// Active loans past due as of `today`, most overdue first
pub fn overdue_report(state: &LibraryState, today: NaiveDate) -> Vec<OverdueEntry> {
    let mut entries: Vec<OverdueEntry> = state
        .loans
        .iter()
        .filter(|loan| loan.is_overdue(today))
        .map(|loan| {
            let book = state.book(&loan.book_id);
            OverdueEntry {
                loan: loan.clone(),
                title: book
                    .map(|b| b.title.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                author: book
                    .map(|b| b.author.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                member_name: member_display_name(state, &loan.member_id),
                days_overdue: loan.days_overdue(today),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    entries
}

/// Books borrowed at least once, most borrowed first, ties by title,
/// truncated to `count`
pub fn popular_books(state: &LibraryState, count: usize) -> Vec<&Book> {
    let mut books: Vec<&Book> = state
        .books
        .iter()
        .filter(|book| book.checkout_count > 0)
        .collect();

    books.sort_by(|a, b| {
        b.checkout_count
            .cmp(&a.checkout_count)
            .then_with(|| a.title.cmp(&b.title))
    });
    books.truncate(count);
    books
}

/// Headline counts for the status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySummary {
    pub total_books: usize,
    pub books_checked_out: usize,
    pub currently_on_loan: usize,
    pub overdue: usize,
}

/// Totals across the whole library as of `today`
pub fn summary(state: &LibraryState, today: NaiveDate) -> LibrarySummary {
    LibrarySummary {
        total_books: state.books.len(),
        books_checked_out: state
            .books
            .iter()
            .filter(|b| b.checkout_count > 0)
            .count(),
        currently_on_loan: state
            .books
            .iter()
            .filter(|b| b.status == BookStatus::OnLoan)
            .count(),
        overdue: state
            .loans
            .iter()
            .filter(|loan| loan.is_overdue(today))
            .count(),
    }
}
