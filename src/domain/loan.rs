//! Active loan records and due-date arithmetic
//!
//! Loans are calendar-dated: time-of-day never enters the model, so
//! "overdue" is a pure function of two dates. A loan exists only while its
//! book is out; returning the book removes it.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::id::{BookId, LoanId, MemberId};

/// Standard lending period
pub const LOAN_PERIOD_DAYS: u64 = 7;

/// An active loan of one book to one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,

    /// The book that is out
    pub book_id: BookId,

    /// The borrowing member
    pub member_id: MemberId,

    /// Calendar date the loan began
    pub loan_date: NaiveDate,

    /// `loan_date` plus the lending period
    pub due_date: NaiveDate,
}

impl Loan {
    /// Creates a loan starting on the given date with the standard period
    pub fn new(book_id: BookId, member_id: MemberId, loan_date: NaiveDate) -> Self {
        Self {
            id: LoanId::generate(),
            book_id,
            member_id,
            loan_date,
            due_date: loan_date + Days::new(LOAN_PERIOD_DAYS),
        }
    }

    /// Returns true if the loan is past due as of `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        is_overdue(self.due_date, today)
    }

    /// Days past due as of `today`; meaningful only when positive
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        days_overdue(self.due_date, today)
    }
}

/// Calendar-day difference between `today` and `due_date`
///
/// Positive when the due date has passed, zero on the due date itself,
/// negative before it.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// True when `today` is strictly later than `due_date`
pub fn is_overdue(due_date: NaiveDate, today: NaiveDate) -> bool {
    days_overdue(due_date, today) > 0
}

/// Today's calendar date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
