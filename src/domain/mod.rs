//! Domain model and circulation rules
//!
//! Contains the entities, the pure state transition engine, and the
//! read-only derivations. No I/O happens here.

mod id;
mod book;
mod member;
mod loan;
mod error;
mod state;
mod library;
pub mod queries;

pub use id::{BookId, IdError, LoanId, MemberId};
pub use book::{Book, BookStatus};
pub use member::Member;
pub use loan::{days_overdue, is_overdue, today, Loan, LOAN_PERIOD_DAYS};
pub use error::DomainError;
pub use state::{apply, Action, LibraryState};
pub use library::{Library, StateObserver};
