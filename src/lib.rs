//! circ - A local-first circulation manager for small libraries
//!
//! circ keeps a library's catalog, membership, and active loans in a single
//! snapshot persisted on disk. Every change flows through a pure state
//! transition engine that enforces the circulation rules (duplicate titles,
//! loan exclusivity, waitlist promotion); persistence observes committed
//! transitions and never participates in one.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    Action, Book, BookId, BookStatus, DomainError, Library, LibraryState, Loan, LoanId, Member,
    MemberId,
};
