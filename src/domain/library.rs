//! Library controller
//!
//! Owns the current snapshot and funnels every mutation through
//! [`Library::dispatch`]. Observers registered on the controller are
//! notified after each committed transition; the persistence boundary
//! hooks in here rather than participating in transitions.

use std::fmt;

use super::error::DomainError;
use super::state::{apply, Action, LibraryState};

/// Notified after every committed state transition
pub trait StateObserver {
    /// Called with the new snapshot once a transition has committed
    fn state_committed(&self, state: &LibraryState);
}

/// The single writer of library state
pub struct Library {
    state: LibraryState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("state", &self.state)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::with_state(LibraryState::default())
    }

    /// Creates a library from a previously persisted snapshot
    pub fn with_state(state: LibraryState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Registers an observer to be notified of committed transitions
    pub fn register_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// The current snapshot
    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// Applies an action, committing the new snapshot on success
    ///
    /// # Errors
    ///
    /// Returns the [`DomainError`] from the transition engine; the current
    /// snapshot is unchanged and observers are not notified.
    pub fn dispatch(&mut self, action: Action) -> Result<&LibraryState, DomainError> {
        let next = apply(&self.state, action)?;
        self.state = next;

        for observer in &self.observers {
            observer.state_committed(&self.state);
        }

        Ok(&self.state)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CommitCounter {
        commits: Rc<RefCell<usize>>,
    }

    impl StateObserver for CommitCounter {
        fn state_committed(&self, _state: &LibraryState) {
            *self.commits.borrow_mut() += 1;
        }
    }

    fn add_book(title: &str) -> Action {
        Action::AddBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn dispatch_commits_and_notifies_observers() {
        let commits = Rc::new(RefCell::new(0));
        let mut library = Library::new();
        library.register_observer(Box::new(CommitCounter {
            commits: Rc::clone(&commits),
        }));

        library.dispatch(add_book("Dune")).unwrap();

        assert_eq!(*commits.borrow(), 1);
        assert_eq!(library.state().books.len(), 1);
    }

    #[test]
    fn rejected_dispatch_does_not_notify() {
        let commits = Rc::new(RefCell::new(0));
        let mut library = Library::new();
        library.register_observer(Box::new(CommitCounter {
            commits: Rc::clone(&commits),
        }));

        library.dispatch(add_book("Dune")).unwrap();
        assert!(library.dispatch(add_book("dune")).is_err());

        assert_eq!(*commits.borrow(), 1);
        assert_eq!(library.state().books.len(), 1);
    }
}
