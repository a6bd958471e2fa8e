//! `posline-salesperson`
//!
//! Salesperson directory, candidate lookup, and the selection flows that turn
//! a user's choice into order-line attributions.
//!
//! The lookup and the selection UI are the only asynchronous seams; both are
//! traits so the flows run unchanged against a remote backend, a popup, or
//! the in-memory doubles used in tests.

pub mod directory;
pub mod lookup;
pub mod rehydrate;
pub mod selection;

pub use directory::{DirectoryFile, InMemoryDirectory, Salesperson};
pub use lookup::{Candidate, CandidateLookup, LookupError};
pub use rehydrate::{rehydrate, rehydrate_with_lookup};
pub use selection::{
    AssignmentOutcome, Notifier, SalespersonPicker, SelectionUi, UiResponse, remove_from_line,
};
