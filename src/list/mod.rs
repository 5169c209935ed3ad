//! Keyed lists of opaque byte strings with Redis-style semantics.
//!
//! [`ListStore`] is the caller-owned core; [`SharedListStore`] offers the
//! same operations behind `&self` for stores shared between tasks.

pub mod entry;
pub mod error;
pub mod range;
pub mod shared;
pub mod store;

pub use entry::ListEntry;
pub use error::ListError;
pub use shared::SharedListStore;
pub use store::{EmptyListPolicy, ListStore};
