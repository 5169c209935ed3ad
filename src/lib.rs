pub mod cli;
pub mod config;
pub mod error;
pub mod list;
pub mod metrics;
pub mod protocol;
pub mod shell;
pub mod telemetry;

pub use list::{EmptyListPolicy, ListEntry, ListError, ListStore, SharedListStore};
pub use protocol::InlineParser;
pub use shell::{Handler, Reply};
