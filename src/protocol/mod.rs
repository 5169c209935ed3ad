//! Command-line protocol for the list shell.

pub mod inline;

pub use inline::InlineParser;
