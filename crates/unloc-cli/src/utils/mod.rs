//! Utility functions shared across CLI commands.

mod discovery;
pub mod ui;

pub use discovery::discover_files;
