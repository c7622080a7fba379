//! Core types, errors, and shared functionality.

mod errors;
mod types;

pub use errors::*;
pub use types::*;
