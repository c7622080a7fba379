#![doc = include_str!("../README.md")]

pub mod error;
mod pattern;
mod rewriter;
pub mod scanner;

pub use error::PatternError;
pub use pattern::CallPattern;
pub use rewriter::{Replacement, Rewrite, Rewriter, apply_replacements};
