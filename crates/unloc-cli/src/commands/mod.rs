//! CLI command implementations.

mod check;
mod common;
mod dry_run;
mod rewrite;

pub use check::{CheckArgs, run_check};
pub use common::{Project, ProjectArgs, read_source};
pub use dry_run::DryRunDiff;
pub use rewrite::{RewriteArgs, run_rewrite};
