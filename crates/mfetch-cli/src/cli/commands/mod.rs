//! CLI command handlers. Each command is in its own file.

mod check;
mod fetch;

pub use check::run_check;
pub use fetch::run_fetch;
