//! Command handlers. Each returns the process exit code.

mod check;
mod explain;

pub use check::{check_pattern, parse_check_args, run_check, CheckArgs, CheckReport};
pub use explain::explain_error;
