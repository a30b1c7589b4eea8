//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod trim;
pub mod utils;

// Re-export main command functions
pub use models::TrimArgs;
pub use trim::{execute_trim, trim_trace, validate_args, TrimReport};
pub use utils::{default_output_path, display_version};
