//! CLI layer - Command-line interface
//!
//! Argument parsing, config loading, signal handling and the server runner.

pub mod app;
pub mod args;
pub mod signals;

// Re-export commonly used types
pub use app::{
    build_state, load_merged_config, run_server, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::Cli;
