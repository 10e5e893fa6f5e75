//! Command handlers for the medask CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod classify;
pub mod rewrite;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use classify::ClassifyCommand;
pub use rewrite::RewriteCommand;
pub use stats::StatsCommand;
