//! Prompt system for medask.
//!
//! Seven fixed answer templates (one per intent) and a query-rewrite
//! template, rendered with Handlebars.

pub mod builder;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, build_rewrite_prompt};
pub use templates::{answer_template, PromptTemplate, REWRITE};
pub use types::{BuiltPrompt, PromptVariables};
