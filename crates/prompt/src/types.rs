//! Prompt types.

use medask_core::Intent;
use serde::Serialize;

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PromptVariables<'a> {
    /// Focused context; empty for the rewrite template
    pub context: &'a str,

    /// The original question
    pub question: &'a str,
}

/// A rendered prompt ready for the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    /// Rendered text
    pub text: String,

    /// Source template identifier
    pub template_id: &'static str,

    /// Intent the template was chosen for (None for rewrite prompts)
    pub intent: Option<Intent>,
}

impl BuiltPrompt {
    /// Length of the rendered prompt in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the rendered prompt is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
