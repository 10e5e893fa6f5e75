//! Prompt builder: renders fixed templates with Handlebars.
//!
//! Substitution is literal. HTML escaping is disabled and strict mode is on,
//! so a template referencing an unknown variable fails instead of rendering
//! an empty string.

use crate::templates::{answer_template, PromptTemplate, REWRITE};
use crate::types::{BuiltPrompt, PromptVariables};
use handlebars::Handlebars;
use medask_core::{AppError, AppResult, Intent};

/// Build the answer prompt for an intent.
///
/// # Example
/// ```
/// use medask_core::Intent;
/// use medask_prompt::build_prompt;
///
/// let prompt = build_prompt(
///     Intent::Causes,
///     "Diabetes is caused by insulin resistance.",
///     "What causes diabetes?",
/// )
/// .unwrap();
/// assert!(prompt.text.ends_with("Answer:\n"));
/// ```
pub fn build_prompt(intent: Intent, context: &str, question: &str) -> AppResult<BuiltPrompt> {
    let template = answer_template(intent);
    tracing::debug!("Building prompt: {}", template.id);

    let text = render_template(&template, &PromptVariables { context, question })?;

    Ok(BuiltPrompt {
        text,
        template_id: template.id,
        intent: Some(intent),
    })
}

/// Build the query-rewrite prompt for a question.
pub fn build_rewrite_prompt(question: &str) -> AppResult<BuiltPrompt> {
    let text = render_template(
        &REWRITE,
        &PromptVariables {
            context: "",
            question,
        },
    )?;

    Ok(BuiltPrompt {
        text,
        template_id: REWRITE.id,
        intent: None,
    })
}

/// Render a template with the given variables.
fn render_template(template: &PromptTemplate, variables: &PromptVariables<'_>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, and unknown variables are errors
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string(template.id, template.body)
        .map_err(|e| AppError::Prompt(format!("Failed to register template {}: {}", template.id, e)))?;

    handlebars
        .render(template.id, variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template {}: {}", template.id, e)))
}
