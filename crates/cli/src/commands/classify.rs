//! Classify command handler.
//!
//! Prints a question's intent and, given a context file, the focused
//! context the answer prompt would receive. Runs offline.

use clap::Args;
use medask_core::{AppError, AppResult};
use medask_knowledge::context::DEFAULT_MAX_SENTENCES;
use medask_knowledge::{classify, select_context};
use std::path::PathBuf;

/// Classify a question's intent
#[derive(Args, Debug)]
pub struct ClassifyCommand {
    /// The question to classify
    pub question: String,

    /// Context file to focus for the classified intent
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Maximum sentences kept in the focused context
    #[arg(long, default_value_t = DEFAULT_MAX_SENTENCES)]
    pub max_sentences: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing classify command");

        let intent = classify(&self.question);

        let focused = match self.context {
            Some(ref path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Input(format!("Failed to read context file {:?}: {}", path, e))
                })?;
                Some(select_context(&raw, intent, self.max_sentences))
            }
            None => None,
        };

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "intent": intent,
                "context": focused,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", intent);
            if let Some(focused) = focused {
                println!("{}", focused);
            }
        }

        Ok(())
    }
}
