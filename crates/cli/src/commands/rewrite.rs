//! Rewrite command handler.

use clap::Args;
use medask_core::{config::AppConfig, AppResult};
use medask_knowledge::{LlmRewriter, QueryRewriter};
use medask_llm::client_from_config;

/// Rewrite a question into a retrieval query
#[derive(Args, Debug)]
pub struct RewriteCommand {
    /// The question to rewrite
    pub question: String,

    /// Rewrite option to keep (default: the configured preferred option)
    #[arg(long)]
    pub preferred_option: Option<String>,
}

impl RewriteCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing rewrite command");

        let client = client_from_config(config)?;
        let rewriter = LlmRewriter::new(client, &config.model);

        let preferred = self
            .preferred_option
            .as_deref()
            .unwrap_or(&config.preferred_option);
        let rewritten = rewriter.rewrite(self.question.trim(), preferred).await?;

        println!("{}", rewritten);
        Ok(())
    }
}
