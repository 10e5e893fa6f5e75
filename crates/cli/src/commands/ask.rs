//! Ask command handler.
//!
//! Rebuilds the corpus index, optionally rewrites the question for
//! retrieval, and prints a grounded answer.

use clap::Args;
use medask_core::{config::AppConfig, AppResult};
use medask_knowledge::{AnswerPipeline, AskOptions, AskService, IndexRetriever, LlmRewriter};
use medask_llm::client_from_config;
use std::sync::Arc;

/// Answer a question from the corpus
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Number of passages to retrieve (default: TOP_K_DEFAULT)
    #[arg(short = 'k', long = "top-k")]
    pub k: Option<usize>,

    /// Rewrite option to use as the retrieval query (e.g. "Option 1")
    #[arg(long)]
    pub preferred_option: Option<String>,

    /// Retrieve with the question as typed
    #[arg(long)]
    pub no_rewrite: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let client = client_from_config(config)?;
        let retriever = Arc::new(IndexRetriever::from_config(config).await?);
        let pipeline = AnswerPipeline::from_config(client.clone(), config);

        let mut service = AskService::new(pipeline, retriever, config);
        if config.use_rewriter && !self.no_rewrite {
            service = service.with_rewriter(Arc::new(LlmRewriter::new(client, &config.model)));
        }

        let mut options = AskOptions::new(&self.question);
        options.k = self.k;
        options.preferred_option = self.preferred_option.clone();

        let result = service.ask(options).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", result.answer);

            if let Some(ref rewritten) = result.rewritten {
                tracing::debug!("Retrieval query: {}", rewritten);
            }
            for source in &result.sources {
                tracing::debug!("Source doc {}: {}", source.doc_id, source.passage);
            }
        }

        Ok(())
    }
}
