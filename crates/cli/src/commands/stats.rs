//! Stats command handler.
//!
//! Rebuilds the corpus index and reports its size.

use clap::Args;
use medask_core::{config::AppConfig, AppResult};
use medask_knowledge::{IndexRetriever, Retriever};

/// Show corpus index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let corpus = config.corpus_path();
        let retriever = IndexRetriever::from_config(config).await?;
        let stats = retriever.stats();

        if self.json {
            let output = serde_json::json!({
                "corpus": corpus,
                "passages": stats.passages,
                "dimensions": stats.dimensions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Corpus:     {}", corpus.display());
            println!("Passages:   {}", stats.passages);
            println!("Dimensions: {}", stats.dimensions);
        }

        Ok(())
    }
}
