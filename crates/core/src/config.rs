//! Configuration management for medask.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - Config file (`.medask/config.yaml`, or the path in `MEDASK_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! The decoding parameters ([`GenerationConfig`]) are loaded once at startup
//! and treated as read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 1] = ["ollama"];

/// Decoding parameters passed to the generation backend.
///
/// Decoding is always deterministic (no sampling); these knobs only shape
/// the beam search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Cap on generated tokens
    pub max_new_tokens: u32,

    /// Beam-search width
    pub num_beams: u32,

    /// Forbid repeating n-grams of this size (0 disables)
    pub no_repeat_ngram_size: u32,

    /// Values above 1.0 discourage repeated tokens
    pub repetition_penalty: f32,

    /// Values below 1.0 favour shorter beams
    pub length_penalty: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 320,
            num_beams: 4,
            no_repeat_ngram_size: 3,
            repetition_penalty: 1.05,
            length_penalty: 0.9,
        }
    }
}

impl GenerationConfig {
    /// Decoding parameters for query rewriting: short output, neutral penalties.
    pub fn rewriter() -> Self {
        Self {
            max_new_tokens: 128,
            num_beams: 4,
            no_repeat_ngram_size: 0,
            repetition_penalty: 1.0,
            length_penalty: 1.0,
        }
    }

    /// Validate decoding parameters.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_new_tokens == 0 {
            return Err(AppError::Config(
                "MAX_NEW_TOKENS must be at least 1".to_string(),
            ));
        }

        if self.num_beams == 0 {
            return Err(AppError::Config("NUM_BEAMS must be at least 1".to_string()));
        }

        for (name, value) in [
            ("REPETITION_PENALTY", self.repetition_penalty),
            ("LENGTH_PENALTY", self.length_penalty),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .medask/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider used for generation and rewriting
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Provider endpoint
    pub endpoint: String,

    /// Request timeout in seconds for the generation backend
    pub timeout_secs: u64,

    /// Passage corpus (a JSONL file or a directory of them)
    pub corpus: PathBuf,

    /// Dimensions of the retrieval embeddings
    pub embedding_dimensions: usize,

    /// Passages retrieved when the caller does not ask for a specific k
    pub top_k_default: usize,

    /// Rewrite the question before retrieval
    pub use_rewriter: bool,

    /// Rewrite option label preferred when extracting the retrieval query
    pub preferred_option: String,

    /// Decoding parameters for answer generation
    pub generation: GenerationConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    generation: Option<GenerationConfig>,
    retrieval: Option<RetrievalSection>,
    rewriter: Option<RewriterSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    corpus: Option<String>,
    #[serde(rename = "topKDefault")]
    top_k_default: Option<usize>,
    #[serde(rename = "embeddingDimensions")]
    embedding_dimensions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RewriterSection {
    enabled: Option<bool>,
    #[serde(rename = "preferredOption")]
    preferred_option: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(),
            model: "gemma2:2b".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            timeout_secs: 120,
            corpus: PathBuf::from(".medask/corpus.jsonl"),
            embedding_dimensions: 384,
            top_k_default: 5,
            use_rewriter: true,
            preferred_option: "Option 2".to_string(),
            generation: GenerationConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// Environment variables:
    /// - `MEDASK_WORKSPACE`, `MEDASK_CONFIG`: workspace and config file
    /// - `MEDASK_PROVIDER`, `MEDASK_MODEL`, `MEDASK_ENDPOINT`: generation backend
    /// - `MEDASK_CORPUS`: passage corpus
    /// - `USE_REWRITER`, `TOP_K_DEFAULT`: request defaults
    /// - `MAX_NEW_TOKENS`, `NUM_BEAMS`, `NO_REPEAT_NGRAM_SIZE`,
    ///   `REPETITION_PENALTY`, `LENGTH_PENALTY`: decoding parameters
    /// - `RUST_LOG`, `NO_COLOR`: logging
    ///
    /// # Example
    /// ```no_run
    /// use medask_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `env` to look up environment variables.
    pub fn load_with<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = env("MEDASK_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Some(config_file) = env("MEDASK_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.medask_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        config.apply_env(env)?;

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merging config file {:?}", path);

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(timeout) = llm.timeout {
                result.timeout_secs = timeout;
            }
        }

        if let Some(generation) = config_file.generation {
            result.generation = generation;
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(corpus) = retrieval.corpus {
                result.corpus = PathBuf::from(corpus);
            }
            if let Some(top_k) = retrieval.top_k_default {
                result.top_k_default = top_k;
            }
            if let Some(dims) = retrieval.embedding_dimensions {
                result.embedding_dimensions = dims;
            }
        }

        if let Some(rewriter) = config_file.rewriter {
            if let Some(enabled) = rewriter.enabled {
                result.use_rewriter = enabled;
            }
            if let Some(option) = rewriter.preferred_option {
                result.preferred_option = option;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply environment overrides on top of file configuration.
    fn apply_env<F>(&mut self, env: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = env("MEDASK_PROVIDER") {
            self.provider = provider;
        }

        if let Some(model) = env("MEDASK_MODEL") {
            self.model = model;
        }

        if let Some(endpoint) = env("MEDASK_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Some(corpus) = env("MEDASK_CORPUS") {
            self.corpus = PathBuf::from(corpus);
        }

        if let Some(flag) = env("USE_REWRITER") {
            self.use_rewriter = parse_flag(&flag);
        }

        if let Some(value) = env("TOP_K_DEFAULT") {
            self.top_k_default = parse_number("TOP_K_DEFAULT", &value)?;
        }

        if let Some(value) = env("MAX_NEW_TOKENS") {
            self.generation.max_new_tokens = parse_number("MAX_NEW_TOKENS", &value)?;
        }

        if let Some(value) = env("NUM_BEAMS") {
            self.generation.num_beams = parse_number("NUM_BEAMS", &value)?;
        }

        if let Some(value) = env("NO_REPEAT_NGRAM_SIZE") {
            self.generation.no_repeat_ngram_size = parse_number("NO_REPEAT_NGRAM_SIZE", &value)?;
        }

        if let Some(value) = env("REPETITION_PENALTY") {
            self.generation.repetition_penalty = parse_number("REPETITION_PENALTY", &value)?;
        }

        if let Some(value) = env("LENGTH_PENALTY") {
            self.generation.length_penalty = parse_number("LENGTH_PENALTY", &value)?;
        }

        if let Some(level) = env("RUST_LOG") {
            self.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            self.no_color = true;
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .medask directory.
    pub fn medask_dir(&self) -> PathBuf {
        self.workspace.join(".medask")
    }

    /// Resolve the corpus path against the workspace.
    pub fn corpus_path(&self) -> PathBuf {
        if self.corpus.is_absolute() {
            self.corpus.clone()
        } else {
            self.workspace.join(&self.corpus)
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.top_k_default == 0 {
            return Err(AppError::Config(
                "TOP_K_DEFAULT must be at least 1".to_string(),
            ));
        }

        if self.embedding_dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be at least 1".to_string(),
            ));
        }

        self.generation.validate()
    }
}

/// Interpret an environment flag: `1`, `true`, `yes`, `on` enable it.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_number<T>(key: &str, value: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        AppError::Config(format!("Invalid value for {}: {:?} ({})", key, value, e))
    })
}
