//! medask core library
//!
//! Foundational pieces shared by every medask crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (`AppConfig`, `GenerationConfig`)
//! - The question intent vocabulary and the fallback answer line

pub mod config;
pub mod error;
pub mod intent;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, GenerationConfig};
pub use error::{AppError, AppResult};
pub use intent::{Intent, FALLBACK_LINE};
