//! Retrieval-augmented answering.

pub mod ask;

pub use ask::{AnswerPipeline, AskService};
