//! JSONL passage corpus loading.
//!
//! Each non-blank line is one `{"doc_id": <int>, "passage": "<text>"}`
//! object. A corpus path may be a single file or a directory, in which case
//! every `*.jsonl` file beneath it is read in sorted path order.

use crate::types::Passage;
use medask_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CORPUS_EXTENSION: &str = "jsonl";

/// Parse JSONL corpus text. `origin` names the source in error messages.
pub fn parse_corpus(content: &str, origin: &str) -> AppResult<Vec<Passage>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Passage>(line).map_err(|e| {
                AppError::Knowledge(format!("Malformed passage at {}:{}: {}", origin, i + 1, e))
            })
        })
        .collect()
}

/// Load a single JSONL corpus file.
pub fn load_file(path: &Path) -> AppResult<Vec<Passage>> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read corpus {}: {}", path.display(), e))
    })?;
    parse_corpus(&content, &path.display().to_string())
}

/// Collect corpus files under `path`.
pub fn discover(path: &Path) -> AppResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(AppError::Knowledge(format!(
            "Corpus not found: {}",
            path.display()
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == CORPUS_EXTENSION))
        .collect();
    files.sort();

    Ok(files)
}

/// Load every passage from a corpus file or directory.
pub fn load_corpus(path: &Path) -> AppResult<Vec<Passage>> {
    let files = discover(path)?;

    let mut passages = Vec::new();
    for file in &files {
        let loaded = load_file(file)?;
        tracing::debug!("Loaded {} passages from {:?}", loaded.len(), file);
        passages.extend(loaded);
    }

    tracing::info!(
        "Loaded {} passages from {} corpus file(s)",
        passages.len(),
        files.len()
    );

    Ok(passages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "{\"doc_id\": 1, \"passage\": \"Gout is arthritis.\"}\n\n   \n\
                       {\"doc_id\": 2, \"passage\": \"Asthma is chronic.\"}\n";
        let passages = parse_corpus(content, "inline").unwrap();
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[1], Passage::new(2, "Asthma is chronic."));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let content = "{\"doc_id\": 1, \"passage\": \"ok\"}\n\nnot json\n";
        let err = parse_corpus(content, "corpus.jsonl").unwrap_err();
        assert!(err.to_string().contains("corpus.jsonl:3"), "{}", err);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_corpus("{\"doc_id\": 1}", "inline").is_err());
        assert!(parse_corpus("{\"doc_id\": \"x\", \"passage\": \"p\"}", "inline").is_err());
    }

    #[test]
    fn test_load_directory_in_sorted_order() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("b.jsonl"), "{\"doc_id\": 2, \"passage\": \"B\"}\n").unwrap();
        fs::write(temp.path().join("a.jsonl"), "{\"doc_id\": 1, \"passage\": \"A\"}\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let passages = load_corpus(temp.path()).unwrap();
        let ids: Vec<i64> = passages.iter().map(|p| p.doc_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_load_missing_corpus() {
        let temp = TempDir::new().unwrap();
        let err = load_corpus(&temp.path().join("missing.jsonl")).unwrap_err();
        assert!(err.to_string().contains("Corpus not found"));
    }
}
