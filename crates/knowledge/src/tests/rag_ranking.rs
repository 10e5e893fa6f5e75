//! Tests for retrieval ranking correctness.

use crate::embeddings::create_provider;
use crate::retrieval::{IndexRetriever, Retriever};
use crate::types::{IndexedPassage, Passage};
use crate::vector_index::{MemoryIndex, VectorIndex};

/// Helper to create an indexed passage.
fn indexed(doc_id: i64, text: &str, embedding: Vec<f32>) -> IndexedPassage {
    IndexedPassage {
        passage: Passage::new(doc_id, text),
        embedding,
    }
}

/// Helper to create a normalized embedding.
fn normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

#[test]
fn test_relevant_passage_scores_high() {
    let mut index = MemoryIndex::new(4);
    index
        .insert(indexed(1, "Asthma causes wheeze", normalize(&[1.0, 0.5, 0.2, 0.1])))
        .unwrap();
    index
        .insert(indexed(2, "Fracture healing", normalize(&[-0.3, -0.8, 0.4, -0.2])))
        .unwrap();

    let results = index.search(&normalize(&[0.9, 0.4, 0.3, 0.1]), 5).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.doc_id, 1, "Most relevant passage should be first");
    assert!(results[0].1 > 0.8, "Relevant score should be high: {}", results[0].1);
    assert!(results[0].1 > results[1].1, "Scores should be ordered");
}

#[test]
fn test_scores_are_ordered_descending() {
    let mut index = MemoryIndex::new(3);
    for (doc_id, v) in [
        (1, [1.0f32, 0.0, 0.0]),
        (2, [0.7, 0.7, 0.0]),
        (3, [0.0, 1.0, 0.0]),
        (4, [-1.0, 0.0, 0.0]),
    ] {
        index.insert(indexed(doc_id, "text", normalize(&v))).unwrap();
    }

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 10).unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].1 >= pair[1].1, "{} >= {}", pair[0].1, pair[1].1);
    }
    assert_eq!(results[0].0.doc_id, 1);
    assert!(results[0].1 > 0.99, "Perfect match should score near 1.0");

    let last = results.last().unwrap();
    assert_eq!(last.0.doc_id, 4);
    assert!(last.1 > -1.1 && last.1 < -0.9, "Opposite vector should be near -1.0");
}

#[test]
fn test_empty_index_returns_no_results() {
    let index = MemoryIndex::new(3);
    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 5).unwrap();
    assert!(results.is_empty(), "Empty index should return no results");
}

#[test]
fn test_top_k_limit_respected() {
    let mut index = MemoryIndex::new(3);
    for i in 1..=10 {
        index
            .insert(indexed(i, "text", normalize(&[i as f32 / 10.0, 1.0, 0.0])))
            .unwrap();
    }

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 3).unwrap();
    let ids: Vec<i64> = results.iter().map(|(p, _)| p.doc_id).collect();
    assert_eq!(ids, vec![10, 9, 8]);
}

#[tokio::test]
async fn test_trigram_retrieval_prefers_shared_terms() {
    let provider = create_provider(384).unwrap();
    let passages = vec![
        Passage::new(10, "Psoriasis is a chronic skin disease with scaly plaques."),
        Passage::new(11, "Hypertension is a major risk factor for stroke."),
        Passage::new(12, "Influenza spreads through respiratory droplets."),
    ];
    let retriever = IndexRetriever::build(provider, passages).await.unwrap();

    let top = retriever.retrieve("stroke hypertension", 1).await.unwrap();
    assert_eq!(top[0].doc_id, 11);

    let top = retriever.retrieve("scaly psoriasis plaques", 1).await.unwrap();
    assert_eq!(top[0].doc_id, 10);
}
