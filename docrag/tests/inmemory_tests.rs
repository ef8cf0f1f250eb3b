//! Store lifecycle tests and property tests for similarity ranking.

use std::collections::HashSet;

use docrag::document::Chunk;
use docrag::inmemory::InMemoryDocumentStore;
use docrag::similarity::find_similar_chunks;
use docrag::store::DocumentStore;
use docrag::RagError;
use proptest::prelude::*;

fn chunks(doc: &str, embeddings: &[Vec<f32>]) -> Vec<Chunk> {
    embeddings
        .iter()
        .enumerate()
        .map(|(i, e)| Chunk::new(Chunk::id_for(doc, i), format!("text {i}"), e.clone()))
        .collect()
}

#[tokio::test]
async fn stored_document_round_trips() {
    let store = InMemoryDocumentStore::new();
    let stored = chunks("doc1", &[vec![1.0, 0.0], vec![0.5, 0.5]]);

    let doc = store.store_document("doc1", "a.pdf", stored.clone()).await.unwrap();
    assert_eq!(doc.id, "doc1");
    assert_eq!(doc.filename, "a.pdf");

    let fetched = store.get_document("doc1").await.expect("document should exist");
    assert_eq!(fetched.chunks, stored);
    assert_eq!(fetched.created_at, doc.created_at);
    assert_eq!(fetched.dimensions(), Some(2));
}

#[tokio::test]
async fn delete_removes_document() {
    let store = InMemoryDocumentStore::new();
    store.store_document("doc1", "a.pdf", chunks("doc1", &[vec![1.0]])).await.unwrap();

    assert!(store.delete_document("doc1").await);
    assert!(store.get_document("doc1").await.is_none());
    assert!(!store.delete_document("doc1").await);
}

#[tokio::test]
async fn unknown_document_is_absent() {
    let store = InMemoryDocumentStore::new();
    assert!(store.get_document("missing").await.is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn storing_same_id_overwrites() {
    let store = InMemoryDocumentStore::new();
    store.store_document("doc1", "old.pdf", chunks("doc1", &[vec![1.0]])).await.unwrap();
    store.store_document("doc1", "new.pdf", Vec::new()).await.unwrap();

    let doc = store.get_document("doc1").await.unwrap();
    assert_eq!(doc.filename, "new.pdf");
    assert!(doc.chunks.is_empty());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn lists_and_clears_documents() {
    let store = InMemoryDocumentStore::new();
    for id in ["a", "b", "c"] {
        store.store_document(id, "f.pdf", chunks(id, &[vec![1.0]])).await.unwrap();
    }

    let ids: HashSet<String> = store.all_documents().await.into_iter().map(|d| d.id).collect();
    assert_eq!(ids, HashSet::from(["a".to_string(), "b".to_string(), "c".to_string()]));

    store.clear_all().await;
    assert!(store.all_documents().await.is_empty());
}

#[tokio::test]
async fn rejects_mixed_dimensionality() {
    let store = InMemoryDocumentStore::new();
    let result =
        store.store_document("doc1", "a.pdf", chunks("doc1", &[vec![1.0, 0.0], vec![1.0]])).await;
    assert!(matches!(result, Err(RagError::DimensionMismatch { expected: 2, actual: 1 })));
    assert!(store.get_document("doc1").await.is_none());
}

/// Small integer components so that equal scores occur often.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec((-2i8..=2).prop_map(f32::from), dim)
}

mod prop_ranking {
    use super::*;

    const DIM: usize = 3;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn results_are_descending_stable_and_bounded(
            embeddings in proptest::collection::vec(arb_embedding(DIM), 0..20),
            query in arb_embedding(DIM),
            top_k in 0usize..25,
        ) {
            let chunks = chunks("doc", &embeddings);
            let results = find_similar_chunks(&query, &chunks, top_k).unwrap();

            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= chunks.len());
            prop_assert_eq!(results.len(), top_k.min(chunks.len()));

            let position = |id: &str| chunks.iter().position(|c| c.id == id).unwrap();
            for window in results.windows(2) {
                prop_assert!(
                    window[0].similarity >= window[1].similarity,
                    "results not in descending order: {} < {}",
                    window[0].similarity,
                    window[1].similarity,
                );
                if window[0].similarity == window[1].similarity {
                    prop_assert!(position(&window[0].id) < position(&window[1].id));
                }
            }

            for r in &results {
                prop_assert!((-1.0..=1.0).contains(&r.similarity));
            }
        }
    }
}
