use std::path::Path;

use tracing::{debug, info};

use crate::{metric, ImageKey, ImageStore};

/// Outcome of a sequential-similarity query.
///
/// The non-compared variants are explicit so callers can distinguish "no
/// comparison was possible" from a genuinely low score. Surfaces that only
/// carry a number can flatten the outcome with [`score`](Self::score), which
/// reports 0.0 for both non-compared cases.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityOutcome {
    /// Compared against the predecessor in store order.
    Compared { against: ImageKey, score: f64 },
    /// The requested image has not been decoded and cached.
    NotCached,
    /// The image is first in store order; nothing to compare against.
    NoPredecessor,
}

impl SimilarityOutcome {
    #[must_use]
    pub fn score(&self) -> f64 {
        match self {
            Self::Compared { score, .. } => *score,
            Self::NotCached | Self::NoPredecessor => 0.0,
        }
    }

    #[must_use]
    pub fn compared_against(&self) -> Option<&ImageKey> {
        match self {
            Self::Compared { against, .. } => Some(against),
            Self::NotCached | Self::NoPredecessor => None,
        }
    }
}

/// Compare the image at `media_path` against its predecessor in store order.
///
/// Total and read-only: a missing cache entry or a missing predecessor is a
/// defined outcome, not an error, and nothing here mutates the store. The
/// key is the path's base name. `request_id` only correlates the emitted
/// log line with the request that triggered the query, which is the main
/// tool for debugging traversal-order anomalies.
pub fn query_similarity(
    store: &ImageStore,
    media_path: &Path,
    request_id: &str,
) -> SimilarityOutcome {
    let Some(key) = media_path.file_name().and_then(|n| n.to_str()) else {
        debug!(request_id, path = %media_path.display(), "media path has no file name");
        return SimilarityOutcome::NotCached;
    };
    let Some(current) = store.get(key) else {
        debug!(request_id, key, "image not cached, no comparison");
        return SimilarityOutcome::NotCached;
    };
    let Some((prev_key, prev)) = store.predecessor(key) else {
        debug!(request_id, key, "image has no predecessor in store order");
        return SimilarityOutcome::NoPredecessor;
    };

    let score = metric::similarity_score(&prev, &current);
    info!(request_id, previous = %prev_key, current = %key, score, "sequential similarity");
    SimilarityOutcome::Compared {
        against: prev_key,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodedImage;
    use std::collections::BTreeMap;

    fn gradient(seed: u32) -> DecodedImage {
        let data = (0..16u32 * 16)
            .map(|i| ((i * 3 + seed) % 256) as f32)
            .collect();
        DecodedImage::from_raw(16, 16, data).unwrap()
    }

    fn store_with(keys: &[&str]) -> ImageStore {
        let store = ImageStore::new();
        let batch: BTreeMap<_, _> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), gradient(i as u32)))
            .collect();
        store.merge_sorted_batch(batch);
        store
    }

    #[test]
    fn test_absent_key_is_not_cached() {
        let store = store_with(&["a.jpg"]);
        let outcome = query_similarity(&store, Path::new("/media/dir/missing.jpg"), "req-1");
        assert_eq!(outcome, SimilarityOutcome::NotCached);
        assert_eq!(outcome.score(), 0.0);
        assert!(outcome.compared_against().is_none());
    }

    #[test]
    fn test_first_entry_has_no_predecessor() {
        let store = store_with(&["a.jpg", "b.jpg"]);
        let outcome = query_similarity(&store, Path::new("/media/dir/a.jpg"), "req-2");
        assert_eq!(outcome, SimilarityOutcome::NoPredecessor);
        assert_eq!(outcome.score(), 0.0);
    }

    #[test]
    fn test_compares_against_store_predecessor() {
        let store = store_with(&["a_000.jpg", "a_001.jpg"]);
        let outcome = query_similarity(&store, Path::new("/media/shots/a_001.jpg"), "req-3");
        match outcome {
            SimilarityOutcome::Compared { ref against, score } => {
                assert_eq!(against, "a_000.jpg");
                assert!((-1.0..=1.0).contains(&score));
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_neighbors_score_one() {
        let store = ImageStore::new();
        store.insert("first.png".into(), gradient(9));
        store.insert("second.png".into(), gradient(9));

        let outcome = query_similarity(&store, Path::new("second.png"), "req-4");
        assert!((outcome.score() - 1.0).abs() < 1e-6);
    }
}
