use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::DecodedImage;

/// Stable identifier for a decoded image: the file's base name.
///
/// Files with the same base name in different directories share one cache
/// entry; the first one decoded wins.
pub type ImageKey = String;

#[derive(Default)]
struct StoreInner {
    /// Current iteration order; governs predecessor lookups.
    order: Vec<ImageKey>,
    images: AHashMap<ImageKey, Arc<DecodedImage>>,
}

/// Insertion-ordered cache of decoded images.
///
/// Entries are appended in the order batches merge them (see
/// [`merge_sorted_batch`](Self::merge_sorted_batch)) and are never evicted or
/// replaced, so the cache grows monotonically for the life of the process.
///
/// A single `RwLock` guards the interior: every method takes the lock once,
/// and a batch merge is atomic with respect to concurrent readers. Callers
/// racing on the same page may decode an image twice, which is harmless
/// because insertion is idempotent.
#[derive(Default)]
pub struct ImageStore {
    inner: RwLock<StoreInner>,
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().images.contains_key(key)
    }

    /// Insert `image` under `key` unless the key is already present.
    ///
    /// Returns whether an entry was added; an existing image is never
    /// replaced.
    pub fn insert(&self, key: ImageKey, image: DecodedImage) -> bool {
        let mut inner = self.inner.write();
        if inner.images.contains_key(&key) {
            return false;
        }
        inner.order.push(key.clone());
        inner.images.insert(key, Arc::new(image));
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<DecodedImage>> {
        self.inner.read().images.get(key).cloned()
    }

    /// The entry immediately before `key` in the current store order.
    ///
    /// `None` when `key` is first in order or not cached at all.
    #[must_use]
    pub fn predecessor(&self, key: &str) -> Option<(ImageKey, Arc<DecodedImage>)> {
        let inner = self.inner.read();
        let index = inner.order.iter().position(|k| k == key)?;
        if index == 0 {
            return None;
        }
        let prev = inner.order[index - 1].clone();
        let image = inner.images.get(&prev)?.clone();
        Some((prev, image))
    }

    /// Merge a batch of newly decoded images, appending them in key order.
    ///
    /// The `BTreeMap` fixes the within-batch order; keys already present
    /// keep their position and their original image. Across calls the store
    /// is therefore batch-sorted, not globally sorted: a later batch lands
    /// after everything already cached even when its keys sort earlier. The
    /// predecessor rule deliberately follows this order, so keep the rule
    /// here if the backing structure ever changes.
    pub fn merge_sorted_batch(&self, batch: BTreeMap<ImageKey, DecodedImage>) {
        let mut inner = self.inner.write();
        for (key, image) in batch {
            if inner.images.contains_key(&key) {
                continue;
            }
            inner.order.push(key.clone());
            inner.images.insert(key, Arc::new(image));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().order.is_empty()
    }

    /// Snapshot of the current key order.
    #[must_use]
    pub fn keys(&self) -> Vec<ImageKey> {
        self.inner.read().order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(value: f32) -> DecodedImage {
        DecodedImage::from_raw(1, 1, vec![value]).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let store = ImageStore::new();
        assert!(store.insert("a.jpg".into(), pixel(1.0)));
        assert!(!store.insert("a.jpg".into(), pixel(2.0)));

        // The originally stored image survives the second insert.
        assert_eq!(store.get("a.jpg").unwrap().as_slice(), &[1.0]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_predecessor_for_first_and_absent() {
        let store = ImageStore::new();
        store.insert("a.jpg".into(), pixel(1.0));
        store.insert("b.jpg".into(), pixel(2.0));

        assert!(store.predecessor("a.jpg").is_none());
        assert!(store.predecessor("missing.jpg").is_none());

        let (key, image) = store.predecessor("b.jpg").unwrap();
        assert_eq!(key, "a.jpg");
        assert_eq!(image.as_slice(), &[1.0]);
    }

    #[test]
    fn test_batch_is_sorted_within_one_merge() {
        let store = ImageStore::new();
        let mut batch = BTreeMap::new();
        batch.insert("c.jpg".to_string(), pixel(3.0));
        batch.insert("a.jpg".to_string(), pixel(1.0));
        batch.insert("b.jpg".to_string(), pixel(2.0));
        store.merge_sorted_batch(batch);

        assert_eq!(store.keys(), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_later_batches_append_after_existing_entries() {
        // "a" sorts before "z" but arrives in a later batch, so it merges
        // after "z" and gains it as predecessor. This batch-local ordering
        // is part of the contract and must not be "fixed" into a global sort.
        let store = ImageStore::new();
        store.merge_sorted_batch(BTreeMap::from([("z.jpg".to_string(), pixel(26.0))]));
        store.merge_sorted_batch(BTreeMap::from([("a.jpg".to_string(), pixel(1.0))]));

        assert_eq!(store.keys(), vec!["z.jpg", "a.jpg"]);
        let (key, _) = store.predecessor("a.jpg").unwrap();
        assert_eq!(key, "z.jpg");
    }

    #[test]
    fn test_merge_keeps_existing_position_and_image() {
        let store = ImageStore::new();
        store.insert("m.jpg".into(), pixel(13.0));
        store.insert("b.jpg".into(), pixel(2.0));

        let mut batch = BTreeMap::new();
        batch.insert("a.jpg".to_string(), pixel(1.0));
        batch.insert("m.jpg".to_string(), pixel(99.0));
        store.merge_sorted_batch(batch);

        assert_eq!(store.keys(), vec!["m.jpg", "b.jpg", "a.jpg"]);
        assert_eq!(store.get("m.jpg").unwrap().as_slice(), &[13.0]);
    }

    #[test]
    fn test_concurrent_merges_and_reads() {
        let store = Arc::new(ImageStore::new());
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("t{t}_{i:03}.jpg");
                    store.merge_sorted_batch(BTreeMap::from([(key.clone(), pixel(i as f32))]));
                    // Reads interleave with merges without tearing.
                    assert!(store.contains(&key));
                    let _ = store.predecessor(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 200);
    }
}
