use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::{decode_gray, DecodedImage, ImageKey, ImageStore};

/// File extensions treated as comparable images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Whether `name` carries one of the allowed image extensions.
#[must_use]
pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Decode and cache the images of one listing page.
///
/// Walks `page` in listing order, decodes the image files whose key (base
/// name) is not yet cached, and merges the newly decoded batch into `store`
/// with a single sorted merge. Non-image names and already-cached keys are
/// skipped silently; a file that fails to decode is logged and left out of
/// the batch instead of aborting the page. No similarity is computed here;
/// comparison happens on demand through [`crate::query_similarity`].
///
/// Returns the number of images newly cached.
pub fn populate(store: &ImageStore, dir: &Path, page: &[String]) -> usize {
    let mut batch: BTreeMap<ImageKey, DecodedImage> = BTreeMap::new();
    for name in page {
        if !is_image_file(name) {
            continue;
        }
        let Some(key) = Path::new(name).file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if store.contains(key) || batch.contains_key(key) {
            continue;
        }
        let path = dir.join(name);
        match decode_gray(&path) {
            Ok(image) => {
                batch.insert(key.to_string(), image);
            }
            Err(err) => warn!(path = %path.display(), "skipping undecodable image: {err}"),
        }
    }

    let added = batch.len();
    if added > 0 {
        store.merge_sorted_batch(batch);
        debug!(added, "merged listing page into image store");
    }
    added
}
