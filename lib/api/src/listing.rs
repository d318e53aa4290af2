//! Directory listing, media classification, and pagination.
//!
//! These are the collaborators the similarity kernel consumes: an ordered
//! directory lister and a pagination slicer. Listing order is the traversal
//! order the decoded-image cache is populated in, so it must stay stable:
//! names sorted lexicographically, videos listed before images.

use std::io;
use std::path::Path;

use mime_guess::mime;

/// Number of file names per listing page when the request does not say.
pub const DEFAULT_PER_PAGE: usize = 50;

/// Media classification derived from the guessed MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Other,
}

/// Classify a file name by its guessed MIME type.
#[must_use]
pub fn classify(name: &str) -> MediaKind {
    match mime_guess::from_path(name).first() {
        Some(m) if m.type_() == mime::VIDEO => MediaKind::Video,
        Some(m) if m.type_() == mime::IMAGE => MediaKind::Image,
        _ => MediaKind::Other,
    }
}

/// Immediate subdirectories of the media root, sorted by name.
pub fn list_media_directories(root: &Path) -> io::Result<Vec<String>> {
    let mut directories = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Ok(name) = entry.file_name().into_string() {
                directories.push(name);
            }
        }
    }
    directories.sort();
    Ok(directories)
}

/// Media file names in `dir`: videos first, then images, each sorted by name.
///
/// Files whose MIME type is neither video nor image are excluded from the
/// listing entirely.
pub fn list_media_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
    }
    names.sort();

    let mut videos = Vec::new();
    let mut images = Vec::new();
    for name in names {
        match classify(&name) {
            MediaKind::Video => videos.push(name),
            MediaKind::Image => images.push(name),
            MediaKind::Other => {}
        }
    }
    videos.append(&mut images);
    Ok(videos)
}

/// One 1-based page of `files`, with the page number clamped to range.
#[must_use]
pub fn paginate(files: &[String], page: usize, per_page: usize) -> &[String] {
    if files.is_empty() || per_page == 0 {
        return &[];
    }
    let pages = files.len().div_ceil(per_page);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(files.len());
    &files[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_by_mime() {
        assert_eq!(classify("clip.mp4"), MediaKind::Video);
        assert_eq!(classify("clip.webm"), MediaKind::Video);
        assert_eq!(classify("shot.jpg"), MediaKind::Image);
        assert_eq!(classify("shot.png"), MediaKind::Image);
        assert_eq!(classify("notes.txt"), MediaKind::Other);
        assert_eq!(classify("archive.zip"), MediaKind::Other);
    }

    #[test]
    fn test_listing_puts_videos_before_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.mp4", "a.jpg", "z.mp4", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = list_media_files(dir.path()).unwrap();
        assert_eq!(files, names(&["a.mp4", "z.mp4", "a.jpg", "b.jpg"]));
    }

    #[test]
    fn test_directory_index_is_sorted() {
        let root = tempfile::tempdir().unwrap();
        for name in ["zoo", "alpha", "mid"] {
            std::fs::create_dir(root.path().join(name)).unwrap();
        }
        std::fs::write(root.path().join("stray.txt"), b"x").unwrap();

        let dirs = list_media_directories(root.path()).unwrap();
        assert_eq!(dirs, names(&["alpha", "mid", "zoo"]));
    }

    #[test]
    fn test_paginate_slices_and_clamps() {
        let files = names(&["a", "b", "c", "d", "e"]);
        assert_eq!(paginate(&files, 1, 2), &files[0..2]);
        assert_eq!(paginate(&files, 3, 2), &files[4..5]);
        // Out-of-range pages clamp instead of erroring.
        assert_eq!(paginate(&files, 99, 2), &files[4..5]);
        assert_eq!(paginate(&files, 0, 2), &files[0..2]);
        assert!(paginate(&files, 1, 0).is_empty());
        assert!(paginate(&[], 1, 10).is_empty());
    }
}
