//! # mediaseq
//!
//! A small local media browser: lists and streams image/video files from a
//! directory tree and annotates consecutive images in a listing with a
//! structural-similarity score.
//!
//! Images are decoded to grayscale once, cached for the life of the process,
//! and compared on demand against their immediate predecessor in traversal
//! order.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! mediaseq --media-dir ./media --port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mediaseq::prelude::*;
//!
//! let store = ImageStore::new();
//!
//! // Decode-and-cache one listing page.
//! let page = vec!["a_000.jpg".to_string(), "a_001.jpg".to_string()];
//! populate(&store, Path::new("/media/shots"), &page);
//!
//! // Ask for the similarity of a file against its cached predecessor.
//! let outcome = query_similarity(&store, Path::new("/media/shots/a_001.jpg"), "req-1");
//! println!("similarity = {}", outcome.score());
//! ```
//!
//! ## Crate Structure
//!
//! - `mediaseq-core` - decoded-image cache, traversal populator, similarity
//!   metric and query service
//! - `mediaseq-api` - directory listings, pagination, file streaming, and
//!   the REST routes

// Re-export core types
pub use mediaseq_core::{
    decode_gray, is_image_file, populate, query_similarity, similarity_score, ssim, DecodedImage,
    Error, ImageKey, ImageStore, Result, SimilarityOutcome, IMAGE_EXTENSIONS, WINDOW,
};

// Re-export API
pub use mediaseq_api::{
    classify, list_media_directories, list_media_files, paginate, AppState, MediaKind, RestApi,
    DEFAULT_PER_PAGE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        classify, decode_gray, is_image_file, list_media_directories, list_media_files, paginate,
        populate, query_similarity, similarity_score, ssim, AppState, DecodedImage, Error,
        ImageKey, ImageStore, MediaKind, RestApi, Result, SimilarityOutcome,
    };
}
