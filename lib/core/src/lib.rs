//! # mediaseq Core
//!
//! Core library for the mediaseq media browser.
//!
//! This crate holds the sequential image-similarity kernel:
//!
//! - [`DecodedImage`] - Grayscale plane decoded once per file
//! - [`ImageStore`] - Insertion-ordered, process-wide decoded-image cache
//! - [`populate`] - Decode-and-cache pass over one directory listing page
//! - [`query_similarity`] - On-demand comparison against the predecessor in
//!   store order
//! - [`metric`] - Windowed structural similarity between two images
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mediaseq_core::{populate, query_similarity, ImageStore};
//!
//! let store = ImageStore::new();
//!
//! // Cache one listing page (decode only, no comparison).
//! let page = vec!["a_000.jpg".to_string(), "a_001.jpg".to_string()];
//! populate(&store, Path::new("/media/shots"), &page);
//!
//! // Compare a file against its predecessor in store order.
//! let outcome = query_similarity(&store, Path::new("/media/shots/a_001.jpg"), "req-42");
//! println!("similarity = {}", outcome.score());
//! ```

pub mod decoded;
pub mod error;
pub mod metric;
pub mod populate;
pub mod query;
pub mod store;

pub use decoded::{decode_gray, DecodedImage};
pub use error::{Error, Result};
pub use metric::{similarity_score, ssim, WINDOW};
pub use populate::{is_image_file, populate, IMAGE_EXTENSIONS};
pub use query::{query_similarity, SimilarityOutcome};
pub use store::{ImageKey, ImageStore};
