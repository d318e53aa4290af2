//! # mediaseq API
//!
//! REST surface of the mediaseq media browser: the directory lister,
//! pagination slicer, file streaming, and the HTTP routes that drive the
//! decoded-image cache in [`mediaseq_core`].
//!
//! Routes:
//!
//! - `GET /` - greeting
//! - `GET /media` - directory index of the media root
//! - `GET /media/{directory}?page=&per_page=` - one listing page; caches the
//!   page's images as a side effect
//! - `GET /media/{path}` - stream a media file (ranged)
//! - `GET /similarity?media_path=` - similarity of a file against its
//!   predecessor in cache order

pub mod listing;
pub mod rest;

pub use listing::{
    classify, list_media_directories, list_media_files, paginate, MediaKind, DEFAULT_PER_PAGE,
};
pub use rest::{AppState, RestApi};
