use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image shape mismatch: {a:?} vs {b:?}")]
    ShapeMismatch { a: (u32, u32), b: (u32, u32) },

    #[error("Degenerate data range: reference image has no luminance variation")]
    DegenerateRange,

    #[error("Comparison window {window}x{window} does not fit a {width}x{height} image")]
    WindowTooLarge {
        window: usize,
        width: u32,
        height: u32,
    },

    #[error("Invalid image dimensions: {width}x{height} does not match {len} samples")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
