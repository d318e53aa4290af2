use std::path::Path;

use image::{GrayImage, ImageReader};

use crate::{Error, Result};

/// A decoded grayscale image: one row-major `f32` plane.
///
/// Samples keep the source's native 8-bit luma range (0.0 to 255.0); nothing
/// is rescaled at decode time, so the similarity metric can derive its data
/// range from the observed values. Once cached, an image is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DecodedImage {
    /// Build an image from raw row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when `data.len()` does not equal
    /// `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub fn from_luma8(luma: &GrayImage) -> Self {
        Self {
            width: luma.width(),
            height: luma.height(),
            data: luma.as_raw().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Observed minimum and maximum sample values, `(0.0, 0.0)` when empty.
    #[must_use]
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }
        if self.data.is_empty() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}

/// Decode the image file at `path` to its grayscale representation.
///
/// # Errors
///
/// Returns [`Error::Decode`] for unreadable or corrupt files.
pub fn decode_gray(path: &Path) -> Result<DecodedImage> {
    let img = ImageReader::open(path)
        .map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?
        .decode()
        .map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(DecodedImage::from_luma8(&img.to_luma8()))
}
