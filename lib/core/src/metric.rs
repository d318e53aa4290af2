//! Structural similarity between two decoded grayscale images.
//!
//! The score compares local luminance, contrast, and structure inside a
//! sliding uniform window and averages over all valid window positions.
//! Results fall in [-1.0, 1.0] where 1.0 means structurally identical.

use tracing::warn;

use crate::{DecodedImage, Error, Result};

/// Side length of the uniform comparison window.
pub const WINDOW: usize = 11;

const K1: f64 = 0.01;
const K2: f64 = 0.03;

/// Mean structural similarity of `a` against the reference image `b`.
///
/// The stabilization constants are scaled by the data range observed in `b`
/// (max minus min sample value), so the reference image defines the dynamic
/// range of the comparison.
///
/// # Errors
///
/// * [`Error::ShapeMismatch`] when the images differ in shape.
/// * [`Error::WindowTooLarge`] when either dimension is below [`WINDOW`].
/// * [`Error::DegenerateRange`] when `b` is constant (zero data range).
pub fn ssim(a: &DecodedImage, b: &DecodedImage) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::ShapeMismatch {
            a: a.dimensions(),
            b: b.dimensions(),
        });
    }
    let (width, height) = a.dimensions();
    let (w, h) = (width as usize, height as usize);
    if w < WINDOW || h < WINDOW {
        return Err(Error::WindowTooLarge {
            window: WINDOW,
            width,
            height,
        });
    }
    let (min, max) = b.min_max();
    let data_range = f64::from(max) - f64::from(min);
    if data_range <= 0.0 {
        return Err(Error::DegenerateRange);
    }

    let c1 = (K1 * data_range).powi(2);
    let c2 = (K2 * data_range).powi(2);

    // Summed-area tables over a, b, a², b², and a·b let every window reduce
    // to four lookups instead of a rescan.
    let pa = a.as_slice();
    let pb = b.as_slice();
    let stride = w + 1;
    let mut sum_a = vec![0f64; stride * (h + 1)];
    let mut sum_b = vec![0f64; stride * (h + 1)];
    let mut sum_aa = vec![0f64; stride * (h + 1)];
    let mut sum_bb = vec![0f64; stride * (h + 1)];
    let mut sum_ab = vec![0f64; stride * (h + 1)];
    for y in 0..h {
        for x in 0..w {
            let va = f64::from(pa[y * w + x]);
            let vb = f64::from(pb[y * w + x]);
            let cell = (y + 1) * stride + (x + 1);
            let up = y * stride + (x + 1);
            let left = (y + 1) * stride + x;
            let diag = y * stride + x;
            sum_a[cell] = va + sum_a[up] + sum_a[left] - sum_a[diag];
            sum_b[cell] = vb + sum_b[up] + sum_b[left] - sum_b[diag];
            sum_aa[cell] = va * va + sum_aa[up] + sum_aa[left] - sum_aa[diag];
            sum_bb[cell] = vb * vb + sum_bb[up] + sum_bb[left] - sum_bb[diag];
            sum_ab[cell] = va * vb + sum_ab[up] + sum_ab[left] - sum_ab[diag];
        }
    }

    let window_sum = |table: &[f64], x: usize, y: usize| -> f64 {
        table[(y + WINDOW) * stride + (x + WINDOW)] - table[y * stride + (x + WINDOW)]
            - table[(y + WINDOW) * stride + x]
            + table[y * stride + x]
    };

    let n = (WINDOW * WINDOW) as f64;
    // Unbiased variance/covariance over each window.
    let norm = n / (n - 1.0);
    let mut total = 0.0;
    let mut count = 0usize;
    for y in 0..=(h - WINDOW) {
        for x in 0..=(w - WINDOW) {
            let mu_a = window_sum(&sum_a, x, y) / n;
            let mu_b = window_sum(&sum_b, x, y) / n;
            let var_a = (window_sum(&sum_aa, x, y) / n - mu_a * mu_a) * norm;
            let var_b = (window_sum(&sum_bb, x, y) / n - mu_b * mu_b) * norm;
            let cov = (window_sum(&sum_ab, x, y) / n - mu_a * mu_b) * norm;

            let numerator = (2.0 * mu_a * mu_b + c1) * (2.0 * cov + c2);
            let denominator = (mu_a * mu_a + mu_b * mu_b + c1) * (var_a + var_b + c2);
            total += numerator / denominator;
            count += 1;
        }
    }

    Ok(total / count as f64)
}

/// Total comparison: any metric failure collapses to a 0.0 score.
///
/// Shape mismatches, undersized images, and degenerate data ranges are
/// logged and reported as 0.0 instead of propagating. A 0.0 score therefore
/// covers both "could not compare" and genuine dissimilarity; callers that
/// need to tell them apart should call [`ssim`] directly.
#[must_use]
pub fn similarity_score(a: &DecodedImage, b: &DecodedImage) -> f64 {
    match ssim(a, b) {
        Ok(score) => score,
        Err(err) => {
            warn!("similarity computation failed: {err}");
            0.0
        }
    }
}
