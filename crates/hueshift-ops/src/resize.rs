//! Image resize and resampling operations.
//!
//! Two families of scaling live here:
//!
//! - [`magnify_nearest`] - exact integer-factor pixel replication, used to
//!   blow up small images without inventing intermediate colors
//! - [`resize`] / [`resize_f32`] - separable filtered resampling to an
//!   arbitrary size
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Cubic interpolation (sharper than bilinear)
//! - [`Filter::Lanczos3`] - High-quality sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use hueshift_ops::resize::{resize_f32, Filter};
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 3]; // 64x64 RGB
//! let dst = resize_f32(&src, 64, 64, 3, 32, 32, Filter::Lanczos3).unwrap();
//! assert_eq!(dst.len(), 32 * 32 * 3);
//! ```

use hueshift_core::{Error, PixelBuffer, Result};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maximum channels handled by the filtered passes.
const MAX_CHANNELS: usize = 4;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    #[default]
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Parses a filter name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nearest" | "box" => Some(Filter::Nearest),
            "bilinear" | "linear" => Some(Filter::Bilinear),
            "bicubic" | "cubic" | "mitchell" => Some(Filter::Bicubic),
            "lanczos" | "lanczos3" => Some(Filter::Lanczos3),
            _ => None,
        }
    }
}

#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali with B = C = 1/3.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Enlarges `image` by an integer `factor` with nearest-neighbor
/// replication.
///
/// Each source pixel becomes a `factor × factor` block of identical
/// pixels; no new colors are produced. The layout is preserved.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `image` is empty, `factor` is 0, or the
/// result would not fit in `u32` dimensions.
///
/// # Example
///
/// ```rust
/// use hueshift_core::{ChannelLayout, PixelBuffer};
/// use hueshift_ops::resize::magnify_nearest;
///
/// let src = PixelBuffer::from_raw(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// let big = magnify_nearest(&src, 3).unwrap();
/// assert_eq!(big.dimensions(), (6, 3));
/// assert_eq!(big.pixel(2, 2), &[255, 0, 0]);
/// assert_eq!(big.pixel(3, 0), &[0, 0, 255]);
/// ```
pub fn magnify_nearest(image: &PixelBuffer, factor: u32) -> Result<PixelBuffer> {
    let (src_w, src_h) = image.dimensions();
    if image.is_empty() {
        return Err(Error::invalid_input(format!(
            "cannot magnify empty {src_w}x{src_h} buffer"
        )));
    }
    if factor == 0 {
        return Err(Error::invalid_input("magnification factor must be > 0"));
    }
    let channels = image.channels();
    let sizes = src_w.checked_mul(factor).zip(src_h.checked_mul(factor));
    let Some((dst_w, dst_h, len)) = sizes.and_then(|(w, h)| {
        (w as usize)
            .checked_mul(h as usize)
            .and_then(|n| n.checked_mul(channels))
            .map(|len| (w, h, len))
    }) else {
        return Err(Error::invalid_input(format!(
            "{src_w}x{src_h} magnified by {factor} overflows"
        )));
    };

    trace!(src_w, src_h, factor, "resize::magnify_nearest");
    debug!(src_w, src_h, dst_w, dst_h, "Magnifying with nearest neighbor");

    let f = factor as usize;
    let dst_row_len = dst_w as usize * channels;
    let mut out = vec![0u8; len];

    let fill_row = |y: usize, row: &mut [u8]| {
        let src_row = image.row((y / f) as u32);
        for (sx, px) in src_row.chunks_exact(channels).enumerate() {
            let start = sx * f * channels;
            for block in row[start..start + f * channels].chunks_exact_mut(channels) {
                block.copy_from_slice(px);
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(dst_row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(dst_row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    PixelBuffer::new(dst_w, dst_h, image.layout(), out)
}

/// Resamples an 8-bit buffer to exactly `dst_w × dst_h`.
///
/// Works in normalized `f32`; filter overshoot (Lanczos ringing) is clamped
/// when quantizing back. Aspect ratio is not preserved.
///
/// # Errors
///
/// [`Error::InvalidInput`] if either size is zero.
pub fn resize(image: &PixelBuffer, dst_w: u32, dst_h: u32, filter: Filter) -> Result<PixelBuffer> {
    let (src_w, src_h) = image.dimensions();
    debug!(src_w, src_h, dst_w, dst_h, ?filter, "Resizing");

    let src = image.to_f32();
    let resized = resize_f32(
        &src,
        src_w as usize,
        src_h as usize,
        image.channels(),
        dst_w as usize,
        dst_h as usize,
        filter,
    )?;
    PixelBuffer::from_f32(dst_w, dst_h, image.layout(), &resized)
}

/// Resizes f32 image data.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of channels (1 to 4)
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
/// * `filter` - Resampling filter
///
/// # Example
///
/// ```rust
/// use hueshift_ops::resize::{resize_f32, Filter};
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 32 * 4);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> Result<Vec<f32>> {
    if src_w == 0 || src_h == 0 {
        return Err(Error::invalid_input("source size must be > 0"));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(Error::invalid_input("destination size must be > 0"));
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(Error::unsupported_layout(channels));
    }
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(Error::invalid_input(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }

    trace!(src_w, src_h, dst_w, dst_h, channels, "resize::resize_f32");

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter))
}

/// Source taps and weights for one destination coordinate.
struct Taps {
    first: usize,
    weights: Vec<f32>,
}

/// Precomputes normalized filter taps along one axis.
fn compute_taps(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Taps> {
    let scale = src_len as f32 / dst_len as f32;
    let stretch = scale.max(1.0);
    let support = filter.support() * stretch;

    (0..dst_len)
        .map(|d| {
            // Map destination pixel center into source space
            let center = (d as f32 + 0.5) * scale - 0.5;
            let first = ((center - support).floor().max(0.0)) as usize;
            let last = ((center + support).ceil() as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (first..=last)
                .map(|s| filter.weight((s as f32 - center) / stretch))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                weights.iter_mut().for_each(|w| *w /= sum);
            } else {
                // Degenerate kernel: fall back to the nearest sample
                let nearest = (center.round().max(0.0) as usize).clamp(first, last);
                weights.iter_mut().for_each(|w| *w = 0.0);
                weights[nearest - first] = 1.0;
            }
            Taps { first, weights }
        })
        .collect()
}

/// Horizontal resize pass.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = compute_taps(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    let fill_row = |y: usize, row: &mut [f32]| {
        let src_row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, tap) in taps.iter().enumerate() {
            let mut sum = [0.0f32; MAX_CHANNELS];
            for (i, w) in tap.weights.iter().enumerate() {
                let idx = (tap.first + i) * channels;
                for c in 0..channels {
                    sum[c] += src_row[idx + c] * w;
                }
            }
            row[x * channels..(x + 1) * channels].copy_from_slice(&sum[..channels]);
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(dst_w * channels)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(dst_w * channels)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    dst
}

/// Vertical resize pass.
fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = compute_taps(src_h, dst_h, filter);
    let row_len = src_w * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    let fill_row = |y: usize, row: &mut [f32]| {
        let tap = &taps[y];
        for (i, w) in tap.weights.iter().enumerate() {
            let sy = tap.first + i;
            let src_row = &src[sy * row_len..(sy + 1) * row_len];
            for (d, s) in row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    dst
}
