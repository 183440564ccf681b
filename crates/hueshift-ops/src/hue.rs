//! Global hue substitution.
//!
//! Every pixel is taken to HSV, its hue is replaced by the target, and it
//! is converted back. Saturation and value are untouched, so the image
//! keeps its shading and its grays:
//!
//! ```text
//! (r, g, b) -> (h, s, v) -> (target, s, v) -> (r', g', b')
//! ```
//!
//! Alpha, when present, is copied through unchanged.
//!
//! # Example
//!
//! ```rust
//! use hueshift_core::{ChannelLayout, PixelBuffer};
//! use hueshift_ops::hue;
//!
//! let red = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
//! let green = hue::apply(&red, 1.0 / 3.0).unwrap();
//! assert_eq!(green.pixel(0, 0), &[0, 255, 0]);
//! ```

use hueshift_core::{quantize, Error, Hsv, HueTarget, PixelBuffer, Result};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A reusable hue substitution.
///
/// Holds an already validated [`HueTarget`], so applying it can only fail
/// on the buffer itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueTransform {
    target: HueTarget,
}

impl HueTransform {
    /// Creates a transform for `target`.
    pub fn new(target: HueTarget) -> Self {
        Self { target }
    }

    /// Creates a transform from a picked 8-bit color.
    pub fn from_color(rgb: [u8; 3]) -> Self {
        Self::new(HueTarget::from_rgb8(rgb))
    }

    /// The hue pixels are remapped to.
    pub fn target(&self) -> HueTarget {
        self.target
    }

    /// Applies the substitution, returning a new buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `source` has zero width or height.
    pub fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        apply_target(source, self.target)
    }
}

/// Replaces the hue of every pixel in `source` with `target_hue`.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `source` is empty or `target_hue` is not a
/// finite value in `[0, 1)`.
pub fn apply(source: &PixelBuffer, target_hue: f32) -> Result<PixelBuffer> {
    let target = HueTarget::new(target_hue)?;
    apply_target(source, target)
}

/// Same as [`apply`] with a pre-validated target.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `source` is empty.
pub fn apply_target(source: &PixelBuffer, target: HueTarget) -> Result<PixelBuffer> {
    let (width, height) = source.dimensions();
    if source.is_empty() {
        return Err(Error::invalid_input(format!(
            "cannot remap hue of empty {width}x{height} buffer"
        )));
    }

    trace!(width, height, channels = source.channels(), "hue::apply");
    debug!(width, height, hue = target.value(), "Remapping hue");

    let hue = target.value();
    let channels = source.channels();
    let row_len = source.row_len();
    let src = source.data();
    let mut out = vec![0u8; src.len()];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(dst, row)| remap_row(row, dst, channels, hue));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(row_len)
        .zip(src.chunks(row_len))
        .for_each(|(dst, row)| remap_row(row, dst, channels, hue));

    PixelBuffer::new(width, height, source.layout(), out)
}

/// Remaps one 8-bit pixel to `hue`.
///
/// Gray input comes back unchanged for any hue.
#[inline]
pub fn remap_pixel(rgb: [u8; 3], hue: f32) -> [u8; 3] {
    Hsv::from_rgb8(rgb).with_hue(hue).to_rgb().map(quantize)
}

fn remap_row(src: &[u8], dst: &mut [u8], channels: usize, hue: f32) {
    for (s, d) in src.chunks_exact(channels).zip(dst.chunks_exact_mut(channels)) {
        let rgb = remap_pixel([s[0], s[1], s[2]], hue);
        d[..3].copy_from_slice(&rgb);
        if channels == 4 {
            d[3] = s[3];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_core::ChannelLayout;

    #[test]
    fn test_red_to_green() {
        let out = remap_pixel([255, 0, 0], 0.333);
        assert!(out[0] <= 1);
        assert_eq!(out[1], 255);
        assert_eq!(out[2], 0);
    }

    #[test]
    fn test_gray_untouched() {
        for v in [0u8, 1, 77, 128, 254, 255] {
            for h in [0.0, 0.1, 0.5, 0.9] {
                assert_eq!(remap_pixel([v, v, v], h), [v, v, v]);
            }
        }
    }

    #[test]
    fn test_alpha_carried() {
        let src = PixelBuffer::from_raw(2, 1, 4, vec![255, 0, 0, 17, 0, 0, 255, 200]).unwrap();
        let out = apply(&src, 0.5).unwrap();
        assert_eq!(out.layout(), ChannelLayout::Rgba);
        assert_eq!(out.pixel(0, 0)[3], 17);
        assert_eq!(out.pixel(1, 0)[3], 200);
        assert_eq!(&out.pixel(0, 0)[..3], &[0, 255, 255]);
    }

    #[test]
    fn test_source_untouched() {
        let src = PixelBuffer::filled(3, 3, ChannelLayout::Rgb, &[200, 40, 10]).unwrap();
        let copy = src.clone();
        let _ = apply(&src, 0.6).unwrap();
        assert_eq!(src, copy);
    }

    #[test]
    fn test_empty_rejected() {
        let src = PixelBuffer::from_raw(0, 4, 3, Vec::new()).unwrap();
        let err = apply(&src, 0.2).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_hue_out_of_domain() {
        let src = PixelBuffer::filled(1, 1, ChannelLayout::Rgb, &[1, 2, 3]).unwrap();
        assert!(apply(&src, 1.0).unwrap_err().is_invalid_input());
        assert!(apply(&src, -0.01).unwrap_err().is_invalid_input());
        assert!(apply(&src, f32::NAN).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_transform_from_color() {
        let transform = HueTransform::from_color([0, 0, 90]);
        let src = PixelBuffer::filled(1, 1, ChannelLayout::Rgb, &[120, 60, 60]).unwrap();
        let out = transform.apply(&src).unwrap();
        assert_eq!(out.pixel(0, 0), &[60, 60, 120]);
    }
}
