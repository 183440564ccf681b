//! Display-size previews.
//!
//! A preview has to fit a fixed display box without misrepresenting
//! color, so the scaling policy depends on the source size:
//!
//! | Source vs. box | Path | Output size |
//! |----------------|------|-------------|
//! | smaller in either axis | integer nearest-neighbor magnification | `size × factor` |
//! | at least as large in both | filtered resample (Lanczos-3) | exactly the box |
//!
//! with `factor = max(1, min(box_w / w, box_h / h))` in integer division.
//! Small and pixel-art images keep hard pixel edges; large images are
//! smoothed down without aliasing. Transparent areas are flattened onto an
//! opaque background before scaling, so the preview is always RGB.
//!
//! # Example
//!
//! ```rust
//! use hueshift_core::{ChannelLayout, PixelBuffer};
//! use hueshift_ops::preview::scale_for_preview;
//!
//! let icon = PixelBuffer::filled(10, 10, ChannelLayout::Rgb, &[0, 128, 255]).unwrap();
//! let shown = scale_for_preview(&icon, 400, 400).unwrap();
//! assert_eq!(shown.dimensions(), (400, 400));
//! ```

use crate::composite::{self, WHITE};
use crate::resize::{self, Filter};
use hueshift_core::{Error, PixelBuffer, Result};
use tracing::{debug, trace};

/// Default preview box width.
pub const DEFAULT_MIN_WIDTH: u32 = 400;
/// Default preview box height.
pub const DEFAULT_MIN_HEIGHT: u32 = 400;

/// Preview tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Preview box width in pixels.
    pub min_width: u32,
    /// Preview box height in pixels.
    pub min_height: u32,
    /// Opaque color transparent pixels are flattened onto.
    pub background: [u8; 3],
    /// Filter for the smoothing path.
    pub filter: Filter,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            background: WHITE,
            filter: Filter::Lanczos3,
        }
    }
}

impl PreviewOptions {
    /// Options with a custom box and default background and filter.
    pub fn with_size(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
            ..Self::default()
        }
    }
}

/// Scaling decision for a given source and box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePlan {
    /// Replicate pixels by an integer factor (always >= 1).
    Magnify {
        /// Integer magnification factor.
        factor: u32,
    },
    /// Resample to exactly the box size.
    Smooth {
        /// Output width.
        width: u32,
        /// Output height.
        height: u32,
    },
}

impl ScalePlan {
    /// Picks the scaling path for a `width × height` source.
    ///
    /// A source undersized in one axis but oversized in the other would
    /// produce a factor of 0; that is clamped to 1 (identity).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a zero-sized source or box.
    pub fn choose(width: u32, height: u32, min_width: u32, min_height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_input(format!(
                "cannot preview empty {width}x{height} image"
            )));
        }
        if min_width == 0 || min_height == 0 {
            return Err(Error::invalid_input(format!(
                "preview bounds must be positive, got {min_width}x{min_height}"
            )));
        }

        if width < min_width || height < min_height {
            let factor = (min_width / width).min(min_height / height).max(1);
            Ok(Self::Magnify { factor })
        } else {
            Ok(Self::Smooth {
                width: min_width,
                height: min_height,
            })
        }
    }

    /// Output dimensions for a `width × height` source.
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            Self::Magnify { factor } => {
                (width.saturating_mul(factor), height.saturating_mul(factor))
            }
            Self::Smooth { width, height } => (width, height),
        }
    }
}

/// Scales `image` for display inside a `min_width × min_height` box,
/// flattening alpha onto white.
///
/// # Errors
///
/// [`Error::InvalidInput`] for an empty image or a zero-sized box.
pub fn scale_for_preview(
    image: &PixelBuffer,
    min_width: u32,
    min_height: u32,
) -> Result<PixelBuffer> {
    scale_with_options(image, &PreviewOptions::with_size(min_width, min_height))
}

/// Same as [`scale_for_preview`] with explicit [`PreviewOptions`].
///
/// # Errors
///
/// [`Error::InvalidInput`] for an empty image or a zero-sized box.
pub fn scale_with_options(image: &PixelBuffer, options: &PreviewOptions) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    let plan = ScalePlan::choose(width, height, options.min_width, options.min_height)?;

    trace!(width, height, ?plan, "preview::scale_with_options");

    let flat = composite::flatten(image, options.background)?;
    let preview = match plan {
        ScalePlan::Magnify { factor: 1 } => flat,
        ScalePlan::Magnify { factor } => resize::magnify_nearest(&flat, factor)?,
        ScalePlan::Smooth { width: w, height: h } => resize::resize(&flat, w, h, options.filter)?,
    };

    debug!(
        src_w = width,
        src_h = height,
        dst_w = preview.width(),
        dst_h = preview.height(),
        "Preview ready"
    );
    Ok(preview)
}
