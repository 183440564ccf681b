//! Decoded 8-bit pixel buffers.
//!
//! [`PixelBuffer`] is the unit of exchange between every stage of the
//! pipeline: the decoder hands one to the hue transform, the transform
//! returns a new one, and the preview scaler derives a display copy.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with channels
//! interleaved:
//!
//! ```text
//! RGB:  [R G B R G B R G B ...]  ← Row 0
//!       [R G B R G B R G B ...]  ← Row 1
//! RGBA: [R G B A R G B A ...]
//! ```
//!
//! There is no row padding, so row `y` is the slice
//! `data[y * width * channels..(y + 1) * width * channels]`.
//!
//! # Usage
//!
//! ```rust
//! use hueshift_core::{ChannelLayout, PixelBuffer};
//!
//! let mut buf = PixelBuffer::filled(4, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
//! buf.set_pixel(1, 1, &[0, 0, 255]);
//! assert_eq!(buf.pixel(1, 1), &[0, 0, 255]);
//! assert_eq!(buf.row(0).len(), 4 * 3);
//! ```

use crate::{Error, Result};

/// Channel arrangement of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Three interleaved color channels.
    Rgb,
    /// Three color channels followed by straight (non-premultiplied) alpha.
    Rgba,
}

impl ChannelLayout {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns `true` if the layout carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Maps a channel count to a layout.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedChannelLayout`] for anything other than 3 or 4.
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(Error::unsupported_layout(n)),
        }
    }
}

impl std::fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb => f.write_str("RGB"),
            Self::Rgba => f.write_str("RGBA"),
        }
    }
}

/// Owned, tightly packed 8-bit image buffer.
///
/// Construction validates the shape, so a `PixelBuffer` always holds
/// exactly `width * height * channels` samples and a supported layout.
/// Zero-sized buffers are representable (a decoder may legitimately hand
/// one over) but every operation in `hueshift-ops` rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps decoded samples.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannelLayout`] if `channels` is not 3 or 4
    /// - [`Error::InvalidInput`] if `data.len()` does not match the shape
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let layout = ChannelLayout::from_channels(channels)?;
        Self::new(width, height, layout, data)
    }

    /// Wraps samples with an explicit layout.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `data.len()` does not match the shape.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, layout)?;
        if data.len() != expected {
            return Err(Error::invalid_input(format!(
                "expected {} samples for {}x{} {}, got {}",
                expected,
                width,
                height,
                layout,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `pixel.len()` differs from the layout's
    /// channel count or the size overflows.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != layout.channels() {
            return Err(Error::invalid_input(format!(
                "fill pixel has {} channels, layout {} needs {}",
                pixel.len(),
                layout,
                layout.channels()
            )));
        }
        let count = sample_count(width, height, layout)?;
        let data = pixel.iter().copied().cycle().take(count).collect();
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Samples per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Returns `true` if the buffer carries alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if width or height is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Pixel at `(x, y)` as a slice of `channels()` samples.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds or `pixel` has the wrong
    /// channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        self.data[idx..idx + c].copy_from_slice(pixel);
    }

    /// Iterates over pixels as channel slices, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.channels())
    }

    /// Samples normalized to `[0, 1]` as `f32`, same layout.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32 / 255.0).collect()
    }

    /// Builds a buffer from normalized `f32` samples, clamping to `[0, 1]`
    /// and rounding to the nearest 8-bit level.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the sample count does not match the shape.
    pub fn from_f32(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: &[f32],
    ) -> Result<Self> {
        let data = samples.iter().map(|&v| quantize(v)).collect();
        Self::new(width, height, layout, data)
    }
}

/// Clamps a normalized sample to `[0, 1]` and rounds it to 8 bits.
///
/// NaN maps to 0.
#[inline]
pub fn quantize(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn sample_count(width: u32, height: u32, layout: ChannelLayout) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(layout.channels()))
        .ok_or_else(|| Error::invalid_input(format!("{width}x{height} overflows buffer size")))
}
