//! Alpha compositing.
//!
//! The preview path cannot show transparency, so RGBA buffers are
//! flattened onto an opaque background first. The per-pixel math is the
//! Porter-Duff Over operator on straight (non-premultiplied) alpha.
//!
//! # Example
//!
//! ```rust
//! use hueshift_ops::composite::over_pixel;
//!
//! let fg = [1.0, 0.0, 0.0, 0.5]; // Semi-transparent red
//! let bg = [0.0, 0.0, 1.0, 1.0]; // Opaque blue
//!
//! let result = over_pixel(fg, bg);
//! assert!(result[0] > 0.4 && result[2] > 0.4);
//! ```

use hueshift_core::{quantize, ChannelLayout, Error, PixelBuffer, Result};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Opaque white, the default flattening background.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Composites foreground over background (Porter-Duff Over).
///
/// Standard alpha compositing: `Fg + Bg * (1 - Fg.alpha)`
#[inline]
pub fn over_pixel(fg: [f32; 4], bg: [f32; 4]) -> [f32; 4] {
    let fg_a = fg[3];
    let bg_a = bg[3];
    let out_a = fg_a + bg_a * (1.0 - fg_a);

    if out_a < 1e-8 {
        return [0.0, 0.0, 0.0, 0.0];
    }

    let inv_out_a = 1.0 / out_a;
    [
        (fg[0] * fg_a + bg[0] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[1] * fg_a + bg[1] * bg_a * (1.0 - fg_a)) * inv_out_a,
        (fg[2] * fg_a + bg[2] * bg_a * (1.0 - fg_a)) * inv_out_a,
        out_a,
    ]
}

/// Flattens an RGBA buffer onto an opaque `background`, returning RGB.
///
/// The output has the same dimensions as the input. RGB input is returned
/// as an unmodified copy.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `image` is empty.
///
/// # Example
///
/// ```rust
/// use hueshift_core::PixelBuffer;
/// use hueshift_ops::composite::{flatten, WHITE};
///
/// let clear = PixelBuffer::from_raw(1, 1, 4, vec![0, 0, 0, 0]).unwrap();
/// let flat = flatten(&clear, WHITE).unwrap();
/// assert_eq!(flat.pixel(0, 0), &[255, 255, 255]);
/// ```
pub fn flatten(image: &PixelBuffer, background: [u8; 3]) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    if image.is_empty() {
        return Err(Error::invalid_input(format!(
            "cannot flatten empty {width}x{height} buffer"
        )));
    }
    if !image.has_alpha() {
        return Ok(image.clone());
    }

    trace!(width, height, "composite::flatten");
    debug!(width, height, ?background, "Flattening alpha");

    let bg = [
        background[0] as f32 / 255.0,
        background[1] as f32 / 255.0,
        background[2] as f32 / 255.0,
        1.0,
    ];

    let src_row_len = image.row_len();
    let dst_row_len = width as usize * 3;
    let mut out = vec![0u8; dst_row_len * height as usize];

    let fill_row = |(dst, src): (&mut [u8], &[u8])| {
        for (d, px) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
            let out_px = match px[3] {
                // Fast paths keep exact 8-bit values
                255 => [px[0], px[1], px[2]],
                0 => background,
                _ => {
                    let fg = [
                        px[0] as f32 / 255.0,
                        px[1] as f32 / 255.0,
                        px[2] as f32 / 255.0,
                        px[3] as f32 / 255.0,
                    ];
                    let o = over_pixel(fg, bg);
                    [quantize(o[0]), quantize(o[1]), quantize(o[2])]
                }
            };
            d.copy_from_slice(&out_px);
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(dst_row_len)
        .zip(image.data().par_chunks(src_row_len))
        .for_each(fill_row);

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(dst_row_len)
        .zip(image.data().chunks(src_row_len))
        .for_each(fill_row);

    PixelBuffer::new(width, height, ChannelLayout::Rgb, out)
}
