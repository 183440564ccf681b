//! JPEG format support.
//!
//! Decoding always produces 8-bit RGB: grayscale is widened, CMYK is
//! converted with the naive `(1 - c)(1 - k)` formula, and 16-bit
//! grayscale keeps its high byte.
//!
//! JPEG has no alpha channel. RGBA buffers are accepted for writing and
//! their alpha is dropped by the encoder; flatten first if transparent
//! areas matter.
//!
//! # Example
//!
//! ```rust,ignore
//! use hueshift_io::jpeg::{write_with_options, JpegWriterOptions};
//!
//! let options = JpegWriterOptions { quality: 95 };
//! write_with_options("out.jpg", &image, &options)?;
//! ```

use crate::{IoError, IoResult};
use hueshift_core::{ChannelLayout, PixelBuffer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    /// Default: 90.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes JPEG bytes held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<PixelBuffer> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| [l16[0], l16[0], l16[0]])
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                let k = 1.0 - cmyk[3] as f32 / 255.0;
                cmyk[..3]
                    .iter()
                    .map(move |&c| ((1.0 - c as f32 / 255.0) * k * 255.0).round() as u8)
            })
            .collect(),
    };

    debug!(width = info.width, height = info.height, format = ?info.pixel_format, "Decoded JPEG");
    Ok(PixelBuffer::new(
        info.width as u32,
        info.height as u32,
        ChannelLayout::Rgb,
        rgb,
    )?)
}

/// Writes an image to a JPEG file with default options.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with_options(path, image, &JpegWriterOptions::default())
}

/// Writes an image to a JPEG file.
pub fn write_with_options<P: AsRef<Path>>(
    path: P,
    image: &PixelBuffer,
    options: &JpegWriterOptions,
) -> IoResult<()> {
    let bytes = write_to_memory(image, options)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes an image to JPEG bytes.
///
/// # Errors
///
/// [`IoError::EncodeError`] if either dimension exceeds 65535 or the
/// quality is outside 1-100.
pub fn write_to_memory(image: &PixelBuffer, options: &JpegWriterOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    if !(1..=100).contains(&options.quality) {
        return Err(IoError::EncodeError(format!(
            "quality {} outside 1-100",
            options.quality
        )));
    }
    let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds JPEG limit of 65535",
                image.width(),
                image.height()
            )));
        }
    };
    let color_type = match image.layout() {
        ChannelLayout::Rgb => ColorType::Rgb,
        ChannelLayout::Rgba => ColorType::Rgba,
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, options.quality);
    encoder
        .encode(image.data(), width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
