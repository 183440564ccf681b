//! PNG format support.
//!
//! Reads every PNG color type into an 8-bit RGB or RGBA [`PixelBuffer`]:
//! palette and sub-byte images are expanded, 16-bit samples are stripped
//! to their high byte, and grayscale is widened to RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use hueshift_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use hueshift_core::{ChannelLayout, PixelBuffer};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes PNG bytes held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<PixelBuffer> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let (channels, data) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => (3, buf),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (4, buf),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let rgb = buf.iter().flat_map(|&g| [g, g, g]).collect();
            (3, rgb)
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba = buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (4, rgba)
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    debug!(width = info.width, height = info.height, channels, "Decoded PNG");
    Ok(PixelBuffer::from_raw(info.width, info.height, channels, data)?)
}

/// Writes an image to a PNG file, keeping alpha if present.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_to(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image to PNG bytes.
pub fn write_to_memory(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_to(&mut buffer, image)?;
    Ok(buffer)
}

fn encode_to<W: Write>(writer: W, image: &PixelBuffer) -> IoResult<()> {
    let color_type = match image.layout() {
        ChannelLayout::Rgb => png::ColorType::Rgb,
        ChannelLayout::Rgba => png::ColorType::Rgba,
    };

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip_rgb() {
        let width = 32;
        let height = 8;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 8) as u8, (y * 30) as u8, 128]);
            }
        }
        let image = PixelBuffer::from_raw(width, height, 3, data).unwrap();

        let bytes = write_to_memory(&image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_memory_roundtrip_rgba() {
        let image = PixelBuffer::from_raw(2, 1, 4, vec![1, 2, 3, 0, 4, 5, 6, 255]).unwrap();
        let loaded = read_from_memory(&write_to_memory(&image).unwrap()).unwrap();
        assert_eq!(loaded.layout(), ChannelLayout::Rgba);
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_grayscale_widened() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 200]).unwrap();
            writer.finish().unwrap();
        }
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.layout(), ChannelLayout::Rgb);
        assert_eq!(loaded.data(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            read_from_memory(b"not a png at all"),
            Err(IoError::DecodeError(_))
        ));
    }
}
