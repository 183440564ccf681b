//! CLI command implementations

pub mod apply;
pub mod hue;
pub mod info;
pub mod preview;

use crate::PreviewBox;
use anyhow::{bail, Context, Result};
use hueshift_io::{Format, PixelBuffer};
use hueshift_ops::{Filter, PreviewOptions};
use std::path::Path;
use tracing::warn;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    hueshift_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    hueshift_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save image to path, honoring the JPEG quality for `.jpg` outputs.
pub fn save_image_with_quality(path: &Path, image: &PixelBuffer, quality: u8) -> Result<()> {
    let format = Format::from_extension(path);
    if image.has_alpha() && !format.supports_alpha() {
        warn!(path = %path.display(), "Alpha channel dropped on save");
    }
    if format != Format::Jpeg {
        return save_image(path, image);
    }
    let options = hueshift_io::jpeg::JpegWriterOptions { quality };
    hueshift_io::jpeg::write_with_options(path, image, &options)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Parses `R,G,B`, `#RRGGBB` or `RRGGBB`.
pub fn parse_color(s: &str) -> Result<[u8; 3]> {
    let s = s.trim();

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            bail!("Color '{}' must have three components (R,G,B)", s);
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .with_context(|| format!("Invalid color component '{}' (expected 0-255)", part))?;
        }
        return Ok(rgb);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("Invalid color '{}' (expected R,G,B or #RRGGBB)", s);
    }
    let mut rgb = [0u8; 3];
    for (i, slot) in rgb.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .with_context(|| format!("Invalid hex color '{}'", s))?;
    }
    Ok(rgb)
}

/// Builds preview options from the shared command-line box arguments.
pub fn preview_options(args: &PreviewBox) -> Result<PreviewOptions> {
    let Some(filter) = Filter::from_name(&args.filter) else {
        bail!(
            "Unknown filter '{}'. Use: nearest, bilinear, bicubic, lanczos",
            args.filter
        );
    };
    Ok(PreviewOptions {
        min_width: args.min_width,
        min_height: args.min_height,
        background: parse_color(&args.background)?,
        filter,
    })
}
