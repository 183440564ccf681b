//! # hueshift-io
//!
//! Decodes PNG and JPEG files into [`PixelBuffer`]s and encodes them back.
//! This is the file collaborator of the hue pipeline; the pipeline itself
//! never touches files.
//!
//! | Format | Read | Write | Alpha |
//! |--------|------|-------|-------|
//! | PNG | Yes | Yes | Kept |
//! | JPEG | Yes | Yes | Dropped on write |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hueshift_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.jpg", &image)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use hueshift_core::PixelBuffer;

use std::path::Path;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a supported format
/// - The file cannot be created
/// - The image cannot be encoded in that format
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    tracing::debug!(path = %path.display(), ?format, "Writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}
