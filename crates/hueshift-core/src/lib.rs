//! # hueshift-core
//!
//! Core types for global hue remapping.
//!
//! - [`PixelBuffer`] - Owned 8-bit RGB/RGBA image buffer
//! - [`ChannelLayout`] - RGB or RGBA
//! - [`Hsv`] - HSV color with RGB conversions
//! - [`HueTarget`] - Validated hue in `[0, 1)`
//! - [`Error`] - Failure modes shared by the workspace
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other hueshift crates
//! build on it:
//!
//! ```text
//! hueshift-core (this crate)
//!    ^
//!    |
//!    +-- hueshift-ops (hue transform, preview scaling, edit session)
//!    +-- hueshift-io  (PNG/JPEG decode and encode)
//!    +-- hueshift-cli (command-line shell)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod hsv;

pub use buffer::{quantize, ChannelLayout, PixelBuffer};
pub use error::{Error, Result};
pub use hsv::{hue_distance, wrap_hue, Hsv, HueTarget};

/// Prelude module for convenient imports.
///
/// ```
/// use hueshift_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{ChannelLayout, PixelBuffer};
    pub use crate::error::{Error, Result};
    pub use crate::hsv::{Hsv, HueTarget};
}
