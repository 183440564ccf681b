//! # hueshift-ops
//!
//! Image operations for global hue remapping.
//!
//! # Modules
//!
//! - [`hue`] - Replace every pixel's hue, keeping saturation and value
//! - [`preview`] - Fit an image into a display box without smearing color
//! - [`resize`] - Nearest-neighbor magnification and filtered resampling
//! - [`composite`] - Flatten alpha onto an opaque background
//! - [`session`] - Source/modified buffer lifecycle for interactive shells
//!
//! # Example
//!
//! ```rust
//! use hueshift_core::{ChannelLayout, HueTarget, PixelBuffer};
//! use hueshift_ops::{hue, preview};
//!
//! let src = PixelBuffer::filled(16, 16, ChannelLayout::Rgb, &[200, 50, 50]).unwrap();
//! let target = HueTarget::from_rgb8([40, 40, 220]);
//!
//! let shifted = hue::apply_target(&src, target).unwrap();
//! let shown = preview::scale_for_preview(&shifted, 400, 400).unwrap();
//! assert_eq!(shown.dimensions(), (400, 400));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - process rows on the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod composite;
pub mod hue;
pub mod preview;
pub mod resize;
pub mod session;

pub use hue::HueTransform;
pub use hueshift_core::{Error, Result};
pub use preview::{scale_for_preview, PreviewOptions, ScalePlan};
pub use resize::Filter;
pub use session::EditSession;
