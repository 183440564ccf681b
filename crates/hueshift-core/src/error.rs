//! Error types for hueshift-core operations.
//!
//! Every failure in the core is local and synchronous: the operations are
//! pure, so retrying with the same input gives the same error.
//!
//! # Usage
//!
//! ```rust
//! use hueshift_core::{Error, Result};
//!
//! fn check_hue(hue: f32) -> Result<f32> {
//!     if !(0.0..1.0).contains(&hue) {
//!         return Err(Error::invalid_input(format!("hue {hue} outside [0, 1)")));
//!     }
//!     Ok(hue)
//! }
//!
//! assert!(check_hue(0.5).is_ok());
//! assert!(check_hue(1.0).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - construction and shape checks
//! - [`crate::hsv::HueTarget`] - hue domain validation
//! - `hueshift-ops` - transform and preview preconditions
//! - `hueshift-io` - wrapped in `IoError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the hue transform and preview pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input violates an operation precondition.
    ///
    /// Covers empty buffers, hues outside `[0, 1)`, non-positive preview
    /// bounds and sample data that does not match the declared shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Buffer channel count is not 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel layout: {channels} channels (expected 3 or 4)")]
    UnsupportedChannelLayout {
        /// Channel count that was supplied
        channels: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidInput`] error.
    #[inline]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an [`Error::UnsupportedChannelLayout`] error.
    #[inline]
    pub fn unsupported_layout(channels: usize) -> Self {
        Self::UnsupportedChannelLayout { channels }
    }

    /// Returns `true` if this is an [`Error::InvalidInput`].
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` if this is an [`Error::UnsupportedChannelLayout`].
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::UnsupportedChannelLayout { .. })
    }
}
