//! Editing state behind an interactive shell.
//!
//! An [`EditSession`] owns the decoded source image and, once a color has
//! been picked, the hue-shifted result. Each pick recomputes the result
//! from the untouched source, so repeated picks never compound and
//! [`EditSession::revert`] is free.
//!
//! ```text
//! load ──> source ──pick_color──> modified ──preview──> (display)
//!             ^                      │
//!             └──────── revert ──────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use hueshift_core::{ChannelLayout, PixelBuffer};
//! use hueshift_ops::session::EditSession;
//!
//! let src = PixelBuffer::filled(8, 8, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
//! let mut session = EditSession::new(src).unwrap();
//! assert!(session.modified().is_none());
//!
//! session.pick_color([0, 0, 255]).unwrap();
//! assert_eq!(session.current().pixel(0, 0), &[0, 0, 255]);
//!
//! session.revert();
//! assert_eq!(session.current().pixel(0, 0), &[255, 0, 0]);
//! ```

use crate::hue::HueTransform;
use crate::preview::{self, PreviewOptions};
use hueshift_core::{Error, HueTarget, PixelBuffer, Result};
use tracing::{debug, info};

/// Source image plus the latest hue-shifted derivative.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: PixelBuffer,
    modified: Option<PixelBuffer>,
    target: Option<HueTarget>,
}

impl EditSession {
    /// Starts a session on a freshly decoded image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `source` is empty.
    pub fn new(source: PixelBuffer) -> Result<Self> {
        check_source(&source)?;
        debug!(width = source.width(), height = source.height(), "Session started");
        Ok(Self {
            source,
            modified: None,
            target: None,
        })
    }

    /// Replaces the source image, discarding any modified result.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `source` is empty; the session is left
    /// unchanged.
    pub fn replace_source(&mut self, source: PixelBuffer) -> Result<()> {
        check_source(&source)?;
        self.source = source;
        self.modified = None;
        self.target = None;
        Ok(())
    }

    /// Remaps the source to the hue of a picked color.
    ///
    /// Returns the hue that was applied.
    ///
    /// # Errors
    ///
    /// Propagates failures from the hue transform.
    pub fn pick_color(&mut self, rgb: [u8; 3]) -> Result<HueTarget> {
        let target = HueTarget::from_rgb8(rgb);
        self.apply_hue(target)?;
        Ok(target)
    }

    /// Remaps the source to `target`, replacing any earlier result.
    ///
    /// # Errors
    ///
    /// Propagates failures from the hue transform.
    pub fn apply_hue(&mut self, target: HueTarget) -> Result<&PixelBuffer> {
        let modified = HueTransform::new(target).apply(&self.source)?;
        info!(hue = target.value(), degrees = target.degrees(), "Applied hue");
        self.target = Some(target);
        Ok(&*self.modified.insert(modified))
    }

    /// Drops the modified result; [`current`](Self::current) shows the
    /// source again.
    pub fn revert(&mut self) {
        self.modified = None;
        self.target = None;
    }

    /// The untouched source image.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// The hue-shifted result, if a hue has been applied.
    ///
    /// This is the buffer eligible for saving; `None` means there is
    /// nothing to save yet.
    pub fn modified(&self) -> Option<&PixelBuffer> {
        self.modified.as_ref()
    }

    /// Last applied hue.
    pub fn target(&self) -> Option<HueTarget> {
        self.target
    }

    /// The buffer to display: the modified result if any, else the source.
    pub fn current(&self) -> &PixelBuffer {
        self.modified.as_ref().unwrap_or(&self.source)
    }

    /// Builds a display preview of [`current`](Self::current).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a zero-sized preview box.
    pub fn preview(&self, options: &PreviewOptions) -> Result<PixelBuffer> {
        preview::scale_with_options(self.current(), options)
    }
}

fn check_source(source: &PixelBuffer) -> Result<()> {
    if source.is_empty() {
        let (w, h) = source.dimensions();
        return Err(Error::invalid_input(format!("cannot edit empty {w}x{h} image")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_core::ChannelLayout;

    fn red(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::filled(w, h, ChannelLayout::Rgb, &[255, 0, 0]).unwrap()
    }

    #[test]
    fn test_empty_source_rejected() {
        let empty = PixelBuffer::from_raw(0, 0, 3, Vec::new()).unwrap();
        assert!(EditSession::new(empty).is_err());
    }

    #[test]
    fn test_picks_do_not_compound() {
        let mut session = EditSession::new(red(2, 2)).unwrap();
        session.pick_color([0, 255, 0]).unwrap();
        // A gray pick maps to hue 0, so the result must equal the source
        session.pick_color([128, 128, 128]).unwrap();
        assert_eq!(session.modified().unwrap(), session.source());
    }

    #[test]
    fn test_replace_source_clears_result() {
        let mut session = EditSession::new(red(2, 2)).unwrap();
        session.pick_color([0, 0, 255]).unwrap();
        assert!(session.target().is_some());

        session.replace_source(red(3, 3)).unwrap();
        assert!(session.modified().is_none());
        assert!(session.target().is_none());
        assert_eq!(session.current().dimensions(), (3, 3));
    }

    #[test]
    fn test_replace_with_empty_keeps_state() {
        let mut session = EditSession::new(red(2, 2)).unwrap();
        let empty = PixelBuffer::from_raw(4, 0, 3, Vec::new()).unwrap();
        assert!(session.replace_source(empty).is_err());
        assert_eq!(session.source().dimensions(), (2, 2));
    }

    #[test]
    fn test_preview_of_current() {
        let mut session = EditSession::new(red(5, 5)).unwrap();
        session.pick_color([0, 255, 0]).unwrap();
        let shown = session.preview(&PreviewOptions::with_size(20, 20)).unwrap();
        assert_eq!(shown.dimensions(), (20, 20));
        assert_eq!(shown.pixel(19, 19), &[0, 255, 0]);
        assert!(session.preview(&PreviewOptions::with_size(0, 20)).is_err());
    }
}
