//! HSV color model and hue targets.
//!
//! All components are normalized: hue in `[0, 1)` (one full turn of the
//! color wheel), saturation and value in `[0, 1]`.
//!
//! # Conversion
//!
//! RGB → HSV:
//!
//! ```text
//! V = max(R, G, B)
//! S = (max - min) / max          (0 when max == min)
//! H = sector(max channel) / 6    (60° sectors, wrapped into [0, 1))
//! ```
//!
//! HSV → RGB picks the sector `floor(6H)` and interpolates between the
//! value `V` and the floor `V(1 - S)`. With `S == 0` the hue is ignored and
//! the result is exactly `(V, V, V)`, which is what keeps gray pixels gray
//! under hue substitution.
//!
//! # Example
//!
//! ```rust
//! use hueshift_core::Hsv;
//!
//! let hsv = Hsv::from_rgb([0.0, 1.0, 0.0]);
//! assert!((hsv.h - 1.0 / 3.0).abs() < 1e-6);
//! assert_eq!(hsv.s, 1.0);
//! assert_eq!(hsv.v, 1.0);
//! ```

use crate::{Error, Result};

/// A color in the HSV model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in `[0, 1)`.
    pub h: f32,
    /// Saturation in `[0, 1]`.
    pub s: f32,
    /// Value (brightness) in `[0, 1]`.
    pub v: f32,
}

impl Hsv {
    /// Creates an HSV color without validation.
    #[inline]
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Converts normalized RGB to HSV.
    ///
    /// Achromatic input (`r == g == b`) yields hue 0 and saturation 0.
    #[inline]
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;
        if max == min {
            return Self { h: 0.0, s: 0.0, v };
        }

        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;

        let sector = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self {
            h: wrap_hue(sector / 6.0),
            s,
            v,
        }
    }

    /// Converts 8-bit RGB to HSV.
    #[inline]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb.map(|c| c as f32 / 255.0))
    }

    /// Converts back to normalized RGB.
    ///
    /// The result is not clamped; callers quantizing to integer storage
    /// must clamp first.
    #[inline]
    pub fn to_rgb(self) -> [f32; 3] {
        let Self { h, s, v } = self;
        if s == 0.0 {
            return [v, v, v];
        }

        let h6 = h * 6.0;
        let i = h6.floor();
        let f = h6 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match (i as i32).rem_euclid(6) {
            0 => [v, t, p],
            1 => [q, v, p],
            2 => [p, v, t],
            3 => [p, q, v],
            4 => [t, p, v],
            _ => [v, p, q],
        }
    }

    /// Returns a copy with the hue replaced.
    #[inline]
    pub fn with_hue(self, h: f32) -> Self {
        Self { h, ..self }
    }

    /// Returns `true` if the color has no hue (gray, black or white).
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

/// Wraps any finite hue into `[0, 1)`.
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let w = h.rem_euclid(1.0);
    // rem_euclid of a tiny negative rounds up to exactly 1.0 in f32
    if w >= 1.0 { 0.0 } else { w }
}

/// Circular distance between two hues, in `[0, 0.5]`.
#[inline]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs().rem_euclid(1.0);
    d.min(1.0 - d)
}

/// The hue every pixel is remapped to.
///
/// Always holds a finite value in `[0, 1)`; the constructors are the only
/// way in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HueTarget(f32);

impl HueTarget {
    /// Validates a normalized hue.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `hue` is not finite or outside `[0, 1)`.
    pub fn new(hue: f32) -> Result<Self> {
        if !hue.is_finite() || !(0.0..1.0).contains(&hue) {
            return Err(Error::invalid_input(format!(
                "target hue {hue} is outside [0, 1)"
            )));
        }
        Ok(Self(hue))
    }

    /// Builds a target from an angle in degrees, wrapping into one turn.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `degrees` is not finite.
    pub fn from_degrees(degrees: f32) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(Error::invalid_input(format!("hue angle {degrees} is not finite")));
        }
        Ok(Self(wrap_hue(degrees / 360.0)))
    }

    /// Derives the target from a picked color, discarding its saturation
    /// and value.
    ///
    /// A gray pick yields hue 0 (red).
    #[inline]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self(Hsv::from_rgb8(rgb).h)
    }

    /// Normalized hue in `[0, 1)`.
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Hue in degrees, `[0, 360)`.
    #[inline]
    pub fn degrees(self) -> f32 {
        self.0 * 360.0
    }
}

impl TryFrom<f32> for HueTarget {
    type Error = Error;

    fn try_from(hue: f32) -> Result<Self> {
        Self::new(hue)
    }
}

impl From<HueTarget> for f32 {
    fn from(target: HueTarget) -> f32 {
        target.0
    }
}
