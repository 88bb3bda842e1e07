//! Pixel samples and color projections.
//!
//! A [`PixelSample`] is the 16-bit, alpha-premultiplied RGBA value an image
//! source hands out.
//! A [`ColorModel`] names how such a sample is reduced before comparison:
//!
//! - **Luminance** (BT.601, SMPTE 240M, BT.709, BT.2020): weighted sum of the
//!   alpha-normalized color channels
//! - **Gray**: mean of all four channels, scaled to `[0, 1]`
//! - **HSL / HSV / HSP**: hue-based models; no projection from raw RGBA exists,
//!   only the HSL ↔ HSV relation in [`Hsl`] and [`Hsv`]
//!
//! # Example
//!
//! ```rust,ignore
//! use pixfid::color::{ColorModel, PixelSample, ProjectedValue};
//!
//! let red = PixelSample::new(65535, 0, 0, 65535);
//! let value = ColorModel::Luma709.project(red)?;
//! assert_eq!(value, ProjectedValue::Scalar(0.2126));
//! ```

mod hsx;

pub use hsx::{Hsl, Hsv};

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{PixfidError, Result};

/// Full-scale channel value as a float.
pub const FULL_SCALE: f64 = u16::MAX as f64;

/// One RGBA pixel with 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSample {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Alpha channel (`u16::MAX` is opaque).
    pub a: u16,
}

impl PixelSample {
    /// Create a sample from its four channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray sample for a projected value in `[0, 1]`.
    ///
    /// Out-of-range values saturate; NaN maps to black.
    pub fn gray(value: f64) -> Self {
        let channel = (FULL_SCALE * value).round().clamp(0.0, FULL_SCALE) as u16;
        Self::new(channel, channel, channel, u16::MAX)
    }

    /// Sample from straight (non-premultiplied) channels.
    ///
    /// Color channels are scaled by `a / 65535` and rounded, so a sample never
    /// has a color channel above its alpha.
    pub fn premultiplied(r: u16, g: u16, b: u16, a: u16) -> Self {
        let scale = |c: u16| ((c as u32 * a as u32 + 32767) / 65535) as u16;
        Self::new(scale(r), scale(g), scale(b), a)
    }

    /// Channels as an `(r, g, b, a)` vector of floats.
    pub fn to_vector(self) -> [f64; 4] {
        [self.r as f64, self.g as f64, self.b as f64, self.a as f64]
    }
}

// `image` buffers store straight alpha; samples are premultiplied.

impl From<Rgba<u16>> for PixelSample {
    fn from(px: Rgba<u16>) -> Self {
        let [r, g, b, a] = px.0;
        Self::premultiplied(r, g, b, a)
    }
}

impl From<Rgba<u8>> for PixelSample {
    fn from(px: Rgba<u8>) -> Self {
        // 0xab -> 0xabab keeps 0 and full scale fixed
        let [r, g, b, a] = px.0.map(|c| c as u16 * 257);
        Self::premultiplied(r, g, b, a)
    }
}

impl From<Rgba<f32>> for PixelSample {
    fn from(px: Rgba<f32>) -> Self {
        // NaN saturates to 0 in the cast
        let [r, g, b, a] = px.0.map(|c| (c.clamp(0.0, 1.0) * 65535.0).round() as u16);
        Self::premultiplied(r, g, b, a)
    }
}

impl From<PixelSample> for Rgba<u16> {
    fn from(sample: PixelSample) -> Self {
        Rgba([sample.r, sample.g, sample.b, sample.a])
    }
}

/// Red, green and blue weights of a luminance standard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    /// Red weight.
    pub r: f64,
    /// Green weight.
    pub g: f64,
    /// Blue weight.
    pub b: f64,
}

impl LumaWeights {
    /// ITU-R BT.601.
    pub const BT601: Self = Self::new(0.2989, 0.5870, 0.1140);
    /// SMPTE 240M.
    pub const BT240: Self = Self::new(0.212, 0.701, 0.087);
    /// ITU-R BT.709.
    pub const BT709: Self = Self::new(0.2126, 0.7152, 0.0722);
    /// ITU-R BT.2020.
    pub const BT2020: Self = Self::new(0.2627, 0.6780, 0.0593);

    /// Create a custom set of weights.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Luminance of a sample after normalizing color by alpha.
    ///
    /// A fully transparent sample divides by zero and yields a non-finite value.
    pub fn luminance(&self, sample: PixelSample) -> f64 {
        let a = sample.a as f64;
        self.r * (sample.r as f64 / a) + self.g * (sample.g as f64 / a) + self.b * (sample.b as f64 / a)
    }
}

/// A projection that reduces a sample to one scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarProjection {
    /// Weighted luminance.
    Luma(LumaWeights),
    /// Mean of all four channels in `[0, 1]`.
    Gray,
}

impl ScalarProjection {
    /// Apply the projection to one sample.
    #[inline]
    pub fn apply(&self, sample: PixelSample) -> f64 {
        match self {
            ScalarProjection::Luma(weights) => weights.luminance(sample),
            ScalarProjection::Gray => {
                let sum = sample.r as f64 + sample.g as f64 + sample.b as f64 + sample.a as f64;
                sum / (4.0 * FULL_SCALE)
            }
        }
    }
}

/// Result of projecting a sample through a [`ColorModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectedValue {
    /// Single achromatic channel.
    Scalar(f64),
    /// Hue-based triple, e.g. `(h, s, l)`.
    Triple(f64, f64, f64),
}

impl From<Hsl> for ProjectedValue {
    fn from(c: Hsl) -> Self {
        ProjectedValue::Triple(c.h, c.s, c.l)
    }
}

impl From<Hsv> for ProjectedValue {
    fn from(c: Hsv) -> Self {
        ProjectedValue::Triple(c.h, c.s, c.v)
    }
}

/// Color model used to project samples before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// BT.601 luminance.
    Luma601,
    /// SMPTE 240M luminance.
    Luma240,
    /// BT.709 luminance.
    #[default]
    Luma709,
    /// BT.2020 luminance.
    Luma2020,
    /// Four-channel average.
    Gray,
    /// Hue, saturation, lightness.
    Hsl,
    /// Hue, saturation, value.
    Hsv,
    /// Hue, saturation, perceived brightness.
    Hsp,
}

impl ColorModel {
    /// Every model, in registry order.
    pub const ALL: [ColorModel; 8] = [
        ColorModel::Luma601,
        ColorModel::Luma240,
        ColorModel::Luma709,
        ColorModel::Luma2020,
        ColorModel::Gray,
        ColorModel::Hsl,
        ColorModel::Hsv,
        ColorModel::Hsp,
    ];

    /// Lowercase name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            ColorModel::Luma601 => "luma601",
            ColorModel::Luma240 => "luma240",
            ColorModel::Luma709 => "luma709",
            ColorModel::Luma2020 => "luma2020",
            ColorModel::Gray => "gray",
            ColorModel::Hsl => "hsl",
            ColorModel::Hsv => "hsv",
            ColorModel::Hsp => "hsp",
        }
    }

    /// Luminance weights, if this is a luminance standard.
    pub fn luma_weights(&self) -> Option<LumaWeights> {
        match self {
            ColorModel::Luma601 => Some(LumaWeights::BT601),
            ColorModel::Luma240 => Some(LumaWeights::BT240),
            ColorModel::Luma709 => Some(LumaWeights::BT709),
            ColorModel::Luma2020 => Some(LumaWeights::BT2020),
            _ => None,
        }
    }

    /// Scalar projection for this model, if one exists.
    pub fn scalar_projection(&self) -> Option<ScalarProjection> {
        match self {
            ColorModel::Gray => Some(ScalarProjection::Gray),
            other => other.luma_weights().map(ScalarProjection::Luma),
        }
    }

    /// Project a raw sample.
    ///
    /// # Errors
    ///
    /// Returns [`PixfidError::UnsupportedProjection`] for HSL, HSV and HSP.
    pub fn project(&self, sample: PixelSample) -> Result<ProjectedValue> {
        self.scalar_projection()
            .map(|p| ProjectedValue::Scalar(p.apply(sample)))
            .ok_or(PixfidError::UnsupportedProjection(*self))
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorModel {
    type Err = PixfidError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ColorModel::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| PixfidError::UnknownColorModel(s.to_string()))
    }
}
