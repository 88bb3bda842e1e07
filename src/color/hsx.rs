//! HSL and HSV triples and the conversion between them.
//!
//! Saturation, lightness and value are in `[0, 1]`. Hue is carried through
//! untouched in whatever unit the caller uses.

/// Hue, saturation, lightness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue.
    pub h: f64,
    /// Saturation (HSL definition).
    pub s: f64,
    /// Lightness.
    pub l: f64,
}

/// Hue, saturation, value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue.
    pub h: f64,
    /// Saturation (HSV definition).
    pub s: f64,
    /// Value.
    pub v: f64,
}

impl Hsl {
    /// Create an HSL triple.
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl Hsv {
    /// Create an HSV triple.
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

impl From<Hsv> for Hsl {
    fn from(c: Hsv) -> Self {
        let l = c.v * (1.0 - c.s / 2.0);
        let s = if l == 0.0 || l == 1.0 {
            0.0
        } else {
            (c.v - l) / l.min(1.0 - l)
        };
        Hsl::new(c.h, s, l)
    }
}

impl From<Hsl> for Hsv {
    fn from(c: Hsl) -> Self {
        let v = c.l + c.s * c.l.min(1.0 - c.l);
        let s = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - c.l / v) };
        Hsv::new(c.h, s, v)
    }
}
