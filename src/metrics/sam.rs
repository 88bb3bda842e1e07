//! SAM (Spectral Angle Mapper).
//!
//! Each pixel is treated as a 4-dimensional `(r, g, b, a)` vector and compared
//! by the angle between the two vectors, which ignores overall brightness.
//! The score is the mean angle in radians, `[0, π/2]` for valid input.

use crate::color::PixelSample;
use crate::grid::{assert_same_shape, ImageSource, SampleGrid};

use super::{accumulate, Reduction};

/// Angle in radians between two pixel vectors.
///
/// A zero vector on either side yields NaN. The cosine is not clamped, so
/// rounding past ±1 also yields NaN.
#[inline]
pub fn spectral_angle(p: PixelSample, q: PixelSample) -> f64 {
    let p = p.to_vector();
    let q = q.to_vector();
    let cos = dot(&p, &q) / (dot(&p, &p) * dot(&q, &q)).sqrt();
    cos.acos()
}

#[inline]
fn dot(u: &[f64; 4], v: &[f64; 4]) -> f64 {
    u.iter().zip(v).map(|(x, y)| x * y).sum()
}

/// Mean spectral angle over the raw samples of two grids.
///
/// The grids' color model is not used; only raw RGBA vectors are compared.
///
/// # Panics
///
/// Panics if the grids differ in shape.
pub fn sam<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>, reduction: Reduction) -> f64
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    assert_same_shape(a, b);
    mean_angle(a, b, reduction)
}

/// Mean of the per-pixel spectral angle. Callers check shape.
pub(super) fn mean_angle<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>, reduction: Reduction) -> f64
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    let (rows, cols) = a.dims();
    let sum = accumulate(rows, cols, reduction, |row, col| {
        spectral_angle(a.pixel(row, col), b.pixel(row, col))
    });

    sum / a.len() as f64
}
