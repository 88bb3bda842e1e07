//! MSE and RMSE over a scalar projection.
//!
//! - Identical projections: MSE = 0
//! - Luminance projections live in `[0, 1]`, so MSE does too

use crate::grid::{assert_same_shape, ImageSource, SampleGrid};

use super::{accumulate, Reduction};

/// Mean squared error between two projected grids.
///
/// `MSE = (1/size) · Σ (b(i,j) - a(i,j))²`
///
/// # Panics
///
/// Panics if the grids differ in shape.
///
/// # Example
///
/// ```rust,ignore
/// use pixfid::metrics::{mse, Reduction};
///
/// let value = mse(&reference, &distorted, Reduction::Sequential);
/// println!("MSE: {:.6}", value);
/// ```
pub fn mse<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>, reduction: Reduction) -> f64
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    assert_same_shape(a, b);

    let (rows, cols) = a.dims();
    let sum = accumulate(rows, cols, reduction, |row, col| {
        let diff = b.at(row, col) - a.at(row, col);
        diff * diff
    });

    sum / a.len() as f64
}

/// Root mean squared error, `sqrt(MSE)`.
///
/// # Panics
///
/// Panics if the grids differ in shape.
pub fn rmse<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>, reduction: Reduction) -> f64
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    mse(a, b, reduction).sqrt()
}
