//! RASE (Relative Average Spectral Error).
//!
//! `RASE = (100 / mr) · sqrt(mean spectral angle)` where `mr` is the mean
//! radiance of both images under the grids' scalar projection.
//!
//! [`rase`] and [`Metric::evaluate`](super::Metric::evaluate) take radiance
//! from whatever projection the grids carry. [`Comparator`](super::Comparator)
//! builds its RASE grids under the `radiance_projection` of its
//! [`CompareConfig`](crate::config::CompareConfig), the four-channel
//! [`Gray`](crate::color::ColorModel::Gray) projection by default.

use crate::grid::{assert_same_shape, ImageSource, SampleGrid};

use super::sam::mean_angle;
use super::{accumulate, Reduction};

/// Mean projected value over a grid.
///
/// Empty grids yield NaN.
pub fn mean_radiance<S>(grid: &SampleGrid<'_, S>, reduction: Reduction) -> f64
where
    S: ImageSource + ?Sized,
{
    let (rows, cols) = grid.dims();
    accumulate(rows, cols, reduction, |row, col| grid.at(row, col)) / grid.len() as f64
}

/// Relative average spectral error between two grids.
///
/// Zero mean radiance or zero pixel vectors make the result non-finite.
///
/// # Panics
///
/// Panics if the grids differ in shape.
pub fn rase<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>, reduction: Reduction) -> f64
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    assert_same_shape(a, b);

    let mr = (mean_radiance(a, reduction) + mean_radiance(b, reduction)) / 2.0;
    let angle = mean_angle(a, b, reduction);

    (100.0 / mr) * angle.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorModel;
    use crate::metrics::sam;
    use crate::metrics::test_util::{pattern, uniform};

    #[test]
    fn test_mean_radiance_gray() {
        let img = uniform(3, 3, [65535, 65535, 0, 65535]);
        let grid = SampleGrid::new(&img, ColorModel::Gray).unwrap();
        assert!((mean_radiance(&grid, Reduction::Sequential) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rase_identical_images_is_zero() {
        let img = uniform(2, 2, [40000, 40000, 40000, 65535]);
        let a = SampleGrid::new(&img, ColorModel::Gray).unwrap();
        assert_eq!(rase(&a, &a, Reduction::Sequential), 0.0);
    }

    #[test]
    fn test_rase_matches_formula() {
        let img1 = pattern(10, 10, 11);
        let img2 = pattern(10, 10, 12);
        let a = SampleGrid::new(&img1, ColorModel::Gray).unwrap();
        let b = SampleGrid::new(&img2, ColorModel::Gray).unwrap();

        let mr = (mean_radiance(&a, Reduction::Sequential) + mean_radiance(&b, Reduction::Sequential)) / 2.0;
        let expected = 100.0 / mr * sam(&a, &b, Reduction::Sequential).sqrt();
        let value = rase(&a, &b, Reduction::Sequential);
        assert!((value - expected).abs() < 1e-12 * expected);
        assert!(value.is_finite() && value > 0.0);
    }

    #[test]
    fn test_rase_transparent_black_is_non_finite() {
        let clear = uniform(2, 2, [0, 0, 0, 0]);
        let a = SampleGrid::new(&clear, ColorModel::Gray).unwrap();
        let b = SampleGrid::new(&clear, ColorModel::Gray).unwrap();
        assert!(!rase(&a, &b, Reduction::Sequential).is_finite());
    }

    #[test]
    fn test_rase_parallel_agrees() {
        let img1 = pattern(37, 21, 13);
        let img2 = pattern(37, 21, 14);
        let a = SampleGrid::new(&img1, ColorModel::Gray).unwrap();
        let b = SampleGrid::new(&img2, ColorModel::Gray).unwrap();

        let seq = rase(&a, &b, Reduction::Sequential);
        let par = rase(&a, &b, Reduction::Parallel);
        assert!((seq - par).abs() <= 1e-12 * seq);
    }

    #[test]
    #[should_panic(expected = "grid shape mismatch")]
    fn test_rase_shape_mismatch_panics() {
        let img1 = uniform(4, 4, [1, 1, 1, 65535]);
        let img2 = uniform(4, 5, [1, 1, 1, 65535]);
        let a = SampleGrid::new(&img1, ColorModel::Gray).unwrap();
        let b = SampleGrid::new(&img2, ColorModel::Gray).unwrap();
        rase(&a, &b, Reduction::Sequential);
    }
}
