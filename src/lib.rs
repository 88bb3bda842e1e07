//! Image Fidelity Metrics Library
//!
//! Full-reference comparison of two equally sized raster images. Each image is
//! viewed as a grid of 16-bit RGBA samples, optionally projected to a scalar
//! (luminance or channel average), and reduced to a score.
//!
//! # Features
//!
//! - **MSE / RMSE**: squared error over a luminance projection
//! - **SAM**: mean spectral angle between RGBA pixel vectors
//! - **RASE**: spectral error relative to mean radiance
//! - **Color Projections**: BT.601, SMPTE 240M, BT.709 and BT.2020 luminance
//! - **Parallel Reduction**: optional row-parallel summation with Rayon
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pixfid::{Comparator, CompareConfig, Metric};
//!
//! let original = image::open("original.png")?;
//! let distorted = image::open("distorted.png")?;
//!
//! let comparator = Comparator::new(CompareConfig::default());
//! let result = comparator.compare(Metric::Rmse, &original, &distorted)?;
//! println!("{}", result);
//! ```
//!
//! # Contract
//!
//! Images of different size are a caller bug: every metric panics rather than
//! returning an error. Degenerate pixels (fully transparent, all-zero) produce
//! NaN or infinite scores instead of errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod metrics;

// Re-export commonly used types
pub use color::{ColorModel, Hsl, Hsv, LumaWeights, PixelSample, ProjectedValue};
pub use config::CompareConfig;
pub use error::{PixfidError, Result};
pub use grid::{Bounds, ImageSource, Rgba16Image, SampleGrid, Window};
pub use metrics::{Comparator, Metric, MetricResult, Reduction};

/// Library version information.
pub mod version {
    /// Library version string.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Library name.
    pub const NAME: &str = env!("CARGO_PKG_NAME");

    /// Get full version string.
    pub fn full_version() -> String {
        format!("{} {}", NAME, VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform(width: u32, height: u32, rgba: [u16; 4]) -> Rgba16Image {
        Rgba16Image::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn test_uniform_gray_scenario() {
        let a = uniform(2, 2, [40000, 40000, 40000, 65535]);
        let b = uniform(2, 2, [40000, 40000, 40000, 65535]);
        let comparator = Comparator::default();

        for metric in [Metric::Mse, Metric::Rmse, Metric::Sam] {
            let result = comparator.compare(metric, &a, &b).unwrap();
            assert_eq!(result.scores, vec![0.0], "{}", metric);
        }
    }

    #[test]
    fn test_one_channel_shift_scenario() {
        let a = uniform(1, 1, [0, 0, 0, 65535]);
        let b = uniform(1, 1, [65535, 0, 0, 65535]);
        let comparator = Comparator::new(CompareConfig::new().projection(ColorModel::Luma709));

        let mse = comparator.compare(Metric::Mse, &a, &b).unwrap().value().unwrap();
        let rmse = comparator.compare(Metric::Rmse, &a, &b).unwrap().value().unwrap();
        assert!((mse - 0.0452).abs() < 1e-4);
        assert!((rmse - 0.2126).abs() < 1e-12);
        assert_eq!(rmse, mse.sqrt());
    }

    #[test]
    fn test_degenerate_rase_scenario() {
        let clear = uniform(2, 2, [0, 0, 0, 0]);
        let result = Comparator::default().compare(Metric::Rase, &clear, &clear).unwrap();
        assert!(!result.value().unwrap().is_finite());
    }

    #[test]
    fn test_float_images_keep_small_differences() {
        use image::{DynamicImage, ImageBuffer, Rgb};

        let float = |red: f32| DynamicImage::ImageRgb32F(ImageBuffer::from_pixel(2, 2, Rgb([red, 0.25, 0.75])));
        let (a, b) = (float(0.5), float(0.5015));

        let mse = Comparator::default().compare(Metric::Mse, &a, &b).unwrap().value().unwrap();
        let widened = Comparator::default()
            .compare(Metric::Mse, &a.to_rgba16(), &b.to_rgba16())
            .unwrap()
            .value()
            .unwrap();
        assert!(mse > 0.0);
        assert!((mse - widened).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let a = Rgba16Image::from_fn(9, 7, |x, y| Rgba([(x * 5000) as u16, (y * 7000) as u16, 1234, 65535]));
        let b = Rgba16Image::from_fn(9, 7, |x, y| Rgba([(y * 3000) as u16, (x * 6000) as u16, 4321, 60000]));
        let comparator = Comparator::default();

        for metric in [Metric::Mse, Metric::Sam] {
            let ab = comparator.compare(metric, &a, &b).unwrap();
            let ba = comparator.compare(metric, &b, &a).unwrap();
            assert_eq!(ab, ba, "{}", metric);
        }
    }

    #[test]
    fn test_version() {
        assert!(version::full_version().starts_with("pixfid "));
    }
}
