//! Image comparator for running registry metrics under one configuration.
//!
//! Builds the sample grids each metric needs and picks the reduction strategy.
//! Parallel runs use the global rayon pool unless a thread count is
//! configured, in which case one pool of that size is built on first use and
//! shared by every later call (and by clones of the comparator).

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use rayon::ThreadPool;

use crate::config::CompareConfig;
use crate::error::{PixfidError, Result};
use crate::grid::{ImageSource, SampleGrid};

use super::{Metric, MetricResult, Reduction};

/// Runs metrics on pairs of images.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
    pool: Arc<OnceLock<ThreadPool>>,
}

impl Comparator {
    /// Create a comparator.
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            pool: Arc::default(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compute one metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric is not implemented, a configured
    /// projection is unsupported, or the thread pool cannot be built.
    ///
    /// # Panics
    ///
    /// Panics if the images differ in size.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pixfid::metrics::{Comparator, Metric};
    ///
    /// let comparator = Comparator::default();
    /// let result = comparator.compare(Metric::Mse, &original, &distorted)?;
    /// println!("{}", result);
    /// ```
    pub fn compare<A, B>(&self, metric: Metric, a: &A, b: &B) -> Result<MetricResult>
    where
        A: ImageSource + ?Sized,
        B: ImageSource + ?Sized,
    {
        self.install(|| self.evaluate(metric, a, b))?
    }

    /// Compute several metrics on the same pair, in order.
    ///
    /// Stops at the first metric that fails.
    pub fn compare_all<A, B>(&self, metrics: &[Metric], a: &A, b: &B) -> Result<Vec<MetricResult>>
    where
        A: ImageSource + ?Sized,
        B: ImageSource + ?Sized,
    {
        self.install(|| {
            metrics
                .iter()
                .map(|&metric| self.evaluate(metric, a, b))
                .collect()
        })?
    }

    fn evaluate<A, B>(&self, metric: Metric, a: &A, b: &B) -> Result<MetricResult>
    where
        A: ImageSource + ?Sized,
        B: ImageSource + ?Sized,
    {
        if !metric.is_implemented() {
            return Err(PixfidError::NotImplemented(metric));
        }

        let model = match metric {
            Metric::Rase => self.config.radiance_projection,
            _ => self.config.projection,
        };
        let grid_a = SampleGrid::new(a, model)?;
        let grid_b = SampleGrid::new(b, model)?;

        let start = Instant::now();
        let result = metric.evaluate(&grid_a, &grid_b, self.config.reduction)?;

        log::debug!(
            "{} over {}x{} ({}, {:?}) in {} ms",
            metric,
            grid_a.rows(),
            grid_a.cols(),
            model,
            self.config.reduction,
            start.elapsed().as_millis()
        );
        if !result.is_finite() {
            log::warn!("{} produced a non-finite score: {}", metric, result);
        }

        Ok(result)
    }

    /// Run `job` inside the sized pool when the reduction is parallel.
    fn install<T, F>(&self, job: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match (self.config.reduction, self.config.threads) {
            (Reduction::Sequential, _) | (Reduction::Parallel, None) => Ok(job()),
            (Reduction::Parallel, Some(_)) => Ok(self.pool()?.install(job)),
        }
    }

    fn pool(&self) -> Result<&ThreadPool> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }

        let threads = self.config.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| PixfidError::Internal(e.to_string()))?;
        log::debug!("Built rayon pool with {} threads", threads);

        // a concurrent first call may have won; its pool is kept and ours dropped
        Ok(self.pool.get_or_init(|| pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorModel;
    use crate::grid::{Bounds, Window};
    use crate::metrics::test_util::{pattern, uniform};

    #[test]
    fn test_comparator_identical_images() {
        let img = uniform(2, 2, [40000, 40000, 40000, 65535]);
        let comparator = Comparator::default();

        let results = comparator
            .compare_all(&[Metric::Mse, Metric::Rmse, Metric::Sam], &img, &img)
            .unwrap();
        for result in results {
            assert_eq!(result.value(), Some(0.0), "{}", result.metric);
        }
    }

    #[test]
    fn test_comparator_one_channel_shift() {
        let black = uniform(1, 1, [0, 0, 0, 65535]);
        let red = uniform(1, 1, [65535, 0, 0, 65535]);
        let comparator = Comparator::default();

        let mse = comparator.compare(Metric::Mse, &black, &red).unwrap();
        assert!((mse.value().unwrap() - 0.045_198_76).abs() < 1e-9);
    }

    #[test]
    fn test_comparator_uses_configured_projection() {
        let black = uniform(1, 1, [0, 0, 0, 65535]);
        let red = uniform(1, 1, [65535, 0, 0, 65535]);
        let comparator = Comparator::new(CompareConfig::new().projection(ColorModel::Luma601));

        let rmse = comparator.compare(Metric::Rmse, &black, &red).unwrap();
        assert!((rmse.value().unwrap() - 0.2989).abs() < 1e-12);
    }

    #[test]
    fn test_comparator_parallel_matches_sequential() {
        let img1 = pattern(50, 30, 21);
        let img2 = pattern(50, 30, 22);
        let metrics = [Metric::Mse, Metric::Rmse, Metric::Sam, Metric::Rase];

        let seq = Comparator::default().compare_all(&metrics, &img1, &img2).unwrap();
        let par = Comparator::new(CompareConfig::new().parallel(Some(2)))
            .compare_all(&metrics, &img1, &img2)
            .unwrap();

        for (s, p) in seq.iter().zip(&par) {
            let (s, p) = (s.value().unwrap(), p.value().unwrap());
            assert!((s - p).abs() <= 1e-12 * s.abs());
        }
    }

    #[test]
    fn test_comparator_reuses_sized_pool() {
        let img1 = pattern(16, 12, 31);
        let img2 = pattern(16, 12, 32);
        let comparator = Comparator::new(CompareConfig::new().parallel(Some(2)));
        assert!(comparator.pool.get().is_none());

        let seq = Comparator::default().compare(Metric::Sam, &img1, &img2).unwrap().value().unwrap();
        let first = comparator.compare(Metric::Sam, &img1, &img2).unwrap();
        let pool = comparator.pool.get().unwrap() as *const ThreadPool;
        assert_eq!(comparator.pool.get().unwrap().current_num_threads(), 2);

        let clone = comparator.clone();
        for c in [&comparator, &clone, &comparator] {
            let par = c.compare(Metric::Sam, &img1, &img2).unwrap().value().unwrap();
            assert!((seq - par).abs() <= 1e-12 * seq.abs());
        }
        assert!(std::ptr::eq(comparator.pool.get().unwrap(), pool));
        assert!(std::ptr::eq(clone.pool.get().unwrap(), pool));
        assert!((seq - first.value().unwrap()).abs() <= 1e-12 * seq.abs());
    }

    #[test]
    fn test_comparator_unsized_parallel_uses_global_pool() {
        let img1 = pattern(16, 12, 33);
        let img2 = pattern(16, 12, 34);
        let comparator = Comparator::new(CompareConfig::new().parallel(None));

        let par = comparator.compare(Metric::Mse, &img1, &img2).unwrap();
        assert!(comparator.pool.get().is_none());

        let seq = Comparator::default().compare(Metric::Mse, &img1, &img2).unwrap();
        let (s, p) = (seq.value().unwrap(), par.value().unwrap());
        assert!((s - p).abs() <= 1e-12 * s.abs());
    }

    #[test]
    fn test_comparator_windows_of_one_image() {
        let img = pattern(8, 8, 23);
        let left = Window::new(&img, Bounds::new(0, 0, 4, 8));
        let right = Window::new(&img, Bounds::new(4, 0, 8, 8));

        let comparator = Comparator::default();
        assert_eq!(comparator.compare(Metric::Mse, &left, &left).unwrap().value(), Some(0.0));
        assert!(comparator.compare(Metric::Mse, &left, &right).unwrap().value().unwrap() > 0.0);
    }

    #[test]
    fn test_comparator_degenerate_rase() {
        let clear = uniform(2, 2, [0, 0, 0, 0]);
        let result = Comparator::default().compare(Metric::Rase, &clear, &clear).unwrap();
        assert!(!result.is_finite());
    }

    #[test]
    fn test_comparator_not_implemented() {
        let img = uniform(2, 2, [1, 1, 1, 65535]);
        let err = Comparator::default().compare(Metric::Ssim, &img, &img).unwrap_err();
        assert!(matches!(err, PixfidError::NotImplemented(Metric::Ssim)));
    }

    #[test]
    fn test_comparator_unsupported_projection() {
        let img = uniform(2, 2, [1, 1, 1, 65535]);
        let comparator = Comparator::new(CompareConfig::new().projection(ColorModel::Hsl));
        let err = comparator.compare(Metric::Mse, &img, &img).unwrap_err();
        assert!(matches!(err, PixfidError::UnsupportedProjection(ColorModel::Hsl)));
    }

    #[test]
    #[should_panic(expected = "grid shape mismatch")]
    fn test_comparator_shape_mismatch_panics() {
        let a = uniform(2, 2, [1, 1, 1, 65535]);
        let b = uniform(3, 2, [1, 1, 1, 65535]);
        let _ = Comparator::default().compare(Metric::Sam, &a, &b);
    }
}
