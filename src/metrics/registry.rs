//! Metric registry: names, dispatch and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PixfidError, Result};
use crate::grid::{ImageSource, SampleGrid};

use super::{mse, rase, rmse, sam, Reduction};

/// A named metric.
///
/// Only MSE, RMSE, SAM and RASE are implemented. The others are registered so
/// their names resolve, and report [`PixfidError::NotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Mean Squared Error.
    Mse,
    /// Root Mean Squared Error.
    Rmse,
    /// Spectral Angle Mapper.
    Sam,
    /// Relative Average Spectral Error.
    Rase,
    /// Relative dimensionless global error in synthesis.
    Ergas,
    /// Universal Quality Index.
    Uqi,
    /// Structural Similarity Index.
    Ssim,
    /// Peak Signal-to-Noise Ratio.
    Psnr,
    /// Multi-scale SSIM.
    MsSsim,
    /// Visual Information Fidelity.
    Vif,
    /// Spectral distortion index.
    DLambda,
    /// Spatial distortion index.
    Ds,
    /// Quality with No Reference.
    Qnr,
}

impl Metric {
    /// Every registered metric, implemented ones first.
    pub const ALL: [Metric; 13] = [
        Metric::Mse,
        Metric::Rmse,
        Metric::Sam,
        Metric::Rase,
        Metric::Ergas,
        Metric::Uqi,
        Metric::Ssim,
        Metric::Psnr,
        Metric::MsSsim,
        Metric::Vif,
        Metric::DLambda,
        Metric::Ds,
        Metric::Qnr,
    ];

    /// Registry name.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Mse => "mse",
            Metric::Rmse => "rmse",
            Metric::Sam => "sam",
            Metric::Rase => "rase",
            Metric::Ergas => "ergas",
            Metric::Uqi => "uqi",
            Metric::Ssim => "ssim",
            Metric::Psnr => "psnr",
            Metric::MsSsim => "msssim",
            Metric::Vif => "vif",
            Metric::DLambda => "dlambda",
            Metric::Ds => "ds",
            Metric::Qnr => "qnr",
        }
    }

    /// Whether the metric can be computed.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Metric::Mse | Metric::Rmse | Metric::Sam | Metric::Rase)
    }

    /// Number of scores the metric produces.
    pub fn output_len(&self) -> usize {
        1
    }

    /// Evaluate the metric on two grids.
    ///
    /// Scores use the projection the grids were built with, RASE radiance
    /// included. Only [`Comparator`](super::Comparator) picks a separate
    /// radiance projection.
    ///
    /// # Errors
    ///
    /// Returns [`PixfidError::NotImplemented`] for registered but unimplemented metrics.
    ///
    /// # Panics
    ///
    /// Panics if the grids differ in shape.
    pub fn evaluate<A, B>(
        &self,
        a: &SampleGrid<'_, A>,
        b: &SampleGrid<'_, B>,
        reduction: Reduction,
    ) -> Result<MetricResult>
    where
        A: ImageSource + ?Sized,
        B: ImageSource + ?Sized,
    {
        let score = match self {
            Metric::Mse => mse(a, b, reduction),
            Metric::Rmse => rmse(a, b, reduction),
            Metric::Sam => sam(a, b, reduction),
            Metric::Rase => rase(a, b, reduction),
            other => return Err(PixfidError::NotImplemented(*other)),
        };

        Ok(MetricResult::new(*self, vec![score]))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = PixfidError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| PixfidError::UnknownMetric(s.to_string()))
    }
}

/// Scores produced by one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    /// Metric that produced the scores.
    pub metric: Metric,

    /// Scores in metric-defined order. May contain NaN or infinity for
    /// degenerate input.
    pub scores: Vec<f64>,
}

impl MetricResult {
    /// Create a result.
    pub fn new(metric: Metric, scores: Vec<f64>) -> Self {
        Self { metric, scores }
    }

    /// First score, if any.
    pub fn value(&self) -> Option<f64> {
        self.scores.first().copied()
    }

    /// Whether every score is finite.
    pub fn is_finite(&self) -> bool {
        self.scores.iter().all(|s| s.is_finite())
    }
}

impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.metric)?;
        for score in &self.scores {
            write!(f, " {}", score)?;
        }
        Ok(())
    }
}
