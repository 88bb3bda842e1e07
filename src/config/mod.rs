//! Configuration for image comparisons.
//!
//! A [`CompareConfig`] can be built in code or loaded from TOML:
//!
//! ```toml
//! projection = "luma601"
//! radiance_projection = "gray"
//! reduction = "parallel"
//! threads = 4
//! ```
//!
//! Missing keys fall back to [`CompareConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::ColorModel;
use crate::error::{PixfidError, Result};
use crate::metrics::Reduction;

/// Settings shared by every metric in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Scalar projection for MSE and RMSE.
    pub projection: ColorModel,
    /// Scalar projection RASE averages for mean radiance.
    pub radiance_projection: ColorModel,
    /// Summation strategy.
    pub reduction: Reduction,
    /// Worker threads for parallel reduction (`None` = one per CPU).
    pub threads: Option<usize>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            projection: ColorModel::Luma709,
            radiance_projection: ColorModel::Gray,
            reduction: Reduction::Sequential,
            threads: None,
        }
    }
}

impl CompareConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MSE/RMSE projection.
    pub fn projection(mut self, model: ColorModel) -> Self {
        self.projection = model;
        self
    }

    /// Set the RASE radiance projection.
    pub fn radiance_projection(mut self, model: ColorModel) -> Self {
        self.radiance_projection = model;
        self
    }

    /// Enable parallel reduction, optionally with a fixed thread count.
    pub fn parallel(mut self, threads: Option<usize>) -> Self {
        self.reduction = Reduction::Parallel;
        self.threads = threads;
        self
    }

    /// Thread count of a parallel reduction.
    ///
    /// Unset means the global rayon pool, normally one thread per CPU.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PixfidError::Config(e.to_string()))
    }

    /// Check that both projections are computable and the thread count is usable.
    pub fn validate(&self) -> Result<()> {
        for model in [self.projection, self.radiance_projection] {
            if model.scalar_projection().is_none() {
                return Err(PixfidError::UnsupportedProjection(model));
            }
        }

        if self.threads == Some(0) {
            return Err(PixfidError::Config("threads must be at least 1".into()));
        }

        if self.threads.is_some() && self.reduction == Reduction::Sequential {
            log::warn!("threads is set but reduction is sequential; it will be ignored");
        }

        Ok(())
    }
}
