//! Full-reference fidelity metrics.
//!
//! This module reduces two equally shaped [`SampleGrid`]s to scores:
//! - **MSE** (Mean Squared Error) over the grids' scalar projection
//! - **RMSE** (Root Mean Squared Error), derived from MSE
//! - **SAM** (Spectral Angle Mapper) over the raw RGBA vectors
//! - **RASE** (Relative Average Spectral Error), spectral angle relative to mean radiance
//!
//! Every metric panics if the grids differ in shape. Degenerate input
//! (transparent pixels, zero vectors, empty grids) is not intercepted and shows
//! up as NaN or infinity in the score.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixfid::color::ColorModel;
//! use pixfid::grid::SampleGrid;
//! use pixfid::metrics::{mse, sam, Reduction};
//!
//! let a = SampleGrid::new(&original, ColorModel::Luma709)?;
//! let b = SampleGrid::new(&distorted, ColorModel::Luma709)?;
//! println!("MSE: {:.6}", mse(&a, &b, Reduction::Sequential));
//! println!("SAM: {:.6} rad", sam(&a, &b, Reduction::Parallel));
//! ```

mod comparator;
mod mse;
mod rase;
mod registry;
mod sam;

pub use comparator::Comparator;
pub use mse::{mse, rmse};
pub use rase::{mean_radiance, rase};
pub use registry::{Metric, MetricResult};
pub use sam::{sam, spectral_angle};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How the per-pixel terms of a metric are summed.
///
/// Both strategies sum each row first. `Parallel` combines the row sums in
/// whatever order rayon joins them, so the last few ULPs may differ from
/// `Sequential`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Single-threaded, row by row.
    #[default]
    Sequential,
    /// Rows distributed over the current rayon pool.
    Parallel,
}

/// Sum `term(row, col)` over a `rows × cols` grid.
pub(crate) fn accumulate<F>(rows: usize, cols: usize, reduction: Reduction, term: F) -> f64
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    let row_sum = |row: usize| (0..cols).map(|col| term(row, col)).sum::<f64>();

    match reduction {
        Reduction::Sequential => (0..rows).map(row_sum).sum(),
        Reduction::Parallel => (0..rows).into_par_iter().map(row_sum).sum(),
    }
}
