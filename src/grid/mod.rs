//! Sample grids: row/column addressed views over an image source.
//!
//! A [`SampleGrid`] pairs an [`ImageSource`] with a scalar projection. Nothing
//! is converted up front; every [`SampleGrid::at`] call reads the raw pixel and
//! projects it again. Use [`SampleGrid::render`] when a projected copy is
//! actually wanted.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixfid::color::ColorModel;
//! use pixfid::grid::SampleGrid;
//!
//! let img = image::open("photo.png")?;
//! let grid = SampleGrid::new(&img, ColorModel::Luma709)?;
//! let (rows, cols) = grid.dims();
//! println!("top-left luminance: {:.4}", grid.at(0, 0));
//! ```

mod source;

pub use source::{Bounds, ImageSource, Rgba16Image, Window};

use crate::color::{ColorModel, PixelSample, ScalarProjection};
use crate::error::{PixfidError, Result};

/// Read-only view over an image under a scalar projection.
#[derive(Debug)]
pub struct SampleGrid<'a, S: ?Sized> {
    source: &'a S,
    bounds: Bounds,
    model: ColorModel,
    projection: ScalarProjection,
}

impl<'a, S: ImageSource + ?Sized> SampleGrid<'a, S> {
    /// Wrap `source` under the given color model.
    ///
    /// # Errors
    ///
    /// Returns [`PixfidError::UnsupportedProjection`] if the model has no
    /// scalar projection from raw RGBA (HSL, HSV, HSP).
    pub fn new(source: &'a S, model: ColorModel) -> Result<Self> {
        let projection = model
            .scalar_projection()
            .ok_or(PixfidError::UnsupportedProjection(model))?;

        Ok(Self {
            source,
            bounds: source.bounds(),
            model,
            projection,
        })
    }

    /// Color model the grid projects through.
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// `(rows, cols)` of the grid.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Number of rows (image height).
    pub fn rows(&self) -> usize {
        self.bounds.height() as usize
    }

    /// Number of columns (image width).
    pub fn cols(&self) -> usize {
        self.bounds.width() as usize
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Whether the grid has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Projected scalar at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.projection.apply(self.pixel(row, col))
    }

    /// Raw sample at `(row, col)`, without projection.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> PixelSample {
        let (rows, cols) = self.dims();
        assert!(
            row < rows && col < cols,
            "sample ({}, {}) outside {}x{} grid",
            row,
            col,
            rows,
            cols
        );
        self.source
            .sample(self.bounds.min_x + col as u32, self.bounds.min_y + row as u32)
    }

    /// Whether both grids have the same number of rows and columns.
    pub fn same_shape<T: ImageSource + ?Sized>(&self, other: &SampleGrid<'_, T>) -> bool {
        self.dims() == other.dims()
    }

    /// Materialize the projection as an opaque 16-bit gray image.
    pub fn render(&self) -> Rgba16Image {
        Rgba16Image::from_fn(self.cols() as u32, self.rows() as u32, |x, y| {
            PixelSample::gray(self.at(y as usize, x as usize)).into()
        })
    }
}

/// Panic unless both grids have the same shape.
///
/// Comparing differently sized images is a caller bug, never truncated or padded.
pub fn assert_same_shape<A, B>(a: &SampleGrid<'_, A>, b: &SampleGrid<'_, B>)
where
    A: ImageSource + ?Sized,
    B: ImageSource + ?Sized,
{
    assert!(
        a.same_shape(b),
        "grid shape mismatch: {}x{} vs {}x{}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols()
    );
}
