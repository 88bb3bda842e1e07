//! Image sources: anything that can hand out 16-bit RGBA samples.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage};

use crate::color::PixelSample;

/// RGBA image with 16-bit channels.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Half-open pixel rectangle `[min_x, max_x) × [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// Inclusive left edge.
    pub min_x: u32,
    /// Inclusive top edge.
    pub min_y: u32,
    /// Exclusive right edge.
    pub max_x: u32,
    /// Exclusive bottom edge.
    pub max_y: u32,
}

impl Bounds {
    /// Create bounds from its corners.
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounds of a `width × height` image anchored at the origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Horizontal extent.
    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Vertical extent.
    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Whether `other` lies entirely inside these bounds.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

/// A decoded image the metric engine can read from.
///
/// Coordinates passed to [`sample`](ImageSource::sample) are absolute, i.e.
/// inside [`bounds`](ImageSource::bounds), which need not start at the origin.
pub trait ImageSource: Sync {
    /// Pixel rectangle covered by the image.
    fn bounds(&self) -> Bounds;

    /// Sample at absolute coordinates `(x, y)`.
    fn sample(&self, x: u32, y: u32) -> PixelSample;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn sample(&self, x: u32, y: u32) -> PixelSample {
        (**self).sample(x, y)
    }
}

impl ImageSource for Rgba16Image {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> PixelSample {
        (*self.get_pixel(x, y)).into()
    }
}

impl ImageSource for RgbaImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> PixelSample {
        (*self.get_pixel(x, y)).into()
    }
}

impl ImageSource for DynamicImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> PixelSample {
        // Keep full precision for 16-bit and float decodes, everything else goes through 8-bit RGBA.
        match self {
            DynamicImage::ImageLuma16(img) => widen16(img.get_pixel(x, y)),
            DynamicImage::ImageLumaA16(img) => widen16(img.get_pixel(x, y)),
            DynamicImage::ImageRgb16(img) => widen16(img.get_pixel(x, y)),
            DynamicImage::ImageRgba16(img) => (*img.get_pixel(x, y)).into(),
            DynamicImage::ImageRgb32F(img) => widen_float(img.get_pixel(x, y)),
            DynamicImage::ImageRgba32F(img) => (*img.get_pixel(x, y)).into(),
            _ => GenericImageView::get_pixel(self, x, y).into(),
        }
    }
}

fn widen16<P: Pixel<Subpixel = u16>>(px: &P) -> PixelSample {
    px.to_rgba().into()
}

fn widen_float<P: Pixel<Subpixel = f32>>(px: &P) -> PixelSample {
    px.to_rgba().into()
}

/// Rectangular sub-view of another source.
///
/// Coordinates stay absolute: a window at `(10, 20)` reports bounds starting
/// at `(10, 20)` and reads the parent's pixel `(10, 20)` for its first sample.
#[derive(Debug)]
pub struct Window<'a, S: ?Sized> {
    source: &'a S,
    bounds: Bounds,
}

impl<'a, S: ImageSource + ?Sized> Window<'a, S> {
    /// Create a window over `source` covering `bounds`.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` is not contained in the source's bounds.
    pub fn new(source: &'a S, bounds: Bounds) -> Self {
        let outer = source.bounds();
        assert!(
            outer.contains(&bounds),
            "window {:?} exceeds source bounds {:?}",
            bounds,
            outer
        );
        Self { source, bounds }
    }
}

impl<S: ImageSource + ?Sized> ImageSource for Window<'_, S> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sample(&self, x: u32, y: u32) -> PixelSample {
        self.source.sample(x, y)
    }
}
