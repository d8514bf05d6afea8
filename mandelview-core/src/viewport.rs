use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::region::ComplexRegion;

/// Maps a square pixel grid onto a [`ComplexRegion`].
///
/// The resolution is fixed at construction; only the region moves as the
/// user pans and zooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    region: ComplexRegion,
    resolution: u32,
}

impl Viewport {
    /// A viewport over [`ComplexRegion::CANONICAL`].
    pub fn new(resolution: u32) -> crate::Result<Self> {
        Self::with_region(resolution, ComplexRegion::CANONICAL)
    }

    pub fn with_region(resolution: u32, region: ComplexRegion) -> crate::Result<Self> {
        if resolution == 0 {
            return Err(CoreError::InvalidResolution(resolution));
        }
        Ok(Self { region, resolution })
    }

    pub fn region(&self) -> ComplexRegion {
        self.region
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Complex-plane distance between horizontally adjacent pixels.
    #[inline]
    pub fn step_re(&self) -> f64 {
        self.region.width / self.resolution as f64
    }

    /// Complex-plane distance between vertically adjacent pixels.
    #[inline]
    pub fn step_im(&self) -> f64 {
        self.region.height / self.resolution as f64
    }

    /// Map a pixel coordinate to a point on the complex plane.
    ///
    /// `(0, 0)` is `(left, top)`. Fractional coordinates are allowed.
    #[inline]
    pub fn pixel_to_complex(&self, px: f64, py: f64) -> Complex {
        self.region.corner() + Complex::new(px * self.step_re(), py * self.step_im())
    }

    /// Inverse of [`pixel_to_complex`](Self::pixel_to_complex).
    #[inline]
    pub fn complex_to_pixel(&self, c: Complex) -> (f64, f64) {
        let offset = c - self.region.corner();
        (offset.re / self.step_re(), offset.im / self.step_im())
    }

    /// Scale the region by `factor` around `center`.
    pub fn zoom_relative(&mut self, center: Complex, factor: f64) {
        self.region = self.region.zoomed(center, factor);
        debug!(
            left = self.region.left,
            top = self.region.top,
            width = self.region.width,
            "Viewport moved"
        );
    }

    /// Zoom by `factor` around the complex point under pixel `(px, py)`.
    pub fn zoom_at_pixel(&mut self, px: f64, py: f64, factor: f64) {
        let center = self.pixel_to_complex(px, py);
        self.zoom_relative(center, factor);
    }

    /// Move the region so `center` becomes its midpoint, keeping the extent.
    pub fn recenter(&mut self, center: Complex) {
        self.zoom_relative(center, 1.0);
    }

    /// Pan by a pixel delta. Content follows the pointer, so dragging right
    /// (`dx > 0`) reveals more of the plane to the left.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let half = self.resolution as f64 / 2.0;
        let center = self.pixel_to_complex(half - dx, half - dy);
        self.recenter(center);
    }

    /// Back to [`ComplexRegion::CANONICAL`].
    pub fn reset(&mut self) {
        self.region = ComplexRegion::CANONICAL;
    }
}
