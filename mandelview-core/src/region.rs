use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The visible rectangle of the complex plane.
///
/// `(left, top)` is the corner mapped to pixel `(0, 0)`. Imaginary values
/// grow with the pixel row, so `top` is the smallest imaginary part shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ComplexRegion {
    /// The starting rectangle: `[-1.5, 0.5] × [-1.0, 1.0]`.
    pub const CANONICAL: Self = Self {
        left: -1.5,
        top: -1.0,
        width: 2.0,
        height: 2.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> crate::Result<Self> {
        if !(left.is_finite() && top.is_finite()) {
            return Err(CoreError::InvalidRegion {
                reason: format!("corner must be finite, got ({left}, {top})"),
            });
        }
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(CoreError::InvalidRegion {
                reason: format!("extent must be positive and finite, got {width}×{height}"),
            });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// The point mapped to pixel `(0, 0)`.
    #[inline]
    pub fn corner(&self) -> Complex {
        Complex::new(self.left, self.top)
    }

    /// Width and height packed as a complex offset.
    #[inline]
    pub fn extent(&self) -> Complex {
        Complex::new(self.width, self.height)
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Complex {
        self.corner() + self.extent() * 0.5
    }

    /// Derive the next region: scale the extent by `factor`, then place
    /// `center` at the midpoint.
    ///
    /// A factor below 1 zooms in, above 1 zooms out. A non-positive factor
    /// is a caller error and yields a degenerate region.
    pub fn zoomed(&self, center: Complex, factor: f64) -> Self {
        let extent = self.extent() * factor;
        let corner = center - extent * 0.5;
        Self {
            left: corner.re,
            top: corner.im,
            width: extent.re,
            height: extent.im,
        }
    }
}

impl Default for ComplexRegion {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn canonical_center() {
        let c = ComplexRegion::CANONICAL.center();
        assert!((c.re - (-0.5)).abs() < EPSILON);
        assert!(c.im.abs() < EPSILON);
    }

    #[test]
    fn corner_and_extent() {
        let r = ComplexRegion::new(-0.75, 0.1, 0.5, 0.25).unwrap();
        assert_eq!(r.corner(), Complex::new(-0.75, 0.1));
        assert_eq!(r.extent(), Complex::new(0.5, 0.25));
        assert_eq!(r.center(), Complex::new(-0.5, 0.225));
    }

    #[test]
    fn zoom_in_halves_extent_around_center() {
        let r = ComplexRegion::CANONICAL.zoomed(Complex::new(-0.5, 0.0), 0.5);
        assert!((r.width - 1.0).abs() < EPSILON);
        assert!((r.height - 1.0).abs() < EPSILON);
        assert!((r.left - (-1.0)).abs() < EPSILON);
        assert!((r.top - (-0.5)).abs() < EPSILON);
    }

    #[test]
    fn zoom_factor_one_only_recenters() {
        let r = ComplexRegion::CANONICAL.zoomed(Complex::new(1.0, 1.0), 1.0);
        assert_eq!(r.width, 2.0);
        assert_eq!(r.center(), Complex::new(1.0, 1.0));
    }

    #[test]
    fn rejects_degenerate_extent() {
        assert!(ComplexRegion::new(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(ComplexRegion::new(0.0, 0.0, 1.0, -1.0).is_err());
        assert!(ComplexRegion::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(ComplexRegion::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(ComplexRegion::new(-2.0, -1.0, 3.0, 2.0).is_ok());
    }

    #[test]
    fn serde_round_trip_keeps_fields() {
        let r = ComplexRegion::new(-0.75, 0.1, 0.01, 0.01).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: ComplexRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
