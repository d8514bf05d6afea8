use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::error::CoreError;

/// A point on the complex plane as two `f64` components.
///
/// The escape evaluator works on raw `(re, im)` pairs; this type is the
/// currency of the viewport and region math around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

/// Scalar multiplication: `Complex * f64`.
impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

/// Parses `"re,im"`, e.g. `"-0.5,0.0"`.
impl FromStr for Complex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidComplex(s.to_string());
        let (re, im) = s.split_once(',').ok_or_else(invalid)?;
        let re = re.trim().parse::<f64>().map_err(|_| invalid())?;
        let im = im.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self { re, im })
    }
}
