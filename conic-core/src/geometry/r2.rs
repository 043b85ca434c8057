use std::{ops::{Sub, Mul, Add, Div, Neg}, fmt::{Display, Formatter, self}};
use approx::{AbsDiffEq, RelativeEq};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

impl<D> R2<D> {
    pub fn new(x: D, y: D) -> Self {
        R2 { x, y }
    }
}

impl R2<f64> {
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }
    pub fn distance(&self, o: &R2<f64>) -> f64 {
        (*self - *o).norm()
    }
    pub fn midpoint(&self, o: &R2<f64>) -> R2<f64> {
        (*self + *o) / 2.
    }
    /// Homogeneous `(w, x, y)` coordinates with `w = 1`.
    pub fn homogeneous(&self) -> Vector3<f64> {
        Vector3::new(1., self.x, self.y)
    }
    /// Dehomogenize a `(w, x, y)` vector; `w == 0` yields infinite/NaN coordinates.
    pub fn from_homogeneous(v: &Vector3<f64>) -> R2<f64> {
        R2 { x: v[1] / v[0], y: v[2] / v[0] }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<D: Display> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl AbsDiffEq for R2<f64> {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2<f64> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl<D: Add<Output = D>> Add for R2<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<D: Neg<Output = D>> Neg for R2<D> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        R2 { x: -self.x, y: -self.y }
    }
}

impl<D: Mul<D, Output = D> + Clone> Mul<D> for R2<D> {
    type Output = Self;
    fn mul(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}

impl<D: Div<D, Output = D> + Clone> Div<D> for R2<D> {
    type Output = Self;
    fn div(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x / rhs.clone(),
            y: self.y / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let p = R2 { x: 1., y: 1. };
        let q = R2 { x: -1., y: 4. };
        assert_relative_eq!(p.distance(&q), 13_f64.sqrt());
        assert_relative_eq!(p.midpoint(&q), R2 { x: 0., y: 2.5 });
    }

    #[test]
    fn homogeneous() {
        let p = R2 { x: 2., y: -3. };
        let h = p.homogeneous() * 4.;
        assert_eq!(R2::from_homogeneous(&h), p);
        assert!(!R2::from_homogeneous(&Vector3::new(0., 1., 1.)).is_finite());
    }
}
