use std::fmt::{self, Display};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::r2::R2;

/// Line in homogeneous standard form: `c + a·x + b·y = 0`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Line {
    pub c: f64,
    pub a: f64,
    pub b: f64,
}

impl Line {
    pub fn new(c: f64, a: f64, b: f64) -> Self {
        Line { c, a, b }
    }

    pub fn from_std_form(v: &Vector3<f64>) -> Self {
        Line { c: v[0], a: v[1], b: v[2] }
    }

    /// Line through two points (cross product of their homogeneous coordinates).
    pub fn through(p: &R2<f64>, q: &R2<f64>) -> Self {
        Line::from_std_form(&p.homogeneous().cross(&q.homogeneous()))
    }

    pub fn std_form(&self) -> Vector3<f64> {
        Vector3::new(self.c, self.a, self.b)
    }

    /// `+∞` for (near-)vertical lines; the test is relative to the coefficients' scale.
    pub fn slope(&self) -> f64 {
        if self.b.abs() > f64::EPSILON * self.a.abs().max(self.b.abs()) {
            -self.a / self.b
        } else {
            f64::INFINITY
        }
    }

    pub fn eval(&self, p: &R2<f64>) -> f64 {
        self.c + self.a * p.x + self.b * p.y
    }

    pub fn distance(&self, p: &R2<f64>) -> f64 {
        self.eval(p).abs() / (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Line through `p` along this line's normal direction `(a, b)`.
    pub fn perpendicular_through(&self, p: &R2<f64>) -> Line {
        let normal_at_infinity = Vector3::new(0., self.a, self.b);
        Line::from_std_form(&p.homogeneous().cross(&normal_at_infinity))
    }

    /// Parallel (or identical) lines meet at infinity: the result is not finite.
    pub fn intersect(&self, o: &Line) -> R2<f64> {
        R2::from_homogeneous(&self.std_form().cross(&o.std_form()))
    }

    /// Foot of the perpendicular from `p` onto this line.
    pub fn foot(&self, p: &R2<f64>) -> R2<f64> {
        self.intersect(&self.perpendicular_through(p))
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {:.3} + {:.3}x + {:.3}y = 0 }}", self.c, self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn through_and_slope() {
        let l = Line::through(&R2::new(0., 1.), &R2::new(2., 2.));
        assert_relative_eq!(l.slope(), 0.5);
        assert_abs_diff_eq!(l.eval(&R2::new(4., 3.)), 0., epsilon = 1e-12);

        let vertical = Line::through(&R2::new(3., 0.), &R2::new(3., 5.));
        assert_eq!(vertical.slope(), f64::INFINITY);
    }

    #[test]
    fn slope_is_scale_invariant() {
        for s in [1., 1e-10, 1e-16, 1e-300, 1e200] {
            // y = x
            assert_relative_eq!(Line::new(0., s, -s).slope(), 1.);
            assert_relative_eq!(Line::new(s, -2. * s, s).slope(), 2.);
            assert_eq!(Line::new(s, s, 0.).slope(), f64::INFINITY);
        }
    }

    #[test]
    fn foot() {
        // y = x
        let l = Line::new(0., 1., -1.);
        let foot = l.foot(&R2::new(0., 2.));
        assert_relative_eq!(foot, R2::new(1., 1.), epsilon = 1e-12);
        assert_relative_eq!(l.distance(&R2::new(0., 2.)), 2_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn parallel() {
        let l0 = Line::new(0., 0., 1.);
        let l1 = Line::new(-1., 0., 1.);
        assert!(!l0.intersect(&l1).is_finite());
    }
}
