//! Angle parametrizations per family, applied through a cached [`CanonicalFrame`].

use nalgebra::Vector3;

use crate::r2::R2;

use super::frame::{Canonical, CanonicalFrame};

impl Canonical {
    /// Homogeneous point before the frame's rotation is applied, or `None` for general-conic
    /// eigenvalue signs with no real branch (including exact zeros on one of the tested signs).
    pub fn pre_rotation(&self, t: f64) -> Option<Vector3<f64>> {
        let (sin, cos) = t.sin_cos();
        match *self {
            Canonical::Ellipse { a, b } => Some(Vector3::new(1., a * cos, b * sin)),
            Canonical::Hyperbola { a, b } => Some(Vector3::new(1., a / cos, b * t.tan())),
            Canonical::Parabola { e, vertex } => {
                let e4 = 4. * e;
                Some(Vector3::new(e4, e4 * (t + vertex.x), t * t + e4 * vertex.y))
            }
            Canonical::General { eigenvalues, axes } => {
                let (l1, l2) = (eigenvalues[1], eigenvalues[2]);
                let (c, a, b) = (axes[0], axes[1], axes[2]);
                // Parabola-like (zero eigenvalue) and line-pair forms are not distinguished here
                if l1 <= 0. && l2 <= 0. {
                    Some(Vector3::new(1. / c, cos / a, sin / b))
                } else if l1 <= 0. && l2 > 0. {
                    Some(Vector3::new(cos / c, 1. / a, sin / b))
                } else if l2 < 0. {
                    Some(Vector3::new(sin / c, cos / a, 1. / b))
                } else {
                    None
                }
            }
        }
    }
}

impl CanonicalFrame {
    /// `rotation · pre_rotation(t)`, dehomogenized.
    pub fn evaluate(&self, t: f64) -> R2<f64> {
        match self.canonical.pre_rotation(t) {
            Some(v) => R2::from_homogeneous(&(self.rotation * v)),
            None => R2::new(f64::NAN, f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use nalgebra::Matrix3;

    use super::*;
    use crate::conic::quadratic_form::QuadraticForm;

    #[test]
    fn axis_aligned_ellipse() {
        let frame = CanonicalFrame {
            rotation: Matrix3::identity(),
            canonical: Canonical::Ellipse { a: 3., b: 2. },
        };
        assert_relative_eq!(frame.evaluate(0.), R2::new(3., 0.));
        assert_relative_eq!(frame.evaluate(PI / 2.), R2::new(0., 2.), epsilon = 1e-15);
    }

    #[test]
    fn hyperbola_branches() {
        let frame = CanonicalFrame {
            rotation: Matrix3::identity(),
            canonical: Canonical::Hyperbola { a: 1., b: 1. },
        };
        assert_relative_eq!(frame.evaluate(0.), R2::new(1., 0.));
        // Secant parametrization reaches the left branch past |t| = π/2
        assert_relative_eq!(frame.evaluate(PI), R2::new(-1., 0.), epsilon = 1e-15);
    }

    #[test]
    fn general_circle() {
        let m = QuadraticForm::six_coefficients(1., 1., -4., 0., 0., 0.);
        let frame = CanonicalFrame::diagonalize(&m);
        for i in 0..16 {
            let p = frame.evaluate(i as f64 * PI / 8.);
            assert_relative_eq!(p.norm(), 2., epsilon = 1e-12);
        }
    }

    #[test]
    fn general_hyperbola() {
        // x² - y² = 1
        let m = QuadraticForm::six_coefficients(1., -1., -1., 0., 0., 0.);
        let frame = CanonicalFrame::diagonalize(&m);
        let p = frame.evaluate(0.3);
        assert_relative_eq!(p.x * p.x - p.y * p.y, 1., epsilon = 1e-12);
    }

    #[test]
    fn imaginary_conic() {
        // x² + y² + 1 = 0 has no real points
        let m = QuadraticForm::six_coefficients(1., 1., 1., 0., 0., 0.);
        let frame = CanonicalFrame::diagonalize(&m);
        let p = frame.evaluate(0.5);
        assert!(p.x.is_nan() && p.y.is_nan());
    }
}
