use std::{cmp::Reverse, f64::consts::PI};

use itertools::Itertools;
use log::{debug, warn};
use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use ordered_float::OrderedFloat;

use crate::{
    line::Line,
    math::homogeneous::{rigid, rotation_about},
    r2::R2,
};

use super::quadratic_form::QuadraticForm;

/// Iteration cap for the symmetric eigensolver; non-convergence yields an undefined frame.
pub const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Below this `|Δx|` the foci are treated as vertically aligned.
pub const VERTICAL_EPSILON: f64 = 1e-7;

/// Axis data for the pre-rotation parametrization of each family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Canonical {
    /// Semi-axes of `x²/a² + y²/b² = 1`
    Ellipse { a: f64, b: f64 },
    /// Semi-axes of `x²/a² - y²/b² = 1`
    Hyperbola { a: f64, b: f64 },
    /// `e` is half the focus-directrix distance (the focal length).
    Parabola { e: f64, vertex: R2<f64> },
    /// Sign-normalized eigenvalues `(λ0, λ1, λ2)` and axes `(c, a, b) = √|λ|`.
    General { eigenvalues: Vector3<f64>, axes: Vector3<f64> },
}

/// Rotation (homogeneous 3×3, applied last) plus the canonical axis data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalFrame {
    pub rotation: Matrix3<f64>,
    pub canonical: Canonical,
}

/// Angle of the major axis through foci `f0`, `f1`, oriented so the axis points rightward (mod 2π).
pub fn foci_angle(f0: &R2<f64>, f1: &R2<f64>) -> f64 {
    let dx = f1.x - f0.x;
    let dy = f1.y - f0.y;
    if dx.abs() > VERTICAL_EPSILON {
        dy.atan2(dx) + if dx < 0. { PI } else { 0. }
    } else if dy > 0. {
        PI / 2.
    } else {
        -PI / 2.
    }
}

/// Angle taking the canonical `+y` axis onto the direction from the directrix toward the focus.
pub fn directrix_angle(directrix: &Line, focus: &R2<f64>, foot: &R2<f64>) -> f64 {
    let theta = directrix.slope().atan();
    let (sin, cos) = theta.sin_cos();
    let toward_focus = *focus - *foot;
    // Rotated +y axis is (-sin, cos)
    if -sin * toward_focus.x + cos * toward_focus.y < 0. {
        theta + PI
    } else {
        theta
    }
}

impl CanonicalFrame {
    /// Frame with every entry `NaN`; evaluates to `(NaN, NaN)`.
    pub fn undefined() -> Self {
        let nan = Vector3::repeat(f64::NAN);
        CanonicalFrame {
            rotation: Matrix3::repeat(f64::NAN),
            canonical: Canonical::General { eigenvalues: nan, axes: nan },
        }
    }

    /// Semi-major `a = major_axis / 2`; `b = √(a² − e²)` is `NaN` when `a < e`.
    pub fn ellipse(f0: &R2<f64>, f1: &R2<f64>, major_axis: f64) -> (Self, QuadraticForm) {
        let a = major_axis / 2.;
        let e = f0.distance(f1) / 2.;
        let b = (a * a - e * e).sqrt();
        let center = f0.midpoint(f1);
        let theta = foci_angle(f0, f1);
        (
            CanonicalFrame { rotation: rigid(&center, theta), canonical: Canonical::Ellipse { a, b } },
            QuadraticForm::ellipse(&center, theta, a, b),
        )
    }

    /// `b = √(e² − a²)` is `NaN` when `a > e`.
    pub fn hyperbola(f0: &R2<f64>, f1: &R2<f64>, major_axis: f64) -> (Self, QuadraticForm) {
        let a = major_axis / 2.;
        let e = f0.distance(f1) / 2.;
        let b = (e * e - a * a).sqrt();
        let center = f0.midpoint(f1);
        let theta = foci_angle(f0, f1);
        (
            CanonicalFrame { rotation: rigid(&center, theta), canonical: Canonical::Hyperbola { a, b } },
            QuadraticForm::hyperbola(&center, theta, a, b),
        )
    }

    /// Rotation is about the vertex, halfway between the focus and its foot on the directrix.
    pub fn parabola(focus: &R2<f64>, directrix: &Line) -> (Self, QuadraticForm) {
        let foot = directrix.foot(focus);
        let vertex = foot.midpoint(focus);
        let e = foot.distance(focus) / 2.;
        let theta = directrix_angle(directrix, focus, &foot);
        (
            CanonicalFrame { rotation: rotation_about(&vertex, theta), canonical: Canonical::Parabola { e, vertex } },
            QuadraticForm::parabola(&vertex, theta, e),
        )
    }

    /// Eigen-decompose `m`.
    ///
    /// Eigenpairs are ordered by alignment with the `(w, x, y)` axes: the eigenvector with the
    /// largest `|w|` component is primary, then the one with the largest `|x|`. Each eigenvector
    /// is signed so its aligned component is non-negative, and all three eigenvalues are negated
    /// together if the primary one is negative (same zero set).
    pub fn diagonalize(m: &QuadraticForm) -> Self {
        if !m.iter().all(|v| v.is_finite()) {
            debug!("diagonalize: non-finite quadratic form {}", m);
            return CanonicalFrame::undefined();
        }
        let Some(eigen) = SymmetricEigen::try_new(m.0, f64::EPSILON, MAX_EIGEN_ITERATIONS) else {
            warn!("diagonalize: eigensolver did not converge for {}", m);
            return CanonicalFrame::undefined();
        };
        let vectors = &eigen.eigenvectors;
        // First of the largest `|v[row]|` (ties keep solver order)
        let aligned = |row: usize, candidates: &[usize]| -> usize {
            candidates
                .iter()
                .cloned()
                .min_by_key(|&i| Reverse(OrderedFloat(vectors[(row, i)].abs())))
                .unwrap_or(row)
        };
        let i0 = aligned(0, &[0, 1, 2]);
        let rest = (0..3).filter(|&i| i != i0).collect_vec();
        let i1 = aligned(1, &rest);
        let i2 = 3 - i0 - i1;
        let order = [i0, i1, i2];

        let columns: Vec<Vector3<f64>> = order
            .iter()
            .enumerate()
            .map(|(row, &i)| {
                let v = vectors.column(i).into_owned();
                if v[row] < 0. { -v } else { v }
            })
            .collect();
        let rotation = Matrix3::from_columns(&columns);

        let mut eigenvalues = Vector3::new(
            eigen.eigenvalues[i0],
            eigen.eigenvalues[i1],
            eigen.eigenvalues[i2],
        );
        if eigenvalues[0] < 0. {
            eigenvalues = -eigenvalues;
        }
        let axes = eigenvalues.map(|l| l.abs().sqrt());
        debug!("diagonalize: eigenvalues {:?}, axes {:?}", eigenvalues.as_slice(), axes.as_slice());
        CanonicalFrame {
            rotation,
            canonical: Canonical::General { eigenvalues, axes },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn foci_angles() {
        let o = R2::new(0., 0.);
        assert_relative_eq!(foci_angle(&o, &R2::new(1., 1.)), PI / 4.);
        // Direction of travel is folded away: f1 left of f0 gives the same axis
        assert_relative_eq!(foci_angle(&o, &R2::new(-1., -1.)), PI / 4.);
        assert_relative_eq!(foci_angle(&R2::new(-1., 4.), &R2::new(-1., -4.)), -PI / 2.);
        assert_relative_eq!(foci_angle(&o, &R2::new(1e-9, 3.)), PI / 2.);
    }

    #[test]
    fn directrix_orientation() {
        let horizontal = Line::new(0., 0., 1.);
        let up = R2::new(0., 2.);
        assert_relative_eq!(directrix_angle(&horizontal, &up, &horizontal.foot(&up)), 0.);
        let down = R2::new(0., -2.);
        assert_relative_eq!(directrix_angle(&horizontal, &down, &horizontal.foot(&down)), PI);

        // x = 0, focus to the right: +y maps onto +x
        let vertical = Line::new(0., 1., 0.);
        let right = R2::new(2., 0.);
        let theta = directrix_angle(&vertical, &right, &vertical.foot(&right));
        assert_relative_eq!(theta, 3. * PI / 2.);
        let left = R2::new(-2., 0.);
        let theta = directrix_angle(&vertical, &left, &vertical.foot(&left));
        assert_relative_eq!(theta, PI / 2.);
    }

    #[test]
    fn diagonalize_orthonormal() {
        let m = QuadraticForm::ellipse(&R2::new(2., -1.), 0.4, 3., 1.5);
        let frame = CanonicalFrame::diagonalize(&m);
        let v = frame.rotation;
        assert_relative_eq!(v.transpose() * v, Matrix3::identity(), epsilon = 1e-12);
        let Canonical::General { eigenvalues, axes } = frame.canonical else {
            panic!("expected general frame, got {:?}", frame.canonical);
        };
        assert!(eigenvalues[0] >= 0.);
        assert_relative_eq!(axes[0], eigenvalues[0].abs().sqrt());
        // V·Λ·Vᵗ reproduces M up to the joint sign flip
        let rebuilt = v * Matrix3::from_diagonal(&eigenvalues) * v.transpose();
        let sign = if (rebuilt - m.0).norm() < (rebuilt + m.0).norm() { 1. } else { -1. };
        assert_relative_eq!(rebuilt, m.0 * sign, epsilon = 1e-10);
    }

    #[test]
    fn diagonalize_sign_normalization() {
        // x² + y² - 1: primary (w) eigenvalue starts negative
        let m = QuadraticForm::six_coefficients(1., 1., -1., 0., 0., 0.);
        let frame = CanonicalFrame::diagonalize(&m);
        let Canonical::General { eigenvalues, .. } = frame.canonical else { unreachable!() };
        assert_relative_eq!(eigenvalues, Vector3::new(1., -1., -1.));
    }

    #[test]
    fn diagonalize_axis_order() {
        // Already diagonal in (w, x, y): pairs come back in axis order, whatever the solver's
        let m = QuadraticForm::six_coefficients(-5., 3., 2., 0., 0., 0.);
        let frame = CanonicalFrame::diagonalize(&m);
        let Canonical::General { eigenvalues, axes } = frame.canonical else { unreachable!() };
        assert_relative_eq!(eigenvalues, Vector3::new(2., -5., 3.), epsilon = 1e-12);
        assert_relative_eq!(axes, Vector3::new(2_f64.sqrt(), 5_f64.sqrt(), 3_f64.sqrt()), epsilon = 1e-12);
        assert_relative_eq!(frame.rotation, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn diagonalize_non_finite() {
        let m = QuadraticForm(Matrix3::repeat(f64::NAN));
        let frame = CanonicalFrame::diagonalize(&m);
        assert!(frame.rotation.iter().all(|v| v.is_nan()));
    }
}
