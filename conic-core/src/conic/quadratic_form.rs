use std::fmt::{self, Display};

use derive_more::Deref;
use nalgebra::{Matrix3, Vector3};

use crate::{
    line::Line,
    math::homogeneous::{conjugate, quadratic, rigid, sym},
    r2::R2,
};

/// Symmetric 3×3 matrix `M` over `(w, x, y)`: `p` is on the conic iff `pᵗ·M·p = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Deref)]
pub struct QuadraticForm(pub Matrix3<f64>);

impl QuadraticForm {
    /// `(M + Mᵗ) / 2`, removing rounding asymmetry from products like `T⁻ᵗ·Q·T⁻¹`.
    pub fn symmetrized(m: Matrix3<f64>) -> Self {
        QuadraticForm((m + m.transpose()) * 0.5)
    }

    /// Ellipse with semi-axes `a`, `b`, centered at `center`, major axis at angle `theta`.
    pub fn ellipse(center: &R2<f64>, theta: f64, a: f64, b: f64) -> Self {
        let q = Matrix3::from_diagonal(&Vector3::new(-1., 1. / (a * a), 1. / (b * b)));
        QuadraticForm::symmetrized(conjugate(&q, &rigid(center, theta)))
    }

    /// Hyperbola `x²/a² - y²/b² = 1` in the frame at `center` rotated by `theta`.
    pub fn hyperbola(center: &R2<f64>, theta: f64, a: f64, b: f64) -> Self {
        let q = Matrix3::from_diagonal(&Vector3::new(-1., 1. / (a * a), -1. / (b * b)));
        QuadraticForm::symmetrized(conjugate(&q, &rigid(center, theta)))
    }

    /// Parabola `x² = 4e·y` in the frame at `vertex` rotated by `theta`.
    pub fn parabola(vertex: &R2<f64>, theta: f64, e: f64) -> Self {
        let q = Matrix3::new(
            0.     , 0., -2. * e,
            0.     , 1.,  0.    ,
            -2. * e, 0.,  0.    ,
        );
        QuadraticForm::symmetrized(conjugate(&q, &rigid(vertex, theta)))
    }

    /// Line pair `l ∪ m` as a (rank ≤ 2) quadratic form: `sym(l ⊗ m)`.
    pub fn degenerate(l: &Line, m: &Line) -> Self {
        QuadraticForm(sym(&(l.std_form() * m.std_form().transpose())))
    }

    /// Member of the pencil spanned by `c1`, `c2` that also passes through `p`:
    /// `(pᵗc2p)·c1 − (pᵗc1p)·c2`.
    pub fn pencil(c1: &QuadraticForm, c2: &QuadraticForm, p: &R2<f64>) -> Self {
        QuadraticForm(c1.0 * c2.eval(p) - c2.0 * c1.eval(p))
    }

    /// Conic through five points; unique when no four are collinear.
    pub fn five_points(p: &[R2<f64>; 5]) -> Self {
        let line = |i: usize, j: usize| Line::through(&p[i], &p[j]);
        let c1 = QuadraticForm::degenerate(&line(0, 1), &line(2, 3));
        let c2 = QuadraticForm::degenerate(&line(0, 2), &line(1, 3));
        QuadraticForm::pencil(&c1, &c2, &p[4])
    }

    /// Coefficients of `a00·x² + a11·y² + a22 + 2·a01·xy + 2·a02·x + 2·a12·y`, laid
    /// out over `(w, x, y)`.
    pub fn six_coefficients(a00: f64, a11: f64, a22: f64, a01: f64, a02: f64, a12: f64) -> Self {
        QuadraticForm(Matrix3::new(
            a22, a02, a12,
            a02, a00, a01,
            a12, a01, a11,
        ))
    }

    pub fn eval(&self, p: &R2<f64>) -> f64 {
        quadratic(&self.0, &p.homogeneous())
    }

    pub fn is_symmetric(&self) -> bool {
        self.0 == self.0.transpose()
    }

    /// Center of a central conic, from the cofactors of `M`.
    ///
    /// Not finite for parabolas (zero first cofactor).
    pub fn center(&self) -> R2<f64> {
        let m = &self.0;
        let w = m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(1, 2)];
        let x = m[(1, 2)] * m[(0, 2)] - m[(2, 2)] * m[(0, 1)];
        let y = m[(0, 1)] * m[(1, 2)] - m[(1, 1)] * m[(0, 2)];
        R2::from_homogeneous(&Vector3::new(w, x, y))
    }

    /// Scale so the largest-magnitude entry is `1`; for comparing forms up to a scalar.
    pub fn normalized(&self) -> Self {
        let max = self.0.iter().cloned().fold(0., |acc: f64, v| if v.abs() > acc.abs() { v } else { acc });
        QuadraticForm(self.0 / max)
    }
}

impl Display for QuadraticForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        write!(f, "[")?;
        for r in 0..3 {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{:.4}, {:.4}, {:.4}]", m[(r, 0)], m[(r, 1)], m[(r, 2)])?;
        }
        write!(f, "]")
    }
}
