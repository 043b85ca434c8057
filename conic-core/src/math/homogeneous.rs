//! 3×3 helpers over homogeneous `(w, x, y)` coordinates.

use nalgebra::{Matrix3, Vector3};

use crate::r2::R2;

/// `A + Aᵗ`
pub fn sym(m: &Matrix3<f64>) -> Matrix3<f64> {
    m + m.transpose()
}

/// Rigid motion taking canonical coordinates to the plane: rotate by `theta`, then translate by `t`.
pub fn rigid(t: &R2<f64>, theta: f64) -> Matrix3<f64> {
    let (sin, cos) = theta.sin_cos();
    Matrix3::new(
        1. , 0. ,  0. ,
        t.x, cos, -sin,
        t.y, sin,  cos,
    )
}

/// Rotation by `theta` about the point `p`.
pub fn rotation_about(p: &R2<f64>, theta: f64) -> Matrix3<f64> {
    rigid(p, theta) * translation(&-*p)
}

pub fn translation(t: &R2<f64>) -> Matrix3<f64> {
    rigid(t, 0.)
}

/// Inverse of a matrix produced by [`rigid`]: `[1, 0; -Rᵗt, Rᵗ]`.
pub fn rigid_inverse(m: &Matrix3<f64>) -> Matrix3<f64> {
    let rt = m.fixed_view::<2, 2>(1, 1).transpose();
    let t = m.fixed_view::<2, 1>(1, 0);
    let ti = -(rt * t);
    Matrix3::new(
        1.   , 0.       , 0.       ,
        ti[0], rt[(0, 0)], rt[(0, 1)],
        ti[1], rt[(1, 0)], rt[(1, 1)],
    )
}

/// Express a quadratic form given in canonical coordinates in plane coordinates,
/// where `to_plane` maps canonical points to the plane: `T⁻ᵗ·Q·T⁻¹`.
pub fn conjugate(q: &Matrix3<f64>, to_plane: &Matrix3<f64>) -> Matrix3<f64> {
    let inv = rigid_inverse(to_plane);
    inv.transpose() * q * inv
}

/// `pᵗ·M·p`
pub fn quadratic(m: &Matrix3<f64>, p: &Vector3<f64>) -> f64 {
    p.dot(&(m * p))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn rigid_roundtrip() {
        let m = rigid(&R2::new(2., -1.), PI / 3.);
        let id = m * rigid_inverse(&m);
        assert_relative_eq!(id, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn rotation_fixes_center() {
        let c = R2::new(3., 4.);
        let m = rotation_about(&c, 1.234);
        let image = R2::from_homogeneous(&(m * c.homogeneous()));
        assert_relative_eq!(image, c, epsilon = 1e-12);
    }

    #[test]
    fn conjugated_circle() {
        // Unit circle, moved to (2, 0)
        let q = Matrix3::from_diagonal(&Vector3::new(-1., 1., 1.));
        let m = conjugate(&q, &rigid(&R2::new(2., 0.), 0.7));
        assert_abs_diff_eq!(quadratic(&m, &R2::new(3., 0.).homogeneous()), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(quadratic(&m, &R2::new(2., 1.).homogeneous()), 0., epsilon = 1e-12);
        assert_relative_eq!(m, m.transpose(), epsilon = 1e-12);
    }
}
