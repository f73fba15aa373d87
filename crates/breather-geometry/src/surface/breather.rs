//! Breather surface.

use breather_core::{BreatherError, Result};
use breather_math::{DVec3, Point3, Vector3};

use super::Surface;
use crate::params::ParamRange;

/// Evaluate the breather surface at `(u, v)` for shape coefficient `a`.
///
/// With `w = sqrt(1 - a^2)` and
/// `denom = a * ((w cosh(a u))^2 + (a sin(w v))^2)`:
///
/// ```text
/// x = -u + 2(1 - a^2) / denom * cosh(a u) sin(a u)
/// y = 2w cosh(a u) / denom * (-w cos(v) cos(w v) - sin(v) sin(w v))
/// z = 2w cosh(a u) / denom * (-w sin(v) cos(w v) + cos(v) sin(w v))
/// ```
///
/// `a` must lie strictly inside `(0, 1)`; at either end `denom` or `w`
/// vanishes and the result is meaningless.
#[inline]
pub fn breather_point(u: f64, v: f64, a: f64) -> Point3 {
    debug_assert!(a > 0.0 && a < 1.0, "shape coefficient {a} outside (0, 1)");

    let w = (1.0 - a * a).sqrt();
    let cosh_au = (a * u).cosh();
    let sin_wv = (w * v).sin();
    let cos_wv = (w * v).cos();
    let denom = a * ((w * cosh_au).powi(2) + (a * sin_wv).powi(2));

    let x = -u + 2.0 * (1.0 - a * a) / denom * cosh_au * (a * u).sin();
    let scale = 2.0 * w * cosh_au / denom;
    let y = scale * (-w * v.cos() * cos_wv - v.sin() * sin_wv);
    let z = scale * (-w * v.sin() * cos_wv + v.cos() * sin_wv);

    DVec3::new(x, y, z)
}

/// The breather surface for a fixed shape coefficient, restricted to a
/// rectangular parameter domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreatherSurface {
    shape_coefficient: f64,
    u_range: ParamRange,
    v_range: ParamRange,
}

impl BreatherSurface {
    /// Create a breather surface with the given shape coefficient.
    ///
    /// Returns `InvalidParameter` unless `0 < a < 1`.
    pub fn new(shape_coefficient: f64, u_range: ParamRange, v_range: ParamRange) -> Result<Self> {
        if !(shape_coefficient > 0.0 && shape_coefficient < 1.0) {
            return Err(BreatherError::InvalidParameter(format!(
                "shape coefficient must lie in (0, 1), got {shape_coefficient}"
            )));
        }
        Ok(Self {
            shape_coefficient,
            u_range,
            v_range,
        })
    }
}

impl Surface for BreatherSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        breather_point(u, v, self.shape_coefficient)
    }

    /// Central-difference estimate; the mesh generator does its own forward
    /// differencing and never calls this.
    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        const H: f64 = 1e-5;
        let du = self.point_at(u + H, v) - self.point_at(u - H, v);
        let dv = self.point_at(u, v + H) - self.point_at(u, v - H);
        du.cross(dv).normalize_or_zero()
    }

    fn domain_u(&self) -> (f64, f64) {
        (self.u_range.min, self.u_range.max)
    }

    fn domain_v(&self) -> (f64, f64) {
        (self.v_range.min, self.v_range.max)
    }
}
