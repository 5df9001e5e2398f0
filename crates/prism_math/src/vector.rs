// Optical helpers on top of glam's DVec3.

use crate::Vec3;

/// Components below this magnitude count as zero in `near_zero`.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Extension trait for `Vec3` with the vector operations scattering needs.
pub trait Vec3Ext {
    /// True if every component is (numerically) zero.
    fn near_zero(&self) -> bool;

    /// Mirror reflection of `self` about the unit normal `n`.
    fn reflect_about(&self, n: Vec3) -> Vec3;

    /// Snell refraction of the unit vector `self` through the unit normal
    /// `n`, with `eta` = incident index / transmitted index.
    ///
    /// The parallel term is clamped so extreme incidence yields a grazing
    /// direction instead of NaN.
    fn refract_through(&self, n: Vec3, eta: f64) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    fn reflect_about(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    fn refract_through(&self, n: Vec3, eta: f64) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = eta * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
