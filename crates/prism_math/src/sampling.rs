//! Random sampling with an explicit generator handle.
//!
//! Nothing here touches a global or thread-local RNG; callers thread their
//! own generator through so parallel workers never share a stream.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Uniformly distributed unit vector on the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling; the lower bound keeps normalization away from zero
    loop {
        let v = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_f64_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = random_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
            let y = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&y));
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}
