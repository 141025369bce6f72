//! Seedable draws used when fish are created.

use core::f32::consts::TAU;
use rand::Rng;

use crate::math;
use crate::vector::Vector2;

/// Gaussian sample with mean 0.5 and standard deviation 0.1, resampled until
/// it lands in `[0, 1]`.
pub fn truncated_gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        // Box-Muller needs both uniforms in (0, 1].
        let u = 1.0 - rng.gen::<f32>();
        let v = 1.0 - rng.gen::<f32>();
        let (_, cos) = math::sin_cos(TAU * v);
        let sample = math::sqrt(-2.0 * math::ln(u)) * cos / 10.0 + 0.5;
        if (0.0..=1.0).contains(&sample) {
            return sample;
        }
    }
}

/// Unit heading built from two truncated Gaussian components.
///
/// Both components are non-negative, so headings cluster around the +x/+y
/// diagonal.
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vector2 {
    loop {
        let heading = Vector2::new(truncated_gaussian(rng), truncated_gaussian(rng)).normalize();
        if !heading.is_zero() {
            return heading;
        }
    }
}

/// Uniform score in `[0, 1)` that ranks fish for leader following.
pub fn leader_score<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}
