use crate::math;

/// A 2D vector used for position, velocity and steering forces.
///
/// Every operation returns a new value; nothing mutates through a shared
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Unit vector pointing at `radians` from the positive x axis.
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = math::sin_cos(radians);
        Self { x: cos, y: sin }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Left fold of `others` onto `self`.
    pub fn add_all(&self, others: &[Vector2]) -> Self {
        others.iter().fold(*self, |acc, v| acc + *v)
    }

    pub fn scale(&self, k: f32) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
        }
    }

    pub fn flip(&self) -> Self {
        self.scale(-1.0)
    }

    /// Rotate by `radians`. Positive angles turn counter-clockwise in a y-up
    /// frame; `clockwise` negates the angle.
    pub fn rotate(&self, radians: f32, clockwise: bool) -> Self {
        let radians = if clockwise { -radians } else { radians };
        let (sin, cos) = math::sin_cos(radians);
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// The vector turned a quarter counter-clockwise: `(-y, x)`.
    pub fn perpendicular_ccw(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// The vector turned a quarter clockwise: `(y, -x)`.
    pub fn perpendicular_cw(&self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction. A zero vector has no direction and
    /// normalizes to zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            log::trace!("normalize called on a zero-length vector");
            Self::zero()
        }
    }

    /// Rescale onto the nearest bound when the magnitude falls outside
    /// `[min, max]`. Zero stays zero whatever `min` is.
    pub fn clamp(&self, min: f32, max: f32) -> Self {
        let mag = self.magnitude();
        if mag < min {
            self.normalize().scale(min)
        } else if mag > max {
            self.normalize().scale(max)
        } else {
            *self
        }
    }

    /// Scalar 2D cross product. Positive when `other` lies counter-clockwise
    /// of `self`.
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.x * other.y - other.x * self.y
    }

    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn angle_origin(&self) -> f32 {
        math::atan2(self.y, self.x)
    }

    /// Angle of the displacement from `self` to `target`.
    pub fn angle(&self, target: &Vector2) -> f32 {
        math::atan2(target.y - self.y, target.x - self.x)
    }

    pub fn distance(&self, other: &Vector2) -> f32 {
        (*other - *self).magnitude()
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for (f32, f32) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

impl core::ops::Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl core::ops::Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        self.flip()
    }
}

impl core::ops::AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_add_all_folds_without_mutating() {
        let base = Vector2::new(1.0, 2.0);
        let others = [Vector2::new(3.0, 4.0), Vector2::new(-1.0, 0.5)];
        let sum = base.add_all(&others);
        assert_eq!(sum, Vector2::new(3.0, 6.5));
        assert_eq!(base, Vector2::new(1.0, 2.0));
        assert_eq!(base.add_all(&[]), base);
    }

    #[test]
    fn test_operators() {
        let v1 = Vector2::new(1.0, 2.0);
        let v2 = Vector2::new(3.0, 4.0);
        assert_eq!(v1 + v2, Vector2::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(v2 / 2.0, Vector2::new(1.5, 2.0));
        assert_eq!(-v1, Vector2::new(-1.0, -2.0));

        let mut acc = Vector2::zero();
        acc += v1;
        acc += v2;
        assert_eq!(acc, Vector2::new(4.0, 6.0));
    }

    #[test]
    fn test_magnitude_and_distance() {
        assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector2::new(1.0, 1.0).distance(&Vector2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_normalize_has_unit_length() {
        for v in [
            Vector2::new(3.0, 4.0),
            Vector2::new(-0.001, 0.0),
            Vector2::new(1e4, -2e4),
        ] {
            assert!((v.normalize().magnitude() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let n = Vector2::zero().normalize();
        assert_eq!(n, Vector2::zero());
        assert!(!n.x.is_nan() && !n.y.is_nan());
    }

    #[test]
    fn test_scale_magnitude() {
        let v = Vector2::new(-2.0, 7.0);
        for k in [0.0, 1.0, -3.0, 0.25] {
            assert!((v.scale(k).magnitude() - k.abs() * v.magnitude()).abs() < EPS);
        }
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vector2::new(1.0, 0.0);
        assert!(approx(v.rotate(FRAC_PI_2, false), Vector2::new(0.0, 1.0)));
        assert!(approx(v.rotate(FRAC_PI_2, true), Vector2::new(0.0, -1.0)));
        assert!(approx(v.rotate(PI, false), Vector2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_rotate_round_trip() {
        let v = Vector2::new(2.5, -1.25);
        for theta in [0.1, 1.0, 2.7, -0.4] {
            let back = v.rotate(theta, false).rotate(theta, true);
            assert!(approx(back, v));
        }
    }

    #[test]
    fn test_perpendiculars() {
        let v = Vector2::new(2.0, 1.0);
        assert_eq!(v.perpendicular_ccw(), Vector2::new(-1.0, 2.0));
        assert_eq!(v.perpendicular_cw(), Vector2::new(1.0, -2.0));
        assert_eq!(v.dot(&v.perpendicular_ccw()), 0.0);
        assert!(v.cross(&v.perpendicular_ccw()) > 0.0);
        assert!(v.cross(&v.perpendicular_cw()) < 0.0);
    }

    #[test]
    fn test_clamp_within_range_is_identity() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.clamp(1.0, 10.0), v);
        assert_eq!(v.clamp(5.0, 5.0), v);
    }

    #[test]
    fn test_clamp_to_violated_bound() {
        let v = Vector2::new(3.0, 4.0);
        assert!((v.clamp(0.0, 2.0).magnitude() - 2.0).abs() < EPS);
        assert!((v.clamp(8.0, 20.0).magnitude() - 8.0).abs() < EPS);
        assert!(approx(v.clamp(0.0, 2.0).normalize(), v.normalize()));
    }

    #[test]
    fn test_clamp_zero_stays_zero() {
        assert_eq!(Vector2::zero().clamp(5.0, 10.0), Vector2::zero());
    }

    #[test]
    fn test_cross_and_dot() {
        let a = Vector2::new(1.0, 0.0);
        let left = Vector2::new(0.0, 1.0);
        let right = Vector2::new(0.0, -1.0);
        assert_eq!(a.cross(&left), 1.0);
        assert_eq!(a.cross(&right), -1.0);
        assert_eq!(a.cross(&Vector2::new(5.0, 0.0)), 0.0);
        assert_eq!(Vector2::new(1.0, 2.0).dot(&Vector2::new(3.0, 4.0)), 11.0);
    }

    #[test]
    fn test_angles() {
        assert!((Vector2::new(0.0, 2.0).angle_origin() - FRAC_PI_2).abs() < EPS);
        assert!((Vector2::new(-1.0, 0.0).angle_origin() - PI).abs() < EPS);
        let from = Vector2::new(1.0, 1.0);
        assert!((from.angle(&Vector2::new(1.0, 5.0)) - FRAC_PI_2).abs() < EPS);
        assert!(approx(Vector2::from_angle(FRAC_PI_2), Vector2::new(0.0, 1.0)));
    }

    #[test]
    fn test_tuple_conversions() {
        let v: Vector2 = (1.5, -2.0).into();
        assert_eq!(v, Vector2::new(1.5, -2.0));
        let t: (f32, f32) = v.into();
        assert_eq!(t, (1.5, -2.0));
        assert_eq!(v.to_array(), [1.5, -2.0]);
    }
}
