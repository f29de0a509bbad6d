use std::ops::{Add, Mul, Neg, Sub};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0., y: 0. };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` degrees (0 is +x, growing toward +y).
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn cross(self, w: Vec2) -> f64 {
        self.x * w.y - self.y * w.x
    }

    pub fn dot(self, w: Vec2) -> f64 {
        self.x * w.x + self.y * w.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + w.x,
            y: self.y + w.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - w.x,
            y: self.y - w.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2 {
            x: self.x * k,
            y: self.y * k,
        }
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod vec2_tests {
    use super::*;

    fn assert_feq(left: f64, right: f64) {
        if (left - right).abs() > 1e-9 {
            panic!("Float equal assertion failed, {left} != {right}");
        }
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1., 2.);
        let b = Vec2::new(3., -1.);
        assert_eq!(a + b, Vec2::new(4., 1.));
        assert_eq!(a - b, Vec2::new(-2., 3.));
        assert_eq!(a * 2., Vec2::new(2., 4.));
        assert_eq!(-a, Vec2::new(-1., -2.));
        assert_feq(a.dot(b), 1.);
        assert_feq(a.cross(b), -7.);
    }

    #[test]
    fn angle_convention() {
        let right = Vec2::from_angle(0.);
        assert_feq(right.x, 1.);
        assert_feq(right.y, 0.);

        let down = Vec2::from_angle(90.);
        assert_feq(down.x, 0.);
        assert_feq(down.y, 1.);

        assert_feq(Vec2::from_angle(-90.).y, -1.);
        assert_feq(Vec2::from_angle(450.).y, 1.);
    }
}
