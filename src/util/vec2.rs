use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector for arena positions, velocities and forces
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_sq(&self) -> f32 {
        self.dot(*self)
    }

    /// Zero stays zero
    pub fn normalize(&self) -> Self {
        Self::ZERO.direction_to(*self).0
    }

    #[inline]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    #[inline]
    pub fn distance_to(&self, other: Vec2) -> f32 {
        (other - *self).length()
    }

    /// Unit vector pointing from `self` toward `other` and the distance between them.
    /// Coincident points yield a zero direction.
    pub fn direction_to(&self, other: Vec2) -> (Self, f32) {
        let delta = other - *self;
        match delta.length() {
            len if len > 0.0 => (delta * len.recip(), len),
            _ => (Self::ZERO, 0.0),
        }
    }

    /// Bearing in radians from `self` to `other` (atan2 of the delta)
    #[inline]
    pub fn bearing_to(&self, other: Vec2) -> f32 {
        (other - *self).angle()
    }

    /// Mirror across the surface with unit `normal`
    pub fn reflect(&self, normal: Vec2) -> Self {
        *self - normal * (2.0 * self.dot(normal))
    }

    /// Heading in radians
    #[inline]
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn approx_eq(&self, other: Vec2, epsilon: f32) -> bool {
        let d = other - *self;
        d.x.abs() < epsilon && d.y.abs() < epsilon
    }
}

macro_rules! componentwise {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl $op for Vec2 {
            type Output = Vec2;
            #[inline]
            fn $method(self, rhs: Vec2) -> Vec2 {
                Vec2::new(self.x $sym rhs.x, self.y $sym rhs.y)
            }
        }

        impl $assign for Vec2 {
            #[inline]
            fn $assign_method(&mut self, rhs: Vec2) {
                *self = *self $sym rhs;
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, k: f32) {
        *self = *self * k;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        self * -1.0
    }
}
