/// Angle values with explicit units
use std::f32::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

/// An angle, stored internally in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle {
    radians: f32,
}

impl Angle {
    pub const ZERO: Angle = Angle { radians: 0.0 };

    pub const fn from_radians(radians: f32) -> Self {
        Self { radians }
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            radians: degrees * (PI / 180.0),
        }
    }

    pub const fn as_radians(self) -> f32 {
        self.radians
    }

    pub fn as_degrees(self) -> f32 {
        self.radians * (180.0 / PI)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.radians - rhs.radians)
    }
}

impl Mul<f32> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f32) -> Angle {
        Angle::from_radians(self.radians * rhs)
    }
}
