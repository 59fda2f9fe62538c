//! 2D vector math with a vestigial z component.
//!
//! Every algorithm in this crate is planar. `z` is carried through the
//! arithmetic operators but ignored by [`Vector::magnitude`] and
//! [`Vector::angle`].
//!
//! In-place arithmetic uses the assign operators (`+=`, `-=`, `*=`, `/=`),
//! copy-producing arithmetic uses the plain operators. Both accept another
//! vector, a scalar (broadcast to all three components) or anything else
//! that converts into a [`Vector`].

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use crate::error::GeomError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Winding order used to pick the side of an edge normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    Clockwise,
    /// `(v.y, -v.x)` for edge `v`. Outward for counter-clockwise loops.
    #[default]
    CounterClockwise,
}

impl Vector {
    pub const ZERO: Vector = Vector::new3(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn new3(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `s`.
    pub const fn splat(s: f64) -> Self {
        Self::new3(s, s, s)
    }

    /// Each component uniform in [-1, 1].
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new3(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )
    }

    /// Euclidean length of (x, y).
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rescale (x, y) to `magnitude`, keeping the angle.
    pub fn set_magnitude(&mut self, magnitude: f64) {
        let angle = self.angle();
        self.x = angle.cos() * magnitude;
        self.y = angle.sin() * magnitude;
    }

    /// Rotate (x, y) to `angle`, keeping the magnitude.
    pub fn set_angle(&mut self, angle: f64) {
        let magnitude = self.magnitude();
        self.x = angle.cos() * magnitude;
        self.y = angle.sin() * magnitude;
    }

    /// Flip in place. See [`Neg`] for the copying variant.
    pub fn opposite(&mut self) -> &mut Self {
        *self *= -1.0;
        self
    }

    /// Divide all three components by the planar magnitude.
    ///
    /// A vector with non-zero `z` therefore does not end up with unit
    /// length in 3D, only its (x, y) part is unit length.
    pub fn normalise(&mut self) -> Result<&mut Self, GeomError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(GeomError::DegenerateVector);
        }
        *self /= magnitude;
        Ok(self)
    }

    /// Copying variant of [`Vector::normalise`].
    pub fn normalised(mut self) -> Result<Self, GeomError> {
        self.normalise()?;
        Ok(self)
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 2D scalar cross product `a.x * b.y - a.y * b.x`.
    pub fn cross(a: &Vector, b: &Vector) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Full 3D cross product.
    pub fn cross_product(a: &Vector, b: &Vector) -> Vector {
        Vector::new3(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    pub fn distance(a: &Vector, b: &Vector) -> f64 {
        (*a - *b).magnitude()
    }

    /// Edge `b - a` rotated by 90 degrees. The winding picks the side.
    pub fn perpendicular(a: &Vector, b: &Vector, winding: Winding) -> Vector {
        let v = *b - *a;
        match winding {
            Winding::Clockwise => Vector::new(-v.y, v.x),
            Winding::CounterClockwise => Vector::new(v.y, -v.x),
        }
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

// ── Conversions ──────────────────────────────────────────

impl From<f64> for Vector {
    fn from(s: f64) -> Self {
        Vector::splat(s)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Vector::new3(x, y, z)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Vector::new(x, y)
    }
}

impl From<[f64; 3]> for Vector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vector::new3(x, y, z)
    }
}

impl From<kurbo::Point> for Vector {
    fn from(p: kurbo::Point) -> Self {
        Vector::new(p.x, p.y)
    }
}

impl From<kurbo::Vec2> for Vector {
    fn from(v: kurbo::Vec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl From<Vector> for kurbo::Point {
    fn from(v: Vector) -> Self {
        kurbo::Point::new(v.x, v.y)
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = GeomError;

    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        match *components {
            [x, y] => Ok(Vector::new(x, y)),
            [x, y, z] => Ok(Vector::new3(x, y, z)),
            _ => Err(GeomError::UnsupportedInput(format!(
                "a slice of {} components",
                components.len()
            ))),
        }
    }
}

// ── Operators ────────────────────────────────────────────

macro_rules! componentwise {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $sym:tt) => {
        impl<T: Into<Vector>> $op<T> for Vector {
            type Output = Vector;

            fn $method(self, rhs: T) -> Vector {
                let rhs = rhs.into();
                Vector::new3(self.x $sym rhs.x, self.y $sym rhs.y, self.z $sym rhs.z)
            }
        }

        impl<T: Into<Vector>> $assign_op<T> for Vector {
            fn $assign_method(&mut self, rhs: T) {
                *self = *self $sym rhs;
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);
componentwise!(Mul, mul, MulAssign, mul_assign, *);
componentwise!(Div, div, DivAssign, div_assign, /);

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}
