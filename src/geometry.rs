//! Pure arithmetic primitives: coordinates/vectors, quaternions, planes and
//! Euler angles. Nothing here owns a `Model` or touches I/O.

use std::f64::consts::PI;
use std::ops;

use crate::constants::LINEAR_THRESHOLD;

fn float_equals(x: f64, y: f64) -> bool {
    (x - y).abs() < 1e-9
}

/// A 3-D coordinate or free vector — both are the same arithmetic type
/// (three doubles), so we keep a single struct and let call sites pick
/// whichever alias reads better.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub type Vector = Coord;

impl Coord {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Coord { x, y, z }
    }

    pub const ZERO: Coord = Coord::new(0.0, 0.0, 0.0);

    pub fn dot(&self, other: &Coord) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Coord) -> Coord {
        Coord::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_sq(&self) -> f64 {
        self.dot(self)
    }

    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn normalized(&self) -> Coord {
        let len = self.length();
        if len < f64::EPSILON {
            *self
        } else {
            *self / len
        }
    }

    pub fn min(&self, other: &Coord) -> Coord {
        Coord::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: &Coord) -> Coord {
        Coord::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Lexicographic compare (x, then y, then z), for a deterministic
    /// tie-break across coordinates.
    pub fn lex_cmp(&self, other: &Coord) -> std::cmp::Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap()
            .then(self.y.partial_cmp(&other.y).unwrap())
            .then(self.z.partial_cmp(&other.z).unwrap())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance(&self, other: &Coord) -> f64 {
        (*self - *other).length()
    }

    pub fn distance_sq(&self, other: &Coord) -> f64 {
        (*self - *other).length_sq()
    }
}

impl ops::Add for Coord {
    type Output = Coord;
    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl ops::Sub for Coord {
    type Output = Coord;
    fn sub(self, other: Coord) -> Coord {
        Coord::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl ops::Mul<f64> for Coord {
    type Output = Coord;
    fn mul(self, scalar: f64) -> Coord {
        Coord::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl ops::Div<f64> for Coord {
    type Output = Coord;
    fn div(self, scalar: f64) -> Coord {
        Coord::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl ops::AddAssign for Coord {
    fn add_assign(&mut self, other: Coord) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl ops::Neg for Coord {
    type Output = Coord;
    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y, -self.z)
    }
}

/// Euler angles, degrees. Used by file-format adapters and by any caller that
/// wants a human-readable orientation instead of a quaternion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EulerAngles {
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
}

/// An infinite plane, stored as a unit normal plus the signed distance from
/// the origin (`normal.dot(p) == offset` for every point `p` on the plane).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub normal: Coord,
    pub offset: f64,
}

impl Plane {
    pub fn from_point_normal(point: Coord, normal: Coord) -> Self {
        let normal = normal.normalized();
        Plane {
            normal,
            offset: normal.dot(&point),
        }
    }

    pub fn signed_distance(&self, point: &Coord) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

/// Unit quaternion used for rigid-body and bond rotations: plain w/x/y/z
/// fields, operator overloads, SLERP with a linear-interpolation fallback
/// for nearly-parallel inputs.
#[derive(Debug, Copy, Clone)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Quaternion {
        Quaternion { w, x, y, z }
    }

    pub fn identity() -> Quaternion {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Quaternion encoding a rotation of `angle_rad` about `axis` (need not be
    /// pre-normalized).
    pub fn from_axis_angle(axis: Coord, angle_rad: f64) -> Quaternion {
        let axis = axis.normalized();
        let half = angle_rad * 0.5;
        let s = half.sin();
        Quaternion::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn dot(&self, other: Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm2(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn normalize(&mut self) {
        let norm = self.norm();
        self.w /= norm;
        self.x /= norm;
        self.y /= norm;
        self.z /= norm;
    }

    pub fn inverse(&self) -> Quaternion {
        self.conjugate() / self.norm2()
    }

    /// Rotate a point using the standard `q * p * q^-1` sandwich.
    pub fn rotate(&self, point: Coord) -> Coord {
        let p = Quaternion::new(0.0, point.x, point.y, point.z);
        let r = *self * p * self.inverse();
        Coord::new(r.x, r.y, r.z)
    }

    pub fn lerp(&self, other: Quaternion, t: f64) -> Quaternion {
        *self * (1.0 - t) + other * t
    }

    pub fn slerp(&self, other: &Quaternion, t: f64) -> Quaternion {
        let mut q1 = *self;
        let mut q2 = *other;
        q1.normalize();
        q2.normalize();
        let mut q_dot = q1.dot(q2);

        if q_dot < 0.0 {
            q1 = -q1;
            q_dot *= -1.0;
        }

        if q_dot > LINEAR_THRESHOLD {
            let mut result = q1 + (q2 - q1) * t;
            result.normalize();
            result
        } else {
            q_dot = q_dot.min(1.0).max(-1.0);
            let omega = q_dot.acos();
            let so = omega.sin();
            q1 * (((1.0 - t) * omega).sin() / so) + q2 * ((t * omega).sin() / so)
        }
    }

    pub fn random(rng: &mut impl rand::Rng) -> Quaternion {
        let u1 = rng.gen::<f64>();
        let u2 = rng.gen::<f64>();
        let u3 = rng.gen::<f64>();
        Quaternion::new(
            (1.0 - u1).sqrt() * (2.0 * PI * u2).sin(),
            (1.0 - u1).sqrt() * (2.0 * PI * u2).cos(),
            u1.sqrt() * (2.0 * PI * u3).sin(),
            u1.sqrt() * (2.0 * PI * u3).cos(),
        )
    }
}

impl Default for Quaternion {
    fn default() -> Quaternion {
        Quaternion::identity()
    }
}

impl ops::Add for Quaternion {
    type Output = Self;
    fn add(self, other: Quaternion) -> Self::Output {
        Quaternion::new(self.w + other.w, self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl ops::Sub for Quaternion {
    type Output = Self;
    fn sub(self, other: Quaternion) -> Self::Output {
        Quaternion::new(self.w - other.w, self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl ops::Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Quaternion::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl ops::Mul<f64> for Quaternion {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self::Output {
        Quaternion::new(scalar * self.w, scalar * self.x, scalar * self.y, scalar * self.z)
    }
}

impl ops::Div<f64> for Quaternion {
    type Output = Self;
    fn div(self, scalar: f64) -> Self::Output {
        Quaternion::new(self.w / scalar, self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl ops::Mul for Quaternion {
    type Output = Self;
    fn mul(self, other: Quaternion) -> Self::Output {
        Quaternion::new(
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        )
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        float_equals(self.w, other.w)
            && float_equals(self.x, other.x)
            && float_equals(self.y, other.y)
            && float_equals(self.z, other.z)
    }
}
