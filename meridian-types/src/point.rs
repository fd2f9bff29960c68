//! Points and vectors in cartesian coordinate space.

use approx::AbsDiffEq;
use num_traits::{Bounded, Float, FromPrimitive};
use serde::{Deserialize, Serialize};

/// A point in 2-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point2<Num = f64> {
    x: Num,
    y: Num,
}

impl<Num> Point2<Num> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: Num, y: Num) -> Self {
        Self { x, y }
    }
}

/// Vector between two points in 2-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector2<Num = f64> {
    dx: Num,
    dy: Num,
}

impl<Num: Copy> Vector2<Num> {
    /// Creates a new vector with the given coordinates.
    pub fn new(dx: Num, dy: Num) -> Self {
        Self { dx, dy }
    }

    /// Returns x coordinate of the vector.
    pub fn dx(&self) -> Num {
        self.dx
    }

    /// Returns y coordinate of the vector.
    pub fn dy(&self) -> Num {
        self.dy
    }

    /// Returns squared magnitude (squared length) of the vector.
    pub fn magnitude_sq(&self) -> Num
    where
        Num: num_traits::Num,
    {
        self.dx * self.dx + self.dy * self.dy
    }

    /// Returns magnitude (length) of the vector.
    pub fn magnitude(&self) -> Num
    where
        Num: Float,
    {
        self.magnitude_sq().sqrt()
    }
}

impl<Num> std::ops::Sub<Point2<Num>> for Point2<Num>
where
    Num: std::ops::Sub<Num, Output = Num>,
{
    type Output = Vector2<Num>;

    fn sub(self, rhs: Point2<Num>) -> Self::Output {
        Vector2 {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl<Num> std::ops::Add<Vector2<Num>> for Point2<Num>
where
    Num: std::ops::Add<Num, Output = Num>,
{
    type Output = Point2<Num>;

    fn add(self, rhs: Vector2<Num>) -> Self::Output {
        Self {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl<Num> std::ops::Mul<Num> for Vector2<Num>
where
    Num: std::ops::Mul<Num, Output = Num> + Copy,
{
    type Output = Vector2<Num>;

    fn mul(self, rhs: Num) -> Self::Output {
        Self {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
        }
    }
}

impl<Num> AbsDiffEq for Point2<Num>
where
    Num: AbsDiffEq<Num, Epsilon = Num> + Copy,
{
    type Epsilon = Num;

    fn default_epsilon() -> Self::Epsilon {
        Num::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

/// A point in 3-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3<Num = f64> {
    x: Num,
    y: Num,
    z: Num,
}

impl<Num> Point3<Num> {
    /// Creates a new instance of the point by its coordinates.
    pub const fn new(x: Num, y: Num, z: Num) -> Self {
        Self { x, y, z }
    }
}

/// Vector between two points in 3-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector3<Num = f64> {
    dx: Num,
    dy: Num,
    dz: Num,
}

impl<Num: Copy> Vector3<Num> {
    /// Creates a new vector with the given coordinates.
    pub fn new(dx: Num, dy: Num, dz: Num) -> Self {
        Self { dx, dy, dz }
    }

    /// Returns x coordinate of the vector.
    pub fn dx(&self) -> Num {
        self.dx
    }

    /// Returns y coordinate of the vector.
    pub fn dy(&self) -> Num {
        self.dy
    }

    /// Returns z coordinate of the vector.
    pub fn dz(&self) -> Num {
        self.dz
    }

    /// Updates z coordinate of the vector.
    pub fn set_dz(&mut self, dz: Num) {
        self.dz = dz;
    }
}

impl<Num> std::ops::Sub<Point3<Num>> for Point3<Num>
where
    Num: std::ops::Sub<Num, Output = Num>,
{
    type Output = Vector3<Num>;

    fn sub(self, rhs: Point3<Num>) -> Self::Output {
        Vector3 {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
            dz: self.z - rhs.z,
        }
    }
}

impl<Num> std::ops::Add<Vector3<Num>> for Point3<Num>
where
    Num: std::ops::Add<Num, Output = Num>,
{
    type Output = Point3<Num>;

    fn add(self, rhs: Vector3<Num>) -> Self::Output {
        Self {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
            z: self.z + rhs.dz,
        }
    }
}

impl<Num> std::ops::Sub<Vector3<Num>> for Point3<Num>
where
    Num: std::ops::Sub<Num, Output = Num>,
{
    type Output = Point3<Num>;

    fn sub(self, rhs: Vector3<Num>) -> Self::Output {
        Self {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
            z: self.z - rhs.dz,
        }
    }
}

impl<Num> std::ops::Mul<Num> for Vector3<Num>
where
    Num: std::ops::Mul<Num, Output = Num> + Copy,
{
    type Output = Vector3<Num>;

    fn mul(self, rhs: Num) -> Self::Output {
        Self {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

impl<Num> AbsDiffEq for Vector3<Num>
where
    Num: AbsDiffEq<Num, Epsilon = Num> + Copy,
{
    type Epsilon = Num;

    fn default_epsilon() -> Self::Epsilon {
        Num::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.dx.abs_diff_eq(&other.dx, epsilon)
            && self.dy.abs_diff_eq(&other.dy, epsilon)
            && self.dz.abs_diff_eq(&other.dz, epsilon)
    }
}

impl<Num> AbsDiffEq for Point3<Num>
where
    Num: AbsDiffEq<Num, Epsilon = Num> + Copy,
{
    type Epsilon = Num;

    fn default_epsilon() -> Self::Epsilon {
        Num::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

/// Generic access to coordinates of a point in 2-dimensional cartesian space.
pub trait CartesianPoint2d {
    /// Numeric type used to represent coordinates.
    type Num: num_traits::Num + Copy + PartialOrd + Bounded + FromPrimitive;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Squared cartesian distance to the `other` point.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx * dx + dy * dy
    }

    /// Distance between the points going along the coordinate axes.
    fn taxicab_distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = if self.x() >= other.x() {
            self.x() - other.x()
        } else {
            other.x() - self.x()
        };
        let dy = if self.y() >= other.y() {
            self.y() - other.y()
        } else {
            other.y() - self.y()
        };

        dx + dy
    }
}

/// Methods for 2d points with `Float` coordinates.
pub trait CartesianPoint2dFloat<N: Float = f64>: CartesianPoint2d<Num = N> {
    /// Cartesian distance to the `other` point.
    fn distance(&self, other: &impl CartesianPoint2d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float + Bounded + FromPrimitive, T: CartesianPoint2d<Num = N>> CartesianPoint2dFloat<N>
    for T
{
}

/// Generic access to coordinates of a point in 3-dimensional cartesian space.
pub trait CartesianPoint3d {
    /// Numeric type used to represent coordinates.
    type Num: num_traits::Num + Copy + PartialOrd + Bounded + FromPrimitive;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;
    /// Z coordinate.
    fn z(&self) -> Self::Num;

    /// Squared cartesian distance to the `other` point.
    fn distance_sq(&self, other: &impl CartesianPoint3d<Num = Self::Num>) -> Self::Num {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        let dz = self.z() - other.z();
        dx * dx + dy * dy + dz * dz
    }
}

/// Methods for 3d points with `Float` coordinates.
pub trait CartesianPoint3dFloat<N: Float = f64>: CartesianPoint3d<Num = N> {
    /// Cartesian distance to the `other` point.
    fn distance(&self, other: &impl CartesianPoint3d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float + Bounded + FromPrimitive, T: CartesianPoint3d<Num = N>> CartesianPoint3dFloat<N>
    for T
{
}

impl<Num: num_traits::Num + Copy + PartialOrd + Bounded + FromPrimitive> CartesianPoint2d
    for Point2<Num>
{
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }
    fn y(&self) -> Num {
        self.y
    }
}

impl<Num: num_traits::Num + Copy + PartialOrd + Bounded + FromPrimitive> CartesianPoint3d
    for Point3<Num>
{
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }
    fn y(&self) -> Num {
        self.y
    }
    fn z(&self) -> Num {
        self.z
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn point3_arithmetics() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let moved = p + Vector3::new(0.5, -1.0, 10.0);
        assert_abs_diff_eq!(moved, Point3::new(1.5, 1.0, 13.0));

        let delta = moved - p;
        assert_abs_diff_eq!(delta, Vector3::new(0.5, -1.0, 10.0));
    }

    #[test]
    fn distance_3d() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 12.0);
        assert_abs_diff_eq!(a.distance(&b), 13.0);
    }

    #[test]
    fn taxicab_distance_is_symmetric() {
        let a = Point2::new(1.0, 5.0);
        let b = Point2::new(4.0, 1.0);
        assert_abs_diff_eq!(a.taxicab_distance(&b), 7.0);
        assert_abs_diff_eq!(b.taxicab_distance(&a), 7.0);
    }
}
