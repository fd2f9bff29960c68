//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not
//!   connected, e.g. a road on the map;
//! * **closed** - the first and the last points are connected by a segment,
//!   e.g. a shoreline.
//!
//! A closed contour does not duplicate its first point at the end of the
//! point list; the closing segment is implied.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// Sequence of points, either open or closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour<Point> {
    points: Vec<Point>,
    is_closed: bool,
}

impl<Point> Contour<Point> {
    /// Creates a new contour.
    pub fn new(points: Vec<Point>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    /// Creates a new open contour from the given points.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: false,
        }
    }

    /// Creates a new closed contour from the given points.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: true,
        }
    }

    /// Whether the contour is closed.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Points of the contour.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over the points of the contour.
    pub fn iter_points(&self) -> impl Iterator<Item = &'_ Point> {
        self.points.iter()
    }

    /// Converts the contour into a closed one. Returns `None` if the contour
    /// is open.
    pub fn into_closed(self) -> Option<ClosedContour<Point>> {
        if self.is_closed {
            Some(ClosedContour {
                points: self.points,
            })
        } else {
            None
        }
    }

    /// Builds a new contour with every point replaced by the result of `map`.
    pub fn map_points<T>(&self, map: impl Fn(&Point) -> T) -> Contour<T> {
        Contour {
            points: self.points.iter().map(&map).collect(),
            is_closed: self.is_closed,
        }
    }
}

/// A contour whose last point is connected to the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedContour<Point> {
    points: Vec<Point>,
}

impl<Point> ClosedContour<Point> {
    /// Creates a new closed contour.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Points of the contour.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over the points of the contour.
    pub fn iter_points(&self) -> impl Iterator<Item = &'_ Point> {
        self.points.iter()
    }

    /// Builds a new contour with every point replaced by the result of `map`.
    pub fn map_points<T>(&self, map: impl Fn(&Point) -> T) -> ClosedContour<T> {
        ClosedContour {
            points: self.points.iter().map(&map).collect(),
        }
    }
}

impl<P> From<ClosedContour<P>> for Contour<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self {
            points: value.points,
            is_closed: true,
        }
    }
}

impl<P: AbsDiffEq<Epsilon = E>, E: Copy> AbsDiffEq for Contour<P> {
    type Epsilon = E;

    fn default_epsilon() -> Self::Epsilon {
        P::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.is_closed == other.is_closed
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(other.points.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<P: AbsDiffEq<Epsilon = E>, E: Copy> AbsDiffEq for ClosedContour<P> {
    type Epsilon = E;

    fn default_epsilon() -> Self::Epsilon {
        P::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(other.points.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
