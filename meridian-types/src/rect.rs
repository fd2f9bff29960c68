//! Axis-aligned bounds of a geometry in 3-dimensional cartesian space.

use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::point::{CartesianPoint3d, Point3};

/// Axis-aligned cuboid given by its minimum and maximum coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect3<N = f64> {
    x_min: N,
    y_min: N,
    z_min: N,
    x_max: N,
    y_max: N,
    z_max: N,
}

impl<N: num_traits::Num + Copy + PartialOrd + FromPrimitive> Rect3<N> {
    /// Creates a new rect with the given limits.
    pub fn new(x_min: N, y_min: N, z_min: N, x_max: N, y_max: N, z_max: N) -> Self {
        Self {
            x_min,
            y_min,
            z_min,
            x_max,
            y_max,
            z_max,
        }
    }

    /// Minimum x coordinate.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Minimum y coordinate.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Minimum z coordinate.
    pub fn z_min(&self) -> N {
        self.z_min
    }

    /// Maximum x coordinate.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Maximum y coordinate.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Maximum z coordinate.
    pub fn z_max(&self) -> N {
        self.z_max
    }

    /// Extent of the rect along the x axis.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Extent of the rect along the y axis.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Extent of the rect along the z axis.
    pub fn depth(&self) -> N {
        self.z_max - self.z_min
    }

    /// Center point of the rect (minimum plus half extent on every axis).
    pub fn center(&self) -> Point3<N> {
        let two = N::from_f64(2.0).expect("const conversion failed");
        Point3::new(
            self.x_min + self.width() / two,
            self.y_min + self.height() / two,
            self.z_min + self.depth() / two,
        )
    }

    /// Creates a degenerate rect containing a single point.
    pub fn from_point(p: &impl CartesianPoint3d<Num = N>) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
            z_min: p.z(),
            z_max: p.z(),
        }
    }

    /// Creates a minimal rect containing all the given points.
    ///
    /// Returns `None` if the input iterator is empty.
    pub fn from_points<'a, P: CartesianPoint3d<Num = N> + 'a>(
        points: impl IntoIterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let mut rect = Self::from_point(points.next()?);
        for p in points {
            if rect.x_min > p.x() {
                rect.x_min = p.x();
            }
            if rect.y_min > p.y() {
                rect.y_min = p.y();
            }
            if rect.z_min > p.z() {
                rect.z_min = p.z();
            }
            if rect.x_max < p.x() {
                rect.x_max = p.x();
            }
            if rect.y_max < p.y() {
                rect.y_max = p.y();
            }
            if rect.z_max < p.z() {
                rect.z_max = p.z();
            }
        }

        Some(rect)
    }

    /// Returns the minimal rect containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            z_min: if self.z_min < other.z_min {
                self.z_min
            } else {
                other.z_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
            z_max: if self.z_max > other.z_max {
                self.z_max
            } else {
                other.z_max
            },
        }
    }
}
