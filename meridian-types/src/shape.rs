//! A closed set of geometry variants a map feature can carry.
//!
//! [`Shape`] is the type edit operations are defined over. Keeping the set of
//! variants closed lets the editing code dispatch with an exhaustive `match`
//! instead of probing geometries for optionally supported operations.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::point::Point3;
use crate::polygon::Polygon;
use crate::rect::Rect3;

/// Geometry of a single map feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A single point.
    Point(Point3),
    /// An open or closed chain of points.
    Polyline(Contour<Point3>),
    /// A flat polygon with optional holes.
    Polygon(Polygon<Point3>),
    /// A polygon extruded into a vertical prism.
    Prism(Prism),
    /// An ordered group of child shapes.
    Collection(Vec<Shape>),
}

impl Shape {
    /// Minimal axis-aligned bounds containing the shape.
    ///
    /// Returns `None` for shapes without any points, e.g. an empty
    /// collection.
    pub fn bounding_box(&self) -> Option<Rect3> {
        match self {
            Shape::Point(p) => Some(Rect3::from_point(p)),
            Shape::Polyline(contour) => Rect3::from_points(contour.iter_points()),
            Shape::Polygon(polygon) => Rect3::from_points(polygon.iter_points()),
            Shape::Prism(prism) => prism.bounding_box(),
            Shape::Collection(children) => children
                .iter()
                .filter_map(|child| child.bounding_box())
                .reduce(|acc, rect| acc.merge(rect)),
        }
    }

    /// The designated focus point of the shape, if it has one.
    ///
    /// Only a point shape exposes a focus point; for other shapes a reference
    /// point must be derived from the bounds.
    pub fn focus_point(&self) -> Option<Point3> {
        match self {
            Shape::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether the shape supports extrusion into (or of) a vertical prism.
    ///
    /// A collection is only extrudable when it is the result of a previous
    /// extrusion, i.e. contains exactly one prism; extruding an arbitrary
    /// group of shapes has no meaningful geometric interpretation.
    pub fn is_extrudable(&self) -> bool {
        match self {
            Shape::Polygon(_) | Shape::Prism(_) => true,
            Shape::Collection(children) => {
                children.len() == 1 && matches!(children[0], Shape::Prism(_))
            }
            Shape::Point(_) | Shape::Polyline(_) => false,
        }
    }
}

/// A polygon extruded vertically between two elevations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    base: Polygon<Point3>,
    bottom: f64,
    top: f64,
}

impl Prism {
    /// Creates a new prism over the given base polygon.
    ///
    /// The elevations are normalized so that `bottom <= top`.
    pub fn new(base: Polygon<Point3>, bottom: f64, top: f64) -> Self {
        let (bottom, top) = if bottom <= top {
            (bottom, top)
        } else {
            (top, bottom)
        };
        Self { base, bottom, top }
    }

    /// Base polygon of the prism.
    pub fn base(&self) -> &Polygon<Point3> {
        &self.base
    }

    /// Elevation of the bottom face.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Elevation of the top face.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Minimal axis-aligned bounds of the prism.
    ///
    /// The horizontal extent comes from the base polygon, the vertical extent
    /// from the bottom and top elevations.
    pub fn bounding_box(&self) -> Option<Rect3> {
        let base = Rect3::from_points(self.base.iter_points())?;
        Some(Rect3::new(
            base.x_min(),
            base.y_min(),
            self.bottom,
            base.x_max(),
            base.y_max(),
            self.top,
        ))
    }
}

impl AbsDiffEq for Prism {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.bottom.abs_diff_eq(&other.bottom, epsilon)
            && self.top.abs_diff_eq(&other.top, epsilon)
            && self.base.abs_diff_eq(&other.base, epsilon)
    }
}

impl AbsDiffEq for Shape {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => a.abs_diff_eq(b, epsilon),
            (Shape::Polyline(a), Shape::Polyline(b)) => a.abs_diff_eq(b, epsilon),
            (Shape::Polygon(a), Shape::Polygon(b)) => a.abs_diff_eq(b, epsilon),
            (Shape::Prism(a), Shape::Prism(b)) => a.abs_diff_eq(b, epsilon),
            (Shape::Collection(a), Shape::Collection(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
            _ => false,
        }
    }
}
