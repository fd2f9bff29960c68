//! Polygon in cartesian coordinate space.

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::contour::ClosedContour;

/// A polygon given by its outer border and a possibly empty set of holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon<P> {
    outer_contour: ClosedContour<P>,
    inner_contours: Vec<ClosedContour<P>>,
}

impl<P> Polygon<P> {
    /// Creates a new polygon.
    pub fn new(outer_contour: ClosedContour<P>, inner_contours: Vec<ClosedContour<P>>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Outer border of the polygon.
    pub fn outer_contour(&self) -> &ClosedContour<P> {
        &self.outer_contour
    }

    /// Holes of the polygon.
    pub fn inner_contours(&self) -> &[ClosedContour<P>] {
        &self.inner_contours
    }

    /// Iterates over all contours of the polygon, starting with the outer one.
    pub fn iter_contours(&self) -> impl Iterator<Item = &ClosedContour<P>> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }

    /// Iterates over all points of all contours of the polygon.
    pub fn iter_points(&self) -> impl Iterator<Item = &P> {
        self.iter_contours().flat_map(|c| c.iter_points())
    }

    /// Builds a new polygon with every point replaced by the result of `map`.
    pub fn map_points<T>(&self, map: impl Fn(&P) -> T) -> Polygon<T> {
        Polygon {
            outer_contour: self.outer_contour.map_points(&map),
            inner_contours: self
                .inner_contours
                .iter()
                .map(|c| c.map_points(&map))
                .collect(),
        }
    }
}

impl<P> From<ClosedContour<P>> for Polygon<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self {
            outer_contour: value,
            inner_contours: vec![],
        }
    }
}

impl<P: AbsDiffEq<Epsilon = E>, E: Copy> AbsDiffEq for Polygon<P> {
    type Epsilon = E;

    fn default_epsilon() -> Self::Epsilon {
        P::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner_contours.len() == other.inner_contours.len()
            && self.outer_contour.abs_diff_eq(&other.outer_contour, epsilon)
            && self
                .inner_contours
                .iter()
                .zip(other.inner_contours.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3;

    #[test]
    fn iter_points_visits_all_contours() {
        let polygon = Polygon::new(
            ClosedContour::new(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ]),
            vec![ClosedContour::new(vec![
                Point3::new(0.4, 0.4, 0.0),
                Point3::new(0.6, 0.4, 0.0),
                Point3::new(0.6, 0.6, 0.0),
            ])],
        );

        assert_eq!(polygon.iter_points().count(), 6);
    }

    #[test]
    fn map_points_keeps_structure() {
        let polygon: Polygon<Point3> = Polygon::new(
            ClosedContour::new(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ]),
            vec![],
        );

        let raised = polygon.map_points(|p| {
            use crate::point::CartesianPoint3d;
            Point3::new(p.x(), p.y(), p.z() + 5.0)
        });

        assert_eq!(raised.outer_contour().points().len(), 3);
        assert!(raised.inner_contours().is_empty());
    }
}
