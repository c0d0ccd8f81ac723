//! Point geometry and control points

use super::{impl_geometry_object, GeometryCommon, GeometryReference};

/// A single position
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Ordinates (2 or 3 in practice)
    pub coordinates: Vec<f64>,
}

impl Point {
    /// Create a new point from its ordinates
    pub fn new(coordinates: Vec<f64>) -> Self {
        Point {
            common: GeometryCommon::new(),
            coordinates,
        }
    }

    /// Create a 2D point
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(vec![x, y])
    }

    /// Create a 3D point
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(vec![x, y, z])
    }

    /// Number of ordinates
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// First ordinate
    pub fn x(&self) -> f64 {
        self.coordinates.first().copied().unwrap_or(f64::NAN)
    }

    /// Second ordinate
    pub fn y(&self) -> f64 {
        self.coordinates.get(1).copied().unwrap_or(f64::NAN)
    }

    /// Third ordinate, if present
    pub fn z(&self) -> Option<f64> {
        self.coordinates.get(2).copied()
    }
}

impl_geometry_object!(Point, "Point");

/// An entry of a control point sequence.
///
/// Most sequences hold anonymous positions; a `gml:pointProperty` may also
/// contribute an identified point or an `xlink:href` to one.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPoint {
    /// Inline position or point
    Point(Point),
    /// Point given by reference
    Reference(GeometryReference),
}

impl ControlPoint {
    /// Create an anonymous control point
    pub fn new(coordinates: Vec<f64>) -> Self {
        ControlPoint::Point(Point::new(coordinates))
    }

    /// Ordinates, unless the point is an unresolved reference
    pub fn coordinates(&self) -> Option<&[f64]> {
        match self {
            ControlPoint::Point(p) => Some(&p.coordinates),
            ControlPoint::Reference(_) => None,
        }
    }

    /// Identifier of the inline point
    pub fn id(&self) -> Option<&str> {
        match self {
            ControlPoint::Point(p) => p.common.id.as_deref(),
            ControlPoint::Reference(_) => None,
        }
    }

    /// Whether writing this point needs the verbose per-point form
    pub fn needs_property(&self) -> bool {
        match self {
            ControlPoint::Point(p) => p.common.id.as_deref().is_some_and(|id| !id.trim().is_empty()),
            ControlPoint::Reference(r) => !r.is_local(),
        }
    }
}

impl From<Point> for ControlPoint {
    fn from(p: Point) -> Self {
        ControlPoint::Point(p)
    }
}

/// Build anonymous control points from coordinate tuples
pub fn control_points<I>(tuples: I) -> Vec<ControlPoint>
where
    I: IntoIterator<Item = Vec<f64>>,
{
    tuples.into_iter().map(ControlPoint::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryObject;

    #[test]
    fn test_point_accessors() {
        let p = Point::xyz(1.0, 2.0, 3.0);
        assert_eq!(p.dimension(), 3);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 2.0);
        assert_eq!(p.z(), Some(3.0));
        assert_eq!(Point::xy(1.0, 2.0).z(), None);
    }

    #[test]
    fn test_control_point_property_form() {
        let anon = ControlPoint::new(vec![1.0, 2.0]);
        assert!(!anon.needs_property());
        let named = ControlPoint::from(Point::xy(1.0, 2.0).with_id("P1"));
        assert!(named.needs_property());
        assert_eq!(named.id(), Some("P1"));
        let remote = ControlPoint::Reference(GeometryReference::new("other.gml#P2", None));
        assert!(remote.needs_property());
        assert!(remote.coordinates().is_none());
    }
}
