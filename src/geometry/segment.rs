//! Curve segments
//!
//! A [`Curve`](super::Curve) is the concatenation of its segments. Each
//! segment kind fixes the interpolation used between its control points.

use super::{ControlPoint, Geometry};
use crate::error::{GmlError, Result};
use crate::types::{Angle, Length};

/// Linear segment between consecutive control points
#[derive(Debug, Clone, PartialEq)]
pub struct LineStringSegment {
    points: Vec<ControlPoint>,
}

impl LineStringSegment {
    /// Create a new segment (at least two points)
    pub fn new(points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GmlError::InvalidGeometry(format!(
                "A LineStringSegment must have at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(LineStringSegment { points })
    }

    /// Control points
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }
}

/// Knot of a B-spline or Bezier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    pub value: f64,
    pub multiplicity: u32,
    pub weight: f64,
}

impl Knot {
    /// Create a new knot
    pub fn new(value: f64, multiplicity: u32, weight: f64) -> Self {
        Knot {
            value,
            multiplicity,
            weight,
        }
    }
}

/// Placement of a clothoid in its target space
#[derive(Debug, Clone, PartialEq)]
pub struct AffinePlacement {
    /// Origin of the placement
    pub location: Vec<f64>,
    /// Target directions, one per input dimension
    pub ref_directions: Vec<Vec<f64>>,
    pub in_dimension: u32,
    pub out_dimension: u32,
}

/// A curve segment of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// Linear interpolation
    LineStringSegment(LineStringSegment),
    /// Circular arc through three points
    Arc { points: Vec<ControlPoint> },
    /// Circular arc given by two points and a bulge
    ArcByBulge {
        points: Vec<ControlPoint>,
        bulge: f64,
        normal: Vec<f64>,
    },
    /// Circular arc given by center, radius and angles
    ArcByCenterPoint {
        midpoint: ControlPoint,
        radius: Length,
        start_angle: Option<Angle>,
        end_angle: Option<Angle>,
    },
    /// Sequence of circular arcs through an odd number of points
    ArcString { points: Vec<ControlPoint> },
    /// Sequence of arcs given by bulges
    ArcStringByBulge {
        points: Vec<ControlPoint>,
        bulges: Vec<f64>,
        normals: Vec<Vec<f64>>,
    },
    /// Bezier curve
    Bezier {
        points: Vec<ControlPoint>,
        degree: u32,
        knots: [Knot; 2],
    },
    /// B-spline curve
    BSpline {
        points: Vec<ControlPoint>,
        degree: u32,
        knots: Vec<Knot>,
        polynomial: bool,
    },
    /// Full circle through three points
    Circle { points: Vec<ControlPoint> },
    /// Full circle given by center and radius
    CircleByCenterPoint {
        midpoint: ControlPoint,
        radius: Length,
        start_angle: Option<Angle>,
    },
    /// Clothoid (Euler spiral)
    Clothoid {
        ref_location: AffinePlacement,
        scale_factor: f64,
        start_parameter: f64,
        end_parameter: f64,
    },
    /// Cubic spline
    CubicSpline {
        points: Vec<ControlPoint>,
        vector_at_start: Vec<f64>,
        vector_at_end: Vec<f64>,
    },
    /// Geodesic between two points
    Geodesic { points: Vec<ControlPoint> },
    /// Sequence of geodesics
    GeodesicString { points: Vec<ControlPoint> },
    /// Curve at constant distance from a base curve
    OffsetCurve {
        base: Box<Geometry>,
        distance: Length,
        direction: Option<Vec<f64>>,
    },
}

impl CurveSegment {
    /// Local name of the GML element for this segment kind
    pub fn element_name(&self) -> &'static str {
        match self {
            CurveSegment::LineStringSegment(_) => "LineStringSegment",
            CurveSegment::Arc { .. } => "Arc",
            CurveSegment::ArcByBulge { .. } => "ArcByBulge",
            CurveSegment::ArcByCenterPoint { .. } => "ArcByCenterPoint",
            CurveSegment::ArcString { .. } => "ArcString",
            CurveSegment::ArcStringByBulge { .. } => "ArcStringByBulge",
            CurveSegment::Bezier { .. } => "Bezier",
            CurveSegment::BSpline { .. } => "BSpline",
            CurveSegment::Circle { .. } => "Circle",
            CurveSegment::CircleByCenterPoint { .. } => "CircleByCenterPoint",
            CurveSegment::Clothoid { .. } => "Clothoid",
            CurveSegment::CubicSpline { .. } => "CubicSpline",
            CurveSegment::Geodesic { .. } => "Geodesic",
            CurveSegment::GeodesicString { .. } => "GeodesicString",
            CurveSegment::OffsetCurve { .. } => "OffsetCurve",
        }
    }

    /// Value of the `interpolation` attribute, for kinds that carry one
    pub fn interpolation(&self) -> Option<&'static str> {
        match self {
            CurveSegment::LineStringSegment(_) => Some("linear"),
            CurveSegment::Arc { .. } | CurveSegment::ArcString { .. } | CurveSegment::Circle { .. } => {
                Some("circularArc3Points")
            }
            CurveSegment::ArcByBulge { .. } | CurveSegment::ArcStringByBulge { .. } => {
                Some("circularArc2PointWithBulge")
            }
            CurveSegment::ArcByCenterPoint { .. } | CurveSegment::CircleByCenterPoint { .. } => {
                Some("circularArcCenterPointWithRadius")
            }
            CurveSegment::Bezier { .. } => Some("polynomialSpline"),
            CurveSegment::BSpline { polynomial, .. } => Some(if *polynomial {
                "polynomialSpline"
            } else {
                "rationalSpline"
            }),
            CurveSegment::CubicSpline { .. } => Some("cubicSpline"),
            CurveSegment::Geodesic { .. } | CurveSegment::GeodesicString { .. } => Some("geodesic"),
            CurveSegment::Clothoid { .. } | CurveSegment::OffsetCurve { .. } => None,
        }
    }

    /// Number of arcs, for the kinds that declare `numArc`
    pub fn num_arcs(&self) -> Option<usize> {
        match self {
            CurveSegment::ArcString { points } => Some(points.len().saturating_sub(1) / 2),
            CurveSegment::ArcStringByBulge { bulges, .. } => Some(bulges.len()),
            CurveSegment::ArcByCenterPoint { .. } | CurveSegment::CircleByCenterPoint { .. } => {
                Some(1)
            }
            _ => None,
        }
    }

    /// Control points of the segment (empty for kinds without any)
    pub fn control_points(&self) -> &[ControlPoint] {
        match self {
            CurveSegment::LineStringSegment(s) => s.points(),
            CurveSegment::Arc { points }
            | CurveSegment::ArcByBulge { points, .. }
            | CurveSegment::ArcString { points }
            | CurveSegment::ArcStringByBulge { points, .. }
            | CurveSegment::Bezier { points, .. }
            | CurveSegment::BSpline { points, .. }
            | CurveSegment::Circle { points }
            | CurveSegment::CubicSpline { points, .. }
            | CurveSegment::Geodesic { points }
            | CurveSegment::GeodesicString { points } => points,
            CurveSegment::ArcByCenterPoint { midpoint, .. }
            | CurveSegment::CircleByCenterPoint { midpoint, .. } => std::slice::from_ref(midpoint),
            CurveSegment::Clothoid { .. } | CurveSegment::OffsetCurve { .. } => &[],
        }
    }
}

impl From<LineStringSegment> for CurveSegment {
    fn from(s: LineStringSegment) -> Self {
        CurveSegment::LineStringSegment(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::control_points;

    #[test]
    fn test_line_string_segment_min_points() {
        assert!(LineStringSegment::new(control_points(vec![vec![0.0, 0.0]])).is_err());
        assert!(LineStringSegment::new(control_points(vec![vec![0.0, 0.0], vec![1.0, 0.0]])).is_ok());
    }

    #[test]
    fn test_arc_string_num_arcs() {
        let seg = CurveSegment::ArcString {
            points: control_points(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
                vec![2.0, 0.0],
                vec![3.0, -1.0],
                vec![4.0, 0.0],
            ]),
        };
        assert_eq!(seg.num_arcs(), Some(2));
        assert_eq!(seg.interpolation(), Some("circularArc3Points"));
        assert_eq!(seg.element_name(), "ArcString");
    }

    #[test]
    fn test_bspline_interpolation() {
        let seg = CurveSegment::BSpline {
            points: Vec::new(),
            degree: 3,
            knots: vec![Knot::new(0.0, 1, 1.0), Knot::new(1.0, 1, 1.0)],
            polynomial: false,
        };
        assert_eq!(seg.interpolation(), Some("rationalSpline"));
        assert!(seg.control_points().is_empty());
    }
}
