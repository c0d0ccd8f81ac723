//! Curve and ring geometries

use super::{impl_geometry_object, ControlPoint, CurveSegment, Geometry, GeometryCommon};
use crate::error::{GmlError, Result};

/// Minimum number of control points of a LineString
pub const LINE_STRING_MIN_POINTS: usize = 2;

/// Minimum number of control points of a LinearRing
pub const LINEAR_RING_MIN_POINTS: usize = 4;

/// A curve with linear interpolation between its control points
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    /// Common geometry data
    pub common: GeometryCommon,
    points: Vec<ControlPoint>,
}

impl LineString {
    /// Create a new line string (at least two points)
    pub fn new(points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < LINE_STRING_MIN_POINTS {
            return Err(GmlError::InvalidGeometry(format!(
                "A LineString must have at least {} points, got {}",
                LINE_STRING_MIN_POINTS,
                points.len()
            )));
        }
        Ok(LineString {
            common: GeometryCommon::new(),
            points,
        })
    }

    /// Control points
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }
}

impl_geometry_object!(LineString, "LineString");

/// A curve made of a sequence of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Ordered segments
    pub segments: Vec<CurveSegment>,
}

impl Curve {
    /// Create a new curve (at least one segment)
    pub fn new(segments: Vec<CurveSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A Curve must have at least one segment".to_string(),
            ));
        }
        Ok(Curve {
            common: GeometryCommon::new(),
            segments,
        })
    }
}

impl_geometry_object!(Curve, "Curve");

/// A curve with an orientation flag
#[derive(Debug, Clone, PartialEq)]
pub struct OrientableCurve {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Base curve (inline or reference)
    pub base: Box<Geometry>,
    /// `true` for orientation `-`
    pub reversed: bool,
}

impl OrientableCurve {
    /// Create a new orientable curve
    pub fn new(base: Geometry, reversed: bool) -> Self {
        OrientableCurve {
            common: GeometryCommon::new(),
            base: Box::new(base),
            reversed,
        }
    }
}

impl_geometry_object!(OrientableCurve, "OrientableCurve");

/// A continuous sequence of curves
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Member curves (inline or references)
    pub members: Vec<Geometry>,
}

impl CompositeCurve {
    /// Create a new composite curve (at least one member)
    pub fn new(members: Vec<Geometry>) -> Result<Self> {
        if members.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A CompositeCurve must have at least one member".to_string(),
            ));
        }
        Ok(CompositeCurve {
            common: GeometryCommon::new(),
            members,
        })
    }
}

impl_geometry_object!(CompositeCurve, "CompositeCurve");

/// A closed ring given by its control points (first and last coincide)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    /// Common geometry data
    pub common: GeometryCommon,
    points: Vec<ControlPoint>,
}

impl LinearRing {
    /// Create a new linear ring (at least four points)
    pub fn new(points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < LINEAR_RING_MIN_POINTS {
            return Err(GmlError::InvalidGeometry(format!(
                "A LinearRing must have at least {} points, got {}",
                LINEAR_RING_MIN_POINTS,
                points.len()
            )));
        }
        Ok(LinearRing {
            common: GeometryCommon::new(),
            points,
        })
    }

    /// Control points
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }
}

impl_geometry_object!(LinearRing, "LinearRing");

/// A closed ring made of member curves
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Member curves (inline or references)
    pub members: Vec<Geometry>,
}

impl Ring {
    /// Create a new ring (at least one member curve)
    pub fn new(members: Vec<Geometry>) -> Result<Self> {
        if members.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A Ring must have at least one member curve".to_string(),
            ));
        }
        Ok(Ring {
            common: GeometryCommon::new(),
            members,
        })
    }
}

impl_geometry_object!(Ring, "Ring");
