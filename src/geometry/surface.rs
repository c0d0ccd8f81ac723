//! Surface geometries

use super::{
    impl_geometry_object, ControlPoint, Geometry, GeometryCommon, LineStringSegment,
    PolygonPatch, SurfacePatch, Triangle,
};
use crate::error::{GmlError, Result};
use crate::types::Length;

/// Minimum number of control points of a Tin
pub const TIN_MIN_CONTROL_POINTS: usize = 3;

/// Planar surface with an optional exterior and any number of interior rings
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Exterior ring (may legally be absent)
    pub exterior: Option<Box<Geometry>>,
    /// Interior rings
    pub interiors: Vec<Geometry>,
}

impl Polygon {
    /// Create a new polygon
    pub fn new(exterior: Option<Geometry>, interiors: Vec<Geometry>) -> Self {
        Polygon {
            common: GeometryCommon::new(),
            exterior: exterior.map(Box::new),
            interiors,
        }
    }
}

impl_geometry_object!(Polygon, "Polygon");

/// Surface made of an ordered patch sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Patches
    pub patches: Vec<SurfacePatch>,
}

impl Surface {
    /// Create a new surface
    pub fn new(patches: Vec<SurfacePatch>) -> Self {
        Surface {
            common: GeometryCommon::new(),
            patches,
        }
    }
}

impl_geometry_object!(Surface, "Surface");

/// Surface made of polygon patches
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedralSurface {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Polygon patches
    pub patches: Vec<PolygonPatch>,
}

impl PolyhedralSurface {
    /// Create a new polyhedral surface
    pub fn new(patches: Vec<PolygonPatch>) -> Self {
        PolyhedralSurface {
            common: GeometryCommon::new(),
            patches,
        }
    }
}

impl_geometry_object!(PolyhedralSurface, "PolyhedralSurface");

/// Surface made of triangle patches
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulatedSurface {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Triangles
    pub patches: Vec<Triangle>,
}

impl TriangulatedSurface {
    /// Create a new triangulated surface
    pub fn new(patches: Vec<Triangle>) -> Self {
        TriangulatedSurface {
            common: GeometryCommon::new(),
            patches,
        }
    }
}

impl_geometry_object!(TriangulatedSurface, "TriangulatedSurface");

/// Triangulated irregular network.
///
/// The control points are the authoritative content; triangle patches
/// found in the markup are only checked for well-formedness.
#[derive(Debug, Clone, PartialEq)]
pub struct Tin {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Stop lines (each a list of segments)
    pub stop_lines: Vec<Vec<LineStringSegment>>,
    /// Break lines (each a list of segments)
    pub break_lines: Vec<Vec<LineStringSegment>>,
    /// Maximum triangle edge length
    pub max_length: Length,
    /// Control points (at least three)
    pub control_points: Vec<ControlPoint>,
}

impl Tin {
    /// Create a new TIN without stop or break lines (at least three control points)
    pub fn new(max_length: Length, control_points: Vec<ControlPoint>) -> Result<Self> {
        if control_points.len() < TIN_MIN_CONTROL_POINTS {
            return Err(GmlError::InvalidGeometry(format!(
                "A Tin must have at least {} control points, got {}",
                TIN_MIN_CONTROL_POINTS,
                control_points.len()
            )));
        }
        Ok(Tin {
            common: GeometryCommon::new(),
            stop_lines: Vec::new(),
            break_lines: Vec::new(),
            max_length,
            control_points,
        })
    }
}

impl_geometry_object!(Tin, "Tin");

/// Surface with an orientation flag
#[derive(Debug, Clone, PartialEq)]
pub struct OrientableSurface {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Base surface (inline or reference)
    pub base: Box<Geometry>,
    /// `true` for orientation `-`
    pub reversed: bool,
}

impl OrientableSurface {
    /// Create a new orientable surface
    pub fn new(base: Geometry, reversed: bool) -> Self {
        OrientableSurface {
            common: GeometryCommon::new(),
            base: Box::new(base),
            reversed,
        }
    }
}

impl_geometry_object!(OrientableSurface, "OrientableSurface");

/// Connected sequence of surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSurface {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Member surfaces (inline or references)
    pub members: Vec<Geometry>,
}

impl CompositeSurface {
    /// Create a new composite surface (at least one member)
    pub fn new(members: Vec<Geometry>) -> Result<Self> {
        if members.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A CompositeSurface must have at least one member".to_string(),
            ));
        }
        Ok(CompositeSurface {
            common: GeometryCommon::new(),
            members,
        })
    }
}

impl_geometry_object!(CompositeSurface, "CompositeSurface");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::control_points;

    #[test]
    fn test_tin_min_control_points() {
        let two = control_points(vec![vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 2.0]]);
        let err = Tin::new(Length::unitless(10.0), two).unwrap_err();
        assert!(matches!(err, GmlError::InvalidGeometry(_)));

        let three = control_points(vec![
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 2.0],
            vec![0.0, 1.0, 3.0],
        ]);
        let tin = Tin::new(Length::unitless(10.0), three).unwrap();
        assert_eq!(tin.control_points.len(), 3);
    }
}
