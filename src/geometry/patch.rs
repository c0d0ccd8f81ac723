//! Surface patches

use super::{ControlPoint, Geometry, LinearRing};
use crate::error::{GmlError, Result};

/// Number of control points in a Triangle's exterior ring
pub const TRIANGLE_RING_POINTS: usize = 4;

/// Number of control points in a Rectangle's exterior ring
pub const RECTANGLE_RING_POINTS: usize = 5;

/// Planar patch bounded by rings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonPatch {
    /// Exterior ring (may be absent)
    pub exterior: Option<Box<Geometry>>,
    /// Interior rings
    pub interiors: Vec<Geometry>,
}

impl PolygonPatch {
    /// Create a new polygon patch
    pub fn new(exterior: Option<Geometry>, interiors: Vec<Geometry>) -> Self {
        PolygonPatch {
            exterior: exterior.map(Box::new),
            interiors,
        }
    }
}

/// Planar patch bounded by a ring of three distinct points
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    exterior: LinearRing,
}

impl Triangle {
    /// Create a triangle; the ring must have exactly four points
    pub fn new(exterior: LinearRing) -> Result<Self> {
        check_ring_size("Triangle", &exterior, TRIANGLE_RING_POINTS)?;
        Ok(Triangle { exterior })
    }

    /// Exterior ring
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }
}

/// Planar patch bounded by a ring of four distinct points
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    exterior: LinearRing,
}

impl Rectangle {
    /// Create a rectangle; the ring must have exactly five points
    pub fn new(exterior: LinearRing) -> Result<Self> {
        check_ring_size("Rectangle", &exterior, RECTANGLE_RING_POINTS)?;
        Ok(Rectangle { exterior })
    }

    /// Exterior ring
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }
}

fn check_ring_size(kind: &str, ring: &LinearRing, expected: usize) -> Result<()> {
    if ring.points().len() != expected {
        return Err(GmlError::InvalidGeometry(format!(
            "The exterior ring of a {} must have exactly {} points, got {}",
            kind,
            expected,
            ring.points().len()
        )));
    }
    Ok(())
}

/// Row-major grid of control points shared by cones, cylinders and spheres
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GriddedPatch {
    /// Grid rows
    pub grid: Vec<Vec<ControlPoint>>,
    /// Declared number of rows
    pub rows: u32,
    /// Declared number of columns
    pub columns: u32,
}

impl GriddedPatch {
    /// Create a gridded patch, declaring the grid's own shape
    pub fn new(grid: Vec<Vec<ControlPoint>>) -> Self {
        let rows = grid.len() as u32;
        let columns = grid.first().map(|r| r.len()).unwrap_or(0) as u32;
        GriddedPatch { grid, rows, columns }
    }

    /// Check whether the declared rows/columns agree with the grid
    pub fn is_consistent(&self) -> bool {
        self.grid.len() == self.rows as usize
            && self.grid.iter().all(|r| r.len() == self.columns as usize)
    }
}

/// A surface patch of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum SurfacePatch {
    Polygon(PolygonPatch),
    Triangle(Triangle),
    Rectangle(Rectangle),
    Cone(GriddedPatch),
    Cylinder(GriddedPatch),
    Sphere(GriddedPatch),
}

impl SurfacePatch {
    /// Local name of the GML element for this patch kind
    pub fn element_name(&self) -> &'static str {
        match self {
            SurfacePatch::Polygon(_) => "PolygonPatch",
            SurfacePatch::Triangle(_) => "Triangle",
            SurfacePatch::Rectangle(_) => "Rectangle",
            SurfacePatch::Cone(_) => "Cone",
            SurfacePatch::Cylinder(_) => "Cylinder",
            SurfacePatch::Sphere(_) => "Sphere",
        }
    }

    /// `(horizontalCurveType, verticalCurveType)` of gridded patches
    pub fn curve_types(&self) -> Option<(&'static str, &'static str)> {
        match self {
            SurfacePatch::Cone(_) | SurfacePatch::Cylinder(_) => {
                Some(("circularArc3Points", "linear"))
            }
            SurfacePatch::Sphere(_) => Some(("circularArc3Points", "circularArc3Points")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::control_points;

    fn ring(n: usize) -> LinearRing {
        let mut tuples: Vec<Vec<f64>> = (0..n - 1).map(|i| vec![i as f64, (i * i) as f64]).collect();
        tuples.push(vec![0.0, 0.0]);
        LinearRing::new(control_points(tuples)).unwrap()
    }

    #[test]
    fn test_triangle_ring_size() {
        assert!(Triangle::new(ring(4)).is_ok());
        assert!(Triangle::new(ring(5)).is_err());
    }

    #[test]
    fn test_rectangle_ring_size() {
        assert!(Rectangle::new(ring(5)).is_ok());
        assert!(Rectangle::new(ring(4)).is_err());
    }

    #[test]
    fn test_gridded_patch_consistency() {
        let row = control_points(vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        let mut patch = GriddedPatch::new(vec![row.clone(), row]);
        assert_eq!((patch.rows, patch.columns), (2, 3));
        assert!(patch.is_consistent());
        patch.columns = 4;
        assert!(!patch.is_consistent());
    }
}
