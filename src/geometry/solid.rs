//! Solid geometries

use super::{impl_geometry_object, Geometry, GeometryCommon};
use crate::error::{GmlError, Result};

/// Volume bounded by an exterior surface and optional interior surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Exterior shell (may legally be absent)
    pub exterior: Option<Box<Geometry>>,
    /// Interior shells
    pub interiors: Vec<Geometry>,
}

impl Solid {
    /// Create a new solid
    pub fn new(exterior: Option<Geometry>, interiors: Vec<Geometry>) -> Self {
        Solid {
            common: GeometryCommon::new(),
            exterior: exterior.map(Box::new),
            interiors,
        }
    }
}

impl_geometry_object!(Solid, "Solid");

/// Connected sequence of solids
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSolid {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Member solids (inline or references)
    pub members: Vec<Geometry>,
}

impl CompositeSolid {
    /// Create a new composite solid (at least one member)
    pub fn new(members: Vec<Geometry>) -> Result<Self> {
        if members.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A CompositeSolid must have at least one member".to_string(),
            ));
        }
        Ok(CompositeSolid {
            common: GeometryCommon::new(),
            members,
        })
    }
}

impl_geometry_object!(CompositeSolid, "CompositeSolid");
