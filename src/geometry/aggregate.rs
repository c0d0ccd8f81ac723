//! Aggregates and complexes

use super::{impl_geometry_object, Geometry, GeometryCommon};
use crate::error::{GmlError, Result};

/// Kind of a multi-geometry, fixing its element and member property names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiKind {
    Point,
    Curve,
    LineString,
    Polygon,
    Surface,
    Solid,
    Geometry,
}

impl MultiKind {
    /// Local name of the aggregate element
    pub fn element_name(self) -> &'static str {
        match self {
            MultiKind::Point => "MultiPoint",
            MultiKind::Curve => "MultiCurve",
            MultiKind::LineString => "MultiLineString",
            MultiKind::Polygon => "MultiPolygon",
            MultiKind::Surface => "MultiSurface",
            MultiKind::Solid => "MultiSolid",
            MultiKind::Geometry => "MultiGeometry",
        }
    }

    /// Local name of the single-member property
    pub fn member_name(self) -> &'static str {
        match self {
            MultiKind::Point => "pointMember",
            MultiKind::Curve => "curveMember",
            MultiKind::LineString => "lineStringMember",
            MultiKind::Polygon => "polygonMember",
            MultiKind::Surface => "surfaceMember",
            MultiKind::Solid => "solidMember",
            MultiKind::Geometry => "geometryMember",
        }
    }

    /// Local name of the trailing array property, if the kind has one
    pub fn members_name(self) -> Option<&'static str> {
        match self {
            MultiKind::Point => Some("pointMembers"),
            MultiKind::Curve => Some("curveMembers"),
            MultiKind::Surface => Some("surfaceMembers"),
            MultiKind::Solid => Some("solidMembers"),
            MultiKind::Geometry => Some("geometryMembers"),
            MultiKind::LineString | MultiKind::Polygon => None,
        }
    }

    /// Look up a kind by its element name
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "MultiPoint" => Some(MultiKind::Point),
            "MultiCurve" => Some(MultiKind::Curve),
            "MultiLineString" => Some(MultiKind::LineString),
            "MultiPolygon" => Some(MultiKind::Polygon),
            "MultiSurface" => Some(MultiKind::Surface),
            "MultiSolid" => Some(MultiKind::Solid),
            "MultiGeometry" => Some(MultiKind::Geometry),
            _ => None,
        }
    }

    /// Check whether `member` may appear in an aggregate of this kind
    pub fn accepts(self, member: &Geometry) -> bool {
        match self {
            MultiKind::Point => matches!(member, Geometry::Point(_) | Geometry::Reference(_)),
            MultiKind::Curve => member.is_curve(),
            MultiKind::LineString => {
                matches!(member, Geometry::LineString(_) | Geometry::Reference(_))
            }
            MultiKind::Polygon => matches!(member, Geometry::Polygon(_) | Geometry::Reference(_)),
            MultiKind::Surface => member.is_surface(),
            MultiKind::Solid => member.is_solid(),
            MultiKind::Geometry => !matches!(member, Geometry::Envelope(_)),
        }
    }
}

/// A collection of geometries
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGeometry {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Aggregate kind
    pub kind: MultiKind,
    /// Members (inline or references)
    pub members: Vec<Geometry>,
}

impl MultiGeometry {
    /// Create a new aggregate; every member must fit the kind
    pub fn new(kind: MultiKind, members: Vec<Geometry>) -> Result<Self> {
        if let Some(bad) = members.iter().find(|m| !kind.accepts(m)) {
            return Err(GmlError::InvalidGeometry(format!(
                "A {} cannot contain a {}",
                kind.element_name(),
                bad.element_name()
            )));
        }
        Ok(MultiGeometry {
            common: GeometryCommon::new(),
            kind,
            members,
        })
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the aggregate is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl crate::geometry::GeometryObject for MultiGeometry {
    fn common(&self) -> &GeometryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut GeometryCommon {
        &mut self.common
    }

    fn element_name(&self) -> &'static str {
        self.kind.element_name()
    }
}

/// A complex of primitives (`gml:GeometricComplex`)
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricComplex {
    /// Common geometry data
    pub common: GeometryCommon,
    /// Member primitives (inline or references)
    pub members: Vec<Geometry>,
}

impl GeometricComplex {
    /// Create a new complex (at least one member)
    pub fn new(members: Vec<Geometry>) -> Result<Self> {
        if members.is_empty() {
            return Err(GmlError::InvalidGeometry(
                "A GeometricComplex must have at least one member".to_string(),
            ));
        }
        Ok(GeometricComplex {
            common: GeometryCommon::new(),
            members,
        })
    }
}

impl_geometry_object!(GeometricComplex, "GeometricComplex");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryObject, Point};

    #[test]
    fn test_multi_kind_names() {
        assert_eq!(MultiKind::LineString.member_name(), "lineStringMember");
        assert_eq!(MultiKind::LineString.members_name(), None);
        assert_eq!(MultiKind::from_element_name("MultiSolid"), Some(MultiKind::Solid));
        assert_eq!(MultiKind::from_element_name("Polygon"), None);
    }

    #[test]
    fn test_multi_geometry_checks_members() {
        let p: Geometry = Point::xy(1.0, 2.0).into();
        assert!(MultiGeometry::new(MultiKind::Point, vec![p.clone()]).is_ok());
        assert!(MultiGeometry::new(MultiKind::Surface, vec![p.clone()]).is_err());
        let multi = MultiGeometry::new(MultiKind::Geometry, vec![p]).unwrap();
        assert_eq!(multi.element_name(), "MultiGeometry");
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn test_complex_needs_member() {
        assert!(GeometricComplex::new(Vec::new()).is_err());
    }
}
