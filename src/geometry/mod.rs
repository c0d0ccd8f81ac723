//! Geometry model
//!
//! Geometries form immutable trees. Every concrete kind carries a
//! [`GeometryCommon`] block (identifier, CRS, standard properties) plus its
//! kind-specific structure. Member positions that may hold either inline
//! content or an `xlink:href` use [`Geometry`] so a
//! [`Geometry::Reference`] placeholder can stand in for the real object.

use crate::types::{Crs, StandardProperties};

pub mod aggregate;
pub mod curve;
pub mod envelope;
pub mod patch;
pub mod point;
pub mod reference;
pub mod segment;
pub mod solid;
pub mod surface;

pub use aggregate::{GeometricComplex, MultiGeometry, MultiKind};
pub use curve::{CompositeCurve, Curve, LineString, LinearRing, OrientableCurve, Ring};
pub use envelope::Envelope;
pub use patch::{GriddedPatch, PolygonPatch, Rectangle, SurfacePatch, Triangle};
pub use point::{ControlPoint, Point};
pub use reference::GeometryReference;
pub use segment::{AffinePlacement, CurveSegment, Knot, LineStringSegment};
pub use solid::{CompositeSolid, Solid};
pub use surface::{
    CompositeSurface, OrientableSurface, Polygon, PolyhedralSurface, Surface, Tin,
    TriangulatedSurface,
};

/// Data shared by all concrete geometries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCommon {
    /// `gml:id` (GML 3) or `gid` (GML 2)
    pub id: Option<String>,
    /// Coordinate reference system
    pub crs: Option<Crs>,
    /// Standard GML properties (name, description, ...)
    pub properties: StandardProperties,
}

impl GeometryCommon {
    /// Create an empty common block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a common block with the given identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        GeometryCommon {
            id: Some(id.into()),
            ..Self::new()
        }
    }
}

/// Base trait for all concrete geometries
pub trait GeometryObject {
    /// Common geometry data
    fn common(&self) -> &GeometryCommon;

    /// Mutable common geometry data
    fn common_mut(&mut self) -> &mut GeometryCommon;

    /// Local name of the GML element for this kind
    fn element_name(&self) -> &'static str;

    /// Identifier, if any
    fn id(&self) -> Option<&str> {
        self.common().id.as_deref()
    }

    /// Coordinate reference system, if any
    fn crs(&self) -> Option<&Crs> {
        self.common().crs.as_ref()
    }

    /// Set the identifier
    fn with_id(mut self, id: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().id = Some(id.into());
        self
    }

    /// Set the coordinate reference system
    fn with_crs(mut self, crs: Crs) -> Self
    where
        Self: Sized,
    {
        self.common_mut().crs = Some(crs);
        self
    }
}

macro_rules! impl_geometry_object {
    ($ty:ident, $name:expr) => {
        impl $crate::geometry::GeometryObject for $ty {
            fn common(&self) -> &$crate::geometry::GeometryCommon { &self.common }
            fn common_mut(&mut self) -> &mut $crate::geometry::GeometryCommon { &mut self.common }
            fn element_name(&self) -> &'static str { $name }
        }
    };
}
pub(crate) use impl_geometry_object;

/// A geometry of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Point
    Point(Point),
    /// LineString curve
    LineString(LineString),
    /// Segmented curve
    Curve(Curve),
    /// Curve with orientation flag
    OrientableCurve(OrientableCurve),
    /// Continuous sequence of curves
    CompositeCurve(CompositeCurve),
    /// Closed ring of control points
    LinearRing(LinearRing),
    /// Closed ring of member curves
    Ring(Ring),
    /// Planar surface bounded by rings
    Polygon(Polygon),
    /// Surface made of patches
    Surface(Surface),
    /// Surface made of polygon patches
    PolyhedralSurface(PolyhedralSurface),
    /// Surface made of triangles
    TriangulatedSurface(TriangulatedSurface),
    /// Triangulated irregular network
    Tin(Tin),
    /// Surface with orientation flag
    OrientableSurface(OrientableSurface),
    /// Connected sequence of surfaces
    CompositeSurface(CompositeSurface),
    /// Volume bounded by surfaces
    Solid(Solid),
    /// Connected sequence of solids
    CompositeSolid(CompositeSolid),
    /// Complex of primitives
    GeometricComplex(GeometricComplex),
    /// Homogeneous or heterogeneous collection
    Multi(MultiGeometry),
    /// Bounding box
    Envelope(Envelope),
    /// Placeholder for a geometry given by `xlink:href`
    Reference(GeometryReference),
}

impl Geometry {
    /// Get the geometry as a trait object (`None` for envelopes and references)
    pub fn as_object(&self) -> Option<&dyn GeometryObject> {
        match self {
            Geometry::Point(g) => Some(g),
            Geometry::LineString(g) => Some(g),
            Geometry::Curve(g) => Some(g),
            Geometry::OrientableCurve(g) => Some(g),
            Geometry::CompositeCurve(g) => Some(g),
            Geometry::LinearRing(g) => Some(g),
            Geometry::Ring(g) => Some(g),
            Geometry::Polygon(g) => Some(g),
            Geometry::Surface(g) => Some(g),
            Geometry::PolyhedralSurface(g) => Some(g),
            Geometry::TriangulatedSurface(g) => Some(g),
            Geometry::Tin(g) => Some(g),
            Geometry::OrientableSurface(g) => Some(g),
            Geometry::CompositeSurface(g) => Some(g),
            Geometry::Solid(g) => Some(g),
            Geometry::CompositeSolid(g) => Some(g),
            Geometry::GeometricComplex(g) => Some(g),
            Geometry::Multi(g) => Some(g),
            Geometry::Envelope(_) | Geometry::Reference(_) => None,
        }
    }

    /// Get the common block, if the geometry has one
    pub fn common(&self) -> Option<&GeometryCommon> {
        self.as_object().map(|g| g.common())
    }

    /// Identifier of the geometry, or the local id a reference points to
    pub fn id(&self) -> Option<&str> {
        match self {
            Geometry::Reference(r) => r.local_id(),
            _ => self.as_object().and_then(|g| g.id()),
        }
    }

    /// Coordinate reference system
    pub fn crs(&self) -> Option<&Crs> {
        match self {
            Geometry::Envelope(e) => e.crs.as_ref(),
            Geometry::Reference(_) => None,
            _ => self.as_object().and_then(|g| g.crs()),
        }
    }

    /// Local name of the GML element this geometry is written as
    pub fn element_name(&self) -> &'static str {
        match self {
            Geometry::Envelope(_) => "Envelope",
            Geometry::Reference(_) => "Reference",
            _ => self.as_object().map(|g| g.element_name()).unwrap_or("Geometry"),
        }
    }

    /// Check whether this is a reference placeholder
    pub fn is_reference(&self) -> bool {
        matches!(self, Geometry::Reference(_))
    }

    /// Check whether this geometry can stand in a curve position
    pub fn is_curve(&self) -> bool {
        matches!(
            self,
            Geometry::LineString(_)
                | Geometry::Curve(_)
                | Geometry::OrientableCurve(_)
                | Geometry::CompositeCurve(_)
                | Geometry::Reference(_)
        )
    }

    /// Check whether this geometry can stand in a ring position
    pub fn is_ring(&self) -> bool {
        matches!(
            self,
            Geometry::LinearRing(_) | Geometry::Ring(_) | Geometry::Reference(_)
        )
    }

    /// Check whether this geometry can stand in a surface position
    pub fn is_surface(&self) -> bool {
        matches!(
            self,
            Geometry::Polygon(_)
                | Geometry::Surface(_)
                | Geometry::PolyhedralSurface(_)
                | Geometry::TriangulatedSurface(_)
                | Geometry::Tin(_)
                | Geometry::OrientableSurface(_)
                | Geometry::CompositeSurface(_)
                | Geometry::Reference(_)
        )
    }

    /// Check whether this geometry can stand in a solid position
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            Geometry::Solid(_) | Geometry::CompositeSolid(_) | Geometry::Reference(_)
        )
    }
}

macro_rules! impl_from_kind {
    ($ty:ident, $variant:ident) => {
        impl From<$ty> for Geometry {
            fn from(g: $ty) -> Self {
                Geometry::$variant(g)
            }
        }
    };
}

impl_from_kind!(Point, Point);
impl_from_kind!(LineString, LineString);
impl_from_kind!(Curve, Curve);
impl_from_kind!(OrientableCurve, OrientableCurve);
impl_from_kind!(CompositeCurve, CompositeCurve);
impl_from_kind!(LinearRing, LinearRing);
impl_from_kind!(Ring, Ring);
impl_from_kind!(Polygon, Polygon);
impl_from_kind!(Surface, Surface);
impl_from_kind!(PolyhedralSurface, PolyhedralSurface);
impl_from_kind!(TriangulatedSurface, TriangulatedSurface);
impl_from_kind!(Tin, Tin);
impl_from_kind!(OrientableSurface, OrientableSurface);
impl_from_kind!(CompositeSurface, CompositeSurface);
impl_from_kind!(Solid, Solid);
impl_from_kind!(CompositeSolid, CompositeSolid);
impl_from_kind!(GeometricComplex, GeometricComplex);
impl_from_kind!(MultiGeometry, Multi);
impl_from_kind!(Envelope, Envelope);
impl_from_kind!(GeometryReference, Reference);
