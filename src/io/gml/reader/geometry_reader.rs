//! GML 3.0 / 3.1 / 3.2 geometry reader
//!
//! Every `read_*` routine starts with the cursor on the opening tag of the
//! element it handles and returns with the cursor on the matching closing
//! tag. Property elements follow one shared protocol: a non-empty
//! `xlink:href` yields a [`GeometryReference`] and forbids inline content,
//! otherwise exactly one inline geometry of the expected family is parsed.

use super::coordinates::{read_coord, read_coordinates, read_pos_list, read_tuple};
use super::xml_cursor::XmlCursor;
use crate::error::{GmlError, Result};
use crate::geometry::{
    CompositeCurve, CompositeSolid, CompositeSurface, ControlPoint, Curve, Envelope,
    GeometricComplex, Geometry, GeometryCommon, GeometryReference, LineString, LinearRing,
    MultiGeometry, MultiKind, OrientableCurve, OrientableSurface, Point, Polygon,
    PolyhedralSurface, Ring, Solid, Surface, Tin, TriangulatedSurface,
};
use crate::geometry::curve::{LINEAR_RING_MIN_POINTS, LINE_STRING_MIN_POINTS};
use crate::id_context::IdentifierContext;
use crate::io::gml::version::{GeometryFamily, GmlVersion, XLINK_NS};
use crate::types::{validate_gml_id, CodeType, Crs, Measure, StandardProperties};
use std::io::BufRead;

pub use crate::geometry::surface::TIN_MIN_CONTROL_POINTS;

/// Geometry kind expected inside a property element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Point,
    Curve,
    Ring,
    Surface,
    Solid,
    Primitive,
    LineString,
    LinearRing,
    Polygon,
    Any,
}

impl Expect {
    fn describe(self) -> &'static str {
        match self {
            Expect::Point => "a Point",
            Expect::Curve => "a curve",
            Expect::Ring => "a ring",
            Expect::Surface => "a surface",
            Expect::Solid => "a solid",
            Expect::Primitive => "a geometric primitive",
            Expect::LineString => "a LineString",
            Expect::LinearRing => "a LinearRing",
            Expect::Polygon => "a Polygon",
            Expect::Any => "a geometry",
        }
    }

    pub(crate) fn for_multi(kind: MultiKind) -> Self {
        match kind {
            MultiKind::Point => Expect::Point,
            MultiKind::Curve => Expect::Curve,
            MultiKind::LineString => Expect::LineString,
            MultiKind::Polygon => Expect::Polygon,
            MultiKind::Surface => Expect::Surface,
            MultiKind::Solid => Expect::Solid,
            MultiKind::Geometry => Expect::Any,
        }
    }
}

/// Recursive-descent reader for GML 3.x geometries
pub struct GmlGeometryReader<'a, R: BufRead> {
    pub(crate) cursor: &'a mut XmlCursor<R>,
    pub(crate) version: GmlVersion,
    pub(crate) ns: &'static str,
    pub(crate) id_context: &'a mut IdentifierContext,
    skip_standard_properties: bool,
}

impl<'a, R: BufRead> GmlGeometryReader<'a, R> {
    /// Create a reader for one of the GML 3 versions
    pub fn new(
        cursor: &'a mut XmlCursor<R>,
        version: GmlVersion,
        id_context: &'a mut IdentifierContext,
    ) -> Result<Self> {
        if version.is_gml2() {
            return Err(GmlError::Unsupported(format!(
                "{} is not handled by the GML 3 geometry reader",
                version
            )));
        }
        Ok(GmlGeometryReader {
            cursor,
            version,
            ns: version.namespace(),
            id_context,
            skip_standard_properties: false,
        })
    }

    /// Consume standard properties without keeping them
    pub fn with_skip_standard_properties(mut self, skip: bool) -> Self {
        self.skip_standard_properties = skip;
        self
    }

    /// Check whether the cursor is on a geometry element of this version
    pub fn is_geometry_element(&self) -> bool {
        self.cursor.is_start()
            && self.cursor.namespace() == self.ns
            && self.version.is_geometry_name(self.cursor.local_name())
    }

    /// Check whether the cursor is on a geometry or envelope element
    pub fn is_geometry_or_envelope_element(&self) -> bool {
        self.is_geometry_element() || self.cursor.is_start_of(self.ns, "Envelope")
    }

    /// Read any geometry or envelope element
    pub fn read(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        let name = self.cursor.local_name().to_string();
        log::debug!("Reading gml:{} at {}", name, self.cursor.location());
        let geometry = if self.cursor.is_start_of(self.ns, "Envelope") {
            Geometry::Envelope(self.read_envelope(default_crs)?)
        } else {
            self.read_geometry(default_crs)?
        };
        log::debug!("Finished gml:{}", name);
        self.id_context.add_root(&geometry);
        Ok(geometry)
    }

    /// Read any element of the geometry family
    pub fn read_geometry(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        let name = self.cursor.local_name().to_string();
        let v = self.version;
        if name == "Point" {
            Ok(Geometry::Point(self.read_point(default_crs)?))
        } else if v.is_in_family(GeometryFamily::Curve, &name) {
            self.read_curve(default_crs)
        } else if v.is_in_family(GeometryFamily::Ring, &name) {
            self.read_ring(default_crs)
        } else if v.is_in_family(GeometryFamily::Surface, &name) {
            self.read_surface(default_crs)
        } else if v.is_in_family(GeometryFamily::Solid, &name) {
            self.read_solid(default_crs)
        } else if v.is_in_family(GeometryFamily::Aggregate, &name) {
            Ok(Geometry::Multi(self.read_multi(default_crs)?))
        } else if v.is_in_family(GeometryFamily::Complex, &name) {
            Ok(Geometry::GeometricComplex(self.read_complex(default_crs)?))
        } else if v.is_in_family(GeometryFamily::Implicit, &name) {
            Err(GmlError::Unsupported(format!(
                "Parsing of 'gml:{}' elements is not supported",
                name
            )))
        } else {
            Err(self.unexpected("a geometry element"))
        }
    }

    /// Read an element of the primitive family
    pub fn read_primitive(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        if !self
            .version
            .is_in_family(GeometryFamily::Primitive, self.cursor.local_name())
        {
            return Err(self.unexpected("a geometric primitive"));
        }
        self.read_geometry(default_crs)
    }

    /// Read an element of the curve family
    pub fn read_curve(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        match self.cursor.local_name() {
            "LineString" => Ok(Geometry::LineString(self.read_line_string(default_crs)?)),
            "Curve" => Ok(Geometry::Curve(self.read_curve_element(default_crs)?)),
            "OrientableCurve" => Ok(Geometry::OrientableCurve(
                self.read_orientable_curve(default_crs)?,
            )),
            "CompositeCurve" => Ok(Geometry::CompositeCurve(
                self.read_composite_curve(default_crs)?,
            )),
            _ => Err(self.unexpected("a curve")),
        }
    }

    /// Read an element of the ring family
    pub fn read_ring(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        match self.cursor.local_name() {
            "LinearRing" => Ok(Geometry::LinearRing(self.read_linear_ring(default_crs)?)),
            "Ring" => Ok(Geometry::Ring(self.read_ring_element(default_crs)?)),
            _ => Err(self.unexpected("a ring")),
        }
    }

    /// Read an element of the surface family
    pub fn read_surface(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        match self.cursor.local_name() {
            "Polygon" => Ok(Geometry::Polygon(self.read_polygon(default_crs)?)),
            "Surface" => Ok(Geometry::Surface(self.read_surface_element(default_crs)?)),
            "PolyhedralSurface" => Ok(Geometry::PolyhedralSurface(
                self.read_polyhedral_surface(default_crs)?,
            )),
            "TriangulatedSurface" => Ok(Geometry::TriangulatedSurface(
                self.read_triangulated_surface(default_crs)?,
            )),
            "Tin" => Ok(Geometry::Tin(self.read_tin(default_crs)?)),
            "OrientableSurface" => Ok(Geometry::OrientableSurface(
                self.read_orientable_surface(default_crs)?,
            )),
            "CompositeSurface" => Ok(Geometry::CompositeSurface(
                self.read_composite_surface(default_crs)?,
            )),
            _ => Err(self.unexpected("a surface")),
        }
    }

    /// Read an element of the solid family
    pub fn read_solid(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        self.require_gml_start()?;
        match self.cursor.local_name() {
            "Solid" => Ok(Geometry::Solid(self.read_solid_element(default_crs)?)),
            "CompositeSolid" => Ok(Geometry::CompositeSolid(
                self.read_composite_solid(default_crs)?,
            )),
            _ => Err(self.unexpected("a solid")),
        }
    }

    pub fn read_point(&mut self, default_crs: Option<&Crs>) -> Result<Point> {
        self.cursor.require_start(self.ns, "Point")?;
        let common = self.begin(default_crs)?;
        let coordinates = if self.cursor.is_start_of(self.ns, "pos") {
            read_tuple(self.cursor)?
        } else if self.cursor.is_start_of(self.ns, "coordinates") {
            let mut tuples = read_coordinates(self.cursor)?;
            if tuples.len() != 1 {
                return Err(self.cursor.error(format!(
                    "A Point's coordinates must hold exactly one tuple, found {}",
                    tuples.len()
                )));
            }
            tuples.remove(0)
        } else if self.cursor.is_start_of(self.ns, "coord") {
            read_coord(self.cursor, self.ns)?
        } else {
            return Err(self.unexpected("'pos', 'coordinates' or 'coord'"));
        };
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "Point")?;
        let point = Point { common, coordinates };
        self.register(point.common.id.as_deref())?;
        Ok(point)
    }

    pub fn read_line_string(&mut self, default_crs: Option<&Crs>) -> Result<LineString> {
        self.cursor.require_start(self.ns, "LineString")?;
        let common = self.begin(default_crs)?;
        let points = self.read_control_points(common.crs.as_ref(), true)?;
        self.check_min_points("LineString", points.len(), LINE_STRING_MIN_POINTS)?;
        self.cursor.require_end(self.ns, "LineString")?;
        let mut line = LineString::new(points)?;
        line.common = common;
        self.register(line.common.id.as_deref())?;
        Ok(line)
    }

    fn read_curve_element(&mut self, default_crs: Option<&Crs>) -> Result<Curve> {
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        if !self.cursor.is_start_of(self.ns, "segments") {
            return Err(self.unexpected("'segments'"));
        }
        let mut segments = Vec::new();
        self.cursor.next_tag()?;
        while self.cursor.is_start() {
            segments.push(self.read_curve_segment(crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(self.ns, "segments")?;
        if segments.is_empty() {
            return Err(self.cursor.error("A Curve must have at least one segment"));
        }
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "Curve")?;
        let mut curve = Curve::new(segments)?;
        curve.common = common;
        self.register(curve.common.id.as_deref())?;
        Ok(curve)
    }

    fn read_orientable_curve(&mut self, default_crs: Option<&Crs>) -> Result<OrientableCurve> {
        let reversed = self.read_orientation()?;
        let common = self.begin(default_crs)?;
        if !self.cursor.is_start_of(self.ns, "baseCurve") {
            return Err(self.unexpected("'baseCurve'"));
        }
        let base = self.read_property(Expect::Curve, common.crs.as_ref())?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "OrientableCurve")?;
        let mut curve = OrientableCurve::new(base, reversed);
        curve.common = common;
        self.register(curve.common.id.as_deref())?;
        Ok(curve)
    }

    fn read_composite_curve(&mut self, default_crs: Option<&Crs>) -> Result<CompositeCurve> {
        let common = self.begin(default_crs)?;
        let members = self.read_member_properties("curveMember", Expect::Curve, common.crs.as_ref())?;
        if members.is_empty() {
            return Err(self.cursor.error("A CompositeCurve must have at least one 'curveMember'"));
        }
        self.cursor.require_end(self.ns, "CompositeCurve")?;
        let mut curve = CompositeCurve::new(members)?;
        curve.common = common;
        self.register(curve.common.id.as_deref())?;
        Ok(curve)
    }

    pub fn read_linear_ring(&mut self, default_crs: Option<&Crs>) -> Result<LinearRing> {
        self.cursor.require_start(self.ns, "LinearRing")?;
        let common = self.begin(default_crs)?;
        let points = self.read_control_points(common.crs.as_ref(), true)?;
        self.check_min_points("LinearRing", points.len(), LINEAR_RING_MIN_POINTS)?;
        self.cursor.require_end(self.ns, "LinearRing")?;
        let mut ring = LinearRing::new(points)?;
        ring.common = common;
        self.register(ring.common.id.as_deref())?;
        Ok(ring)
    }

    fn read_ring_element(&mut self, default_crs: Option<&Crs>) -> Result<Ring> {
        let common = self.begin(default_crs)?;
        let members = self.read_member_properties("curveMember", Expect::Curve, common.crs.as_ref())?;
        if members.is_empty() {
            return Err(self.cursor.error("A Ring must have at least one 'curveMember'"));
        }
        self.cursor.require_end(self.ns, "Ring")?;
        let mut ring = Ring::new(members)?;
        ring.common = common;
        self.register(ring.common.id.as_deref())?;
        Ok(ring)
    }

    fn read_polygon(&mut self, default_crs: Option<&Crs>) -> Result<Polygon> {
        let common = self.begin(default_crs)?;
        let (exterior, interiors) = self.read_boundaries(common.crs.as_ref(), Expect::Ring)?;
        self.cursor.require_end(self.ns, "Polygon")?;
        let mut polygon = Polygon::new(exterior, interiors);
        polygon.common = common;
        self.register(polygon.common.id.as_deref())?;
        Ok(polygon)
    }

    /// Read an optional exterior boundary followed by interior boundaries.
    ///
    /// Leaves the cursor on the first tag after the boundaries.
    pub(crate) fn read_boundaries(
        &mut self,
        crs: Option<&Crs>,
        expect: Expect,
    ) -> Result<(Option<Geometry>, Vec<Geometry>)> {
        let mut exterior = None;
        if self.cursor.is_start_of(self.ns, "exterior")
            || self.cursor.is_start_of(self.ns, "outerBoundaryIs")
        {
            exterior = Some(self.read_property(expect, crs)?);
            self.cursor.next_tag()?;
        }
        let mut interiors = Vec::new();
        while self.cursor.is_start_of(self.ns, "interior")
            || self.cursor.is_start_of(self.ns, "innerBoundaryIs")
        {
            interiors.push(self.read_property(expect, crs)?);
            self.cursor.next_tag()?;
        }
        Ok((exterior, interiors))
    }

    fn read_surface_element(&mut self, default_crs: Option<&Crs>) -> Result<Surface> {
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        if !self.cursor.is_start_of(self.ns, "patches") {
            return Err(self.unexpected("'patches'"));
        }
        let mut patches = Vec::new();
        self.cursor.next_tag()?;
        while self.cursor.is_start() {
            patches.push(self.read_surface_patch(crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(self.ns, "patches")?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "Surface")?;
        let mut surface = Surface::new(patches);
        surface.common = common;
        self.register(surface.common.id.as_deref())?;
        Ok(surface)
    }

    fn read_polyhedral_surface(&mut self, default_crs: Option<&Crs>) -> Result<PolyhedralSurface> {
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        if !self.cursor.is_start_of(self.ns, "polygonPatches") {
            return Err(self.unexpected("'polygonPatches'"));
        }
        let mut patches = Vec::new();
        self.cursor.next_tag()?;
        while self.cursor.is_start() {
            patches.push(self.read_polygon_patch(crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(self.ns, "polygonPatches")?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "PolyhedralSurface")?;
        let mut surface = PolyhedralSurface::new(patches);
        surface.common = common;
        self.register(surface.common.id.as_deref())?;
        Ok(surface)
    }

    fn read_triangulated_surface(
        &mut self,
        default_crs: Option<&Crs>,
    ) -> Result<TriangulatedSurface> {
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        let container = self.cursor.local_name().to_string();
        if !(self.cursor.is_start_of(self.ns, "trianglePatches")
            || self.cursor.is_start_of(self.ns, "patches"))
        {
            return Err(self.unexpected("'trianglePatches'"));
        }
        let mut patches = Vec::new();
        self.cursor.next_tag()?;
        while self.cursor.is_start() {
            patches.push(self.read_triangle(crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(self.ns, &container)?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "TriangulatedSurface")?;
        let mut surface = TriangulatedSurface::new(patches);
        surface.common = common;
        self.register(surface.common.id.as_deref())?;
        Ok(surface)
    }

    fn read_tin(&mut self, default_crs: Option<&Crs>) -> Result<Tin> {
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();

        if self.cursor.is_start_of(self.ns, "trianglePatches")
            || self.cursor.is_start_of(self.ns, "patches")
        {
            let container = self.cursor.local_name().to_string();
            let mut count = 0usize;
            self.cursor.next_tag()?;
            while self.cursor.is_start() {
                self.read_triangle(crs.as_ref())?;
                count += 1;
                self.cursor.next_tag()?;
            }
            self.cursor.require_end(self.ns, &container)?;
            if count > 0 {
                log::warn!(
                    "Discarding {} triangle patches of Tin in favor of its control points",
                    count
                );
            }
            self.cursor.next_tag()?;
        }

        let stop_lines = self.read_tin_lines("stopLines", crs.as_ref())?;
        let break_lines = self.read_tin_lines("breakLines", crs.as_ref())?;

        if !self.cursor.is_start_of(self.ns, "maxLength") {
            return Err(self.unexpected("'maxLength'"));
        }
        let max_length = self.read_measure()?;
        self.cursor.next_tag()?;

        if !self.cursor.is_start_of(self.ns, "controlPoint") {
            return Err(self.unexpected("'controlPoint'"));
        }
        self.cursor.next_tag()?;
        let control_points = self.read_control_points(crs.as_ref(), false)?;
        self.cursor.require_end(self.ns, "controlPoint")?;
        self.check_min_points("Tin", control_points.len(), TIN_MIN_CONTROL_POINTS)?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "Tin")?;

        let mut tin = Tin::new(max_length, control_points)?;
        tin.stop_lines = stop_lines;
        tin.break_lines = break_lines;
        tin.common = common;
        self.register(tin.common.id.as_deref())?;
        Ok(tin)
    }

    fn read_tin_lines(
        &mut self,
        name: &str,
        crs: Option<&Crs>,
    ) -> Result<Vec<Vec<crate::geometry::LineStringSegment>>> {
        let mut groups = Vec::new();
        while self.cursor.is_start_of(self.ns, name) {
            let mut group = Vec::new();
            self.cursor.next_tag()?;
            while self.cursor.is_start() {
                group.push(self.read_line_string_segment(crs)?);
                self.cursor.next_tag()?;
            }
            self.cursor.require_end(self.ns, name)?;
            groups.push(group);
            self.cursor.next_tag()?;
        }
        Ok(groups)
    }

    fn read_orientable_surface(
        &mut self,
        default_crs: Option<&Crs>,
    ) -> Result<OrientableSurface> {
        let reversed = self.read_orientation()?;
        let common = self.begin(default_crs)?;
        if !self.cursor.is_start_of(self.ns, "baseSurface") {
            return Err(self.unexpected("'baseSurface'"));
        }
        let base = self.read_property(Expect::Surface, common.crs.as_ref())?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "OrientableSurface")?;
        let mut surface = OrientableSurface::new(base, reversed);
        surface.common = common;
        self.register(surface.common.id.as_deref())?;
        Ok(surface)
    }

    fn read_composite_surface(&mut self, default_crs: Option<&Crs>) -> Result<CompositeSurface> {
        let common = self.begin(default_crs)?;
        let members =
            self.read_member_properties("surfaceMember", Expect::Surface, common.crs.as_ref())?;
        if members.is_empty() {
            return Err(self
                .cursor
                .error("A CompositeSurface must have at least one 'surfaceMember'"));
        }
        self.cursor.require_end(self.ns, "CompositeSurface")?;
        let mut surface = CompositeSurface::new(members)?;
        surface.common = common;
        self.register(surface.common.id.as_deref())?;
        Ok(surface)
    }

    fn read_solid_element(&mut self, default_crs: Option<&Crs>) -> Result<Solid> {
        let common = self.begin(default_crs)?;
        let (exterior, interiors) = self.read_boundaries(common.crs.as_ref(), Expect::Surface)?;
        self.cursor.require_end(self.ns, "Solid")?;
        let mut solid = Solid::new(exterior, interiors);
        solid.common = common;
        self.register(solid.common.id.as_deref())?;
        Ok(solid)
    }

    fn read_composite_solid(&mut self, default_crs: Option<&Crs>) -> Result<CompositeSolid> {
        let common = self.begin(default_crs)?;
        let members =
            self.read_member_properties("solidMember", Expect::Solid, common.crs.as_ref())?;
        if members.is_empty() {
            return Err(self
                .cursor
                .error("A CompositeSolid must have at least one 'solidMember'"));
        }
        self.cursor.require_end(self.ns, "CompositeSolid")?;
        let mut solid = CompositeSolid::new(members)?;
        solid.common = common;
        self.register(solid.common.id.as_deref())?;
        Ok(solid)
    }

    /// Read any of the Multi* aggregates
    pub fn read_multi(&mut self, default_crs: Option<&Crs>) -> Result<MultiGeometry> {
        self.require_gml_start()?;
        let name = self.cursor.local_name().to_string();
        let kind = MultiKind::from_element_name(&name)
            .ok_or_else(|| self.unexpected("an aggregate geometry"))?;
        let expect = Expect::for_multi(kind);
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();

        let mut members =
            self.read_member_properties(kind.member_name(), expect, crs.as_ref())?;
        if let Some(list_name) = kind.members_name() {
            if self.cursor.is_start_of(self.ns, list_name) {
                self.cursor.next_tag()?;
                while self.cursor.is_start() {
                    members.push(self.read_inline(expect, crs.as_ref())?);
                    self.cursor.next_tag()?;
                }
                self.cursor.require_end(self.ns, list_name)?;
                self.cursor.next_tag()?;
                if self.cursor.is_start() {
                    return Err(self.cursor.error(format!(
                        "'{}' must be the last child of '{}'",
                        list_name, name
                    )));
                }
            }
        }
        self.cursor.require_end(self.ns, &name)?;
        let mut multi = MultiGeometry::new(kind, members)?;
        multi.common = common;
        self.register(multi.common.id.as_deref())?;
        Ok(multi)
    }

    fn read_complex(&mut self, default_crs: Option<&Crs>) -> Result<GeometricComplex> {
        let common = self.begin(default_crs)?;
        let members =
            self.read_member_properties("element", Expect::Primitive, common.crs.as_ref())?;
        if members.is_empty() {
            return Err(self
                .cursor
                .error("A GeometricComplex must have at least one 'element'"));
        }
        self.cursor.require_end(self.ns, "GeometricComplex")?;
        let mut complex = GeometricComplex::new(members)?;
        complex.common = common;
        self.register(complex.common.id.as_deref())?;
        Ok(complex)
    }

    /// Read an Envelope in any of its four corner spellings
    pub fn read_envelope(&mut self, default_crs: Option<&Crs>) -> Result<Envelope> {
        self.cursor.require_start(self.ns, "Envelope")?;
        let mut crs = self.read_srs_name();
        self.cursor.next_tag()?;
        let (lower, upper) = if self.cursor.is_start_of(self.ns, "lowerCorner") {
            let lower = read_tuple(self.cursor)?;
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "upperCorner")?;
            let upper = read_tuple(self.cursor)?;
            (lower, upper)
        } else if self.cursor.is_start_of(self.ns, "pos") {
            if crs.is_none() {
                crs = self.read_srs_name();
            }
            let lower = read_tuple(self.cursor)?;
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "pos")?;
            let upper = read_tuple(self.cursor)?;
            (lower, upper)
        } else if self.cursor.is_start_of(self.ns, "coord") {
            let lower = read_coord(self.cursor, self.ns)?;
            self.cursor.next_tag()?;
            let upper = read_coord(self.cursor, self.ns)?;
            (lower, upper)
        } else if self.cursor.is_start_of(self.ns, "coordinates") {
            let mut tuples = read_coordinates(self.cursor)?;
            if tuples.len() != 2 {
                return Err(self.cursor.error(format!(
                    "Envelope coordinates must hold exactly two tuples, found {}",
                    tuples.len()
                )));
            }
            let upper = tuples.remove(1);
            (tuples.remove(0), upper)
        } else {
            return Err(self.unexpected("'lowerCorner', 'pos', 'coord' or 'coordinates'"));
        };
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "Envelope")?;
        Ok(Envelope::new(lower, upper, crs.or_else(|| default_crs.cloned())))
    }

    /// Read a property element and its single value.
    ///
    /// Returns with the cursor on the property's closing tag.
    pub(crate) fn read_property(&mut self, expect: Expect, crs: Option<&Crs>) -> Result<Geometry> {
        let property = self
            .cursor
            .name()
            .cloned()
            .ok_or_else(|| self.cursor.error("Expected a property element"))?;
        let href = self
            .cursor
            .attribute(Some(XLINK_NS), "href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        self.cursor.next_tag()?;
        let value = match href {
            Some(uri) => {
                if self.cursor.is_start() {
                    return Err(self.cursor.error(format!(
                        "Property '{}' has both an xlink:href and inline content",
                        property.qualified()
                    )));
                }
                let reference =
                    GeometryReference::new(uri, self.cursor.system_id().map(str::to_string));
                self.id_context.add_reference(reference.clone());
                Geometry::Reference(reference)
            }
            None => {
                if !self.cursor.is_start() {
                    return Err(self.cursor.error(format!(
                        "Property '{}' must contain {} or an xlink:href",
                        property.qualified(),
                        expect.describe()
                    )));
                }
                let value = self.read_inline(expect, crs)?;
                self.cursor.next_tag()?;
                value
            }
        };
        self.cursor
            .require_end(&property.namespace, &property.local_name)?;
        Ok(value)
    }

    /// Read one inline geometry of the expected family
    pub(crate) fn read_inline(&mut self, expect: Expect, crs: Option<&Crs>) -> Result<Geometry> {
        match expect {
            Expect::Point => Ok(Geometry::Point(self.read_point(crs)?)),
            Expect::Curve => self.read_curve(crs),
            Expect::Ring => self.read_ring(crs),
            Expect::Surface => self.read_surface(crs),
            Expect::Solid => self.read_solid(crs),
            Expect::Primitive => self.read_primitive(crs),
            Expect::LineString => Ok(Geometry::LineString(self.read_line_string(crs)?)),
            Expect::LinearRing => Ok(Geometry::LinearRing(self.read_linear_ring(crs)?)),
            Expect::Polygon => {
                self.cursor.require_start(self.ns, "Polygon")?;
                Ok(Geometry::Polygon(self.read_polygon(crs)?))
            }
            Expect::Any => self.read_geometry(crs),
        }
    }

    /// Read a run of same-named member properties.
    ///
    /// Leaves the cursor on the first tag that is not such a member.
    fn read_member_properties(
        &mut self,
        name: &str,
        expect: Expect,
        crs: Option<&Crs>,
    ) -> Result<Vec<Geometry>> {
        let mut members = Vec::new();
        while self.cursor.is_start_of(self.ns, name) {
            members.push(self.read_property(expect, crs)?);
            self.cursor.next_tag()?;
        }
        Ok(members)
    }

    /// Read a sequence of control points in any supported spelling.
    ///
    /// Starts on the first candidate element and leaves the cursor on the
    /// first tag that is not part of the point list. With `legacy` unset only
    /// `posList`, `pos` and `pointProperty` are accepted.
    pub(crate) fn read_control_points(
        &mut self,
        crs: Option<&Crs>,
        legacy: bool,
    ) -> Result<Vec<ControlPoint>> {
        let mut points = Vec::new();
        while self.cursor.is_start() && self.cursor.namespace() == self.ns {
            match self.cursor.local_name() {
                "posList" if points.is_empty() => {
                    let tuples = read_pos_list(self.cursor, self.version, crs)?;
                    points.extend(tuples.into_iter().map(ControlPoint::new));
                    self.cursor.next_tag()?;
                    break;
                }
                "coordinates" if legacy && points.is_empty() => {
                    let tuples = read_coordinates(self.cursor)?;
                    points.extend(tuples.into_iter().map(ControlPoint::new));
                    self.cursor.next_tag()?;
                    break;
                }
                "pos" => {
                    let point_crs = self.read_srs_name();
                    let mut point = Point::new(read_tuple(self.cursor)?);
                    point.common.crs = point_crs;
                    points.push(ControlPoint::Point(point));
                }
                "coord" if legacy => {
                    points.push(ControlPoint::new(read_coord(self.cursor, self.ns)?));
                }
                "pointProperty" => points.push(self.read_point_property(crs)?),
                "pointRep" if legacy => points.push(self.read_point_property(crs)?),
                _ => break,
            }
            self.cursor.next_tag()?;
        }
        Ok(points)
    }

    fn read_point_property(&mut self, crs: Option<&Crs>) -> Result<ControlPoint> {
        match self.read_property(Expect::Point, crs)? {
            Geometry::Point(p) => Ok(ControlPoint::Point(p)),
            Geometry::Reference(r) => Ok(ControlPoint::Reference(r)),
            other => Err(self.cursor.error(format!(
                "Expected a Point, found {}",
                other.element_name()
            ))),
        }
    }

    /// Read a measure element (`uom` attribute plus numeric text)
    pub(crate) fn read_measure(&mut self) -> Result<Measure> {
        let uom = self.cursor.attribute(None, "uom").map(str::to_string);
        let value = self.cursor.element_text_as_f64()?;
        Ok(Measure { value, uom })
    }

    pub(crate) fn check_min_points(&self, kind: &str, found: usize, min: usize) -> Result<()> {
        if found < min {
            return Err(self.cursor.error(format!(
                "A {} must have at least {} points, found {}",
                kind, min, found
            )));
        }
        Ok(())
    }

    /// Read identifier, CRS and standard properties of a geometry element.
    ///
    /// Starts on the geometry's opening tag and leaves the cursor on its
    /// first kind-specific child (or on its closing tag).
    pub(crate) fn begin(&mut self, default_crs: Option<&Crs>) -> Result<GeometryCommon> {
        let id = self.read_id()?;
        let crs = self.read_srs_name().or_else(|| default_crs.cloned());
        self.cursor.next_tag()?;
        let properties = self.read_standard_properties()?;
        Ok(GeometryCommon {
            id,
            crs,
            properties,
        })
    }

    fn read_id(&self) -> Result<Option<String>> {
        let id = self
            .cursor
            .attribute(Some(self.ns), "id")
            .or_else(|| self.cursor.attribute(None, "gid"))
            .map(str::trim)
            .filter(|id| !id.is_empty());
        match id {
            Some(id) => {
                validate_gml_id(id)?;
                Ok(Some(id.to_string()))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn read_srs_name(&self) -> Option<Crs> {
        let name = self
            .cursor
            .attribute(None, "srsName")
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        let dimension = self
            .cursor
            .attribute(None, "srsDimension")
            .and_then(|d| d.trim().parse::<usize>().ok());
        Some(match dimension {
            Some(d) => Crs::with_dimension(name, d),
            None => Crs::new(name),
        })
    }

    fn read_orientation(&self) -> Result<bool> {
        match self.cursor.attribute(None, "orientation").map(str::trim) {
            None | Some("+") => Ok(false),
            Some("-") => Ok(true),
            Some(other) => Err(self.cursor.error(format!(
                "Invalid orientation '{}', expected '+' or '-'",
                other
            ))),
        }
    }

    fn read_standard_properties(&mut self) -> Result<StandardProperties> {
        let mut props = StandardProperties::new();
        while self.cursor.is_start() && self.cursor.namespace() == self.ns {
            match self.cursor.local_name() {
                "metaDataProperty" => {
                    if let Some(href) = self.cursor.attribute(Some(XLINK_NS), "href") {
                        props.metadata.push(href.to_string());
                    }
                    self.cursor.skip_element()?;
                }
                "description" => {
                    props.description = Some(self.cursor.element_text()?);
                }
                "descriptionReference" => {
                    props.description_reference = self
                        .cursor
                        .attribute(Some(XLINK_NS), "href")
                        .map(str::to_string);
                    self.cursor.skip_element()?;
                }
                "identifier" => {
                    props.identifier = Some(self.read_code_type()?);
                }
                "name" => {
                    let name = self.read_code_type()?;
                    props.names.push(name);
                }
                _ => break,
            }
            self.cursor.next_tag()?;
        }
        if self.skip_standard_properties {
            return Ok(StandardProperties::new());
        }
        Ok(props)
    }

    fn read_code_type(&mut self) -> Result<CodeType> {
        let code_space = self.cursor.attribute(None, "codeSpace").map(str::to_string);
        let value = self.cursor.element_text()?;
        Ok(CodeType { value, code_space })
    }

    /// Claim an identifier with the identifier context
    pub(crate) fn register(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            self.id_context.reserve(id)?;
        }
        Ok(())
    }

    fn require_gml_start(&self) -> Result<()> {
        if self.cursor.is_start() && self.cursor.namespace() == self.ns {
            return Ok(());
        }
        Err(self.unexpected(&format!("an element in namespace '{}'", self.ns)))
    }

    pub(crate) fn unexpected(&self, expected: &str) -> GmlError {
        let found = match self.cursor.name() {
            Some(n) if self.cursor.is_start() => format!("start of '{}'", n.qualified()),
            Some(n) => format!("end of '{}'", n.qualified()),
            None => "no element".to_string(),
        };
        self.cursor
            .error(format!("Expected {}, found {}", expected, found))
    }
}
