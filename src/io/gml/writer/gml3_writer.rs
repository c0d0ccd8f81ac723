//! GML 3.0 / 3.1 / 3.2 geometry writer

use super::session::WriterSession;
use super::stream_writer::{GmlStreamWriter, GmlStreamWriterExt};
use crate::error::{GmlError, Result};
use crate::geometry::{
    ControlPoint, CurveSegment, Envelope, Geometry, GeometryCommon, LineStringSegment, LinearRing,
    MultiGeometry, MultiKind, Point, PolygonPatch, SurfacePatch, Tin,
};
use crate::io::gml::version::GmlVersion;
use crate::types::{synthesize_gml_id, Crs, Measure, StandardProperties};

/// Emits GML 3 markup for geometries onto a stream
pub struct Gml3GeometryWriter<'a, W: GmlStreamWriter> {
    out: &'a mut W,
    session: &'a mut WriterSession,
    version: GmlVersion,
}

impl<'a, W: GmlStreamWriter> Gml3GeometryWriter<'a, W> {
    pub fn new(out: &'a mut W, session: &'a mut WriterSession) -> Result<Self> {
        let version = session.version();
        if version.is_gml2() {
            return Err(GmlError::Unsupported(format!(
                "{} is not handled by the GML 3 geometry writer",
                version
            )));
        }
        Ok(Gml3GeometryWriter {
            out,
            session,
            version,
        })
    }

    /// Write a geometry or envelope as a self-contained element
    pub fn write(&mut self, geometry: &Geometry) -> Result<()> {
        log::debug!("Writing gml:{} ({})", geometry.element_name(), self.version);
        match geometry {
            Geometry::Reference(r) => Err(GmlError::Unsupported(format!(
                "Cannot write reference '{}' as a top-level geometry",
                r.uri
            ))),
            _ => self.write_geometry(geometry, None),
        }
    }

    fn write_geometry(&mut self, geometry: &Geometry, inherited: Option<&Crs>) -> Result<()> {
        let crs = geometry.crs().or(inherited);
        match geometry {
            Geometry::Point(p) => self.write_point(p, crs),
            Geometry::LineString(l) => {
                self.start_geometry("LineString", &l.common, &[], false)?;
                self.write_points(l.points(), crs)?;
                self.out.end_element()
            }
            Geometry::Curve(c) => {
                self.start_geometry("Curve", &c.common, &[], false)?;
                self.out.start_element("segments")?;
                for segment in &c.segments {
                    self.write_segment(segment, crs)?;
                }
                self.out.end_element()?;
                self.out.end_element()
            }
            Geometry::OrientableCurve(o) => {
                self.start_geometry("OrientableCurve", &o.common, &[orientation(o.reversed)], false)?;
                self.write_member("baseCurve", &o.base, crs)?;
                self.out.end_element()
            }
            Geometry::CompositeCurve(c) => {
                self.start_geometry("CompositeCurve", &c.common, &[], false)?;
                self.write_members("curveMember", &c.members, crs)?;
                self.out.end_element()
            }
            Geometry::LinearRing(r) => self.write_linear_ring(r, crs),
            Geometry::Ring(r) => {
                self.start_geometry("Ring", &r.common, &[], true)?;
                self.write_members("curveMember", &r.members, crs)?;
                self.out.end_element()
            }
            Geometry::Polygon(p) => {
                self.start_geometry("Polygon", &p.common, &[], false)?;
                self.write_boundaries(p.exterior.as_deref(), &p.interiors, crs)?;
                self.out.end_element()
            }
            Geometry::Surface(s) => {
                self.start_geometry("Surface", &s.common, &[], false)?;
                self.out.start_element("patches")?;
                for patch in &s.patches {
                    self.write_patch(patch, crs)?;
                }
                self.out.end_element()?;
                self.out.end_element()
            }
            Geometry::PolyhedralSurface(s) => {
                self.start_geometry("PolyhedralSurface", &s.common, &[], false)?;
                self.out.start_element("polygonPatches")?;
                for patch in &s.patches {
                    self.write_polygon_patch(patch, crs)?;
                }
                self.out.end_element()?;
                self.out.end_element()
            }
            Geometry::TriangulatedSurface(s) => {
                self.start_geometry("TriangulatedSurface", &s.common, &[], false)?;
                let container = self.triangle_container();
                self.out.start_element(container)?;
                for triangle in &s.patches {
                    self.write_ring_patch("Triangle", triangle.exterior(), crs)?;
                }
                self.out.end_element()?;
                self.out.end_element()
            }
            Geometry::Tin(t) => self.write_tin(t, crs),
            Geometry::OrientableSurface(o) => {
                self.start_geometry(
                    "OrientableSurface",
                    &o.common,
                    &[orientation(o.reversed)],
                    false,
                )?;
                self.write_member("baseSurface", &o.base, crs)?;
                self.out.end_element()
            }
            Geometry::CompositeSurface(c) => {
                self.start_geometry("CompositeSurface", &c.common, &[], false)?;
                self.write_members("surfaceMember", &c.members, crs)?;
                self.out.end_element()
            }
            Geometry::Solid(s) => {
                self.start_geometry("Solid", &s.common, &[], false)?;
                self.write_boundaries(s.exterior.as_deref(), &s.interiors, crs)?;
                self.out.end_element()
            }
            Geometry::CompositeSolid(c) => {
                self.start_geometry("CompositeSolid", &c.common, &[], false)?;
                self.write_members("solidMember", &c.members, crs)?;
                self.out.end_element()
            }
            Geometry::GeometricComplex(c) => {
                self.start_geometry("GeometricComplex", &c.common, &[], false)?;
                self.write_members("element", &c.members, crs)?;
                self.out.end_element()
            }
            Geometry::Multi(m) => self.write_multi(m, crs),
            Geometry::Envelope(e) => self.write_envelope(e),
            Geometry::Reference(r) => Err(GmlError::Unsupported(format!(
                "Cannot write reference '{}' outside of a property",
                r.uri
            ))),
        }
    }

    fn write_point(&mut self, point: &Point, crs: Option<&Crs>) -> Result<()> {
        self.start_geometry("Point", &point.common, &[], false)?;
        let text = self.tuple_text(&point.coordinates, crs)?;
        self.out.text_element("pos", &text)?;
        self.out.end_element()
    }

    fn write_linear_ring(&mut self, ring: &LinearRing, crs: Option<&Crs>) -> Result<()> {
        self.start_geometry("LinearRing", &ring.common, &[], true)?;
        self.write_points(ring.points(), crs)?;
        self.out.end_element()
    }

    fn write_tin(&mut self, tin: &Tin, crs: Option<&Crs>) -> Result<()> {
        self.start_geometry("Tin", &tin.common, &[], false)?;
        let container = self.triangle_container();
        self.out.start_element(container)?;
        self.out.end_element()?;
        for group in &tin.stop_lines {
            self.out.start_element("stopLines")?;
            for segment in group {
                self.write_line_string_segment(segment, crs)?;
            }
            self.out.end_element()?;
        }
        for group in &tin.break_lines {
            self.out.start_element("breakLines")?;
            for segment in group {
                self.write_line_string_segment(segment, crs)?;
            }
            self.out.end_element()?;
        }
        self.write_measure("maxLength", &tin.max_length)?;
        self.out.start_element("controlPoint")?;
        self.write_points(&tin.control_points, crs)?;
        self.out.end_element()?;
        self.out.end_element()
    }

    fn write_multi(&mut self, multi: &MultiGeometry, crs: Option<&Crs>) -> Result<()> {
        let (name, member) = match (multi.kind, self.version.writes_legacy_aggregates()) {
            (MultiKind::LineString, false) => ("MultiCurve", "curveMember"),
            (MultiKind::Polygon, false) => ("MultiSurface", "surfaceMember"),
            (kind, _) => (kind.element_name(), kind.member_name()),
        };
        self.start_geometry(name, &multi.common, &[], false)?;
        self.write_members(member, &multi.members, crs)?;
        self.out.end_element()
    }

    fn write_envelope(&mut self, envelope: &Envelope) -> Result<()> {
        let crs = envelope.crs.as_ref();
        let (lower_name, upper_name) = self.version.envelope_corners();
        let lower = self.tuple_text(&envelope.lower, crs)?;
        let upper = self.tuple_text(&envelope.upper, crs)?;
        self.out.start_element("Envelope")?;
        if let Some(srs) = self.session.srs_name(crs) {
            self.out.attribute("srsName", srs)?;
        }
        self.out.text_element(lower_name, &lower)?;
        self.out.text_element(upper_name, &upper)?;
        self.out.end_element()
    }

    fn write_boundaries(
        &mut self,
        exterior: Option<&Geometry>,
        interiors: &[Geometry],
        crs: Option<&Crs>,
    ) -> Result<()> {
        if let Some(exterior) = exterior {
            self.write_member("exterior", exterior, crs)?;
        }
        self.write_members("interior", interiors, crs)
    }

    fn write_members(&mut self, property: &str, members: &[Geometry], crs: Option<&Crs>) -> Result<()> {
        for member in members {
            self.write_member(property, member, crs)?;
        }
        Ok(())
    }

    /// Write a property holding a geometry, by reference when already exported
    fn write_member(&mut self, property: &str, member: &Geometry, crs: Option<&Crs>) -> Result<()> {
        if let Geometry::Reference(r) = member {
            return self.out.href_element(property, &r.uri);
        }
        if let Some(id) = member.id() {
            if self.session.is_exported(id) {
                return self.out.href_element(property, &format!("#{}", id));
            }
        }
        self.out.start_element(property)?;
        self.write_geometry(member, crs)?;
        self.out.end_element()
    }

    /// Open a geometry element and write identifier, CRS and standard properties
    fn start_geometry(
        &mut self,
        name: &str,
        common: &GeometryCommon,
        attributes: &[(&str, &str)],
        ring: bool,
    ) -> Result<()> {
        self.out.start_element(name)?;
        let bare = ring && !self.version.ring_attributes();
        if !bare {
            match common.id.as_deref().filter(|id| !id.is_empty()) {
                Some(id) => {
                    self.session.mark_exported(id);
                    self.out.gml_attribute("id", id)?;
                }
                None if self.version.requires_id() => {
                    self.out.gml_attribute("id", &synthesize_gml_id())?;
                }
                None => {}
            }
            if let Some(srs) = self.session.srs_name(common.crs.as_ref()) {
                self.out.attribute("srsName", srs)?;
            }
        }
        for (key, value) in attributes {
            self.out.attribute(key, value)?;
        }
        if !bare {
            self.write_standard_properties(&common.properties)?;
        }
        Ok(())
    }

    fn write_standard_properties(&mut self, props: &StandardProperties) -> Result<()> {
        for href in &props.metadata {
            self.out.href_element("metaDataProperty", href)?;
        }
        if let Some(description) = &props.description {
            self.out.text_element("description", description)?;
        }
        let gml32 = self.version == GmlVersion::Gml32;
        if gml32 {
            if let Some(href) = &props.description_reference {
                self.out.href_element("descriptionReference", href)?;
            }
            if let Some(identifier) = &props.identifier {
                let code_space = identifier.code_space.as_deref().unwrap_or("");
                self.out.start_element("identifier")?;
                self.out.attribute("codeSpace", code_space)?;
                self.out.text(&identifier.value)?;
                self.out.end_element()?;
            }
        }
        for name in &props.names {
            self.out.start_element("name")?;
            if let Some(code_space) = &name.code_space {
                self.out.attribute("codeSpace", code_space)?;
            }
            self.out.text(&name.value)?;
            self.out.end_element()?;
        }
        Ok(())
    }

    /// Write a control point sequence in the most compact allowed form
    fn write_points(&mut self, points: &[ControlPoint], crs: Option<&Crs>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let verbose = points
            .iter()
            .any(|p| p.needs_property() || p.coordinates().is_none());
        if verbose {
            for point in points {
                match point {
                    ControlPoint::Reference(r) => self.out.href_element("pointProperty", &r.uri)?,
                    ControlPoint::Point(p) if p.common.id.is_some() => {
                        self.write_member("pointProperty", &Geometry::Point(p.clone()), crs)?
                    }
                    ControlPoint::Point(p) => self.write_pos(p, crs)?,
                }
            }
            return Ok(());
        }

        let tuples: Vec<(&[f64], Option<&Crs>)> = points
            .iter()
            .filter_map(|p| match p {
                ControlPoint::Point(p) => Some((p.coordinates.as_slice(), p.common.crs.as_ref().or(crs))),
                ControlPoint::Reference(_) => None,
            })
            .collect();
        let (dimension, formatted) = self.session.homogeneous_tuples(&tuples)?;
        if self.version.writes_pos_list() {
            let text = formatted
                .iter()
                .map(|t| t.join(" "))
                .collect::<Vec<_>>()
                .join(" ");
            self.out.start_element("posList")?;
            self.out.attribute("srsDimension", &dimension.to_string())?;
            self.out.text(&text)?;
            self.out.end_element()
        } else {
            for tuple in formatted {
                self.out.text_element("pos", &tuple.join(" "))?;
            }
            Ok(())
        }
    }

    fn write_pos(&mut self, point: &Point, crs: Option<&Crs>) -> Result<()> {
        let point_crs = point.common.crs.as_ref();
        let text = self.tuple_text(&point.coordinates, point_crs.or(crs))?;
        self.out.start_element("pos")?;
        if point_crs.is_some() {
            if let Some(srs) = self.session.srs_name(point_crs) {
                self.out.attribute("srsName", srs)?;
            }
        }
        self.out.text(&text)?;
        self.out.end_element()
    }

    fn write_segment(&mut self, segment: &CurveSegment, crs: Option<&Crs>) -> Result<()> {
        log::trace!("Writing curve segment gml:{}", segment.element_name());
        if let CurveSegment::LineStringSegment(s) = segment {
            return self.write_line_string_segment(s, crs);
        }
        self.out.start_element(segment.element_name())?;
        if let Some(interpolation) = segment.interpolation() {
            self.out.attribute("interpolation", interpolation)?;
        }
        if let Some(arcs) = segment.num_arcs() {
            self.out.attribute("numArc", &arcs.to_string())?;
        }
        match segment {
            CurveSegment::LineStringSegment(_) => {}
            CurveSegment::Arc { points }
            | CurveSegment::ArcString { points }
            | CurveSegment::Circle { points }
            | CurveSegment::Geodesic { points }
            | CurveSegment::GeodesicString { points } => self.write_points(points, crs)?,
            CurveSegment::ArcByBulge {
                points,
                bulge,
                normal,
            } => {
                self.write_points(points, crs)?;
                self.out.text_element("bulge", &self.session.format(*bulge))?;
                self.out.text_element("normal", &self.session.format_vector(normal))?;
            }
            CurveSegment::ArcStringByBulge {
                points,
                bulges,
                normals,
            } => {
                self.write_points(points, crs)?;
                for bulge in bulges {
                    self.out.text_element("bulge", &self.session.format(*bulge))?;
                }
                for normal in normals {
                    self.out.text_element("normal", &self.session.format_vector(normal))?;
                }
            }
            CurveSegment::ArcByCenterPoint {
                midpoint,
                radius,
                start_angle,
                end_angle,
            } => {
                self.write_points(std::slice::from_ref(midpoint), crs)?;
                self.write_measure("radius", radius)?;
                if let Some(angle) = start_angle {
                    self.write_measure("startAngle", angle)?;
                }
                if let Some(angle) = end_angle {
                    self.write_measure("endAngle", angle)?;
                }
            }
            CurveSegment::CircleByCenterPoint {
                midpoint,
                radius,
                start_angle,
            } => {
                self.write_points(std::slice::from_ref(midpoint), crs)?;
                self.write_measure("radius", radius)?;
                if let Some(angle) = start_angle {
                    self.write_measure("startAngle", angle)?;
                }
            }
            CurveSegment::Bezier {
                points,
                degree,
                knots,
            } => {
                self.write_points(points, crs)?;
                self.write_spline_parameters(*degree, knots)?;
            }
            CurveSegment::BSpline {
                points,
                degree,
                knots,
                ..
            } => {
                self.write_points(points, crs)?;
                self.write_spline_parameters(*degree, knots)?;
            }
            CurveSegment::CubicSpline {
                points,
                vector_at_start,
                vector_at_end,
            } => {
                self.write_points(points, crs)?;
                self.out
                    .text_element("vectorAtStart", &self.session.format_vector(vector_at_start))?;
                self.out
                    .text_element("vectorAtEnd", &self.session.format_vector(vector_at_end))?;
            }
            CurveSegment::Clothoid {
                ref_location,
                scale_factor,
                start_parameter,
                end_parameter,
            } => {
                self.out.start_element("refLocation")?;
                self.out.start_element("AffinePlacement")?;
                self.out
                    .text_element("location", &self.session.format_vector(&ref_location.location))?;
                for direction in &ref_location.ref_directions {
                    self.out
                        .text_element("refDirection", &self.session.format_vector(direction))?;
                }
                self.out
                    .text_element("inDimension", &ref_location.in_dimension.to_string())?;
                self.out
                    .text_element("outDimension", &ref_location.out_dimension.to_string())?;
                self.out.end_element()?;
                self.out.end_element()?;
                self.out.text_element("scaleFactor", &self.session.format(*scale_factor))?;
                self.out
                    .text_element("startParameter", &self.session.format(*start_parameter))?;
                self.out
                    .text_element("endParameter", &self.session.format(*end_parameter))?;
            }
            CurveSegment::OffsetCurve {
                base,
                distance,
                direction,
            } => {
                self.write_member("offsetBase", base, crs)?;
                self.write_measure("distance", distance)?;
                if let Some(direction) = direction {
                    self.out
                        .text_element("refDirection", &self.session.format_vector(direction))?;
                }
            }
        }
        self.out.end_element()
    }

    fn write_line_string_segment(&mut self, segment: &LineStringSegment, crs: Option<&Crs>) -> Result<()> {
        self.out.start_element("LineStringSegment")?;
        self.out.attribute("interpolation", "linear")?;
        self.write_points(segment.points(), crs)?;
        self.out.end_element()
    }

    fn write_spline_parameters(&mut self, degree: u32, knots: &[crate::geometry::Knot]) -> Result<()> {
        self.out.text_element("degree", &degree.to_string())?;
        for knot in knots {
            self.out.start_element("knot")?;
            self.out.start_element("Knot")?;
            self.out.text_element("value", &self.session.format(knot.value))?;
            self.out
                .text_element("multiplicity", &knot.multiplicity.to_string())?;
            self.out.text_element("weight", &self.session.format(knot.weight))?;
            self.out.end_element()?;
            self.out.end_element()?;
        }
        Ok(())
    }

    fn write_patch(&mut self, patch: &SurfacePatch, crs: Option<&Crs>) -> Result<()> {
        log::trace!("Writing surface patch gml:{}", patch.element_name());
        match patch {
            SurfacePatch::Polygon(p) => self.write_polygon_patch(p, crs),
            SurfacePatch::Triangle(t) => self.write_ring_patch("Triangle", t.exterior(), crs),
            SurfacePatch::Rectangle(r) => self.write_ring_patch("Rectangle", r.exterior(), crs),
            SurfacePatch::Cone(grid) | SurfacePatch::Cylinder(grid) | SurfacePatch::Sphere(grid) => {
                self.out.start_element(patch.element_name())?;
                if let Some((horizontal, vertical)) = patch.curve_types() {
                    self.out.attribute("horizontalCurveType", horizontal)?;
                    self.out.attribute("verticalCurveType", vertical)?;
                }
                for row in &grid.grid {
                    self.out.start_element("row")?;
                    self.write_points(row, crs)?;
                    self.out.end_element()?;
                }
                self.out.text_element("rows", &grid.rows.to_string())?;
                self.out.text_element("columns", &grid.columns.to_string())?;
                self.out.end_element()
            }
        }
    }

    fn write_polygon_patch(&mut self, patch: &PolygonPatch, crs: Option<&Crs>) -> Result<()> {
        self.out.start_element("PolygonPatch")?;
        self.write_boundaries(patch.exterior.as_deref(), &patch.interiors, crs)?;
        self.out.end_element()
    }

    fn write_ring_patch(&mut self, name: &str, exterior: &LinearRing, crs: Option<&Crs>) -> Result<()> {
        self.out.start_element(name)?;
        self.out.start_element("exterior")?;
        self.write_linear_ring(exterior, crs)?;
        self.out.end_element()?;
        self.out.end_element()
    }

    fn write_measure(&mut self, name: &str, measure: &Measure) -> Result<()> {
        self.out.start_element(name)?;
        if let Some(uom) = &measure.uom {
            self.out.attribute("uom", uom)?;
        }
        self.out.text(&self.session.format(measure.value))?;
        self.out.end_element()
    }

    fn tuple_text(&self, coordinates: &[f64], crs: Option<&Crs>) -> Result<String> {
        let values = self.session.transform(crs, coordinates)?;
        Ok(self.session.format_vector(&values))
    }

    fn triangle_container(&self) -> &'static str {
        if self.version == GmlVersion::Gml32 {
            "patches"
        } else {
            "trianglePatches"
        }
    }
}

fn orientation(reversed: bool) -> (&'static str, &'static str) {
    ("orientation", if reversed { "-" } else { "+" })
}
