//! GML 2.1 geometry writer
//!
//! Only simple features are expressible. Curves and rings built from
//! linear pieces are flattened to LineString/LinearRing and a Surface made
//! of a single PolygonPatch is written as a Polygon; everything else fails
//! with [`GmlError::Unsupported`].

use super::session::WriterSession;
use super::stream_writer::{GmlStreamWriter, GmlStreamWriterExt};
use crate::error::{GmlError, Result};
use crate::geometry::{
    ControlPoint, CurveSegment, Envelope, Geometry, GeometryCommon, MultiGeometry, MultiKind,
    Point, SurfacePatch,
};
use crate::types::Crs;

const COORD_AXES: [&str; 3] = ["X", "Y", "Z"];

/// Emits GML 2.1 markup for geometries onto a stream
pub struct Gml2GeometryWriter<'a, W: GmlStreamWriter> {
    out: &'a mut W,
    session: &'a mut WriterSession,
}

impl<'a, W: GmlStreamWriter> Gml2GeometryWriter<'a, W> {
    pub fn new(out: &'a mut W, session: &'a mut WriterSession) -> Self {
        Gml2GeometryWriter { out, session }
    }

    /// Write a geometry or envelope as a self-contained element
    pub fn write(&mut self, geometry: &Geometry) -> Result<()> {
        log::debug!("Writing gml:{} (GML 2.1)", geometry.element_name());
        self.write_geometry(geometry, None)
    }

    fn write_geometry(&mut self, geometry: &Geometry, inherited: Option<&Crs>) -> Result<()> {
        let crs = geometry.crs().or(inherited);
        match geometry {
            Geometry::Point(p) => self.write_point(p, crs),
            Geometry::LineString(l) => {
                self.start_geometry("LineString", &l.common)?;
                self.write_coordinates(l.points(), crs)?;
                self.out.end_element()
            }
            Geometry::Curve(c) => {
                let points = linear_points(geometry).ok_or_else(|| unsupported("Curve with non-linear segments"))?;
                self.start_geometry("LineString", &c.common)?;
                self.write_coordinates(&points, crs)?;
                self.out.end_element()
            }
            Geometry::LinearRing(_) | Geometry::Ring(_) => self.write_linear_ring(geometry, crs),
            Geometry::Polygon(p) => {
                self.start_geometry("Polygon", &p.common)?;
                self.write_boundaries(p.exterior.as_deref(), &p.interiors, crs)?;
                self.out.end_element()
            }
            Geometry::Surface(s) => match s.patches.as_slice() {
                [SurfacePatch::Polygon(patch)] => {
                    self.start_geometry("Polygon", &s.common)?;
                    self.write_boundaries(patch.exterior.as_deref(), &patch.interiors, crs)?;
                    self.out.end_element()
                }
                _ => Err(unsupported("Surface that is not a single PolygonPatch")),
            },
            Geometry::Multi(m) => self.write_multi(m, crs),
            Geometry::Envelope(e) => self.write_box(e),
            other => Err(unsupported(other.element_name())),
        }
    }

    fn write_point(&mut self, point: &Point, crs: Option<&Crs>) -> Result<()> {
        let values = self.session.transform(crs, &point.coordinates)?;
        if values.is_empty() || values.len() > COORD_AXES.len() {
            return Err(GmlError::InvalidGeometry(format!(
                "A GML 2.1 coord holds 1 to {} ordinates, got {}",
                COORD_AXES.len(),
                values.len()
            )));
        }
        self.start_geometry("Point", &point.common)?;
        self.out.start_element("coord")?;
        for (axis, value) in COORD_AXES.iter().zip(values.iter()) {
            self.out.text_element(axis, &self.session.format(*value))?;
        }
        self.out.end_element()?;
        self.out.end_element()
    }

    fn write_linear_ring(&mut self, ring: &Geometry, crs: Option<&Crs>) -> Result<()> {
        let common = ring
            .common()
            .ok_or_else(|| unsupported(ring.element_name()))?;
        let points = linear_points(ring).ok_or_else(|| unsupported("Ring with non-linear members"))?;
        self.start_geometry("LinearRing", common)?;
        self.write_coordinates(&points, crs)?;
        self.out.end_element()
    }

    fn write_boundaries(
        &mut self,
        exterior: Option<&Geometry>,
        interiors: &[Geometry],
        crs: Option<&Crs>,
    ) -> Result<()> {
        if let Some(exterior) = exterior {
            self.write_member("outerBoundaryIs", exterior, crs)?;
        }
        for interior in interiors {
            self.write_member("innerBoundaryIs", interior, crs)?;
        }
        Ok(())
    }

    fn write_multi(&mut self, multi: &MultiGeometry, crs: Option<&Crs>) -> Result<()> {
        match multi.kind {
            MultiKind::Point | MultiKind::LineString | MultiKind::Polygon | MultiKind::Geometry => {}
            kind => return Err(unsupported(kind.element_name())),
        }
        self.start_geometry(multi.kind.element_name(), &multi.common)?;
        for member in &multi.members {
            self.write_member(multi.kind.member_name(), member, crs)?;
        }
        self.out.end_element()
    }

    fn write_box(&mut self, envelope: &Envelope) -> Result<()> {
        let crs = envelope.crs.as_ref();
        let lower = Point::new(envelope.lower.clone());
        let upper = Point::new(envelope.upper.clone());
        self.out.start_element("Box")?;
        if let Some(srs) = self.session.srs_name(crs) {
            self.out.attribute("srsName", srs)?;
        }
        self.write_coordinates(&[ControlPoint::from(lower), ControlPoint::from(upper)], crs)?;
        self.out.end_element()
    }

    /// Write a property, by reference when the member was already exported
    fn write_member(&mut self, property: &str, member: &Geometry, crs: Option<&Crs>) -> Result<()> {
        if member.is_reference() {
            return Err(unsupported("reference placeholder"));
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

    fn start_geometry(&mut self, name: &str, common: &GeometryCommon) -> Result<()> {
        self.out.start_element(name)?;
        if let Some(id) = common.id.as_deref().filter(|id| !id.is_empty()) {
            self.session.mark_exported(id);
            self.out.attribute("gid", id)?;
        }
        if let Some(srs) = self.session.srs_name(common.crs.as_ref()) {
            self.out.attribute("srsName", srs)?;
        }
        Ok(())
    }

    fn write_coordinates(&mut self, points: &[ControlPoint], crs: Option<&Crs>) -> Result<()> {
        let mut tuples = Vec::with_capacity(points.len());
        for point in points {
            match point {
                ControlPoint::Point(p) => {
                    tuples.push((p.coordinates.as_slice(), p.common.crs.as_ref().or(crs)))
                }
                ControlPoint::Reference(_) => {
                    return Err(unsupported("reference placeholder"));
                }
            }
        }
        let (_, formatted) = self.session.homogeneous_tuples(&tuples)?;
        let text = formatted
            .iter()
            .map(|t| t.join(","))
            .collect::<Vec<_>>()
            .join(" ");
        self.out.start_element("coordinates")?;
        self.out.attribute("decimal", ".")?;
        self.out.attribute("cs", ",")?;
        self.out.attribute("ts", " ")?;
        self.out.text(&text)?;
        self.out.end_element()
    }
}

fn unsupported(what: &str) -> GmlError {
    GmlError::Unsupported(format!(
        "Cannot write {} in GML 2.1 as it is not supported in this version of GML",
        what
    ))
}

/// Control points of a curve or ring made only of linear pieces.
///
/// Consecutive members share their joint point, which is kept once.
fn linear_points(geometry: &Geometry) -> Option<Vec<ControlPoint>> {
    match geometry {
        Geometry::LineString(l) => Some(l.points().to_vec()),
        Geometry::LinearRing(r) => Some(r.points().to_vec()),
        Geometry::Curve(c) => {
            let mut points = Vec::new();
            for segment in &c.segments {
                match segment {
                    CurveSegment::LineStringSegment(s) => append_joined(&mut points, s.points()),
                    _ => return None,
                }
            }
            Some(points)
        }
        Geometry::Ring(r) => {
            let mut points = Vec::new();
            for member in &r.members {
                append_joined(&mut points, &linear_points(member)?);
            }
            Some(points)
        }
        _ => None,
    }
}

fn append_joined(points: &mut Vec<ControlPoint>, next: &[ControlPoint]) {
    let skip = match (points.last(), next.first()) {
        (Some(last), Some(first)) => last.coordinates().is_some() && last.coordinates() == first.coordinates(),
        _ => false,
    };
    points.extend(next.iter().skip(usize::from(skip)).cloned());
}
