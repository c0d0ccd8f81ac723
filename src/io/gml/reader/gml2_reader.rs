//! GML 2.1 geometry reader
//!
//! GML 2 knows only simple features: Point, LineString, LinearRing, Polygon,
//! Box and the four Multi* aggregates. Identifiers use the unprefixed `gid`
//! attribute and there are no standard properties.

use super::coordinates::{read_coord, read_coordinates};
use super::geometry_reader::Expect;
use super::xml_cursor::XmlCursor;
use crate::error::{GmlError, Result};
use crate::geometry::curve::{LINEAR_RING_MIN_POINTS, LINE_STRING_MIN_POINTS};
use crate::geometry::point::control_points;
use crate::geometry::{
    Envelope, Geometry, GeometryCommon, GeometryReference, LineString,
    LinearRing, MultiGeometry, MultiKind, Point, Polygon,
};
use crate::id_context::IdentifierContext;
use crate::io::gml::version::{GeometryFamily, GmlVersion, GML_NS, XLINK_NS};
use crate::types::{validate_gml_id, Crs};
use std::io::BufRead;

/// Recursive-descent reader for GML 2.1 geometries
pub struct Gml2GeometryReader<'a, R: BufRead> {
    cursor: &'a mut XmlCursor<R>,
    id_context: &'a mut IdentifierContext,
}

impl<'a, R: BufRead> Gml2GeometryReader<'a, R> {
    pub fn new(cursor: &'a mut XmlCursor<R>, id_context: &'a mut IdentifierContext) -> Self {
        Gml2GeometryReader { cursor, id_context }
    }

    /// Check whether the cursor is on a GML 2 geometry element
    pub fn is_geometry_element(&self) -> bool {
        self.cursor.is_start()
            && self.cursor.namespace() == GML_NS
            && self.cursor.local_name() != "Box"
            && GmlVersion::Gml21.is_geometry_name(self.cursor.local_name())
    }

    /// Check whether the cursor is on a GML 2 geometry or `Box` element
    pub fn is_geometry_or_envelope_element(&self) -> bool {
        self.is_geometry_element() || self.cursor.is_start_of(GML_NS, "Box")
    }

    /// Read any GML 2 geometry or `Box`
    pub fn read(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        let geometry = self.read_element(default_crs)?;
        self.id_context.add_root(&geometry);
        Ok(geometry)
    }

    fn read_element(&mut self, default_crs: Option<&Crs>) -> Result<Geometry> {
        if !self.cursor.is_start() || self.cursor.namespace() != GML_NS {
            return Err(self.unexpected("a GML 2 geometry element"));
        }
        let name = self.cursor.local_name().to_string();
        log::debug!("Reading gml:{} (GML 2) at {}", name, self.cursor.location());
        let geometry = match name.as_str() {
            "Point" => Geometry::Point(self.read_point(default_crs)?),
            "LineString" => Geometry::LineString(self.read_line_string(default_crs)?),
            "LinearRing" => Geometry::LinearRing(self.read_linear_ring(default_crs)?),
            "Polygon" => Geometry::Polygon(self.read_polygon(default_crs)?),
            "Box" => Geometry::Envelope(self.read_box(default_crs)?),
            _ if GmlVersion::Gml21.is_in_family(GeometryFamily::Aggregate, &name) => {
                Geometry::Multi(self.read_multi(default_crs)?)
            }
            _ => return Err(self.unexpected("a GML 2 geometry element")),
        };
        log::debug!("Finished gml:{} (GML 2)", name);
        Ok(geometry)
    }

    pub fn read_point(&mut self, default_crs: Option<&Crs>) -> Result<Point> {
        self.cursor.require_start(GML_NS, "Point")?;
        let common = self.begin(default_crs)?;
        let coordinates = if self.cursor.is_start_of(GML_NS, "coord") {
            read_coord(self.cursor, GML_NS)?
        } else if self.cursor.is_start_of(GML_NS, "coordinates") {
            let mut tuples = read_coordinates(self.cursor)?;
            if tuples.len() != 1 {
                return Err(self.cursor.error(format!(
                    "A Point's coordinates must hold exactly one tuple, found {}",
                    tuples.len()
                )));
            }
            tuples.remove(0)
        } else {
            return Err(self.unexpected("'coord' or 'coordinates'"));
        };
        self.cursor.next_tag()?;
        self.cursor.require_end(GML_NS, "Point")?;
        let point = Point {
            common,
            coordinates,
        };
        self.register(&point.common)?;
        Ok(point)
    }

    pub fn read_line_string(&mut self, default_crs: Option<&Crs>) -> Result<LineString> {
        self.cursor.require_start(GML_NS, "LineString")?;
        let common = self.begin(default_crs)?;
        let tuples = self.read_tuples()?;
        self.check_min_points("LineString", tuples.len(), LINE_STRING_MIN_POINTS)?;
        self.cursor.require_end(GML_NS, "LineString")?;
        let mut line = LineString::new(control_points(tuples))?;
        line.common = common;
        self.register(&line.common)?;
        Ok(line)
    }

    pub fn read_linear_ring(&mut self, default_crs: Option<&Crs>) -> Result<LinearRing> {
        self.cursor.require_start(GML_NS, "LinearRing")?;
        let common = self.begin(default_crs)?;
        let tuples = self.read_tuples()?;
        self.check_min_points("LinearRing", tuples.len(), LINEAR_RING_MIN_POINTS)?;
        self.cursor.require_end(GML_NS, "LinearRing")?;
        let mut ring = LinearRing::new(control_points(tuples))?;
        ring.common = common;
        self.register(&ring.common)?;
        Ok(ring)
    }

    pub fn read_polygon(&mut self, default_crs: Option<&Crs>) -> Result<Polygon> {
        self.cursor.require_start(GML_NS, "Polygon")?;
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        let mut exterior = None;
        if self.cursor.is_start_of(GML_NS, "outerBoundaryIs") {
            exterior = Some(self.read_property(Expect::LinearRing, crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        let mut interiors = Vec::new();
        while self.cursor.is_start_of(GML_NS, "innerBoundaryIs") {
            interiors.push(self.read_property(Expect::LinearRing, crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(GML_NS, "Polygon")?;
        let mut polygon = Polygon::new(exterior, interiors);
        polygon.common = common;
        self.register(&polygon.common)?;
        Ok(polygon)
    }

    /// Read a `Box` as an [`Envelope`]
    pub fn read_box(&mut self, default_crs: Option<&Crs>) -> Result<Envelope> {
        self.cursor.require_start(GML_NS, "Box")?;
        let crs = self.read_srs_name().or_else(|| default_crs.cloned());
        self.cursor.next_tag()?;
        let mut tuples = self.read_tuples()?;
        if tuples.len() != 2 {
            return Err(self.cursor.error(format!(
                "A Box must hold exactly two coordinate tuples, found {}",
                tuples.len()
            )));
        }
        self.cursor.require_end(GML_NS, "Box")?;
        let upper = tuples.remove(1);
        Ok(Envelope::new(tuples.remove(0), upper, crs))
    }

    pub fn read_multi(&mut self, default_crs: Option<&Crs>) -> Result<MultiGeometry> {
        let name = self.cursor.local_name().to_string();
        let kind = match MultiKind::from_element_name(&name) {
            Some(kind)
                if GmlVersion::Gml21.is_in_family(GeometryFamily::Aggregate, &name) =>
            {
                kind
            }
            _ => return Err(self.unexpected("a GML 2 aggregate")),
        };
        let member_name = kind.member_name();
        let expect = Expect::for_multi(kind);
        let common = self.begin(default_crs)?;
        let crs = common.crs.clone();
        let mut members = Vec::new();
        while self.cursor.is_start_of(GML_NS, member_name) {
            members.push(self.read_property(expect, crs.as_ref())?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_end(GML_NS, &name)?;
        let mut multi = MultiGeometry::new(kind, members)?;
        multi.common = common;
        self.register(&multi.common)?;
        Ok(multi)
    }

    fn read_property(&mut self, expect: Expect, crs: Option<&Crs>) -> Result<Geometry> {
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
        let value = if let Some(uri) = href {
            if self.cursor.is_start() {
                return Err(self.cursor.error(format!(
                    "Property '{}' has both an xlink:href and inline content",
                    property.qualified()
                )));
            }
            let reference = GeometryReference::new(uri, self.cursor.system_id().map(str::to_string));
            self.id_context.add_reference(reference.clone());
            Geometry::Reference(reference)
        } else {
            let value = match expect {
                Expect::Point => Geometry::Point(self.read_point(crs)?),
                Expect::LineString => Geometry::LineString(self.read_line_string(crs)?),
                Expect::LinearRing => Geometry::LinearRing(self.read_linear_ring(crs)?),
                Expect::Polygon => Geometry::Polygon(self.read_polygon(crs)?),
                _ => {
                    if !self.is_geometry_element() {
                        return Err(self.unexpected("a GML 2 geometry element"));
                    }
                    self.read_element(crs)?
                }
            };
            self.cursor.next_tag()?;
            value
        };
        self.cursor
            .require_end(&property.namespace, &property.local_name)?;
        Ok(value)
    }

    /// Read `coordinates` or a run of `coord` elements.
    ///
    /// Leaves the cursor on the first tag after the coordinates.
    fn read_tuples(&mut self) -> Result<Vec<Vec<f64>>> {
        if self.cursor.is_start_of(GML_NS, "coordinates") {
            let tuples = read_coordinates(self.cursor)?;
            self.cursor.next_tag()?;
            return Ok(tuples);
        }
        let mut tuples = Vec::new();
        while self.cursor.is_start_of(GML_NS, "coord") {
            tuples.push(read_coord(self.cursor, GML_NS)?);
            self.cursor.next_tag()?;
        }
        Ok(tuples)
    }

    fn begin(&mut self, default_crs: Option<&Crs>) -> Result<GeometryCommon> {
        let id = match self
            .cursor
            .attribute(None, "gid")
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => {
                validate_gml_id(id)?;
                Some(id.to_string())
            }
            None => None,
        };
        let crs = self.read_srs_name().or_else(|| default_crs.cloned());
        self.cursor.next_tag()?;
        Ok(GeometryCommon {
            id,
            crs,
            ..GeometryCommon::new()
        })
    }

    fn read_srs_name(&self) -> Option<Crs> {
        self.cursor
            .attribute(None, "srsName")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Crs::new)
    }

    fn register(&mut self, common: &GeometryCommon) -> Result<()> {
        if let Some(id) = &common.id {
            self.id_context.reserve(id)?;
        }
        Ok(())
    }

    fn check_min_points(&self, kind: &str, found: usize, min: usize) -> Result<()> {
        if found < min {
            return Err(self.cursor.error(format!(
                "A {} must have at least {} points, found {}",
                kind, min, found
            )));
        }
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> GmlError {
        let found = match self.cursor.name() {
            Some(n) if self.cursor.is_start() => format!("start of '{}'", n.qualified()),
            Some(n) => format!("end of '{}'", n.qualified()),
            None => "no element".to_string(),
        };
        self.cursor
            .error(format!("Expected {}, found {}", expected, found))
    }
}
