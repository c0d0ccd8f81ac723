//! Curve segment sub-grammar
//!
//! Segment parsing lives on [`GmlGeometryReader`] so that segments holding
//! geometries (`OffsetCurve`) and point properties can call back into the
//! geometry reader.

use super::coordinates::read_tuple;
use super::geometry_reader::{Expect, GmlGeometryReader};
use crate::error::{GmlError, Result};
use crate::geometry::{AffinePlacement, ControlPoint, CurveSegment, Knot, LineStringSegment};
use crate::types::Crs;
use std::io::BufRead;

const CIRCULAR_ARC_3_POINTS: &str = "circularArc3Points";
const CIRCULAR_ARC_2_POINTS_WITH_BULGE: &str = "circularArc2PointWithBulge";
const CIRCULAR_ARC_CENTER_POINT: &str = "circularArcCenterPointWithRadius";
const POLYNOMIAL_SPLINE: &str = "polynomialSpline";
const RATIONAL_SPLINE: &str = "rationalSpline";

impl<'a, R: BufRead> GmlGeometryReader<'a, R> {
    /// Read one curve segment element
    pub fn read_curve_segment(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        if !self.cursor.is_start() || self.cursor.namespace() != self.ns {
            return Err(self.unexpected("a curve segment"));
        }
        let name = self.cursor.local_name().to_string();
        log::trace!("Reading curve segment gml:{}", name);
        let segment = match name.as_str() {
            "LineStringSegment" => {
                CurveSegment::LineStringSegment(self.read_line_string_segment(crs)?)
            }
            "Arc" => CurveSegment::Arc {
                points: self.read_three_point_arc("Arc", crs)?,
            },
            "Circle" => CurveSegment::Circle {
                points: self.read_three_point_arc("Circle", crs)?,
            },
            "ArcString" => self.read_arc_string(crs)?,
            "ArcByBulge" => self.read_arc_by_bulge(crs)?,
            "ArcStringByBulge" => self.read_arc_string_by_bulge(crs)?,
            "ArcByCenterPoint" => self.read_center_point_arc(crs, false)?,
            "CircleByCenterPoint" => self.read_center_point_arc(crs, true)?,
            "Bezier" => self.read_bezier(crs)?,
            "BSpline" => self.read_bspline(crs)?,
            "CubicSpline" => self.read_cubic_spline(crs)?,
            "Geodesic" => CurveSegment::Geodesic {
                points: self.read_geodesic("Geodesic", crs, Some(2))?,
            },
            "GeodesicString" => CurveSegment::GeodesicString {
                points: self.read_geodesic("GeodesicString", crs, None)?,
            },
            "Clothoid" => self.read_clothoid()?,
            "OffsetCurve" => self.read_offset_curve(crs)?,
            _ => return Err(self.unexpected("a curve segment")),
        };
        self.cursor.require_end(self.ns, &name)?;
        Ok(segment)
    }

    pub(crate) fn read_line_string_segment(
        &mut self,
        crs: Option<&Crs>,
    ) -> Result<LineStringSegment> {
        self.cursor.require_start(self.ns, "LineStringSegment")?;
        self.check_interpolation(&["linear"])?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_min_points("LineStringSegment", points.len(), 2)?;
        self.cursor.require_end(self.ns, "LineStringSegment")?;
        LineStringSegment::new(points)
    }

    fn read_three_point_arc(&mut self, name: &str, crs: Option<&Crs>) -> Result<Vec<ControlPoint>> {
        self.check_interpolation(&[CIRCULAR_ARC_3_POINTS])?;
        self.check_num_arc(1)?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_exact_points(name, points.len(), 3)?;
        Ok(points)
    }

    fn read_arc_string(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.check_interpolation(&[CIRCULAR_ARC_3_POINTS])?;
        let num_arc = self.declared_num_arc();
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_min_points("ArcString", points.len(), 3)?;
        if points.len() % 2 == 0 {
            return Err(self.cursor.error(format!(
                "An ArcString must have an odd number of points, found {}",
                points.len()
            )));
        }
        self.check_declared_num_arc(num_arc, (points.len() - 1) / 2)?;
        Ok(CurveSegment::ArcString { points })
    }

    fn read_arc_by_bulge(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.check_interpolation(&[CIRCULAR_ARC_2_POINTS_WITH_BULGE])?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_exact_points("ArcByBulge", points.len(), 2)?;
        self.cursor.require_start(self.ns, "bulge")?;
        let bulge = self.cursor.element_text_as_f64()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "normal")?;
        let normal = read_tuple(self.cursor)?;
        self.cursor.next_tag()?;
        Ok(CurveSegment::ArcByBulge {
            points,
            bulge,
            normal,
        })
    }

    fn read_arc_string_by_bulge(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.check_interpolation(&[CIRCULAR_ARC_2_POINTS_WITH_BULGE])?;
        let num_arc = self.declared_num_arc();
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_min_points("ArcStringByBulge", points.len(), 2)?;
        let mut bulges = Vec::new();
        while self.cursor.is_start_of(self.ns, "bulge") {
            bulges.push(self.cursor.element_text_as_f64()?);
            self.cursor.next_tag()?;
        }
        let mut normals = Vec::new();
        while self.cursor.is_start_of(self.ns, "normal") {
            normals.push(read_tuple(self.cursor)?);
            self.cursor.next_tag()?;
        }
        let arcs = points.len() - 1;
        self.check_declared_num_arc(num_arc, arcs)?;
        if bulges.len() != arcs || normals.len() != arcs {
            return Err(self.cursor.error(format!(
                "An ArcStringByBulge with {} points needs {} bulge and normal values, found {} and {}",
                points.len(),
                arcs,
                bulges.len(),
                normals.len()
            )));
        }
        Ok(CurveSegment::ArcStringByBulge {
            points,
            bulges,
            normals,
        })
    }

    fn read_center_point_arc(&mut self, crs: Option<&Crs>, circle: bool) -> Result<CurveSegment> {
        let name = if circle {
            "CircleByCenterPoint"
        } else {
            "ArcByCenterPoint"
        };
        self.check_interpolation(&[CIRCULAR_ARC_CENTER_POINT])?;
        self.check_num_arc(1)?;
        self.cursor.next_tag()?;
        let mut points = self.read_control_points(crs, true)?;
        self.check_exact_points(name, points.len(), 1)?;
        self.cursor.require_start(self.ns, "radius")?;
        let radius = self.read_measure()?;
        self.cursor.next_tag()?;
        let start_angle = if self.cursor.is_start_of(self.ns, "startAngle") {
            let angle = self.read_measure()?;
            self.cursor.next_tag()?;
            Some(angle)
        } else {
            None
        };
        let end_angle = if self.cursor.is_start_of(self.ns, "endAngle") {
            let angle = self.read_measure()?;
            self.cursor.next_tag()?;
            Some(angle)
        } else {
            None
        };
        let midpoint = points.remove(0);
        if circle {
            if let (Some(start), Some(end)) = (&start_angle, &end_angle) {
                if start != end {
                    return Err(self.cursor.error(
                        "The start and end angle of a CircleByCenterPoint must be equal",
                    ));
                }
            }
            return Ok(CurveSegment::CircleByCenterPoint {
                midpoint,
                radius,
                start_angle: start_angle.or(end_angle),
            });
        }
        Ok(CurveSegment::ArcByCenterPoint {
            midpoint,
            radius,
            start_angle,
            end_angle,
        })
    }

    fn read_bezier(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.check_interpolation(&[POLYNOMIAL_SPLINE])?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        let degree = self.read_degree()?;
        let knots = self.read_knots()?;
        let knots: [Knot; 2] = match knots.as_slice() {
            [first, second] => [*first, *second],
            _ => {
                return Err(self.cursor.error(format!(
                    "A Bezier must have exactly 2 knots, found {}",
                    knots.len()
                )))
            }
        };
        Ok(CurveSegment::Bezier {
            points,
            degree,
            knots,
        })
    }

    fn read_bspline(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        let interpolation = self.check_interpolation(&[POLYNOMIAL_SPLINE, RATIONAL_SPLINE])?;
        let mut polynomial = interpolation.as_deref() != Some(RATIONAL_SPLINE);
        match self.cursor.attribute(None, "isPolynomial").map(str::trim) {
            Some("true") | Some("1") => polynomial = true,
            Some("false") | Some("0") => polynomial = false,
            Some(other) => {
                return Err(self.cursor.error(format!(
                    "Invalid isPolynomial value '{}'",
                    other
                )))
            }
            None => {}
        }
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        let degree = self.read_degree()?;
        let knots = self.read_knots()?;
        if knots.len() < 2 {
            return Err(self.cursor.error(format!(
                "A BSpline must have at least 2 knots, found {}",
                knots.len()
            )));
        }
        Ok(CurveSegment::BSpline {
            points,
            degree,
            knots,
            polynomial,
        })
    }

    fn read_degree(&mut self) -> Result<u32> {
        self.cursor.require_start(self.ns, "degree")?;
        let degree = self.cursor.element_text_as_u32()?;
        self.cursor.next_tag()?;
        Ok(degree)
    }

    fn read_knots(&mut self) -> Result<Vec<Knot>> {
        let mut knots = Vec::new();
        while self.cursor.is_start_of(self.ns, "knot") {
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "Knot")?;
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "value")?;
            let value = self.cursor.element_text_as_f64()?;
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "multiplicity")?;
            let multiplicity = self.cursor.element_text_as_u32()?;
            self.cursor.next_tag()?;
            self.cursor.require_start(self.ns, "weight")?;
            let weight = self.cursor.element_text_as_f64()?;
            self.cursor.next_tag()?;
            self.cursor.require_end(self.ns, "Knot")?;
            self.cursor.next_tag()?;
            self.cursor.require_end(self.ns, "knot")?;
            knots.push(Knot::new(value, multiplicity, weight));
            self.cursor.next_tag()?;
        }
        Ok(knots)
    }

    fn read_cubic_spline(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.check_interpolation(&["cubicSpline"])?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, true)?;
        self.check_min_points("CubicSpline", points.len(), 2)?;
        self.cursor.require_start(self.ns, "vectorAtStart")?;
        let vector_at_start = read_tuple(self.cursor)?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "vectorAtEnd")?;
        let vector_at_end = read_tuple(self.cursor)?;
        self.cursor.next_tag()?;
        Ok(CurveSegment::CubicSpline {
            points,
            vector_at_start,
            vector_at_end,
        })
    }

    fn read_geodesic(
        &mut self,
        name: &str,
        crs: Option<&Crs>,
        exact: Option<usize>,
    ) -> Result<Vec<ControlPoint>> {
        self.check_interpolation(&["geodesic"])?;
        self.cursor.next_tag()?;
        let points = self.read_control_points(crs, false)?;
        match exact {
            Some(n) => self.check_exact_points(name, points.len(), n)?,
            None => self.check_min_points(name, points.len(), 2)?,
        }
        Ok(points)
    }

    fn read_clothoid(&mut self) -> Result<CurveSegment> {
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "refLocation")?;
        let ref_location = self.read_affine_placement()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "scaleFactor")?;
        let scale_factor = self.cursor.element_text_as_f64()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "startParameter")?;
        let start_parameter = self.cursor.element_text_as_f64()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "endParameter")?;
        let end_parameter = self.cursor.element_text_as_f64()?;
        self.cursor.next_tag()?;
        Ok(CurveSegment::Clothoid {
            ref_location,
            scale_factor,
            start_parameter,
            end_parameter,
        })
    }

    /// Read `refLocation/AffinePlacement`, leaving the cursor on the end of `refLocation`
    fn read_affine_placement(&mut self) -> Result<AffinePlacement> {
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "AffinePlacement")?;
        self.cursor.next_tag()?;
        if !(self.cursor.is_start_of(self.ns, "location") || self.cursor.is_start_of(self.ns, "pos"))
        {
            return Err(self.unexpected("'location'"));
        }
        let location = read_tuple(self.cursor)?;
        self.cursor.next_tag()?;
        let mut ref_directions = Vec::new();
        while self.cursor.is_start_of(self.ns, "refDirection") {
            ref_directions.push(read_tuple(self.cursor)?);
            self.cursor.next_tag()?;
        }
        self.cursor.require_start(self.ns, "inDimension")?;
        let in_dimension = self.cursor.element_text_as_u32()?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "outDimension")?;
        let out_dimension = self.cursor.element_text_as_u32()?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "AffinePlacement")?;
        self.cursor.next_tag()?;
        self.cursor.require_end(self.ns, "refLocation")?;

        if ref_directions.is_empty() || in_dimension as usize != ref_directions.len() {
            return Err(self.cursor.error(format!(
                "AffinePlacement inDimension {} does not match {} refDirection elements",
                in_dimension,
                ref_directions.len()
            )));
        }
        if let Some(dir) = ref_directions
            .iter()
            .find(|d| d.len() != out_dimension as usize)
        {
            return Err(self.cursor.error(format!(
                "AffinePlacement outDimension {} does not match refDirection dimension {}",
                out_dimension,
                dir.len()
            )));
        }
        Ok(AffinePlacement {
            location,
            ref_directions,
            in_dimension,
            out_dimension,
        })
    }

    fn read_offset_curve(&mut self, crs: Option<&Crs>) -> Result<CurveSegment> {
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "offsetBase")?;
        let base = self.read_property(Expect::Curve, crs)?;
        self.cursor.next_tag()?;
        self.cursor.require_start(self.ns, "distance")?;
        let distance = self.read_measure()?;
        self.cursor.next_tag()?;
        let direction = if self.cursor.is_start_of(self.ns, "refDirection") {
            let direction = read_tuple(self.cursor)?;
            self.cursor.next_tag()?;
            Some(direction)
        } else {
            None
        };
        Ok(CurveSegment::OffsetCurve {
            base: Box::new(base),
            distance,
            direction,
        })
    }

    /// Check the `interpolation` attribute of the current segment, if present
    fn check_interpolation(&self, allowed: &[&str]) -> Result<Option<String>> {
        match self.cursor.attribute(None, "interpolation").map(str::trim) {
            None => Ok(None),
            Some(value) if allowed.contains(&value) => Ok(Some(value.to_string())),
            Some(value) => Err(self.cursor.error(format!(
                "Invalid interpolation '{}' for gml:{}, expected {}",
                value,
                self.cursor.local_name(),
                allowed.join(" or ")
            ))),
        }
    }

    fn check_num_arc(&self, expected: u32) -> Result<()> {
        if let Some(value) = self.cursor.attribute(None, "numArc") {
            if value.trim().parse::<u32>().ok() != Some(expected) {
                return Err(GmlError::parse(
                    self.cursor.location(),
                    format!("Invalid numArc '{}', expected {}", value, expected),
                ));
            }
        }
        Ok(())
    }

    /// `numArc` of the current start tag, kept until the points are read
    fn declared_num_arc(&self) -> Option<String> {
        self.cursor.attribute(None, "numArc").map(str::to_string)
    }

    fn check_declared_num_arc(&self, declared: Option<String>, arcs: usize) -> Result<()> {
        match declared {
            Some(value) if value.trim().parse::<usize>().ok() != Some(arcs) => Err(self.cursor.error(
                format!("Invalid numArc '{}', the points describe {} arcs", value, arcs),
            )),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_exact_points(&self, kind: &str, found: usize, expected: usize) -> Result<()> {
        if found != expected {
            return Err(self.cursor.error(format!(
                "A {} must have exactly {} points, found {}",
                kind, expected, found
            )));
        }
        Ok(())
    }
}
