//! Test geometry builders.
//!
//! `create_geometries_for()` produces one instance of every geometry kind a
//! version can write, used by the roundtrip tests. Any new geometry kind
//! should be added here.

#![allow(dead_code)]

use gmlgeom::geometry::point::control_points;
use gmlgeom::geometry::{
    CompositeCurve, CompositeSolid, CompositeSurface, ControlPoint, Curve, CurveSegment, Envelope,
    GeometricComplex, Geometry, GeometryObject, LineString, LineStringSegment, LinearRing,
    MultiGeometry, MultiKind, OrientableCurve, OrientableSurface, Point, Polygon, PolygonPatch,
    PolyhedralSurface, Ring, Solid, Surface, SurfacePatch, Tin, Triangle, TriangulatedSurface,
};
use gmlgeom::io::gml::GmlVersion;
use gmlgeom::types::Measure;

/// Control points from coordinate slices
pub fn points(coords: &[&[f64]]) -> Vec<ControlPoint> {
    control_points(coords.iter().map(|c| c.to_vec()))
}

/// Closed axis-aligned square ring starting at `(x, y)`
pub fn square_ring(x: f64, y: f64, size: f64) -> LinearRing {
    LinearRing::new(points(&[
        &[x, y],
        &[x + size, y],
        &[x + size, y + size],
        &[x, y + size],
        &[x, y],
    ]))
    .unwrap()
}

/// Closed triangle ring
pub fn triangle_ring(x: f64, y: f64) -> LinearRing {
    LinearRing::new(points(&[&[x, y], &[x + 1.0, y], &[x, y + 1.0], &[x, y]])).unwrap()
}

/// Square polygon with an optional hole
pub fn square_polygon(x: f64, y: f64, size: f64, hole: bool) -> Polygon {
    let interiors = if hole {
        vec![square_ring(x + size / 4.0, y + size / 4.0, size / 2.0).into()]
    } else {
        Vec::new()
    };
    Polygon::new(Some(square_ring(x, y, size).into()), interiors)
}

/// Straight line string
pub fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> LineString {
    LineString::new(points(&[&[x0, y0], &[x1, y1]])).unwrap()
}

/// Curve made of a linear segment followed by a three-point arc
pub fn arc_curve() -> Curve {
    Curve::new(vec![
        LineStringSegment::new(points(&[&[0.0, 0.0], &[1.0, 0.0]]))
            .unwrap()
            .into(),
        CurveSegment::Arc {
            points: points(&[&[1.0, 0.0], &[2.0, 1.0], &[3.0, 0.0]]),
        },
    ])
    .unwrap()
}

/// Closed shell of a unit cube made of six square faces
pub fn cube_shell() -> CompositeSurface {
    let faces: Vec<Geometry> = (0..6)
        .map(|i| square_polygon(i as f64 * 2.0, 0.0, 1.0, false).into())
        .collect();
    CompositeSurface::new(faces).unwrap()
}

/// One geometry of every kind `version` can write
pub fn create_geometries_for(version: GmlVersion) -> Vec<Geometry> {
    let mut geometries: Vec<Geometry> = vec![
        Point::xy(1.5, -2.25).into(),
        Point::xyz(1.0, 2.0, 3.0).into(),
        line(0.0, 0.0, 10.0, 5.0).into(),
        square_polygon(0.0, 0.0, 4.0, true).into(),
        MultiGeometry::new(
            MultiKind::Point,
            vec![Point::xy(0.0, 0.0).into(), Point::xy(1.0, 1.0).into()],
        )
        .unwrap()
        .into(),
        MultiGeometry::new(
            MultiKind::Polygon,
            vec![
                square_polygon(0.0, 0.0, 1.0, false).into(),
                square_polygon(5.0, 5.0, 1.0, false).into(),
            ],
        )
        .unwrap()
        .into(),
        Envelope::new(vec![0.0, 0.0], vec![10.0, 20.0], None).into(),
    ];
    if version.is_gml2() {
        return geometries;
    }

    geometries.extend([
        arc_curve().into(),
        OrientableCurve::new(line(0.0, 0.0, 1.0, 1.0).into(), true).into(),
        CompositeCurve::new(vec![
            line(0.0, 0.0, 1.0, 0.0).into(),
            line(1.0, 0.0, 1.0, 1.0).into(),
        ])
        .unwrap()
        .into(),
        Surface::new(vec![
            SurfacePatch::Polygon(PolygonPatch::new(Some(square_ring(0.0, 0.0, 1.0).into()), vec![])),
            SurfacePatch::Triangle(Triangle::new(triangle_ring(2.0, 0.0)).unwrap()),
        ])
        .into(),
        PolyhedralSurface::new(vec![PolygonPatch::new(
            Some(square_ring(0.0, 0.0, 1.0).into()),
            vec![],
        )])
        .into(),
        TriangulatedSurface::new(vec![
            Triangle::new(triangle_ring(0.0, 0.0)).unwrap(),
            Triangle::new(triangle_ring(5.0, 5.0)).unwrap(),
        ])
        .into(),
        Tin::new(
            Measure::unitless(15.0),
            points(&[&[0.0, 0.0, 1.0], &[1.0, 0.0, 2.0], &[0.0, 1.0, 3.0]]),
        )
        .unwrap()
        .into(),
        OrientableSurface::new(square_polygon(0.0, 0.0, 1.0, false).into(), true).into(),
        cube_shell().into(),
        Solid::new(Some(cube_shell().into()), vec![]).into(),
        CompositeSolid::new(vec![Solid::new(Some(cube_shell().into()), vec![]).into()])
            .unwrap()
            .into(),
        GeometricComplex::new(vec![Point::xy(3.0, 4.0).into(), line(0.0, 0.0, 2.0, 2.0).into()])
            .unwrap()
            .into(),
        MultiGeometry::new(MultiKind::Curve, vec![arc_curve().into()])
            .unwrap()
            .into(),
        MultiGeometry::new(
            MultiKind::Surface,
            vec![square_polygon(0.0, 0.0, 1.0, false).into()],
        )
        .unwrap()
        .into(),
        MultiGeometry::new(
            MultiKind::Solid,
            vec![Solid::new(Some(cube_shell().into()), vec![]).into()],
        )
        .unwrap()
        .into(),
        Ring::new(vec![line(0.0, 0.0, 1.0, 0.0).into(), line(1.0, 0.0, 0.0, 0.0).into()])
            .unwrap()
            .into(),
    ]);
    geometries
}

/// Point carrying an identifier
pub fn identified_point(id: &str, x: f64, y: f64) -> Point {
    Point::xy(x, y).with_id(id)
}
