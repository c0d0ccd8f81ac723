//! Reading tests for the GML 3.0 / 3.1 / 3.2 grammar.
//!
//! Run with:  cargo test --test gml3_reading_tests

mod common;

use common::comparison::{assert_tuple_eq, assert_tuples_eq, coordinates, point_tuples, TOL};
use common::{read, read_err, read_with_context, GML3_VERSIONS};
use gmlgeom::geometry::{ControlPoint, CurveSegment, Geometry, GeometryObject, MultiKind, SurfacePatch};
use gmlgeom::io::gml::{GmlReader, GmlReaderConfiguration, GmlVersion};
use gmlgeom::{Crs, GmlError};

const V31: GmlVersion = GmlVersion::Gml31;

// ---------------------------------------------------------------------------
// Points and point sequences
// ---------------------------------------------------------------------------

#[test]
fn test_point_spellings() {
    for version in GML3_VERSIONS {
        for body in [
            "<gml:pos>1 2</gml:pos>",
            "<gml:coordinates>1,2</gml:coordinates>",
            "<gml:coord><gml:X>1</gml:X><gml:Y>2</gml:Y></gml:coord>",
        ] {
            let geometry = read(version, &format!("<gml:Point gml:id=\"P1\">{}</gml:Point>", body));
            match geometry {
                Geometry::Point(p) => {
                    assert_eq!(p.id(), Some("P1"));
                    assert_tuple_eq(&p.coordinates, &[1.0, 2.0], TOL);
                }
                other => panic!("expected a Point, got {:?}", other),
            }
        }
    }
}

#[test]
fn test_point_with_two_coordinate_tuples_fails() {
    let err = read_err(V31, "<gml:Point><gml:coordinates>1,2 3,4</gml:coordinates></gml:Point>");
    assert!(err.is_parse(), "unexpected error {:?}", err);
}

#[test]
fn test_line_string_pos_list_uses_srs_dimension() {
    let geometry = read(
        V31,
        r#"<gml:LineString srsName="EPSG:4979">
            <gml:posList srsDimension="3">0 0 1 1 1 2</gml:posList>
        </gml:LineString>"#,
    );
    let Geometry::LineString(line) = geometry else {
        panic!("expected a LineString");
    };
    assert_eq!(line.crs().map(|c| c.name()), Some("EPSG:4979"));
    assert_tuples_eq(
        &point_tuples(line.points()),
        &[vec![0.0, 0.0, 1.0], vec![1.0, 1.0, 2.0]],
        TOL,
    );
}

#[test]
fn test_pos_list_dimension_falls_back_to_crs_dimension() {
    let geometry = read(
        V31,
        r#"<gml:LineString srsName="EPSG:4979" srsDimension="3">
            <gml:posList>0 0 1 1 1 2</gml:posList>
        </gml:LineString>"#,
    );
    assert_eq!(coordinates(&geometry).len(), 2);
}

#[test]
fn test_legacy_dimension_attribute_only_before_gml32() {
    let body = r#"<gml:LineString><gml:posList dimension="3">0 0 1 1 1 2</gml:posList></gml:LineString>"#;
    assert_eq!(coordinates(&read(GmlVersion::Gml31, body)).len(), 2);
    assert_eq!(coordinates(&read(GmlVersion::Gml32, body)).len(), 3);
}

#[test]
fn test_pos_list_with_partial_tuple_fails() {
    let err = read_err(
        V31,
        "<gml:LineString><gml:posList srsDimension=\"2\">0 0 1</gml:posList></gml:LineString>",
    );
    assert!(err.is_parse());
}

#[test]
fn test_line_string_needs_two_points() {
    let err = read_err(V31, "<gml:LineString><gml:pos>0 0</gml:pos></gml:LineString>");
    assert!(err.is_parse());
}

#[test]
fn test_mixed_pos_and_point_property() {
    let (geometry, ctx) = read_with_context(
        V31,
        r##"<gml:LineString>
            <gml:pos>0 0</gml:pos>
            <gml:pointProperty><gml:Point gml:id="PP"><gml:pos>1 1</gml:pos></gml:Point></gml:pointProperty>
            <gml:pointProperty xlink:href="#P9"/>
        </gml:LineString>"##,
    );
    let Geometry::LineString(line) = geometry else {
        panic!("expected a LineString");
    };
    assert_eq!(line.points().len(), 3);
    assert_eq!(line.points()[1].id(), Some("PP"));
    assert!(matches!(&line.points()[2], ControlPoint::Reference(r) if r.uri == "#P9"));
    assert!(ctx.contains("PP"));
    assert_eq!(ctx.references().len(), 1);
}

// ---------------------------------------------------------------------------
// Rings and polygons
// ---------------------------------------------------------------------------

const SQUARE: &str = "<gml:posList>0 0 4 0 4 4 0 4 0 0</gml:posList>";
const HOLE: &str = "<gml:posList>1 1 2 1 2 2 1 2 1 1</gml:posList>";

#[test]
fn test_polygon_with_interior() {
    let xml = format!(
        "<gml:Polygon gml:id=\"PG\"><gml:exterior><gml:LinearRing>{}</gml:LinearRing></gml:exterior>\
         <gml:interior><gml:LinearRing>{}</gml:LinearRing></gml:interior></gml:Polygon>",
        SQUARE, HOLE
    );
    let Geometry::Polygon(polygon) = read(V31, &xml) else {
        panic!("expected a Polygon");
    };
    assert!(matches!(polygon.exterior.as_deref(), Some(Geometry::LinearRing(r)) if r.points().len() == 5));
    assert_eq!(polygon.interiors.len(), 1);
}

#[test]
fn test_polygon_legacy_boundary_names() {
    let xml = format!(
        "<gml:Polygon><gml:outerBoundaryIs><gml:LinearRing>{}</gml:LinearRing></gml:outerBoundaryIs>\
         <gml:innerBoundaryIs><gml:LinearRing>{}</gml:LinearRing></gml:innerBoundaryIs></gml:Polygon>",
        SQUARE, HOLE
    );
    let Geometry::Polygon(polygon) = read(GmlVersion::Gml30, &xml) else {
        panic!("expected a Polygon");
    };
    assert!(polygon.exterior.is_some());
    assert_eq!(polygon.interiors.len(), 1);
}

#[test]
fn test_polygon_exterior_by_reference() {
    let (geometry, ctx) = read_with_context(
        V31,
        r##"<gml:Polygon><gml:exterior xlink:href="#R1"/></gml:Polygon>"##,
    );
    let Geometry::Polygon(polygon) = geometry else {
        panic!("expected a Polygon");
    };
    match polygon.exterior.as_deref() {
        Some(Geometry::Reference(r)) => assert_eq!(r.local_id(), Some("R1")),
        other => panic!("expected a reference, got {:?}", other),
    }
    assert_eq!(ctx.unresolved_references().len(), 1);
}

#[test]
fn test_reference_and_inline_content_is_fatal() {
    let xml = format!(
        "<gml:Polygon><gml:exterior xlink:href=\"#R1\"><gml:LinearRing>{}</gml:LinearRing></gml:exterior></gml:Polygon>",
        SQUARE
    );
    assert!(read_err(V31, &xml).is_parse());
}

#[test]
fn test_linear_ring_needs_four_points() {
    let err = read_err(
        V31,
        "<gml:LinearRing><gml:posList>0 0 1 0 0 0</gml:posList></gml:LinearRing>",
    );
    assert!(err.is_parse());
}

#[test]
fn test_ring_of_curve_members() {
    let geometry = read(
        V31,
        r#"<gml:Ring>
            <gml:curveMember><gml:LineString><gml:posList>0 0 1 0 1 1</gml:posList></gml:LineString></gml:curveMember>
            <gml:curveMember><gml:LineString><gml:posList>1 1 0 0</gml:posList></gml:LineString></gml:curveMember>
        </gml:Ring>"#,
    );
    let Geometry::Ring(ring) = geometry else {
        panic!("expected a Ring");
    };
    assert_eq!(ring.members.len(), 2);
}

// ---------------------------------------------------------------------------
// Curves and segments
// ---------------------------------------------------------------------------

fn read_segment(segment: &str) -> Result<CurveSegment, GmlError> {
    let xml = common::wrap(
        V31,
        &format!("<gml:Curve><gml:segments>{}</gml:segments></gml:Curve>", segment),
    );
    match GmlReader::from_str(&xml, V31).read_geometry()? {
        Geometry::Curve(mut curve) => Ok(curve.segments.remove(0)),
        other => panic!("expected a Curve, got {:?}", other),
    }
}

#[test]
fn test_arc_needs_exactly_three_points() {
    let ok = read_segment(r#"<gml:Arc><gml:posList>0 0 1 1 2 0</gml:posList></gml:Arc>"#).unwrap();
    assert!(matches!(ok, CurveSegment::Arc { ref points } if points.len() == 3));

    let err = read_segment(r#"<gml:Arc><gml:posList>0 0 1 1 2 0 3 3</gml:posList></gml:Arc>"#)
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_arc_rejects_num_arc_other_than_one() {
    let err = read_segment(r#"<gml:Arc numArc="2"><gml:posList>0 0 1 1 2 0</gml:posList></gml:Arc>"#)
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_arc_rejects_wrong_interpolation() {
    let err = read_segment(
        r#"<gml:Arc interpolation="linear"><gml:posList>0 0 1 1 2 0</gml:posList></gml:Arc>"#,
    )
    .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_arc_string_needs_odd_point_count() {
    let ok = read_segment(r#"<gml:ArcString><gml:posList>0 0 1 1 2 0 3 -1 4 0</gml:posList></gml:ArcString>"#)
        .unwrap();
    assert_eq!(ok.num_arcs(), Some(2));

    let err = read_segment(r#"<gml:ArcString><gml:posList>0 0 1 1 2 0 3 -1</gml:posList></gml:ArcString>"#)
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_arc_string_num_arc_must_match_points() {
    let ok = read_segment(
        r#"<gml:ArcString numArc="2"><gml:posList>0 0 1 1 2 0 3 -1 4 0</gml:posList></gml:ArcString>"#,
    )
    .unwrap();
    assert_eq!(ok.num_arcs(), Some(2));

    let err = read_segment(
        r#"<gml:ArcString numArc="3"><gml:posList>0 0 1 1 2 0 3 -1 4 0</gml:posList></gml:ArcString>"#,
    )
    .unwrap_err();
    assert!(err.is_parse(), "unexpected error {:?}", err);

    let err = read_segment(
        r#"<gml:ArcStringByBulge numArc="2">
            <gml:posList>0 0 2 0</gml:posList>
            <gml:bulge>0.5</gml:bulge>
            <gml:normal>0 0 1</gml:normal>
        </gml:ArcStringByBulge>"#,
    )
    .unwrap_err();
    assert!(err.is_parse(), "unexpected error {:?}", err);
}

#[test]
fn test_arc_by_center_point() {
    let segment = read_segment(
        r#"<gml:ArcByCenterPoint numArc="1">
            <gml:pos>5 5</gml:pos>
            <gml:radius uom="m">2.5</gml:radius>
            <gml:startAngle uom="deg">0</gml:startAngle>
            <gml:endAngle uom="deg">90</gml:endAngle>
        </gml:ArcByCenterPoint>"#,
    )
    .unwrap();
    match segment {
        CurveSegment::ArcByCenterPoint {
            radius,
            start_angle,
            end_angle,
            ..
        } => {
            assert_eq!(radius.value, 2.5);
            assert_eq!(radius.uom.as_deref(), Some("m"));
            assert_eq!(start_angle.map(|a| a.value), Some(0.0));
            assert_eq!(end_angle.map(|a| a.value), Some(90.0));
        }
        other => panic!("unexpected segment {:?}", other),
    }
}

#[test]
fn test_bezier_needs_two_knots() {
    let one_knot = r#"<gml:Bezier><gml:posList>0 0 1 1 2 0</gml:posList><gml:degree>2</gml:degree>
        <gml:knot><gml:Knot><gml:value>0</gml:value><gml:multiplicity>3</gml:multiplicity><gml:weight>1</gml:weight></gml:Knot></gml:knot>
        </gml:Bezier>"#;
    assert!(read_segment(one_knot).unwrap_err().is_parse());
}

#[test]
fn test_rational_bspline() {
    let segment = read_segment(
        r#"<gml:BSpline interpolation="rationalSpline"><gml:posList>0 0 1 1 2 0</gml:posList><gml:degree>2</gml:degree>
        <gml:knot><gml:Knot><gml:value>0</gml:value><gml:multiplicity>3</gml:multiplicity><gml:weight>1</gml:weight></gml:Knot></gml:knot>
        <gml:knot><gml:Knot><gml:value>1</gml:value><gml:multiplicity>3</gml:multiplicity><gml:weight>1</gml:weight></gml:Knot></gml:knot>
        </gml:BSpline>"#,
    )
    .unwrap();
    match segment {
        CurveSegment::BSpline {
            degree,
            knots,
            polynomial,
            ..
        } => {
            assert_eq!(degree, 2);
            assert_eq!(knots.len(), 2);
            assert_eq!(knots[1].multiplicity, 3);
            assert!(!polynomial);
        }
        other => panic!("unexpected segment {:?}", other),
    }
}

#[test]
fn test_geodesic_needs_exactly_two_points() {
    assert!(read_segment(r#"<gml:Geodesic><gml:posList>0 0 1 1</gml:posList></gml:Geodesic>"#).is_ok());
    assert!(read_segment(r#"<gml:Geodesic><gml:posList>0 0 1 1 2 2</gml:posList></gml:Geodesic>"#)
        .unwrap_err()
        .is_parse());
}

#[test]
fn test_offset_curve_holds_base_curve() {
    let segment = read_segment(
        r#"<gml:OffsetCurve>
            <gml:offsetBase><gml:LineString><gml:posList>0 0 10 0</gml:posList></gml:LineString></gml:offsetBase>
            <gml:distance uom="m">2</gml:distance>
        </gml:OffsetCurve>"#,
    )
    .unwrap();
    match segment {
        CurveSegment::OffsetCurve { base, distance, .. } => {
            assert!(matches!(*base, Geometry::LineString(_)));
            assert_eq!(distance.value, 2.0);
        }
        other => panic!("unexpected segment {:?}", other),
    }
}

#[test]
fn test_orientable_curve_orientation() {
    let geometry = read(
        V31,
        r#"<gml:OrientableCurve orientation="-">
            <gml:baseCurve><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:baseCurve>
        </gml:OrientableCurve>"#,
    );
    assert!(matches!(geometry, Geometry::OrientableCurve(ref c) if c.reversed));

    let err = read_err(
        V31,
        r#"<gml:OrientableCurve orientation="x">
            <gml:baseCurve><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:baseCurve>
        </gml:OrientableCurve>"#,
    );
    assert!(err.is_parse());
}

#[test]
fn test_composite_curve_needs_a_member() {
    assert!(read_err(V31, "<gml:CompositeCurve></gml:CompositeCurve>").is_parse());
}

// ---------------------------------------------------------------------------
// Surfaces, patches, solids
// ---------------------------------------------------------------------------

#[test]
fn test_surface_patches() {
    let geometry = read(
        V31,
        r#"<gml:Surface><gml:patches>
            <gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>
            <gml:Triangle><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Triangle>
            <gml:Rectangle><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Rectangle>
        </gml:patches></gml:Surface>"#,
    );
    let Geometry::Surface(surface) = geometry else {
        panic!("expected a Surface");
    };
    let names: Vec<_> = surface.patches.iter().map(|p| p.element_name()).collect();
    assert_eq!(names, vec!["PolygonPatch", "Triangle", "Rectangle"]);
}

#[test]
fn test_triangle_needs_exactly_four_points() {
    let err = read_err(
        V31,
        r#"<gml:Surface><gml:patches>
            <gml:Triangle><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Triangle>
        </gml:patches></gml:Surface>"#,
    );
    assert!(err.is_parse());
}

#[test]
fn test_triangle_exterior_must_be_inline() {
    let err = read_err(
        V31,
        r##"<gml:Surface><gml:patches>
            <gml:Triangle><gml:exterior xlink:href="#R1"/></gml:Triangle>
        </gml:patches></gml:Surface>"##,
    );
    assert!(err.is_parse());
}

#[test]
fn test_gridded_patch_keeps_declared_shape() {
    let geometry = read(
        V31,
        r#"<gml:Surface><gml:patches>
            <gml:Cylinder horizontalCurveType="circularArc3Points" verticalCurveType="linear">
                <gml:row><gml:posList>0 0 1 0 2 0</gml:posList></gml:row>
                <gml:row><gml:posList>0 5 1 5 2 5</gml:posList></gml:row>
                <gml:rows>2</gml:rows>
                <gml:columns>4</gml:columns>
            </gml:Cylinder>
        </gml:patches></gml:Surface>"#,
    );
    let Geometry::Surface(surface) = geometry else {
        panic!("expected a Surface");
    };
    match &surface.patches[0] {
        SurfacePatch::Cylinder(grid) => {
            assert_eq!(grid.grid.len(), 2);
            assert_eq!(grid.rows, 2);
            assert_eq!(grid.columns, 4);
            assert!(!grid.is_consistent());
        }
        other => panic!("unexpected patch {:?}", other),
    }
}

#[test]
fn test_tin_control_points() {
    let geometry = read(
        V31,
        r#"<gml:Tin><gml:trianglePatches/>
            <gml:maxLength uom="m">15</gml:maxLength>
            <gml:controlPoint><gml:posList srsDimension="3">0 0 1 1 0 2 0 1 3</gml:posList></gml:controlPoint>
        </gml:Tin>"#,
    );
    let Geometry::Tin(tin) = geometry else {
        panic!("expected a Tin");
    };
    assert_eq!(tin.control_points.len(), 3);
    assert_eq!(tin.max_length.value, 15.0);
}

#[test]
fn test_tin_needs_three_control_points() {
    let err = read_err(
        V31,
        r#"<gml:Tin><gml:maxLength>15</gml:maxLength>
            <gml:controlPoint><gml:posList>0 0 1 0</gml:posList></gml:controlPoint>
        </gml:Tin>"#,
    );
    assert!(err.is_parse());
}

#[test]
fn test_solid_with_composite_shell() {
    let geometry = read(
        V31,
        r#"<gml:Solid gml:id="S1"><gml:exterior><gml:CompositeSurface>
            <gml:surfaceMember><gml:Polygon><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon></gml:surfaceMember>
        </gml:CompositeSurface></gml:exterior></gml:Solid>"#,
    );
    let Geometry::Solid(solid) = geometry else {
        panic!("expected a Solid");
    };
    assert!(matches!(solid.exterior.as_deref(), Some(Geometry::CompositeSurface(_))));
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[test]
fn test_multi_surface_member_and_members() {
    let ring = "<gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LinearRing></gml:exterior>";
    let xml = format!(
        "<gml:MultiSurface><gml:surfaceMember><gml:Polygon>{r}</gml:Polygon></gml:surfaceMember>\
         <gml:surfaceMembers><gml:Polygon>{r}</gml:Polygon><gml:Polygon>{r}</gml:Polygon></gml:surfaceMembers></gml:MultiSurface>",
        r = ring
    );
    let Geometry::Multi(multi) = read(V31, &xml) else {
        panic!("expected a MultiSurface");
    };
    assert_eq!(multi.kind, MultiKind::Surface);
    assert_eq!(multi.len(), 3);
}

#[test]
fn test_members_list_must_be_last() {
    let point = "<gml:Point><gml:pos>0 0</gml:pos></gml:Point>";
    let xml = format!(
        "<gml:MultiPoint><gml:pointMembers>{p}</gml:pointMembers><gml:pointMember>{p}</gml:pointMember></gml:MultiPoint>",
        p = point
    );
    assert!(read_err(V31, &xml).is_parse());
}

#[test]
fn test_multi_point_rejects_wrong_member_kind() {
    let xml = "<gml:MultiPoint><gml:pointMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:pointMember></gml:MultiPoint>";
    assert!(read_err(V31, xml).is_parse());
}

#[test]
fn test_geometric_complex() {
    let geometry = read(
        V31,
        r#"<gml:GeometricComplex>
            <gml:element><gml:Point><gml:pos>0 0</gml:pos></gml:Point></gml:element>
            <gml:element><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:element>
        </gml:GeometricComplex>"#,
    );
    assert!(matches!(geometry, Geometry::GeometricComplex(ref c) if c.members.len() == 2));
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[test]
fn test_envelope_spellings() {
    let spellings = [
        "<gml:lowerCorner>1 2</gml:lowerCorner><gml:upperCorner>3 4</gml:upperCorner>",
        "<gml:pos>1 2</gml:pos><gml:pos>3 4</gml:pos>",
        "<gml:coord><gml:X>1</gml:X><gml:Y>2</gml:Y></gml:coord><gml:coord><gml:X>3</gml:X><gml:Y>4</gml:Y></gml:coord>",
        "<gml:coordinates>1,2 3,4</gml:coordinates>",
    ];
    for body in spellings {
        let xml = format!("<gml:Envelope srsName=\"EPSG:4326\">{}</gml:Envelope>", body);
        let Geometry::Envelope(envelope) = read(V31, &xml) else {
            panic!("expected an Envelope");
        };
        assert_tuple_eq(&envelope.lower, &[1.0, 2.0], TOL);
        assert_tuple_eq(&envelope.upper, &[3.0, 4.0], TOL);
        assert_eq!(envelope.crs, Some(Crs::new("EPSG:4326")));
    }
}

#[test]
fn test_envelope_crs_from_default() {
    let xml = common::wrap(
        V31,
        "<gml:Envelope><gml:lowerCorner>1 2</gml:lowerCorner><gml:upperCorner>3 4</gml:upperCorner></gml:Envelope>",
    );
    let config = GmlReaderConfiguration {
        default_crs: Some(Crs::new("EPSG:25832")),
        ..Default::default()
    };
    let geometry = GmlReader::from_str(&xml, V31)
        .with_configuration(config)
        .read_geometry()
        .unwrap();
    assert_eq!(geometry.crs().map(|c| c.name()), Some("EPSG:25832"));
}

// ---------------------------------------------------------------------------
// Identifiers, properties and errors
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_identifier_rejected() {
    for id in ["1abc", "a:b"] {
        let xml = format!("<gml:Point gml:id=\"{}\"><gml:pos>0 0</gml:pos></gml:Point>", id);
        let err = read_err(V31, &xml);
        assert!(matches!(err, GmlError::Identifier(_)), "{} gave {:?}", id, err);
    }
}

#[test]
fn test_legacy_gid_accepted() {
    let geometry = read(V31, "<gml:Point gid=\"G7\"><gml:pos>0 0</gml:pos></gml:Point>");
    assert_eq!(geometry.id(), Some("G7"));
}

#[test]
fn test_duplicate_identifier_in_document() {
    let point = "<gml:Point gml:id=\"D1\"><gml:pos>0 0</gml:pos></gml:Point>";
    let xml = format!(
        "<gml:MultiPoint><gml:pointMember>{p}</gml:pointMember><gml:pointMember>{p}</gml:pointMember></gml:MultiPoint>",
        p = point
    );
    assert!(matches!(read_err(V31, &xml), GmlError::Identifier(_)));
}

#[test]
fn test_nested_identifiers_registered() {
    let (_, ctx) = read_with_context(
        V31,
        r#"<gml:Polygon gml:id="PG"><gml:exterior><gml:LinearRing gml:id="LR">
            <gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon>"#,
    );
    assert_eq!(ctx.ids().collect::<Vec<_>>(), vec!["LR", "PG"]);
}

#[test]
fn test_nested_identifiers_resolve_into_read_geometry() {
    let (geometry, ctx) = read_with_context(
        V31,
        r#"<gml:MultiCurve gml:id="MC">
            <gml:curveMember><gml:LineString gml:id="L1">
                <gml:pos>0 0</gml:pos>
                <gml:pointProperty><gml:Point gml:id="PP"><gml:pos>1 1</gml:pos></gml:Point></gml:pointProperty>
            </gml:LineString></gml:curveMember>
        </gml:MultiCurve>"#,
    );
    assert_eq!(ctx.root_count(), 1);
    assert_eq!(ctx.get_object("MC"), Some(&geometry));
    let Geometry::Multi(multi) = &geometry else {
        panic!("expected a MultiCurve");
    };
    assert_eq!(ctx.get_object("L1"), Some(&multi.members[0]));
    assert!(matches!(ctx.get_object("PP"), Some(Geometry::Point(p)) if p.y() == 1.0));
}

#[test]
fn test_standard_properties() {
    let geometry = read(
        GmlVersion::Gml32,
        r#"<gml:Point gml:id="P1">
            <gml:description>A point</gml:description>
            <gml:identifier codeSpace="urn:ids">42</gml:identifier>
            <gml:name>first</gml:name>
            <gml:name codeSpace="urn:names">second</gml:name>
            <gml:pos>0 0</gml:pos>
        </gml:Point>"#,
    );
    let props = &geometry.common().unwrap().properties;
    assert_eq!(props.description.as_deref(), Some("A point"));
    assert_eq!(props.identifier.as_ref().map(|c| c.value.as_str()), Some("42"));
    assert_eq!(props.names.len(), 2);
    assert_eq!(props.names[1].code_space.as_deref(), Some("urn:names"));
}

#[test]
fn test_skip_standard_properties() {
    let xml = common::wrap(
        V31,
        "<gml:Point><gml:description>x</gml:description><gml:pos>0 0</gml:pos></gml:Point>",
    );
    let config = GmlReaderConfiguration {
        skip_standard_properties: true,
        ..Default::default()
    };
    let geometry = GmlReader::from_str(&xml, V31)
        .with_configuration(config)
        .read_geometry()
        .unwrap();
    assert!(geometry.common().unwrap().properties.is_empty());
}

#[test]
fn test_grid_is_unsupported() {
    let err = read_err(V31, "<gml:Grid dimension=\"2\"></gml:Grid>");
    match err {
        GmlError::Unsupported(message) => {
            assert_eq!(message, "Parsing of 'gml:Grid' elements is not supported")
        }
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn test_wrong_namespace_is_not_a_geometry() {
    let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2"><gml:pos>0 0</gml:pos></gml:Point>"#;
    let mut reader = GmlReader::from_str(xml, GmlVersion::Gml31);
    assert!(reader.read_geometry().unwrap_err().is_parse());
}

#[test]
fn test_reads_consecutive_geometries() {
    let xml = common::wrap(
        V31,
        "<gml:Point><gml:pos>0 0</gml:pos></gml:Point></app:geometry><app:geometry><gml:Point><gml:pos>1 1</gml:pos></gml:Point>",
    );
    let geometries = GmlReader::from_str(&xml, V31).read_all().unwrap();
    assert_eq!(geometries.len(), 2);
}
