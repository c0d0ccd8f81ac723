//! Geometry comparison utilities for tests.
//!
//! Provides tolerance-based coordinate assertions and a flattening walk
//! that collects every coordinate tuple of a geometry tree in document
//! order, so geometries can be compared up to identifier and CRS.

#![allow(dead_code)]

use approx::abs_diff_eq;
use gmlgeom::geometry::{ControlPoint, CurveSegment, Geometry, SurfacePatch};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-6;

// ===========================================================================
// Scalar & tuple assertions
// ===========================================================================

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        abs_diff_eq!(a, b, epsilon = tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two coordinate tuples are approximately equal.
pub fn assert_tuple_eq(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len(), "dimension mismatch: {:?} vs {:?}", a, b);
    for (x, y) in a.iter().zip(b) {
        assert!(
            abs_diff_eq!(*x, *y, epsilon = tol),
            "tuple mismatch: {:?} vs {:?} tol={tol}",
            a,
            b
        );
    }
}

/// Assert two tuple sequences are approximately equal.
pub fn assert_tuples_eq(a: &[Vec<f64>], b: &[Vec<f64>], tol: f64) {
    assert_eq!(a.len(), b.len(), "tuple count mismatch: {:?} vs {:?}", a, b);
    for (x, y) in a.iter().zip(b) {
        assert_tuple_eq(x, y, tol);
    }
}

// ===========================================================================
// Geometry flattening
// ===========================================================================

/// Coordinates of inline control points (references are skipped)
pub fn point_tuples(points: &[ControlPoint]) -> Vec<Vec<f64>> {
    points
        .iter()
        .filter_map(|p| p.coordinates().map(|c| c.to_vec()))
        .collect()
}

/// Every coordinate tuple of a geometry tree in document order
pub fn coordinates(geometry: &Geometry) -> Vec<Vec<f64>> {
    let mut out = Vec::new();
    collect(geometry, &mut out);
    out
}

fn collect_all(members: &[Geometry], out: &mut Vec<Vec<f64>>) {
    for member in members {
        collect(member, out);
    }
}

fn collect_boundaries(exterior: Option<&Geometry>, interiors: &[Geometry], out: &mut Vec<Vec<f64>>) {
    if let Some(exterior) = exterior {
        collect(exterior, out);
    }
    collect_all(interiors, out);
}

fn collect(geometry: &Geometry, out: &mut Vec<Vec<f64>>) {
    match geometry {
        Geometry::Point(p) => out.push(p.coordinates.clone()),
        Geometry::LineString(l) => out.extend(point_tuples(l.points())),
        Geometry::LinearRing(r) => out.extend(point_tuples(r.points())),
        Geometry::Curve(c) => {
            for segment in &c.segments {
                collect_segment(segment, out);
            }
        }
        Geometry::OrientableCurve(o) => collect(&o.base, out),
        Geometry::OrientableSurface(o) => collect(&o.base, out),
        Geometry::CompositeCurve(c) => collect_all(&c.members, out),
        Geometry::Ring(r) => collect_all(&r.members, out),
        Geometry::Polygon(p) => collect_boundaries(p.exterior.as_deref(), &p.interiors, out),
        Geometry::Surface(s) => {
            for patch in &s.patches {
                collect_patch(patch, out);
            }
        }
        Geometry::PolyhedralSurface(s) => {
            for patch in &s.patches {
                collect_boundaries(patch.exterior.as_deref(), &patch.interiors, out);
            }
        }
        Geometry::TriangulatedSurface(s) => {
            for triangle in &s.patches {
                out.extend(point_tuples(triangle.exterior().points()));
            }
        }
        Geometry::Tin(t) => out.extend(point_tuples(&t.control_points)),
        Geometry::CompositeSurface(c) => collect_all(&c.members, out),
        Geometry::Solid(s) => collect_boundaries(s.exterior.as_deref(), &s.interiors, out),
        Geometry::CompositeSolid(c) => collect_all(&c.members, out),
        Geometry::GeometricComplex(c) => collect_all(&c.members, out),
        Geometry::Multi(m) => collect_all(&m.members, out),
        Geometry::Envelope(e) => {
            out.push(e.lower.clone());
            out.push(e.upper.clone());
        }
        Geometry::Reference(_) => {}
    }
}

fn collect_segment(segment: &CurveSegment, out: &mut Vec<Vec<f64>>) {
    match segment {
        CurveSegment::OffsetCurve { base, .. } => collect(base, out),
        CurveSegment::Clothoid { ref_location, .. } => out.push(ref_location.location.clone()),
        other => out.extend(point_tuples(other.control_points())),
    }
}

fn collect_patch(patch: &SurfacePatch, out: &mut Vec<Vec<f64>>) {
    match patch {
        SurfacePatch::Polygon(p) => collect_boundaries(p.exterior.as_deref(), &p.interiors, out),
        SurfacePatch::Triangle(t) => out.extend(point_tuples(t.exterior().points())),
        SurfacePatch::Rectangle(r) => out.extend(point_tuples(r.exterior().points())),
        SurfacePatch::Cone(g) | SurfacePatch::Cylinder(g) | SurfacePatch::Sphere(g) => {
            for row in &g.grid {
                out.extend(point_tuples(row));
            }
        }
    }
}

/// Assert two geometries hold the same coordinates in the same order
pub fn assert_same_coordinates(a: &Geometry, b: &Geometry) {
    assert_tuples_eq(&coordinates(a), &coordinates(b), TOL);
}
