//! Shared test utilities for gmlgeom integration tests.
//!
//! Collects document wrapping, read/write helpers and version constants
//! that all test crates import via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use gmlgeom::io::gml::{GmlReader, GmlVersion, GmlWriter, GML32_NS, GML_NS, XLINK_NS};
use gmlgeom::{Geometry, GmlError, IdentifierContext};

// ===========================================================================
// Version constants
// ===========================================================================

/// Every supported GML version
pub const ALL_VERSIONS: [GmlVersion; 4] = [
    GmlVersion::Gml21,
    GmlVersion::Gml30,
    GmlVersion::Gml31,
    GmlVersion::Gml32,
];

/// The GML 3 family
pub const GML3_VERSIONS: [GmlVersion; 3] =
    [GmlVersion::Gml30, GmlVersion::Gml31, GmlVersion::Gml32];

/// Namespace URI bound to the `gml` prefix for a version
pub fn gml_ns(version: GmlVersion) -> &'static str {
    match version {
        GmlVersion::Gml32 => GML32_NS,
        _ => GML_NS,
    }
}

// ===========================================================================
// Document wrapping
// ===========================================================================

/// Wrap a geometry fragment into a feature document declaring the `gml`
/// and `xlink` prefixes.
///
/// ```ignore
/// let xml = wrap(GmlVersion::Gml31, "<gml:Point>...</gml:Point>");
/// ```
pub fn wrap(version: GmlVersion, fragment: &str) -> String {
    format!(
        r#"<app:Feature xmlns:app="urn:test" xmlns:gml="{}" xmlns:xlink="{}"><app:geometry>{}</app:geometry></app:Feature>"#,
        gml_ns(version),
        XLINK_NS,
        fragment
    )
}

// ===========================================================================
// Read / write helpers
// ===========================================================================

/// Read the first geometry of a wrapped fragment, panicking on error
pub fn read(version: GmlVersion, fragment: &str) -> Geometry {
    let xml = wrap(version, fragment);
    match GmlReader::from_str(&xml, version).read_geometry() {
        Ok(geometry) => geometry,
        Err(e) => panic!("failed to read {} fragment: {}\n{}", version, e, fragment),
    }
}

/// Read a wrapped fragment and also return the collected identifiers
pub fn read_with_context(version: GmlVersion, fragment: &str) -> (Geometry, IdentifierContext) {
    let xml = wrap(version, fragment);
    let mut reader = GmlReader::from_str(&xml, version);
    let geometry = reader
        .read_geometry()
        .unwrap_or_else(|e| panic!("failed to read {} fragment: {}", version, e));
    (geometry, reader.into_id_context())
}

/// Read a wrapped fragment that is expected to fail
pub fn read_err(version: GmlVersion, fragment: &str) -> GmlError {
    let xml = wrap(version, fragment);
    match GmlReader::from_str(&xml, version).read_geometry() {
        Ok(geometry) => panic!("expected a read error, got {:?}", geometry),
        Err(e) => e,
    }
}

/// Write a geometry with a fresh writer
pub fn write(version: GmlVersion, geometry: &Geometry) -> String {
    GmlWriter::new(version)
        .write_to_string(geometry)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", version, e))
}

/// Write a geometry, then read the output back
pub fn roundtrip(version: GmlVersion, geometry: &Geometry) -> Geometry {
    let xml = write(version, geometry);
    GmlReader::from_str(&xml, version)
        .read_geometry()
        .unwrap_or_else(|e| panic!("failed to re-read {} output: {}\n{}", version, e, xml))
}

/// Count occurrences of a substring
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
