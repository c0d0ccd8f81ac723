//! # gmlgeom
//!
//! A pure Rust library for reading and writing geometries in the Geography
//! Markup Language, versions 2.1, 3.0, 3.1 and 3.2.
//!
//! ## Features
//!
//! - Points, curves, rings, surfaces, solids, complexes and aggregates
//! - All GML 3 curve segments (arcs, splines, clothoids, offset curves, ...)
//! - Polygon, triangle, rectangle and gridded surface patches
//! - `xlink:href` references kept as placeholders and collected per document
//! - Writer sessions that emit each identified geometry once and reference it afterwards
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gmlgeom::{GmlReader, GmlVersion, GmlWriter};
//!
//! let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="P1">
//!     <gml:pos>1 2</gml:pos>
//! </gml:Point>"#;
//! let geometry = GmlReader::from_str(xml, GmlVersion::Gml32).read_geometry()?;
//!
//! let out = GmlWriter::new(GmlVersion::Gml31).write_to_string(&geometry)?;
//! # Ok::<(), gmlgeom::error::GmlError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Geometry`] - closed enum over every geometry kind
//! - [`GeometryObject`] - trait giving access to id, CRS and standard properties
//! - [`IdentifierContext`] - identifiers and references of one parsed document
//! - [`GmlReader`] / [`GmlWriter`] - version-aware codec facades

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod geometry;
pub mod id_context;
pub mod io;
pub mod types;

// Re-export commonly used types
pub use error::{GmlError, Location, Result};
pub use types::{CodeType, Crs, Measure, StandardProperties};

// Re-export geometry types
pub use geometry::{
    CompositeCurve, CompositeSolid, CompositeSurface, ControlPoint, Curve, CurveSegment,
    Envelope, GeometricComplex, Geometry, GeometryCommon, GeometryObject, GeometryReference,
    LineString, LinearRing, MultiGeometry, MultiKind, OrientableCurve, OrientableSurface, Point,
    Polygon, PolyhedralSurface, Ring, Solid, Surface, SurfacePatch, Tin, TriangulatedSurface,
};

pub use id_context::IdentifierContext;

// Re-export I/O types
pub use io::gml::{
    GmlReader, GmlReaderConfiguration, GmlVersion, GmlWriter, GmlWriterConfiguration,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
