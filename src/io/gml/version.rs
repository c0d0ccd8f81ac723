//! GML versions and their per-version grammar tables
//!
//! Everything that differs between GML 2.1, 3.0, 3.1 and 3.2 is kept here as
//! data so the readers and writers share one traversal.

use ahash::AHashSet;
use once_cell::sync::Lazy;
use std::fmt;

/// Namespace of GML 2.1, 3.0 and 3.1
pub const GML_NS: &str = "http://www.opengis.net/gml";

/// Namespace of GML 3.2
pub const GML32_NS: &str = "http://www.opengis.net/gml/3.2";

/// XLink namespace
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Supported GML versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GmlVersion {
    /// GML 2.1.x
    Gml21,
    /// GML 3.0.x
    Gml30,
    /// GML 3.1.x
    Gml31,
    /// GML 3.2.x
    Gml32,
}

impl GmlVersion {
    /// Namespace URI of the version
    pub fn namespace(self) -> &'static str {
        match self {
            GmlVersion::Gml32 => GML32_NS,
            _ => GML_NS,
        }
    }

    /// Check whether this is the legacy GML 2 grammar
    pub fn is_gml2(self) -> bool {
        self == GmlVersion::Gml21
    }

    /// Default number of decimal places for written coordinates
    pub fn default_precision(self) -> usize {
        if self.is_gml2() {
            5
        } else {
            8
        }
    }

    /// Whether every written geometry must carry an identifier
    pub fn requires_id(self) -> bool {
        self == GmlVersion::Gml32
    }

    /// Whether anonymous point sequences are written as `posList`
    pub fn writes_pos_list(self) -> bool {
        !matches!(self, GmlVersion::Gml21 | GmlVersion::Gml30)
    }

    /// Element names of the two envelope corners on output
    pub fn envelope_corners(self) -> (&'static str, &'static str) {
        match self {
            GmlVersion::Gml30 => ("pos", "pos"),
            _ => ("lowerCorner", "upperCorner"),
        }
    }

    /// Whether MultiLineString/MultiPolygon are written under their own names
    pub fn writes_legacy_aggregates(self) -> bool {
        self != GmlVersion::Gml32
    }

    /// Whether rings written by this version carry `gml:id`/`srsName`
    pub fn ring_attributes(self) -> bool {
        self != GmlVersion::Gml32
    }

    /// Attributes accepted for the coordinate dimension of `posList`
    pub fn dimension_attributes(self) -> &'static [&'static str] {
        match self {
            GmlVersion::Gml30 | GmlVersion::Gml31 => &["srsDimension", "dimension"],
            _ => &["srsDimension"],
        }
    }

    /// Membership table for a substitution family
    pub fn family(self, family: GeometryFamily) -> &'static AHashSet<&'static str> {
        if self.is_gml2() {
            return match family {
                GeometryFamily::Primitive => &GML2_PRIMITIVES,
                GeometryFamily::Aggregate => &GML2_AGGREGATES,
                _ => &EMPTY,
            };
        }
        match family {
            GeometryFamily::Curve => &CURVES,
            GeometryFamily::Ring => &RINGS,
            GeometryFamily::Surface => &SURFACES,
            GeometryFamily::Solid => &SOLIDS,
            GeometryFamily::Primitive => &PRIMITIVES,
            GeometryFamily::Aggregate => &AGGREGATES,
            GeometryFamily::Complex => &COMPLEXES,
            GeometryFamily::Implicit => &IMPLICITS,
        }
    }

    /// Check whether `local_name` belongs to a substitution family
    pub fn is_in_family(self, family: GeometryFamily, local_name: &str) -> bool {
        self.family(family).contains(local_name)
    }

    /// Check whether a GML element is a geometry element of this version
    pub fn is_geometry_name(self, local_name: &str) -> bool {
        [
            GeometryFamily::Primitive,
            GeometryFamily::Aggregate,
            GeometryFamily::Complex,
            GeometryFamily::Implicit,
        ]
        .iter()
        .any(|f| self.is_in_family(*f, local_name))
    }

    /// Local name of the envelope element in this version
    pub fn envelope_name(self) -> &'static str {
        if self.is_gml2() {
            "Box"
        } else {
            "Envelope"
        }
    }
}

impl fmt::Display for GmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GmlVersion::Gml21 => "GML 2.1",
            GmlVersion::Gml30 => "GML 3.0",
            GmlVersion::Gml31 => "GML 3.1",
            GmlVersion::Gml32 => "GML 3.2",
        };
        write!(f, "{}", s)
    }
}

/// Substitution families of the geometry grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryFamily {
    Curve,
    Ring,
    Surface,
    Solid,
    Primitive,
    Aggregate,
    Complex,
    Implicit,
}

const CURVE_NAMES: &[&str] = &["CompositeCurve", "Curve", "OrientableCurve", "LineString"];
const RING_NAMES: &[&str] = &["LinearRing", "Ring"];
const SURFACE_NAMES: &[&str] = &[
    "CompositeSurface",
    "OrientableSurface",
    "Polygon",
    "PolyhedralSurface",
    "Surface",
    "Tin",
    "TriangulatedSurface",
];
const SOLID_NAMES: &[&str] = &["CompositeSolid", "Solid"];

fn table(names: &[&[&'static str]]) -> AHashSet<&'static str> {
    names.iter().flat_map(|n| n.iter().copied()).collect()
}

static EMPTY: Lazy<AHashSet<&'static str>> = Lazy::new(AHashSet::new);
static CURVES: Lazy<AHashSet<&'static str>> = Lazy::new(|| table(&[CURVE_NAMES]));
static RINGS: Lazy<AHashSet<&'static str>> = Lazy::new(|| table(&[RING_NAMES]));
static SURFACES: Lazy<AHashSet<&'static str>> = Lazy::new(|| table(&[SURFACE_NAMES]));
static SOLIDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| table(&[SOLID_NAMES]));
static PRIMITIVES: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    table(&[&["Point"], CURVE_NAMES, RING_NAMES, SURFACE_NAMES, SOLID_NAMES])
});
static AGGREGATES: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    table(&[&[
        "MultiCurve",
        "MultiGeometry",
        "MultiLineString",
        "MultiPoint",
        "MultiPolygon",
        "MultiSolid",
        "MultiSurface",
    ]])
});
static COMPLEXES: Lazy<AHashSet<&'static str>> = Lazy::new(|| table(&[&["GeometricComplex"]]));
static IMPLICITS: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| table(&[&["Grid", "RectifiedGrid"]]));
static GML2_PRIMITIVES: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    table(&[&["Point", "Box", "LineString", "LinearRing", "Polygon"]])
});
static GML2_AGGREGATES: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    table(&[&["MultiGeometry", "MultiLineString", "MultiPoint", "MultiPolygon"]])
});
