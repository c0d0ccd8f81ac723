//! Error types for the GML geometry codec

use std::fmt;
use std::io;
use thiserror::Error;

/// Position inside the markup stream where an error was detected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Byte offset into the input
    pub offset: u64,
    /// Qualified name of the current element (empty before the first tag)
    pub element: String,
}

impl Location {
    /// Create a new location
    pub fn new(offset: u64, element: impl Into<String>) -> Self {
        Self {
            offset,
            element: element.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.element.is_empty() {
            write!(f, "offset {}", self.offset)
        } else {
            write!(f, "offset {} ({})", self.offset, self.element)
        }
    }
}

/// Main error type for GML reading and writing
#[derive(Debug, Error)]
pub enum GmlError {
    /// IO error occurred while reading or writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML reported by the underlying parser
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Structural mismatch: wrong element, namespace or cardinality
    #[error("Parse error at {location}: {message}")]
    Parse { location: Location, message: String },

    /// Construct is recognized but cannot be handled in the active version
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Malformed geometry identifier
    #[error("Invalid identifier: {0}")]
    Identifier(String),

    /// Geometry violates a structural constraint (e.g. too few points)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A coordinate transformation is required but not available
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl GmlError {
    /// Create a structural parse error
    pub fn parse(location: Location, message: impl Into<String>) -> Self {
        GmlError::Parse {
            location,
            message: message.into(),
        }
    }

    /// Check whether this error is a structural parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, GmlError::Parse { .. })
    }
}

/// Result type alias for GML operations
pub type Result<T> = std::result::Result<T, GmlError>;

impl From<String> for GmlError {
    fn from(s: String) -> Self {
        GmlError::Custom(s)
    }
}

impl From<&str> for GmlError {
    fn from(s: &str) -> Self {
        GmlError::Custom(s.to_string())
    }
}
