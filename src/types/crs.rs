//! Coordinate reference system handle
//!
//! The codec never interprets a CRS; it only carries the name found in an
//! `srsName` attribute and, when known, the coordinate dimension.

use std::fmt;

/// A named coordinate reference system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crs {
    name: String,
    dimension: Option<usize>,
}

impl Crs {
    /// Create a CRS from its name (e.g. `EPSG:4326`)
    pub fn new(name: impl Into<String>) -> Self {
        Crs {
            name: name.into(),
            dimension: None,
        }
    }

    /// Create a CRS with a known coordinate dimension
    pub fn with_dimension(name: impl Into<String>, dimension: usize) -> Self {
        Crs {
            name: name.into(),
            dimension: Some(dimension),
        }
    }

    /// Name as written to `srsName`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias used on output (same as the name)
    pub fn alias(&self) -> &str {
        &self.name
    }

    /// Coordinate dimension, if known
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Crs {
    fn from(name: &str) -> Self {
        Crs::new(name)
    }
}

impl From<String> for Crs {
    fn from(name: String) -> Self {
        Crs::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_creation() {
        let crs = Crs::new("EPSG:4326");
        assert_eq!(crs.name(), "EPSG:4326");
        assert_eq!(crs.alias(), "EPSG:4326");
        assert_eq!(crs.dimension(), None);
    }

    #[test]
    fn test_crs_with_dimension() {
        let crs = Crs::with_dimension("EPSG:4979", 3);
        assert_eq!(crs.dimension(), Some(3));
        assert_eq!(crs.to_string(), "EPSG:4979");
    }

    #[test]
    fn test_crs_from_str() {
        let crs: Crs = "urn:ogc:def:crs:EPSG::31466".into();
        assert_eq!(crs, Crs::new("urn:ogc:def:crs:EPSG::31466"));
    }
}
