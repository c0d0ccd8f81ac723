//! Measures with a unit of measure (lengths and angles)

/// A numeric value with an optional `uom` reference
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    /// Numeric value
    pub value: f64,
    /// Unit of measure URI or symbol
    pub uom: Option<String>,
}

/// Length measure (radius, distance, max edge length)
pub type Length = Measure;

/// Angle measure (start/end angle of arcs)
pub type Angle = Measure;

impl Measure {
    /// Create a new measure
    pub fn new(value: f64, uom: impl Into<String>) -> Self {
        Measure {
            value,
            uom: Some(uom.into()),
        }
    }

    /// Create a measure without a unit
    pub fn unitless(value: f64) -> Self {
        Measure { value, uom: None }
    }
}

impl Default for Measure {
    fn default() -> Self {
        Self::unitless(0.0)
    }
}
