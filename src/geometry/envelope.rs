//! Envelope (bounding box)

use crate::types::Crs;

/// Axis-aligned bounding box given by two corners
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Lower corner ordinates
    pub lower: Vec<f64>,
    /// Upper corner ordinates
    pub upper: Vec<f64>,
    /// Coordinate reference system
    pub crs: Option<Crs>,
}

impl Envelope {
    /// Create a new envelope
    pub fn new(lower: Vec<f64>, upper: Vec<f64>, crs: Option<Crs>) -> Self {
        Envelope { lower, upper, crs }
    }

    /// Coordinate dimension of the corners
    pub fn dimension(&self) -> usize {
        self.lower.len().max(self.upper.len())
    }
}
