//! Numeric formatting and coordinate transformation hooks

use crate::error::{GmlError, Result};
use crate::types::Crs;

/// Turns ordinates into their textual form
pub trait CoordinateFormatter {
    fn format(&self, value: f64) -> String;
}

/// Fixed number of decimal places with trailing zeros removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormatter {
    pub places: usize,
}

impl DecimalFormatter {
    pub fn new(places: usize) -> Self {
        DecimalFormatter { places }
    }
}

impl CoordinateFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        let mut text = format!("{:.*}", self.places, value);
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text = "0".to_string();
        }
        text
    }
}

/// Converts coordinate tuples between reference systems
pub trait CoordinateTransformer {
    /// Transform one tuple given in `source` into `target`
    fn transform(&self, source: &Crs, target: &Crs, coordinates: &[f64]) -> Result<Vec<f64>>;
}

/// Output CRS plus the optional transformer used to reach it
pub(crate) struct CrsConversion<'t> {
    pub output_crs: Option<&'t Crs>,
    pub transformer: Option<&'t dyn CoordinateTransformer>,
}

impl<'t> CrsConversion<'t> {
    /// Check whether coordinates given in `source` must be transformed
    pub fn needs_transform(&self, source: Option<&Crs>) -> bool {
        match (source, self.output_crs) {
            (Some(source), Some(target)) => source.name() != target.name(),
            _ => false,
        }
    }

    /// Coordinates in the output CRS
    pub fn apply(&self, source: Option<&Crs>, coordinates: &[f64]) -> Result<Vec<f64>> {
        if !self.needs_transform(source) {
            return Ok(coordinates.to_vec());
        }
        let (source, target) = match (source, self.output_crs) {
            (Some(s), Some(t)) => (s, t),
            _ => return Ok(coordinates.to_vec()),
        };
        match self.transformer {
            Some(transformer) => transformer.transform(source, target, coordinates),
            None => Err(GmlError::UnknownCrs(format!(
                "No transformation from '{}' to '{}' is available",
                source.name(),
                target.name()
            ))),
        }
    }
}
