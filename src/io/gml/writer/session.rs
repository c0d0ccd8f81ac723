//! Per-writer state shared by the GML 2 and GML 3 emitters

use super::formatter::{CoordinateFormatter, CoordinateTransformer, CrsConversion, DecimalFormatter};
use crate::error::{GmlError, Result};
use crate::io::gml::version::GmlVersion;
use crate::types::Crs;
use ahash::AHashSet;

/// State of one writer instance.
///
/// The set of exported identifiers lives as long as the session, so a
/// geometry written once is referenced by `xlink:href` on every later
/// encounter, also across separate `write` calls.
pub struct WriterSession {
    version: GmlVersion,
    output_crs: Option<Crs>,
    formatter: Box<dyn CoordinateFormatter>,
    transformer: Option<Box<dyn CoordinateTransformer>>,
    exported: AHashSet<String>,
}

impl WriterSession {
    /// Create a session; `precision` falls back to the version default
    pub fn new(version: GmlVersion, output_crs: Option<Crs>, precision: Option<usize>) -> Self {
        let places = precision.unwrap_or_else(|| version.default_precision());
        WriterSession {
            version,
            output_crs,
            formatter: Box::new(DecimalFormatter::new(places)),
            transformer: None,
            exported: AHashSet::new(),
        }
    }

    pub fn version(&self) -> GmlVersion {
        self.version
    }

    pub fn output_crs(&self) -> Option<&Crs> {
        self.output_crs.as_ref()
    }

    pub fn set_formatter(&mut self, formatter: Box<dyn CoordinateFormatter>) {
        self.formatter = formatter;
    }

    pub fn set_transformer(&mut self, transformer: Box<dyn CoordinateTransformer>) {
        self.transformer = Some(transformer);
    }

    /// Record an identifier as written; returns `false` if it already was
    pub fn mark_exported(&mut self, id: &str) -> bool {
        self.exported.insert(id.to_string())
    }

    pub fn is_exported(&self, id: &str) -> bool {
        self.exported.contains(id)
    }

    /// Identifiers written so far
    pub fn exported_ids(&self) -> impl Iterator<Item = &str> {
        self.exported.iter().map(|s| s.as_str())
    }

    /// `srsName` to write for a geometry in `crs`
    pub fn srs_name<'c>(&'c self, crs: Option<&'c Crs>) -> Option<&'c str> {
        self.output_crs.as_ref().or(crs).map(|c| c.alias())
    }

    pub fn format(&self, value: f64) -> String {
        self.formatter.format(value)
    }

    /// Format a tuple as space-separated values without transformation
    pub fn format_vector(&self, values: &[f64]) -> String {
        values
            .iter()
            .map(|v| self.formatter.format(*v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Coordinates of a tuple in the output CRS
    pub fn transform(&self, crs: Option<&Crs>, coordinates: &[f64]) -> Result<Vec<f64>> {
        CrsConversion {
            output_crs: self.output_crs.as_ref(),
            transformer: self.transformer.as_deref(),
        }
        .apply(crs, coordinates)
    }

    /// Transform and format a list of tuples that must share one dimension
    pub fn homogeneous_tuples(
        &self,
        tuples: &[(&[f64], Option<&Crs>)],
    ) -> Result<(usize, Vec<Vec<String>>)> {
        let mut dimension = None;
        let mut formatted = Vec::with_capacity(tuples.len());
        for (coordinates, crs) in tuples {
            let values = self.transform(*crs, coordinates)?;
            match dimension {
                None => dimension = Some(values.len()),
                Some(d) if d != values.len() => {
                    return Err(GmlError::InvalidGeometry(format!(
                        "Cannot write tuples of mixed dimension {} and {}",
                        d,
                        values.len()
                    )))
                }
                Some(_) => {}
            }
            formatted.push(values.iter().map(|v| self.format(*v)).collect());
        }
        Ok((dimension.unwrap_or(0), formatted))
    }
}
