//! GML geometry reader

mod coordinates;
mod curve_segment_reader;
mod geometry_reader;
mod gml2_reader;
mod surface_patch_reader;
mod xml_cursor;

pub use coordinates::{parse_coordinates, parse_numbers, parse_pos_list, DEFAULT_DIMENSION};
pub use geometry_reader::{Expect, GmlGeometryReader, TIN_MIN_CONTROL_POINTS};
pub use gml2_reader::Gml2GeometryReader;
pub use xml_cursor::{ElementName, StartElement, XmlAttribute, XmlCursor, XmlEvent};

use super::version::GmlVersion;
use crate::error::{GmlError, Result};
use crate::geometry::Geometry;
use crate::id_context::IdentifierContext;
use crate::types::Crs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Configuration for the GML reader
#[derive(Debug, Clone, Default)]
pub struct GmlReaderConfiguration {
    /// CRS assigned to geometries that carry no `srsName`
    pub default_crs: Option<Crs>,

    /// When `true`, standard properties (`description`, `name`, ...) are
    /// consumed but not kept on the geometries.
    ///
    /// Default: `false`
    pub skip_standard_properties: bool,
}

/// Reads geometries from a GML document
pub struct GmlReader<R: BufRead> {
    cursor: XmlCursor<R>,
    version: GmlVersion,
    config: GmlReaderConfiguration,
    id_context: IdentifierContext,
}

impl<'a> GmlReader<&'a [u8]> {
    /// Create a reader over an in-memory document
    pub fn from_str(xml: &'a str, version: GmlVersion) -> Self {
        Self::from_reader(xml.as_bytes(), version)
    }
}

impl GmlReader<BufReader<File>> {
    /// Create a reader over a file; the path becomes the origin of references
    pub fn from_file<P: AsRef<Path>>(path: P, version: GmlVersion) -> Result<Self> {
        let system_id = path.as_ref().display().to_string();
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), version).with_system_id(system_id))
    }
}

impl<R: BufRead> GmlReader<R> {
    /// Create a reader over any buffered source
    pub fn from_reader(reader: R, version: GmlVersion) -> Self {
        GmlReader {
            cursor: XmlCursor::new(reader),
            version,
            config: GmlReaderConfiguration::default(),
            id_context: IdentifierContext::new(),
        }
    }

    /// Set the reader configuration
    pub fn with_configuration(mut self, config: GmlReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Set the document URI recorded as origin of references
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.cursor = self.cursor.with_system_id(system_id);
        self
    }

    pub fn version(&self) -> GmlVersion {
        self.version
    }

    /// Read the first geometry of the document.
    ///
    /// Fails if the document holds no geometry element.
    pub fn read_geometry(&mut self) -> Result<Geometry> {
        match self.next_geometry()? {
            Some(geometry) => Ok(geometry),
            None => Err(GmlError::parse(
                self.cursor.location(),
                format!("No {} geometry element found", self.version),
            )),
        }
    }

    /// Read the next geometry or envelope element in document order.
    ///
    /// Elements that are not geometries (feature wrappers, properties of
    /// other vocabularies) are descended into. Returns `None` at the end of
    /// the document.
    pub fn next_geometry(&mut self) -> Result<Option<Geometry>> {
        let default_crs = self.config.default_crs.clone();
        while self.cursor.next_start()? {
            if self.version.is_gml2() {
                let mut reader = Gml2GeometryReader::new(&mut self.cursor, &mut self.id_context);
                if reader.is_geometry_or_envelope_element() {
                    return reader.read(default_crs.as_ref()).map(Some);
                }
            } else {
                let mut reader =
                    GmlGeometryReader::new(&mut self.cursor, self.version, &mut self.id_context)?
                        .with_skip_standard_properties(self.config.skip_standard_properties);
                if reader.is_geometry_or_envelope_element() {
                    return reader.read(default_crs.as_ref()).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Read all remaining geometries
    pub fn read_all(&mut self) -> Result<Vec<Geometry>> {
        let mut geometries = Vec::new();
        while let Some(geometry) = self.next_geometry()? {
            geometries.push(geometry);
        }
        log::debug!(
            "Read {} geometries, {} identified, {} references",
            geometries.len(),
            self.id_context.object_count(),
            self.id_context.references().len()
        );
        Ok(geometries)
    }

    /// Identifiers and references collected so far
    pub fn id_context(&self) -> &IdentifierContext {
        &self.id_context
    }

    pub fn into_id_context(self) -> IdentifierContext {
        self.id_context
    }
}

/// Read the first geometry of an in-memory document
pub fn read_geometry_str(xml: &str, version: GmlVersion) -> Result<Geometry> {
    GmlReader::from_str(xml, version).read_geometry()
}
