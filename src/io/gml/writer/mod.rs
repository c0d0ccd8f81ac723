//! GML geometry writer

mod formatter;
mod gml2_writer;
mod gml3_writer;
mod session;
mod stream_writer;

pub use formatter::{CoordinateFormatter, CoordinateTransformer, DecimalFormatter};
pub use gml2_writer::Gml2GeometryWriter;
pub use gml3_writer::Gml3GeometryWriter;
pub use session::WriterSession;
pub use stream_writer::{GmlStreamWriter, GmlStreamWriterExt, XmlStreamWriter, GML_PREFIX};

use super::version::GmlVersion;
use crate::error::{GmlError, Result};
use crate::geometry::Geometry;
use crate::types::Crs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for the GML writer
#[derive(Debug, Clone)]
pub struct GmlWriterConfiguration {
    /// CRS all coordinates are written in; `None` keeps each geometry's own
    pub output_crs: Option<Crs>,

    /// Decimal places for coordinates.
    ///
    /// Default: 5 for GML 2.1, 8 otherwise
    pub precision: Option<usize>,

    /// Declare the `gml` and `xlink` prefixes on the outermost element.
    ///
    /// Disable when embedding into a document that already declares them.
    ///
    /// Default: `true`
    pub declare_namespaces: bool,
}

impl Default for GmlWriterConfiguration {
    fn default() -> Self {
        Self {
            output_crs: None,
            precision: None,
            declare_namespaces: true,
        }
    }
}

/// GML writer for geometries.
///
/// Identifiers written by one writer are remembered for its whole lifetime:
/// a geometry member whose identifier was already exported is written as an
/// `xlink:href` reference instead of being repeated.
pub struct GmlWriter {
    version: GmlVersion,
    config: GmlWriterConfiguration,
    session: WriterSession,
}

impl GmlWriter {
    /// Create a writer with the default configuration
    pub fn new(version: GmlVersion) -> Self {
        Self::with_configuration(version, GmlWriterConfiguration::default())
    }

    /// Create a writer with a custom configuration
    pub fn with_configuration(version: GmlVersion, config: GmlWriterConfiguration) -> Self {
        let session = WriterSession::new(version, config.output_crs.clone(), config.precision);
        GmlWriter {
            version,
            config,
            session,
        }
    }

    pub fn version(&self) -> GmlVersion {
        self.version
    }

    /// Replace the coordinate formatter
    pub fn set_formatter(&mut self, formatter: Box<dyn CoordinateFormatter>) {
        self.session.set_formatter(formatter);
    }

    /// Install the transformer used when a geometry's CRS differs from the output CRS
    pub fn set_transformer(&mut self, transformer: Box<dyn CoordinateTransformer>) {
        self.session.set_transformer(transformer);
    }

    /// Identifiers exported so far
    pub fn exported_ids(&self) -> impl Iterator<Item = &str> {
        self.session.exported_ids()
    }

    /// Write a geometry onto an existing GML stream
    pub fn write_into<S: GmlStreamWriter>(&mut self, out: &mut S, geometry: &Geometry) -> Result<()> {
        if self.version.is_gml2() {
            Gml2GeometryWriter::new(out, &mut self.session).write(geometry)
        } else {
            Gml3GeometryWriter::new(out, &mut self.session)?.write(geometry)
        }
    }

    /// Write a geometry to any byte sink
    pub fn write_to_writer<W: Write>(&mut self, writer: W, geometry: &Geometry) -> Result<()> {
        let mut out = XmlStreamWriter::new(
            writer,
            self.version.namespace(),
            self.config.declare_namespaces,
        );
        self.write_into(&mut out, geometry)?;
        out.flush()
    }

    /// Write a geometry to a file
    pub fn write_to_file<P: AsRef<Path>>(&mut self, path: P, geometry: &Geometry) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file), geometry)
    }

    /// Write a geometry to a byte vector
    pub fn write_to_vec(&mut self, geometry: &Geometry) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer, geometry)?;
        Ok(buffer)
    }

    /// Write a geometry to a string
    pub fn write_to_string(&mut self, geometry: &Geometry) -> Result<String> {
        let bytes = self.write_to_vec(geometry)?;
        String::from_utf8(bytes).map_err(|e| GmlError::Custom(e.to_string()))
    }
}

/// Write a single geometry to a string with the default configuration
pub fn write_geometry_string(geometry: &Geometry, version: GmlVersion) -> Result<String> {
    GmlWriter::new(version).write_to_string(geometry)
}
