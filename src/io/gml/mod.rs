//! GML (Geography Markup Language) geometry reading and writing

mod reader;
mod version;
mod writer;

pub use reader::{
    parse_coordinates, parse_numbers, parse_pos_list, read_geometry_str, ElementName, Expect,
    Gml2GeometryReader, GmlGeometryReader, GmlReader, GmlReaderConfiguration, StartElement,
    XmlAttribute, XmlCursor, XmlEvent, DEFAULT_DIMENSION, TIN_MIN_CONTROL_POINTS,
};
pub use version::{GeometryFamily, GmlVersion, GML32_NS, GML_NS, XLINK_NS};
pub use writer::{
    write_geometry_string, CoordinateFormatter, CoordinateTransformer, DecimalFormatter,
    Gml2GeometryWriter, Gml3GeometryWriter, GmlStreamWriter, GmlStreamWriterExt, GmlWriter,
    GmlWriterConfiguration, WriterSession, XmlStreamWriter, GML_PREFIX,
};
