//! I/O module for reading and writing GML geometries

pub mod gml;

pub use gml::{GmlReader, GmlVersion, GmlWriter};
