//! Value types shared by the geometry model and the codec

pub mod code_type;
pub mod crs;
pub mod gml_id;
pub mod measure;

pub use code_type::{CodeType, StandardProperties};
pub use crs::Crs;
pub use gml_id::{synthesize_gml_id, validate_gml_id};
pub use measure::{Angle, Length, Measure};
