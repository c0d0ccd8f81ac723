//! Coordinate text parsing
//!
//! Pure functions over the text content of `pos`, `posList`, `coordinates`
//! and vector elements plus thin cursor wrappers that read those elements.

use super::xml_cursor::XmlCursor;
use crate::error::Result;
use crate::io::gml::version::GmlVersion;
use crate::types::Crs;
use std::io::BufRead;

/// Default tuple dimension when neither the element nor the CRS declares one
pub const DEFAULT_DIMENSION: usize = 2;

/// Parse whitespace-separated numbers
pub fn parse_numbers(text: &str) -> std::result::Result<Vec<f64>, String> {
    text.split_whitespace()
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| format!("Invalid coordinate value '{}'", t))
        })
        .collect()
}

/// Split a flat `posList` value into tuples of `dimension` values
pub fn parse_pos_list(text: &str, dimension: usize) -> std::result::Result<Vec<Vec<f64>>, String> {
    if dimension == 0 {
        return Err("Coordinate dimension must be positive".to_string());
    }
    let values = parse_numbers(text)?;
    if values.len() % dimension != 0 {
        return Err(format!(
            "posList holds {} values, which is not a multiple of the dimension {}",
            values.len(),
            dimension
        ));
    }
    Ok(values.chunks(dimension).map(|c| c.to_vec()).collect())
}

/// Parse the value of a legacy `coordinates` element.
///
/// Only `.` is accepted as decimal separator. Tuples are separated by `ts`
/// (and always by line breaks), coordinates inside a tuple by `cs`.
pub fn parse_coordinates(
    text: &str,
    decimal: &str,
    cs: &str,
    ts: &str,
) -> std::result::Result<Vec<Vec<f64>>, String> {
    if decimal != "." {
        return Err(format!(
            "Unsupported decimal separator '{}' in coordinates",
            decimal
        ));
    }
    if cs.is_empty() {
        return Err("Empty coordinate separator in coordinates".to_string());
    }
    let ts_is_space = ts.trim().is_empty();
    let tuples: Vec<&str> = if ts_is_space {
        text.split_whitespace().collect()
    } else {
        text.lines()
            .flat_map(|line| line.split(ts))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    };
    let mut result = Vec::with_capacity(tuples.len());
    for tuple in tuples {
        let values = tuple
            .split(cs)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| format!("Invalid coordinate value '{}'", v))
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?;
        if values.is_empty() {
            return Err(format!("Empty coordinate tuple '{}'", tuple));
        }
        result.push(values);
    }
    Ok(result)
}

/// Read a `pos`/`lowerCorner`/`upperCorner`/vector element as one tuple
pub fn read_tuple<R: BufRead>(cursor: &mut XmlCursor<R>) -> Result<Vec<f64>> {
    let text = cursor.element_text()?;
    parse_numbers(&text).map_err(|m| cursor.error(m))
}

/// Read a `posList` element
pub fn read_pos_list<R: BufRead>(
    cursor: &mut XmlCursor<R>,
    version: GmlVersion,
    crs: Option<&Crs>,
) -> Result<Vec<Vec<f64>>> {
    let mut dimension = None;
    for attr in version.dimension_attributes() {
        if let Some(value) = cursor.attribute(None, attr) {
            let parsed = value.trim().parse::<usize>().map_err(|_| {
                cursor.error(format!("Invalid {} value '{}'", attr, value))
            })?;
            dimension = Some(parsed);
            break;
        }
    }
    let dimension = dimension
        .or_else(|| crs.and_then(|c| c.dimension()))
        .unwrap_or(DEFAULT_DIMENSION);
    let text = cursor.element_text()?;
    parse_pos_list(&text, dimension).map_err(|m| cursor.error(m))
}

/// Read a `coordinates` element
pub fn read_coordinates<R: BufRead>(cursor: &mut XmlCursor<R>) -> Result<Vec<Vec<f64>>> {
    let decimal = cursor.attribute(None, "decimal").unwrap_or(".").to_string();
    let cs = cursor.attribute(None, "cs").unwrap_or(",").to_string();
    let ts = cursor.attribute(None, "ts").unwrap_or(" ").to_string();
    let text = cursor.element_text()?;
    parse_coordinates(&text, &decimal, &cs, &ts).map_err(|m| cursor.error(m))
}

/// Read a legacy `coord` element (`X`, optional `Y`, optional `Z`)
pub fn read_coord<R: BufRead>(cursor: &mut XmlCursor<R>, ns: &str) -> Result<Vec<f64>> {
    cursor.require_start(ns, "coord")?;
    let mut values = Vec::with_capacity(3);
    cursor.next_tag()?;
    for axis in ["X", "Y", "Z"] {
        if cursor.is_start_of(ns, axis) {
            values.push(cursor.element_text_as_f64()?);
            cursor.next_tag()?;
        } else if axis == "X" {
            return Err(cursor.error("Expected 'X' inside 'coord'"));
        }
    }
    cursor.require_end(ns, "coord")?;
    Ok(values)
}
