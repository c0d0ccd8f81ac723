//! Geometry identifier rules
//!
//! `gml:id` and the GML 2 `gid` attribute are both of XML type `ID`, so they
//! must be NCName-shaped: not starting with a digit and free of colons after
//! the first character.

use crate::error::{GmlError, Result};
use uuid::Uuid;

/// Prefix of identifiers generated for GML 3.2 output
pub const SYNTHESIZED_ID_PREFIX: &str = "GEOMETRY_";

/// Validate an identifier read from markup.
///
/// Empty identifiers are accepted (they are treated as absent).
pub fn validate_gml_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Ok(());
    }
    let mut chars = id.chars();
    let valid = match chars.next() {
        Some(first) if !first.is_ascii_digit() => {
            let rest = chars.as_str();
            !rest.is_empty() && !rest.contains(':')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(GmlError::Identifier(format!(
            "'{}' is not a valid geometry identifier (must not start with a digit or contain a colon)",
            id
        )))
    }
}

/// Generate a fresh, globally unique identifier
pub fn synthesize_gml_id() -> String {
    format!("{}{}", SYNTHESIZED_ID_PREFIX, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(validate_gml_id("P1").is_ok());
        assert!(validate_gml_id("_12").is_ok());
        assert!(validate_gml_id("GEOMETRY_abc-def").is_ok());
        assert!(validate_gml_id("").is_ok());
    }

    #[test]
    fn test_invalid_ids() {
        assert!(matches!(validate_gml_id("1abc"), Err(GmlError::Identifier(_))));
        assert!(validate_gml_id("a:b").is_err());
        assert!(validate_gml_id("x").is_err());
    }

    #[test]
    fn test_synthesized_ids_are_unique() {
        let a = synthesize_gml_id();
        let b = synthesize_gml_id();
        assert!(a.starts_with(SYNTHESIZED_ID_PREFIX));
        assert_ne!(a, b);
        assert!(validate_gml_id(&a).is_ok());
    }
}
