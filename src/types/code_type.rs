//! GML standard object properties

/// A term with an optional code space (`gml:name`, `gml:identifier`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeType {
    pub value: String,
    pub code_space: Option<String>,
}

impl CodeType {
    /// Create a code without a code space
    pub fn new(value: impl Into<String>) -> Self {
        CodeType {
            value: value.into(),
            code_space: None,
        }
    }

    /// Create a code with a code space
    pub fn with_code_space(value: impl Into<String>, code_space: impl Into<String>) -> Self {
        CodeType {
            value: value.into(),
            code_space: Some(code_space.into()),
        }
    }
}

/// The standard property block that precedes the geometry-specific content
/// of every GML 3 geometry.
///
/// Inline metadata content is not interpreted; only `xlink:href` values of
/// `gml:metaDataProperty` elements are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandardProperties {
    /// `gml:metaDataProperty/@xlink:href`
    pub metadata: Vec<String>,
    /// `gml:description` text
    pub description: Option<String>,
    /// `gml:descriptionReference/@xlink:href`
    pub description_reference: Option<String>,
    /// `gml:identifier`
    pub identifier: Option<CodeType>,
    /// `gml:name` (repeatable)
    pub names: Vec<CodeType>,
}

impl StandardProperties {
    /// Create an empty property block
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no standard property is set
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
            && self.description.is_none()
            && self.description_reference.is_none()
            && self.identifier.is_none()
            && self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_properties_empty() {
        let mut props = StandardProperties::new();
        assert!(props.is_empty());
        props.names.push(CodeType::with_code_space("Bonn", "urn:city"));
        assert!(!props.is_empty());
    }
}
