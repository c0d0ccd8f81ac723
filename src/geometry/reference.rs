//! Reference placeholders for geometries given by `xlink:href`

/// A geometry that is only known by its `xlink:href`.
///
/// The placeholder never points at the referenced object directly;
/// resolution goes through [`IdentifierContext`](crate::IdentifierContext).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryReference {
    /// Value of the `xlink:href` attribute
    pub uri: String,
    /// System id (document location) the reference was read from
    pub origin: Option<String>,
}

impl GeometryReference {
    /// Create a new reference
    pub fn new(uri: impl Into<String>, origin: Option<String>) -> Self {
        GeometryReference {
            uri: uri.into(),
            origin,
        }
    }

    /// Create a same-document reference to `id`
    pub fn local(id: &str) -> Self {
        Self::new(format!("#{}", id), None)
    }

    /// Check whether the reference points into the same document
    pub fn is_local(&self) -> bool {
        self.uri.starts_with('#')
    }

    /// Identifier after the `#`, for same-document references
    pub fn local_id(&self) -> Option<&str> {
        self.uri.strip_prefix('#')
    }
}
