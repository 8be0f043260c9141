//! Package-level document types.

use crate::error::{Error, Result};

/// Media types the package reader treats as content documents.
pub const DOCUMENT_MEDIA_TYPES: &[&str] = &["application/xhtml+xml", "text/html"];

/// One entry of the OPF manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// Manifest id
    pub id: String,
    /// Href relative to the OPF directory, percent-decoded
    pub href: String,
    /// Declared media type
    pub media_type: String,
    /// Space-separated manifest properties (`nav`, `cover-image`, ...)
    pub properties: Option<String>,
}

impl ManifestItem {
    /// Whether the declared media type is an (X)HTML document.
    pub fn is_document(&self) -> bool {
        DOCUMENT_MEDIA_TYPES
            .iter()
            .any(|t| self.media_type.eq_ignore_ascii_case(t))
    }

    /// Whether the manifest flags this item as the navigation document.
    pub fn is_nav(&self) -> bool {
        self.properties
            .as_deref()
            .map(|p| p.split_whitespace().any(|p| p == "nav"))
            .unwrap_or(false)
    }
}

/// Raw bytes of one content document, named by its manifest href.
#[derive(Debug, Clone)]
pub struct ContentDocument {
    /// Manifest href
    pub name: String,
    /// Undecoded bytes as stored in the package
    pub data: Vec<u8>,
}

impl ContentDocument {
    /// Create a document from its name and bytes.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Decode the document as UTF-8.
    ///
    /// A leading byte order mark is stripped.
    pub fn text(&self) -> Result<&str> {
        let text = std::str::from_utf8(&self.data).map_err(|source| Error::DocumentDecode {
            name: self.name.clone(),
            source,
        })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the document has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
