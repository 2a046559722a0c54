//! Error types for the document tree

use thiserror::Error;

/// Errors raised while parsing, navigating or writing a document tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The input is not well-formed XML
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The input contained no root element
    #[error("XML document has no root element")]
    EmptyDocument,

    /// Serialization failed
    #[error("XML write error: {0}")]
    Write(String),

    /// A key was read before anything was stored under it
    #[error("Key not found: '{key}'")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// A key holds a scalar or list where an element was required
    #[error("Key '{key}' does not hold an element")]
    NotAnElement {
        /// The offending key.
        key: String,
    },
}

impl DocumentError {
    pub(crate) fn key_not_found(key: &str) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn not_an_element(key: &str) -> Self {
        Self::NotAnElement {
            key: key.to_string(),
        }
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocumentError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Parse(err.to_string())
    }
}
