//! XML document tree with attribute-style element access
//!
//! A [`Document`] is parsed once from XML text, mutated in memory through
//! [`Element`] views and written back with [`Document::unparse`].

mod element;
mod errors;
mod node;
mod reader;
mod writer;

#[cfg(test)]
mod document_tests;

use std::str::FromStr;

pub use element::{Element, Field, PATH_SEPARATOR};
pub use errors::DocumentError;
pub use node::{ATTRIBUTE_PREFIX, Node, Scalar, TEXT_KEY, Tree};

/// The `<?xml ...?>` declaration of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// XML version, `1.0` unless the input said otherwise
    pub version: String,
    /// Declared encoding
    pub encoding: Option<String>,
    /// Declared standalone flag
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// Parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    declaration: Option<Declaration>,
    root_name: String,
    root: Node,
}

impl Document {
    /// Parses XML text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] for malformed XML and
    /// [`DocumentError::EmptyDocument`] when there is no root element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        reader::parse(xml)
    }

    /// Writes the document as indented XML, keeping the parsed declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Write`] if an attribute holds a list or tree.
    pub fn unparse(&self) -> Result<String, DocumentError> {
        writer::unparse(self)
    }

    /// The declaration read from the input, if any
    #[must_use]
    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Name of the root element
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Content of the root element
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// View over the root element. An empty root becomes an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if the root holds only text.
    pub fn root_element(&mut self) -> Result<Element<'_>, DocumentError> {
        if self.root.is_null() {
            self.root = Node::Tree(Tree::new());
        }
        match &mut self.root {
            Node::Tree(tree) => Ok(Element::new(tree)),
            _ => Err(DocumentError::not_an_element(&self.root_name)),
        }
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
