//! Mutable element views over the document tree
//!
//! An [`Element`] borrows one [`Tree`] of a document. Every write through it
//! lands in the document itself, so two views obtained one after the other
//! for the same key always see each other's changes.
//!
//! Paths use `/` as the separator because Jenkins element names such as
//! `hudson.tasks.Shell` contain dots.

use super::errors::DocumentError;
use super::node::{Node, Tree};

/// Path segment separator for [`Element::get_path`] and [`Element::set_path`]
pub const PATH_SEPARATOR: char = '/';

/// Result of reading a key through an [`Element`]
#[derive(Debug)]
pub enum Field<'a> {
    /// The key holds an element; the view aliases the stored tree
    Element(Element<'a>),
    /// The key holds a scalar, a list or an empty element, returned as-is
    Value(&'a mut Node),
}

impl<'a> Field<'a> {
    /// Returns the element view, if the key held an element
    pub fn into_element(self) -> Option<Element<'a>> {
        match self {
            Self::Element(element) => Some(element),
            Self::Value(_) => None,
        }
    }

    /// Returns the raw node, if the key did not hold an element
    pub fn into_value(self) -> Option<&'a mut Node> {
        match self {
            Self::Element(_) => None,
            Self::Value(node) => Some(node),
        }
    }

    /// Returns the text of a text scalar
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Element(_) => None,
            Self::Value(node) => node.as_str(),
        }
    }
}

/// Attribute-style view over one tree of a document
#[derive(Debug)]
pub struct Element<'a> {
    tree: &'a mut Tree,
}

impl<'a> Element<'a> {
    /// Wraps `tree`
    pub fn new(tree: &'a mut Tree) -> Self {
        Self { tree }
    }

    /// Shorter-lived view over the same tree
    pub fn reborrow(&mut self) -> Element<'_> {
        Element {
            tree: &mut *self.tree,
        }
    }

    /// The underlying tree
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    /// The underlying tree, mutably
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut *self.tree
    }

    /// Returns true if `key` is present, even when it holds an empty element
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.tree.contains_key(key)
    }

    /// Returns true if `key` is missing or holds an empty element
    #[must_use]
    pub fn is_unset(&self, key: &str) -> bool {
        self.tree.get(key).is_none_or(Node::is_null)
    }

    /// Reads `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::KeyNotFound`] if nothing is stored under `key`.
    pub fn get(&mut self, key: &str) -> Result<Field<'_>, DocumentError> {
        self.reborrow().into_get(key)
    }

    /// Reads `key`, consuming the view so the result can outlive it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::KeyNotFound`] if nothing is stored under `key`.
    pub fn into_get(self, key: &str) -> Result<Field<'a>, DocumentError> {
        match self.tree.get_mut(key) {
            Some(Node::Tree(tree)) => Ok(Field::Element(Element::new(tree))),
            Some(node) => Ok(Field::Value(node)),
            None => Err(DocumentError::key_not_found(key)),
        }
    }

    /// View over the element stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::KeyNotFound`] if `key` is missing and
    /// [`DocumentError::NotAnElement`] if it holds anything but an element.
    pub fn child(&mut self, key: &str) -> Result<Element<'_>, DocumentError> {
        self.reborrow().into_child(key)
    }

    /// Consuming form of [`Element::child`], used for chaining.
    ///
    /// # Errors
    ///
    /// See [`Element::child`].
    pub fn into_child(self, key: &str) -> Result<Element<'a>, DocumentError> {
        match self.tree.get_mut(key) {
            Some(Node::Tree(tree)) => Ok(Element::new(tree)),
            Some(_) => Err(DocumentError::not_an_element(key)),
            None => Err(DocumentError::key_not_found(key)),
        }
    }

    /// Stores `value` under `key`, replacing whatever was there
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        self.tree.insert(key, value);
    }

    /// Removes `key`, returning what it held
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.tree.remove(key)
    }

    /// View over the element under `key`, creating an empty one when the key
    /// is missing or holds an empty element.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if `key` holds a scalar or list.
    pub fn entry_element(&mut self, key: &str) -> Result<Element<'_>, DocumentError> {
        self.reborrow().into_entry_element(key)
    }

    /// Consuming form of [`Element::entry_element`], used for chaining.
    ///
    /// # Errors
    ///
    /// See [`Element::entry_element`].
    pub fn into_entry_element(self, key: &str) -> Result<Element<'a>, DocumentError> {
        let slot = self.tree.slot(key);
        if slot.is_null() {
            *slot = Node::Tree(Tree::new());
        }
        match slot {
            Node::Tree(tree) => Ok(Element::new(tree)),
            _ => Err(DocumentError::not_an_element(key)),
        }
    }

    /// Adds `value` to the list under `key`.
    ///
    /// A missing or empty key becomes a one-item list; a single existing value
    /// is kept as the first item of a new list.
    pub fn append(&mut self, key: &str, value: impl Into<Node>) {
        let slot = self.tree.slot(key);
        if slot.is_null() {
            *slot = Node::List(Vec::new());
        } else if !matches!(slot, Node::List(_)) {
            let first = std::mem::take(slot);
            *slot = Node::List(vec![first]);
        }
        if let Node::List(items) = slot {
            items.push(value.into());
        }
    }

    /// Reads a `/`-separated path such as `builders/hudson.tasks.Shell`.
    ///
    /// # Errors
    ///
    /// Fails like [`Element::into_child`] on every intermediate segment and
    /// like [`Element::into_get`] on the last one.
    pub fn get_path(self, path: &str) -> Result<Field<'a>, DocumentError> {
        let (parents, last) = split_path(path);
        let mut element = self;
        for segment in parents {
            element = element.into_child(segment)?;
        }
        element.into_get(last)
    }

    /// Writes `value` at a `/`-separated path, creating missing or empty
    /// intermediate elements on the way.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnElement`] if an intermediate segment holds
    /// a scalar or list.
    pub fn set_path(&mut self, path: &str, value: impl Into<Node>) -> Result<(), DocumentError> {
        let (parents, last) = split_path(path);
        let mut element = self.reborrow();
        for segment in parents {
            element = element.into_entry_element(segment)?;
        }
        element.set(last, value);
        Ok(())
    }
}

fn split_path(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let last = segments.pop().unwrap_or(path);
    (segments, last)
}
