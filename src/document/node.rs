//! Tagged-union nodes of the document tree
//!
//! A parsed XML document is stored as nested [`Node`] values. Element names
//! become [`Tree`] keys, attributes become keys prefixed with `@`, and text
//! that sits next to attributes or children is stored under `#text`.

#![allow(clippy::must_use_candidate)]

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

use super::element::Element;

/// Key prefix marking an XML attribute
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding the text content of an element with attributes or children
pub const TEXT_KEY: &str = "#text";

/// A leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text content
    Text(String),
    /// Boolean, written as `true`/`false`
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point number
    Float(f64),
}

impl Scalar {
    /// Returns the text if this is a text scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// One value of the document tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// Empty element such as `<builders/>`
    #[default]
    Null,
    /// Leaf value
    Scalar(Scalar),
    /// Repeated sibling elements sharing one name
    List(Vec<Node>),
    /// Element with attributes and/or children
    Tree(Tree),
}

impl Node {
    /// Creates a text node
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    /// Returns true for an empty element
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the scalar if this is a leaf
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the text if this is a text leaf
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns the items if this is a list
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the items mutably if this is a list
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the tree if this is an element
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Returns the tree mutably if this is an element
    pub fn as_tree_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Self::text(value.as_str())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<Tree> for Node {
    fn from(value: Tree) -> Self {
        Self::Tree(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered mapping from element/attribute names to nodes.
///
/// Repeated child elements are grouped into one [`Node::List`] under their
/// name. When the input interleaves them with other elements
/// (`Shell`, `BatchFile`, `Shell`), the parsed sequence is kept so the
/// tree is written back in its original order.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: IndexMap<String, Node>,
    document_order: Option<Vec<(String, usize)>>,
}

/// Two trees are equal when they hold the same entries in the same order
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter()) && self.document_order == other.document_order
    }
}

fn is_child_key(key: &str) -> bool {
    !key.starts_with(ATTRIBUTE_PREFIX) && key != TEXT_KEY
}

/// The items written for `node`: every item of a list, otherwise the node
fn items(node: &Node) -> &[Node] {
    match node {
        Node::List(items) => items,
        other => std::slice::from_ref(other),
    }
}

impl Tree {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tree has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is present, even when it holds an empty element
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Reads the node under `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Reads the node under `key` mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Stores `value` under `key`, returning the replaced node.
    ///
    /// A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Iterates over entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Iterates over keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Mutable view over this tree
    pub fn as_element(&mut self) -> Element<'_> {
        Element::new(self)
    }

    /// Slot for `key`, inserted as [`Node::Null`] when missing
    pub(crate) fn slot(&mut self, key: &str) -> &mut Node {
        self.entries.entry(key.to_string()).or_default()
    }

    /// Adds a parsed child element, turning repeated names into a list.
    ///
    /// Returns the position of `value` among the items under `key`.
    pub(crate) fn push_child(&mut self, key: String, value: Node) -> usize {
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, value);
                0
            }
            Some(Node::List(items)) => {
                items.push(value);
                items.len() - 1
            }
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Node::List(vec![first, value]);
                1
            }
        }
    }

    /// Records the parsed sequence of child items, as returned by
    /// [`Tree::push_child`]. Kept only when it differs from key order.
    pub(crate) fn set_document_order(&mut self, order: Vec<(String, usize)>) {
        let in_key_order = order
            .iter()
            .map(|(key, index)| (key.as_str(), *index))
            .eq(self.items_in_key_order());
        self.document_order = if in_key_order { None } else { Some(order) };
    }

    fn items_in_key_order(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .filter(|(key, _)| is_child_key(key))
            .flat_map(|(key, node)| (0..items(node).len()).map(move |index| (key.as_str(), index)))
    }

    /// Child items in the order they are written.
    ///
    /// Follows the parsed sequence first; items added or moved since parsing
    /// come after it, in key order.
    pub(crate) fn ordered_children(&self) -> Vec<(&str, &Node)> {
        let children = self.entries.iter().filter(|(key, _)| is_child_key(key));
        let Some(order) = &self.document_order else {
            return children.map(|(key, node)| (key.as_str(), node)).collect();
        };

        let mut written = HashSet::new();
        let mut out = Vec::new();
        for (key, index) in order {
            let item = self.entries.get(key).and_then(|node| items(node).get(*index));
            if let Some(item) = item {
                if written.insert((key.as_str(), *index)) {
                    out.push((key.as_str(), item));
                }
            }
        }
        for (key, node) in children {
            for (index, item) in items(node).iter().enumerate() {
                if !written.contains(&(key.as_str(), index)) {
                    out.push((key.as_str(), item));
                }
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            document_order: None,
        }
    }
}

impl IntoIterator for Tree {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Integer(42).to_string(), "42");
        assert_eq!(Scalar::Text("*.log".into()).to_string(), "*.log");
    }

    #[test]
    fn test_option_into_node() {
        assert_eq!(Node::from(None::<&str>), Node::Null);
        assert_eq!(Node::from(Some("x")), Node::text("x"));
    }

    #[test]
    fn test_vec_into_node() {
        let node = Node::from(vec!["linux", "windows"]);
        assert_eq!(
            node.as_list().map(<[Node]>::len),
            Some(2),
            "strings become a list of text nodes"
        );
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut tree: Tree = [("a", 1), ("b", 2)].into_iter().collect();
        tree.insert("a", 3);
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some(&Node::from(3)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut tree: Tree = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        tree.remove("a");
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_equality_depends_on_order() {
        assert_ne!(
            tree! { "x" => "1", "y" => "2" },
            tree! { "y" => "2", "x" => "1" }
        );
        assert_eq!(
            tree! { "x" => "1", "y" => "2" },
            tree! { "x" => "1", "y" => "2" }
        );
    }

    #[test]
    fn test_ordered_children_follow_interleaved_input() {
        let mut tree = Tree::new();
        let order = vec![
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("a"))),
            ("BatchFile".to_string(), tree.push_child("BatchFile".into(), Node::text("b"))),
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("c"))),
        ];
        tree.set_document_order(order);

        let texts: Vec<_> = tree
            .ordered_children()
            .into_iter()
            .map(|(key, node)| (key, node.as_str().unwrap()))
            .collect();
        assert_eq!(texts, vec![("Shell", "a"), ("BatchFile", "b"), ("Shell", "c")]);
    }

    #[test]
    fn test_ordered_children_put_new_items_last() {
        let mut tree = Tree::new();
        let order = vec![
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("a"))),
            ("BatchFile".to_string(), tree.push_child("BatchFile".into(), Node::text("b"))),
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("c"))),
        ];
        tree.set_document_order(order);
        tree.as_element().append("Shell", "d");
        tree.insert("Ant", "e");

        let texts: Vec<_> = tree
            .ordered_children()
            .into_iter()
            .filter_map(|(_, node)| node.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_adjacent_repeats_keep_no_document_order() {
        let mut tree = Tree::new();
        let order = vec![
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("a"))),
            ("Shell".to_string(), tree.push_child("Shell".into(), Node::text("b"))),
            ("BatchFile".to_string(), tree.push_child("BatchFile".into(), Node::text("c"))),
        ];
        tree.set_document_order(order);
        assert_eq!(tree, tree! { "Shell" => vec!["a", "b"], "BatchFile" => "c" });
    }

    #[test]
    fn test_push_child_promotes_repeated_names() {
        let mut tree = Tree::new();
        tree.push_child("string".into(), Node::text("linux"));
        tree.push_child("string".into(), Node::text("windows"));
        tree.push_child("string".into(), Node::Null);

        assert_eq!(
            tree.get("string"),
            Some(&Node::List(vec![
                Node::text("linux"),
                Node::text("windows"),
                Node::Null
            ]))
        );
    }
}
