//! Document tree to indented XML text

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::Document;
use super::errors::DocumentError;
use super::node::{ATTRIBUTE_PREFIX, Node, TEXT_KEY, Tree};

const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 2;

pub(crate) fn unparse(document: &Document) -> Result<String, DocumentError> {
    let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, INDENT_SIZE);

    let declaration = document.declaration.clone().unwrap_or_default();
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new(
            &declaration.version,
            declaration.encoding.as_deref(),
            declaration.standalone.as_deref(),
        )),
    )?;
    write_node(&mut writer, &document.root_name, &document.root)?;

    String::from_utf8(writer.into_inner()).map_err(|e| DocumentError::Write(e.to_string()))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), DocumentError> {
    writer
        .write_event(event)
        .map_err(|e| DocumentError::Write(e.to_string()))
}

fn write_node<W: Write>(writer: &mut Writer<W>, name: &str, node: &Node) -> Result<(), DocumentError> {
    match node {
        Node::Null => emit(writer, Event::Empty(BytesStart::new(name))),
        Node::Scalar(scalar) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&scalar.to_string())))?;
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        // Each item repeats the element name; nested lists are flattened.
        Node::List(items) => items
            .iter()
            .try_for_each(|item| write_node(writer, name, item)),
        Node::Tree(tree) => write_tree(writer, name, tree),
    }
}

fn write_tree<W: Write>(writer: &mut Writer<W>, name: &str, tree: &Tree) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(name);
    let mut text = None;

    for (key, node) in tree.iter() {
        if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            let value = attribute_value(key, node)?;
            start.push_attribute((attribute, value.as_str()));
        } else if key == TEXT_KEY {
            text = Some(attribute_value(key, node)?);
        }
    }
    let children = tree.ordered_children();

    if text.is_none() && children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    if let Some(text) = text {
        emit(writer, Event::Text(BytesText::new(&text)))?;
    }
    for (key, node) in children {
        write_node(writer, key, node)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn attribute_value(key: &str, node: &Node) -> Result<String, DocumentError> {
    match node {
        Node::Null => Ok(String::new()),
        Node::Scalar(scalar) => Ok(scalar.to_string()),
        Node::List(_) | Node::Tree(_) => Err(DocumentError::Write(format!(
            "'{key}' must hold a scalar value"
        ))),
    }
}
