//! XML text to document tree

use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};

use super::errors::DocumentError;
use super::node::{ATTRIBUTE_PREFIX, Node, TEXT_KEY, Tree};
use super::{Declaration, Document};

/// Element whose end tag has not been read yet
struct OpenElement {
    name: String,
    tree: Tree,
    text: String,
    children: Vec<(String, usize)>,
}

impl OpenElement {
    fn open(start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut tree = Tree::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = format!(
                "{ATTRIBUTE_PREFIX}{}",
                String::from_utf8_lossy(attribute.key.as_ref())
            );
            let value = attribute.unescape_value()?.into_owned();
            tree.insert(key, value);
        }
        Ok(Self {
            name,
            tree,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn push_child(&mut self, name: String, node: Node) {
        let index = self.tree.push_child(name.clone(), node);
        self.children.push((name, index));
    }

    fn close(self) -> (String, Node) {
        let Self {
            name,
            mut tree,
            text,
            children,
        } = self;
        tree.set_document_order(children);
        let node = if tree.is_empty() && text.is_empty() {
            Node::Null
        } else if tree.is_empty() {
            Node::text(text)
        } else {
            if !text.is_empty() {
                tree.insert(TEXT_KEY, text);
            }
            Node::Tree(tree)
        };
        (name, node)
    }
}

fn declaration(decl: &BytesDecl<'_>) -> Result<Declaration, DocumentError> {
    let lossy = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();
    Ok(Declaration {
        version: lossy(&*decl.version()?),
        encoding: decl.encoding().transpose()?.map(|value| lossy(&*value)),
        standalone: decl.standalone().transpose()?.map(|value| lossy(&*value)),
    })
}

pub(crate) fn parse(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut declaration_seen = None;
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => declaration_seen = Some(declaration(&decl)?),
            Event::Start(start) => stack.push(OpenElement::open(&start)?),
            Event::Empty(start) => {
                let element = OpenElement::open(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                text_content(&mut stack, &text)?;
            }
            Event::CData(data) => text_content(&mut stack, &String::from_utf8_lossy(&data))?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DocumentError::Parse("unexpected end tag".to_string()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocumentError::Parse(format!(
            "element '{}' is never closed",
            open.name
        )));
    }

    let (root_name, root) = root.ok_or(DocumentError::EmptyDocument)?;
    Ok(Document {
        declaration: declaration_seen,
        root_name,
        root,
    })
}

fn text_content(stack: &mut [OpenElement], text: &str) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(DocumentError::Parse(format!(
                "text '{}' outside the root element",
                text.trim()
            )));
        }
    }
    Ok(())
}

fn attach(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<(String, Node)>,
) -> Result<(), DocumentError> {
    let (name, node) = element.close();
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, node),
        None if root.is_some() => {
            return Err(DocumentError::Parse(format!(
                "second root element '{name}'"
            )));
        }
        None => *root = Some((name, node)),
    }
    Ok(())
}
