//! Minimal ordered element tree built from a KML document.
//!
//! Only element names (without namespace prefix), text content and child
//! order are kept; attributes play no role in route extraction.
//!
//! Nesting depth is unbounded, so nothing here recurses over the tree:
//! traversal uses an explicit stack and [`Element`] drops its subtree
//! iteratively.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, RouteError};

/// Element kinds the walker dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Placemark,
    Point,
    MultiGeometry,
    LineString,
    Coordinates,
    Name,
    Description,
    Other,
}

impl NodeKind {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"Document" => Self::Document,
            b"Placemark" => Self::Placemark,
            b"Point" => Self::Point,
            b"MultiGeometry" => Self::MultiGeometry,
            b"LineString" => Self::LineString,
            b"coordinates" => Self::Coordinates,
            b"name" => Self::Name,
            b"description" => Self::Description,
            _ => Self::Other,
        }
    }
}

#[derive(Debug)]
pub struct Element {
    pub name: String,
    pub kind: NodeKind,
    /// Concatenated text and CDATA directly inside this element.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let local = start.local_name();
        Self {
            name: String::from_utf8_lossy(local.as_ref()).into_owned(),
            kind: NodeKind::from_local_name(local.as_ref()),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&Element> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Trimmed text of the first direct child of the given kind, if non-empty.
    pub fn child_text(&self, kind: NodeKind) -> Option<&str> {
        self.child(kind)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }

    /// Every descendant of the given kind, depth first, in document order.
    /// The element itself is not included.
    pub fn descendants(&self, kind: NodeKind) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(kind, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a Element>) {
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(node) = pending.pop() {
            if node.kind == kind {
                found.push(node);
            }
            pending.extend(node.children.iter().rev());
        }
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Parse document text into its root element.
///
/// Fails on anything that is not a single well-formed element tree:
/// mismatched or unclosed tags, stray text outside the root, no root at all.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Element::from_start(&e)),
            Ok(Event::Empty(e)) => attach(&mut stack, &mut root, Element::from_start(&e))?,
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| RouteError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                push_text(&mut stack, raw)?;
            }
            Ok(Event::CData(e)) => {
                let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                push_text(&mut stack, s)?;
            }
            Ok(Event::GeneralRef(e)) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    push_text(&mut stack, ch.encode_utf8(&mut [0; 4]))?;
                } else {
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    let resolved = match name {
                        "amp" => "&",
                        "lt" => "<",
                        "gt" => ">",
                        "quot" => "\"",
                        "apos" => "'",
                        _ => "",
                    };
                    push_text(&mut stack, resolved)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(RouteError::XmlParse(e)),
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RouteError::Malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| RouteError::Malformed("no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        // Keep text on either side of an inline child as separate words.
        if parent.text.chars().next_back().is_some_and(|c| !c.is_whitespace()) {
            parent.text.push(' ');
        }
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(RouteError::Malformed(format!(
            "second root element <{}>",
            element.name
        )));
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(RouteError::Malformed(
                "text outside the root element".to_string(),
            ));
        }
    }
    Ok(())
}
