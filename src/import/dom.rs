//! Thin helpers over the parsed HTML tree.
//!
//! The import transducer owns one in-memory document at a time; these
//! helpers keep the rcdom plumbing (weak parent pointers, serialization
//! scopes, fragment roots) in one place.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, Attribute, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::error::Result;

/// Parse a complete HTML document.
pub fn parse_html(source: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(source.to_string())
}

/// Parse a markup fragment and return its top-level nodes.
///
/// The fragment is parsed as document content; whatever lands in the body
/// is the fragment.
pub fn parse_inline(markup: &str) -> Vec<Handle> {
    let dom = parse_html(markup);
    match body_of(&dom) {
        Some(body) => body.children.borrow().clone(),
        None => Vec::new(),
    }
}

fn body_of(dom: &RcDom) -> Option<Handle> {
    let html = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|node| is_element(node, "html"))
        .cloned()?;
    let body = html
        .children
        .borrow()
        .iter()
        .find(|node| is_element(node, "body"))
        .cloned();
    body
}

/// Serialize a whole document back to markup.
pub fn serialize_document(dom: &RcDom) -> Result<String> {
    serialize_scope(dom.document.clone(), TraversalScope::ChildrenOnly(None))
}

/// Serialize a node's children (its inner markup).
pub fn inner_html(node: &Handle) -> Result<String> {
    serialize_scope(node.clone(), TraversalScope::ChildrenOnly(None))
}

fn serialize_scope(handle: Handle, traversal_scope: TraversalScope) -> Result<String> {
    let mut buf = Vec::new();
    let serializable = SerializableHandle::from(handle);
    serialize(
        &mut buf,
        &serializable,
        SerializeOpts {
            traversal_scope,
            ..Default::default()
        },
    )?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Create an element in the HTML namespace.
pub fn element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node.
pub fn text(content: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(content.to_string().into()),
        },
    })
}

/// Append a child, fixing up its parent pointer.
pub fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// The node's parent, when it still has one.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

/// Whether the node is an element with the given tag name.
pub fn is_element(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => name.local.as_ref() == tag,
        _ => false,
    }
}

/// All descendant elements with the given tag, in document order.
pub fn descendants_named(root: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    walk(root, &mut |node| {
        if is_element(node, tag) {
            found.push(node.clone());
        }
        true
    });
    found
}

/// The `<tr>` descendants of a table, in document order, without crossing
/// into nested tables.
pub fn rows_of(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in table.children.borrow().iter() {
        walk(child, &mut |node| {
            if is_element(node, "table") {
                return false;
            }
            if is_element(node, "tr") {
                rows.push(node.clone());
            }
            true
        });
    }
    rows
}

/// The cell elements (`td`/`th`) directly under a row.
pub fn cells_of(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|child| is_element(child, "td") || is_element(child, "th"))
        .cloned()
        .collect()
}

/// Concatenated text content of a node's descendants.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    walk(node, &mut |n| {
        if let NodeData::Text { contents } = &n.data {
            out.push_str(&contents.borrow());
        }
        true
    });
    out
}

/// Replace `old` within `parent` by `replacements`, keeping document order.
/// Returns false when `old` is not among `parent`'s children.
pub fn replace_with(parent: &Handle, old: &Handle, replacements: Vec<Handle>) -> bool {
    let mut children = parent.children.borrow_mut();
    let Some(pos) = children.iter().position(|c| Rc::ptr_eq(c, old)) else {
        return false;
    };
    old.parent.set(None);
    for node in &replacements {
        node.parent.set(Some(Rc::downgrade(parent)));
    }
    children.splice(pos..=pos, replacements);
    true
}

/// Depth-first walk. The visitor returns whether to descend into the node's
/// children; the root itself is visited first.
fn walk(node: &Handle, visit: &mut impl FnMut(&Handle) -> bool) {
    if !visit(node) {
        return;
    }
    for child in node.children.borrow().iter() {
        walk(child, visit);
    }
}
