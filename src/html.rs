//! HTML bridge
//!
//!     Glue between markup text and the converter, built on html5ever.
//!
//!     Inbound: [`parse_fragment`] parses markup the way a browser fills `body.innerHTML` and
//!     hands back a [`Fragment`] whose body children are the source nodes.
//!
//!     Outbound: [`render_to_static_markup`] renders a projection back to markup. Pipeline:
//!     Element → RcDom → HTML string. Property rules on the way out:
//!
//!     | Property      | Attribute                                   |
//!     |---------------|---------------------------------------------|
//!     | `className`   | `class`                                     |
//!     | `htmlFor`     | `for`                                       |
//!     | `style`       | `name:value;` per declaration, empty → none |
//!     | anything else | same name, same value                       |
//!
//!     Attributes and declarations come out in the order the props hold them, which for a
//!     converted node is source order. Keys are never rendered.

use crate::element::{Child, Element, PropValue, StyleMap};
use html5ever::tendril::TendrilSink;
use html5ever::{
    local_name, ns, parse_document, serialize, serialize::SerializeOpts,
    serialize::TraversalScope, Attribute, LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Errors raised while rendering a projection to markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Serialization(String),
    Utf8(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Serialization(msg) => write!(f, "HTML serialization failed: {}", msg),
            RenderError::Utf8(msg) => write!(f, "UTF-8 conversion failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// A parsed HTML fragment.
///
/// Owns the whole document: dropping an rcdom node empties the child lists of everything below
/// it, so handles taken from a fragment are only meaningful while the fragment is alive.
pub struct Fragment {
    dom: RcDom,
    body: Handle,
}

impl Fragment {
    /// The `<body>` element holding the parsed nodes.
    pub fn body(&self) -> &Handle {
        &self.body
    }

    /// The parsed top-level nodes, in document order.
    pub fn children(&self) -> Vec<Handle> {
        self.body.children.borrow().clone()
    }

    pub fn first_child(&self) -> Option<Handle> {
        self.body.children.borrow().first().cloned()
    }

    pub fn dom(&self) -> &RcDom {
        &self.dom
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("children", &self.body.children.borrow().len())
            .finish()
    }
}

/// Parse markup as the content of a document body.
pub fn parse_fragment(html: &str) -> Fragment {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let body = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
    Fragment { dom, body }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = find_child(document, local_name!("html"))?;
    find_child(&html, local_name!("body"))
}

fn find_child(parent: &Handle, local: LocalName) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, NodeData::Element { name, .. } if name.local == local))
        .cloned()
}

/// Render one child (element or text) to markup.
pub fn render_to_static_markup(child: &Child) -> Result<String, RenderError> {
    render_children(std::slice::from_ref(child))
}

/// Render a sequence of children to markup, concatenated.
pub fn render_children(children: &[Child]) -> Result<String, RenderError> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut output = Vec::new();
    for child in children {
        let serializable = SerializableHandle::from(build_node(child));
        serialize(&mut output, &serializable, opts.clone())
            .map_err(|e| RenderError::Serialization(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| RenderError::Utf8(e.to_string()))
}

fn build_node(child: &Child) -> Handle {
    match child {
        Child::Text(text) => create_text(text),
        Child::Element(element) => build_element(element),
    }
}

fn build_element(element: &Element) -> Handle {
    let attrs = element
        .props
        .iter()
        .filter_map(|(name, value)| {
            let value = match value {
                PropValue::Text(text) => text.clone(),
                PropValue::Style(style) if style.is_empty() => return None,
                PropValue::Style(style) => style_to_css(style),
            };
            Some((attribute_name(name), value))
        })
        .collect();

    let node = create_element(&element.tag, attrs);
    for child in &element.children {
        node.children.borrow_mut().push(build_node(child));
    }
    node
}

fn attribute_name(prop: &str) -> &str {
    match prop {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

fn style_to_css(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{}:{};", hyphenate(name), value))
        .collect()
}

/// Inverse of camel-cased style names: `backgroundColor` → `background-color`,
/// `WebkitTransition` → `-webkit-transition`, `msTransition` → `-ms-transition`.
fn hyphenate(name: &str) -> String {
    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
