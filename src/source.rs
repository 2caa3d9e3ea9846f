//! Source tree access
//!
//!     The converter never walks a concrete DOM directly. It asks a [`SourceNode`] for a
//!     [`NodeKind`] view of itself (text, element or anything else) and for its [`NodeId`], the
//!     identity used by the key registry.
//!
//!     The crate ships one provider: [`markup5ever_rcdom::Handle`], the reference counted DOM that
//!     html5ever builds. Identity there is the `Rc` allocation, so two nodes with the same markup
//!     are still two different nodes.

use markup5ever_rcdom::{Handle, NodeData};
use std::rc::Rc;

/// Identity of a source node.
///
/// Two handles to the same underlying node compare equal; two structurally identical nodes do
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        NodeId(ptr as *const () as usize)
    }
}

/// The parts of an element node the converter reads.
#[derive(Debug, Clone)]
pub struct ElementParts<N> {
    pub tag: String,
    /// Attribute (name, value) pairs in source order. Names are unique.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<N>,
}

/// Closed view over the node variants the converter understands.
#[derive(Debug, Clone)]
pub enum NodeKind<N> {
    Text(String),
    Element(ElementParts<N>),
    /// Comments, doctypes, documents, processing instructions...
    Other,
}

/// A node of an externally owned markup tree.
///
/// Implementations must be cheap to clone (a handle, not a deep copy): the key registry keeps a
/// clone of every node it has keyed so the identity stays pinned for the registry's lifetime.
pub trait SourceNode: Clone {
    fn kind(&self) -> NodeKind<Self>;

    fn id(&self) -> NodeId;
}

impl SourceNode for Handle {
    fn kind(&self) -> NodeKind<Self> {
        match &self.data {
            NodeData::Text { contents } => NodeKind::Text(contents.borrow().to_string()),
            NodeData::Element { name, attrs, .. } => NodeKind::Element(ElementParts {
                tag: name.local.to_string(),
                attributes: attrs
                    .borrow()
                    .iter()
                    .map(|attr| {
                        let name = match &attr.name.prefix {
                            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                            None => attr.name.local.to_string(),
                        };
                        (name, attr.value.to_string())
                    })
                    .collect(),
                children: self.children.borrow().clone(),
            }),
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => NodeKind::Other,
        }
    }

    fn id(&self) -> NodeId {
        NodeId::from_ptr(Rc::as_ptr(self))
    }
}
