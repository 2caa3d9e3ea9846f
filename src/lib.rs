//! Projection of markup node trees into element values
//!
//!     This crate walks a mutable markup tree (a DOM) and produces an immutable tree of elements:
//!     a tag, a property mapping and an ordered list of children. Those are the values a
//!     declarative rendering library consumes, so the crate sits between "some HTML I already
//!     have as a DOM" and "a renderer that wants element values".
//!
//!     This is a pure lib: nothing here supposes a shell, a global, or a logger being installed.
//!
//! Architecture
//!
//!     - attributes: raw attribute list → property mapping (`class` → `className`, inline style
//!       → nested mapping)
//!     - convert: recursive projection of one node, the factory deciding what every element node
//!       becomes (itself, its children spliced in its place, or nothing)
//!     - list: projection of sibling nodes, each element keyed by node identity
//!     - registry: the identity → key store behind list keys
//!
//!     The file structure :
//!     .
//!     ├── attributes.rs       # AttributeTranslator, inline style parsing
//!     ├── config.rs           # Layered configuration (embedded defaults + user files)
//!     ├── convert.rs          # Converter, Projection
//!     ├── element.rs          # Element, Child, Props, create_element
//!     ├── factory.rs          # Factory trait, Built, CreateElement, closure factories
//!     ├── html.rs             # html5ever bridge: parse fragments, render static markup
//!     ├── list.rs             # List conversion with keys
//!     ├── registry.rs         # KeyRegistry
//!     ├── source.rs           # SourceNode trait, rcdom adapter
//!     └── lib.rs
//!
//! Keys
//!
//!     Keys are a property of node identity, never of position. A registry hands out
//!     `_k0`, `_k1`, ... in first-seen order from one counter that is never reset, and keeps
//!     handing the same node the same key. Reordering siblings and converting again permutes the
//!     keys along with the nodes. Registries are plain values owned by the caller; separate
//!     registries never share state.
//!
//! Errors
//!
//!     Absent input and non element/text nodes are not errors, they convert to nothing. A
//!     malformed style declaration is dropped on its own. The only failure is the factory's:
//!     its error is returned as-is and the conversion call produces nothing else.
//!
//! Example
//!
//!     ```ignore
//!     use markup_elements::{convert, html, CreateElement};
//!
//!     let fragment = html::parse_fragment(r#"<p class="test">test</p>"#);
//!     let projection = convert(fragment.first_child().as_ref(), &mut CreateElement)?;
//!     let markup = html::render_children(&projection.into_children())?;
//!     assert_eq!(markup, r#"<p class="test">test</p>"#);
//!     ```

pub mod attributes;
pub mod config;
pub mod convert;
pub mod element;
pub mod factory;
pub mod html;
pub mod list;
pub mod registry;
pub mod source;

pub use attributes::{translate, AttributeTranslator};
pub use crate::config::{load_defaults, Loader, ProjectionConfig};
pub use convert::{convert, Converter, Projection};
pub use element::{create_element, Child, Element, PropValue, Props, StyleMap};
pub use factory::{from_fn, try_from_fn, Built, CreateElement, Factory};
pub use list::convert_list;
pub use registry::KeyRegistry;
pub use source::{ElementParts, NodeId, NodeKind, SourceNode};
