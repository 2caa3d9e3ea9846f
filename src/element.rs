//! Element values
//!
//!     The output side of a projection. An [`Element`] is a tag, a property mapping and an ordered
//!     list of children, where each child is either another element or a string. These are the
//!     values a declarative rendering library consumes; the converter only ever asks a
//!     [`Factory`](crate::factory::Factory) to build them.
//!
//!     | Markup                        | Element                                         |
//!     |-------------------------------|-------------------------------------------------|
//!     | `<p class="a">x</p>`          | `p`, `{className: "a"}`, `["x"]`                 |
//!     | `<p style="color:red">x</p>`  | `p`, `{style: {color: "red"}}`, `["x"]`          |
//!     | `<input disabled>`            | `input`, `{disabled: ""}`, `[]`                  |

use indexmap::IndexMap;
use serde::Serialize;

/// Inline style declarations, property name to value, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// Property mapping handed to the factory, in attribute order. Children are not part of it.
pub type Props = IndexMap<String, PropValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    /// Only ever produced for the `style` property.
    Style(StyleMap),
}

impl PropValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            PropValue::Style(_) => None,
        }
    }

    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            PropValue::Style(style) => Some(style),
            PropValue::Text(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<StyleMap> for PropValue {
    fn from(value: StyleMap) -> Self {
        PropValue::Style(value)
    }
}

/// A constructed element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub tag: String,
    pub props: Props,
    /// Reconciliation key. Set by list conversion, never rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

impl Element {
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the element with its key replaced.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A child slot: nested element or text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Element(Element),
    Text(String),
}

impl Child {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

/// The element constructor.
///
/// Builds `(tag, props, children)` as given, with no key.
pub fn create_element(tag: &str, props: Props, children: Vec<Child>) -> Element {
    Element {
        tag: tag.to_string(),
        props,
        key: None,
        children,
    }
}
