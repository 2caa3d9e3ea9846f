//! Tree conversion
//!
//!     Depth-first projection of one source node into a [`Projection`]:
//!
//!     - absent node, comments and other non element/text nodes → [`Projection::Nothing`]
//!     - text node → [`Projection::Text`] with its content as-is, empty string included
//!     - element node → attributes translated, children converted in document order, then the
//!       factory decides (see [`crate::factory`])
//!
//!     Child results are collected with the splicing rule: nothing is skipped, text and elements
//!     are kept in order, and a fragment (a factory that returned several children) is spliced in
//!     place of the node that produced it.
//!
//!     A factory error aborts the whole call; no partial tree is returned.

use crate::attributes::AttributeTranslator;
use crate::config::{AttributeConfig, ProjectionConfig};
use crate::element::{Child, Element};
use crate::factory::{Built, Factory};
use crate::source::{NodeKind, SourceNode};

/// Result of converting one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Nothing,
    Text(String),
    Element(Element),
    /// The factory unwrapped the node into these children.
    Fragment(Vec<Child>),
}

impl Projection {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Projection::Nothing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Projection::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_element(self) -> Option<Element> {
        match self {
            Projection::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The children this projection contributes to a parent: zero, one, or many.
    pub fn into_children(self) -> Vec<Child> {
        match self {
            Projection::Nothing => Vec::new(),
            Projection::Text(text) => vec![Child::Text(text)],
            Projection::Element(element) => vec![Child::Element(element)],
            Projection::Fragment(children) => children,
        }
    }
}

impl From<Built> for Projection {
    fn from(built: Built) -> Self {
        match built {
            Built::Single(element) => Projection::Element(element),
            Built::Many(children) => Projection::Fragment(children),
            Built::None => Projection::Nothing,
        }
    }
}

/// Convert a node with the default attribute rules.
pub fn convert<N, F>(node: Option<&N>, factory: &mut F) -> Result<Projection, F::Error>
where
    N: SourceNode,
    F: Factory + ?Sized,
{
    Converter::default().convert(node, factory)
}

/// Projects source nodes into elements.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    translator: AttributeTranslator,
}

impl Converter {
    pub fn new(attributes: AttributeConfig) -> Self {
        Converter {
            translator: AttributeTranslator::new(attributes),
        }
    }

    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self::new(config.attributes.clone())
    }

    pub fn translator(&self) -> &AttributeTranslator {
        &self.translator
    }

    pub fn convert<N, F>(&self, node: Option<&N>, factory: &mut F) -> Result<Projection, F::Error>
    where
        N: SourceNode,
        F: Factory + ?Sized,
    {
        let Some(node) = node else {
            return Ok(Projection::Nothing);
        };
        self.convert_node(node, factory)
    }

    pub(crate) fn convert_node<N, F>(
        &self,
        node: &N,
        factory: &mut F,
    ) -> Result<Projection, F::Error>
    where
        N: SourceNode,
        F: Factory + ?Sized,
    {
        let parts = match node.kind() {
            NodeKind::Text(text) => return Ok(Projection::Text(text)),
            NodeKind::Other => return Ok(Projection::Nothing),
            NodeKind::Element(parts) => parts,
        };

        let props = self.translator.translate(
            parts
                .attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        let mut children = Vec::with_capacity(parts.children.len());
        for child in &parts.children {
            children.extend(self.convert_node(child, factory)?.into_children());
        }

        let built = factory.create(&parts.tag, props, children)?;
        match &built {
            Built::None => tracing::trace!(tag = %parts.tag, "factory dropped subtree"),
            Built::Many(spliced) => {
                tracing::trace!(tag = %parts.tag, count = spliced.len(), "factory unwrapped node")
            }
            Built::Single(_) => {}
        }
        Ok(built.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{create_element, PropValue, Props};
    use crate::factory::{from_fn, try_from_fn, CreateElement};
    use crate::html::{parse_fragment, Fragment};
    use markup5ever_rcdom::Handle;

    fn first_child(fragment: &Fragment) -> Handle {
        fragment.first_child().expect("fragment to have a node")
    }

    #[test]
    fn test_absent_node_is_nothing() {
        let result = convert(None::<&Handle>, &mut CreateElement).unwrap();
        assert!(result.is_nothing());
    }

    #[test]
    fn test_text_node_is_text() {
        let fragment = parse_fragment("plain text");
        let node = first_child(&fragment);
        let result = convert(Some(&node), &mut CreateElement).unwrap();
        assert_eq!(result.as_text(), Some("plain text"));
    }

    #[test]
    fn test_element_with_children() {
        let fragment = parse_fragment(r#"<p class="x">a <em>b</em></p>"#);
        let node = first_child(&fragment);
        let element = convert(Some(&node), &mut CreateElement)
            .unwrap()
            .into_element()
            .unwrap();

        assert_eq!(element.tag, "p");
        assert_eq!(element.prop("className"), Some(&PropValue::from("x")));
        assert_eq!(element.children.len(), 2);
        assert_eq!(element.children[0].as_text(), Some("a "));
        let em = element.children[1].as_element().unwrap();
        assert_eq!(em.tag, "em");
        assert_eq!(em.children, vec![Child::from("b")]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let fragment = parse_fragment("<p>a<!-- hidden -->b</p>");
        let node = first_child(&fragment);
        let element = convert(Some(&node), &mut CreateElement)
            .unwrap()
            .into_element()
            .unwrap();
        assert_eq!(element.children, vec![Child::from("a"), Child::from("b")]);
    }

    #[test]
    fn test_factory_called_bottom_up() {
        let fragment = parse_fragment("<div><p><b>x</b></p><i>y</i></div>");
        let node = first_child(&fragment);
        let mut seen = Vec::new();
        let mut factory = from_fn(|tag: &str, props: Props, children: Vec<Child>| {
            seen.push(tag.to_string());
            Built::Single(create_element(tag, props, children))
        });
        convert(Some(&node), &mut factory).unwrap();
        drop(factory);
        assert_eq!(seen, vec!["b", "p", "i", "div"]);
    }

    #[test]
    fn test_root_fragment() {
        let fragment = parse_fragment("<span>a<b>b</b></span>");
        let node = first_child(&fragment);
        let mut unwrap = from_fn(|tag: &str, props: Props, children: Vec<Child>| {
            if tag == "span" {
                Built::Many(children)
            } else {
                Built::Single(create_element(tag, props, children))
            }
        });
        let result = convert(Some(&node), &mut unwrap).unwrap();
        match result {
            Projection::Fragment(children) => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[0].as_text(), Some("a"));
            }
            _ => panic!("Expected fragment"),
        }
    }

    #[test]
    fn test_factory_error_aborts() {
        let fragment = parse_fragment("<div><p>ok</p><script>bad</script></div>");
        let node = first_child(&fragment);
        let mut calls = 0;
        let mut factory = try_from_fn(|tag: &str, props: Props, children: Vec<Child>| {
            calls += 1;
            if tag == "script" {
                Err(format!("{} not allowed", tag))
            } else {
                Ok(Built::Single(create_element(tag, props, children)))
            }
        });
        let result = convert(Some(&node), &mut factory);
        drop(factory);
        assert_eq!(result, Err("script not allowed".to_string()));
        // `div` is never built
        assert_eq!(calls, 2);
    }
}
