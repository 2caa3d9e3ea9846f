//! List conversion
//!
//! Converts sibling nodes and keys the resulting elements from a [`KeyRegistry`]. The key comes
//! from the source node, so reordering the same nodes reorders the same keys. Text is never
//! keyed, and nodes that convert to nothing are left out rather than kept as holes.
//!
//! A list member whose factory unwrapped it into several children contributes those children in
//! its place. Spliced elements are keyed `<node key>.<index>`, where the index is the child's
//! position in the splice, so every element in the output carries a key.

use crate::convert::{Converter, Projection};
use crate::element::Child;
use crate::factory::Factory;
use crate::registry::KeyRegistry;
use crate::source::SourceNode;

/// Convert a list of sibling nodes with the default attribute rules.
pub fn convert_list<'a, N, I, F>(
    nodes: I,
    factory: &mut F,
    registry: &mut KeyRegistry<N>,
) -> Result<Vec<Child>, F::Error>
where
    N: SourceNode + 'a,
    I: IntoIterator<Item = &'a N>,
    F: Factory + ?Sized,
{
    Converter::default().convert_list(nodes, factory, registry)
}

impl Converter {
    pub fn convert_list<'a, N, I, F>(
        &self,
        nodes: I,
        factory: &mut F,
        registry: &mut KeyRegistry<N>,
    ) -> Result<Vec<Child>, F::Error>
    where
        N: SourceNode + 'a,
        I: IntoIterator<Item = &'a N>,
        F: Factory + ?Sized,
    {
        let mut out = Vec::new();
        for node in nodes {
            match self.convert_node(node, factory)? {
                Projection::Nothing => {}
                Projection::Text(text) => out.push(Child::Text(text)),
                Projection::Element(element) => {
                    let key = registry.key_for(node);
                    out.push(Child::Element(element.with_key(key)));
                }
                Projection::Fragment(children) => {
                    if !children.iter().any(|child| child.as_element().is_some()) {
                        out.extend(children);
                        continue;
                    }
                    let base = registry.key_for(node).to_string();
                    out.extend(children.into_iter().enumerate().map(|(i, child)| match child {
                        Child::Element(element) => {
                            Child::Element(element.with_key(format!("{}.{}", base, i)))
                        }
                        text => text,
                    }));
                }
            }
        }
        Ok(out)
    }
}
