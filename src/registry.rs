//! Identity key registry
//!
//! Assigns every source node it is asked about a key of the form `<prefix><counter>`. The key
//! belongs to the node's identity, not its position: the same node keeps its key for the
//! registry's lifetime, across lists and reorders. The counter is never reset, so no two nodes
//! seen by one registry share a key.
//!
//! Entries are never removed. The registry holds a clone of each keyed node, which keeps the
//! node's identity from being reused while the registry is alive.

use crate::config::KeyConfig;
use crate::source::{NodeId, SourceNode};
use std::collections::HashMap;
use std::fmt;

struct Entry<N> {
    // Pins the node so its identity cannot be handed to another node.
    _node: N,
    key: String,
}

pub struct KeyRegistry<N> {
    prefix: String,
    next: u64,
    entries: HashMap<NodeId, Entry<N>>,
}

impl<N: SourceNode> KeyRegistry<N> {
    /// Create an empty registry with the default `_k` prefix.
    pub fn new() -> Self {
        Self::from_config(&KeyConfig::default())
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        KeyRegistry {
            prefix: prefix.into(),
            next: 0,
            entries: HashMap::new(),
        }
    }

    pub fn from_config(config: &KeyConfig) -> Self {
        Self::with_prefix(config.prefix.clone())
    }

    /// The node's key, assigning the next one on first sight.
    pub fn key_for(&mut self, node: &N) -> &str {
        let prefix = &self.prefix;
        let next = &mut self.next;
        let entry = self.entries.entry(node.id()).or_insert_with(|| {
            let key = format!("{}{}", prefix, next);
            *next += 1;
            tracing::trace!(key = %key, "assigned key");
            Entry {
                _node: node.clone(),
                key,
            }
        });
        &entry.key
    }

    /// The node's key if it already has one.
    pub fn get(&self, node: &N) -> Option<&str> {
        self.entries.get(&node.id()).map(|entry| entry.key.as_str())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: SourceNode> Default for KeyRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for KeyRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("prefix", &self.prefix)
            .field("next", &self.next)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_fragment;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_sequential() {
        let fragment = parse_fragment("<p>a</p><p>b</p><p>c</p>");
        let mut registry = KeyRegistry::new();
        let keys: Vec<String> = fragment
            .children()
            .iter()
            .map(|node| registry.key_for(node).to_string())
            .collect();
        assert_eq!(keys, vec!["_k0", "_k1", "_k2"]);
    }

    #[test]
    fn test_same_node_same_key() {
        let fragment = parse_fragment("<p>a</p><p>b</p>");
        let nodes = fragment.children();
        let mut registry = KeyRegistry::new();
        let first = registry.key_for(&nodes[1]).to_string();
        registry.key_for(&nodes[0]);
        assert_eq!(registry.key_for(&nodes[1]), first);
        assert_eq!(registry.key_for(&nodes[1].clone()), first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_equal_content_distinct_keys() {
        let fragment = parse_fragment("<p>same</p><p>same</p>");
        let nodes = fragment.children();
        let mut registry = KeyRegistry::new();
        let a = registry.key_for(&nodes[0]).to_string();
        let b = registry.key_for(&nodes[1]).to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_does_not_assign() {
        let fragment = parse_fragment("<p>a</p>");
        let nodes = fragment.children();
        let mut registry = KeyRegistry::new();
        assert_eq!(registry.get(&nodes[0]), None);
        assert!(registry.is_empty());
        registry.key_for(&nodes[0]);
        assert_eq!(registry.get(&nodes[0]), Some("_k0"));
    }

    #[test]
    fn test_counter_shared_across_trees() {
        let first = parse_fragment("<p>a</p>");
        let second = parse_fragment("<p>b</p>");
        let mut registry = KeyRegistry::with_prefix("row-");
        assert_eq!(registry.key_for(&first.children()[0]), "row-0");
        assert_eq!(registry.key_for(&second.children()[0]), "row-1");
    }

    #[test]
    fn test_registries_are_isolated() {
        let fragment = parse_fragment("<p>a</p><p>b</p>");
        let nodes = fragment.children();
        let mut left = KeyRegistry::new();
        let mut right = KeyRegistry::new();
        left.key_for(&nodes[0]);
        assert_eq!(right.key_for(&nodes[1]), "_k0");
    }

    #[test]
    fn test_dropped_trees_never_collide() {
        let mut registry = KeyRegistry::new();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            // The fragment is dropped at the end of each pass; the registry keeps the node.
            let fragment = parse_fragment("<p>x</p>");
            let node = fragment.children().remove(0);
            assert!(seen.insert(registry.key_for(&node).to_string()));
        }
        assert_eq!(registry.len(), 50);
    }

    proptest! {
        #[test]
        fn test_keys_unique_and_stable(order in prop::collection::vec(0usize..8, 1..40)) {
            let fragment = parse_fragment(&"<i></i>".repeat(8));
            let nodes = fragment.children();
            let mut registry = KeyRegistry::new();
            let mut assigned: HashMap<usize, String> = HashMap::new();

            for index in order {
                let key = registry.key_for(&nodes[index]).to_string();
                let previous = assigned.entry(index).or_insert_with(|| key.clone());
                prop_assert_eq!(previous.as_str(), key.as_str());
            }

            let distinct: HashSet<&String> = assigned.values().collect();
            prop_assert_eq!(distinct.len(), assigned.len());
            prop_assert_eq!(registry.len(), assigned.len());
        }
    }
}
