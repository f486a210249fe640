use std::collections::HashMap;

use crate::record::{dex_id, EvolutionEntry};
use crate::upstream::ChainLink;

/// Name → {id, image_url} lookup built during pass 1 and handed to pass 2.
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: HashMap<String, IndexEntry>,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: u32,
    pub image_url: Option<String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: u32, image_url: Option<String>) {
        self.entries
            .insert(name.to_string(), IndexEntry { id, image_url });
    }

    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten an evolution chain into pre-order, resolving each species through
/// the pass-1 index.
///
/// Species missing from the index (filtered out by the id ceiling, or outside
/// the ingestion window) are skipped, but their children are still traversed,
/// so a family list can legitimately miss intermediate forms. Chains are
/// shallow in practice but the traversal uses an explicit stack rather than
/// assuming it.
pub fn flatten_chain(root: &ChainLink, index: &NameIndex) -> Vec<EvolutionEntry> {
    let mut out = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(entry) = index.get(&node.species.name) {
            out.push(EvolutionEntry {
                id: dex_id(entry.id),
                name: node.species.name.clone(),
                image_url: entry.image_url.clone(),
            });
        }

        // Reversed push keeps sibling order pre-order on a LIFO stack
        for child in node.evolves_to.iter().rev() {
            stack.push(child);
        }
    }

    out
}
