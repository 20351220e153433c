// src/doc_tree.rs
//! Nesting of flat listings into documentation trees.
//!
//! The assembly story reads as three named steps:
//!   1. Index items by id as they arrive in the listing
//!   2. Link every item under its parent, or promote it to a root
//!   3. Assemble the forest bottom-up from a post-order walk, sorted by id

use crate::error::TreeError;
use crate::model::{DocTreeNode, Item};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Builds the navigation forest for a flat listing.
///
/// Roots and every child list are sorted ascending by id. An item whose
/// parent is not part of the listing becomes a root. Parent cycles
/// (self-parenting included) and repeated ids are reported as errors.
pub fn build_tree(items: &[Item], docs_prefix: &str) -> Result<Vec<DocTreeNode>, TreeError> {
    DocGraph::index(items)?.link().assemble(docs_prefix)
}

/// Parent→child edges between the items of one listing.
#[derive(Debug)]
struct DocGraph<'a> {
    /// Items indexed by id, in listing order
    items: IndexMap<u64, &'a Item>,
    /// Child relationships: parent_id -> child ids in listing order
    children: HashMap<u64, Vec<u64>>,
    /// Items without a resolvable parent, in listing order
    roots: Vec<u64>,
}

impl<'a> DocGraph<'a> {
    // --- Indexing: items arrive from the listing ---

    fn index(listing: &'a [Item]) -> Result<Self, TreeError> {
        let mut items = IndexMap::with_capacity(listing.len());
        for item in listing {
            match items.entry(item.id) {
                Entry::Occupied(_) => return Err(TreeError::DuplicateId { id: item.id }),
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
            }
        }

        Ok(Self {
            items,
            children: HashMap::with_capacity(listing.len() / 2),
            roots: Vec::new(),
        })
    }

    // --- Linking: attach each item to its parent ---

    fn link(mut self) -> Self {
        for (&id, item) in &self.items {
            match item.parent_id.filter(|parent| self.items.contains_key(parent)) {
                Some(parent) => self.children.entry(parent).or_default().push(id),
                None => {
                    if let Some(parent) = item.parent_id {
                        log::debug!(
                            "Item {} references unknown parent {}, treating it as a root",
                            id,
                            parent
                        );
                    }
                    self.roots.push(id);
                }
            }
        }
        self
    }

    // --- Assembly: walk edges to build the forest ---

    fn assemble(mut self, docs_prefix: &str) -> Result<Vec<DocTreeNode>, TreeError> {
        let mut roots = std::mem::take(&mut self.roots);
        roots.sort_unstable();
        for child_ids in self.children.values_mut() {
            child_ids.sort_unstable();
        }

        let order = self.post_order(&roots);

        // Anything not reached from a root hangs off a parent cycle.
        if order.len() < self.items.len() {
            let reachable: HashSet<u64> = order.iter().copied().collect();
            return Err(TreeError::Cycle {
                id: self.first_cycle_member(&reachable),
            });
        }

        // Children come before their parent in post-order, so every child
        // list is complete by the time its parent is built.
        let mut built: HashMap<u64, DocTreeNode> = HashMap::with_capacity(order.len());
        for id in order {
            let children = self
                .children
                .get(&id)
                .map(|child_ids| {
                    child_ids
                        .iter()
                        .filter_map(|child| built.remove(child))
                        .collect()
                })
                .unwrap_or_default();
            built.insert(id, self.node(id, docs_prefix, children));
        }

        let forest: Vec<DocTreeNode> = roots.iter().filter_map(|id| built.remove(id)).collect();
        log::debug!(
            "Assembled {} items into {} root(s)",
            self.items.len(),
            forest.len()
        );
        Ok(forest)
    }

    /// Ids reachable from `roots`, each after all of its descendants.
    ///
    /// Walks an explicit stack, so chain depth is bounded by the heap.
    /// Every item has at most one parent, so no id is reached twice.
    fn post_order(&self, roots: &[u64]) -> Vec<u64> {
        let mut order = Vec::with_capacity(self.items.len());
        let mut pending: Vec<(u64, bool)> = roots.iter().rev().map(|&id| (id, false)).collect();

        while let Some((id, expanded)) = pending.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            pending.push((id, true));
            if let Some(child_ids) = self.children.get(&id) {
                pending.extend(child_ids.iter().rev().map(|&child| (child, false)));
            }
        }
        order
    }

    fn node(&self, id: u64, docs_prefix: &str, children: Vec<DocTreeNode>) -> DocTreeNode {
        let item = self.items[&id];
        DocTreeNode {
            id,
            label: item.name.clone(),
            path: format!("{}/{}", docs_prefix, item.slug),
            children,
        }
    }

    /// Follows parent links from the first unreachable item until an id
    /// repeats; that id lies on the cycle.
    fn first_cycle_member(&self, reachable: &HashSet<u64>) -> u64 {
        let Some(start) = self.items.keys().copied().find(|id| !reachable.contains(id)) else {
            return 0;
        };

        let mut seen = HashSet::new();
        let mut current = start;
        while seen.insert(current) {
            match self.items[&current].parent_id {
                Some(parent) if self.items.contains_key(&parent) => current = parent,
                _ => break,
            }
        }
        current
    }
}
