// src/model/docs.rs
use super::{Organization, Pagination};
use serde::{Deserialize, Serialize};

/// A documentation page placed in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTreeNode {
    pub id: u64,
    pub label: String,
    pub path: String,
    pub children: Vec<DocTreeNode>,
}

impl DocTreeNode {
    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DocTreeNode::node_count).sum::<usize>()
    }

    /// Finds a node by id in this subtree, depth-first.
    pub fn find(&self, id: u64) -> Option<&DocTreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// A listing reshaped as a navigation forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsPage {
    pub tree: Vec<DocTreeNode>,
    pub pagination: Pagination,
    pub organization: Organization,
}
