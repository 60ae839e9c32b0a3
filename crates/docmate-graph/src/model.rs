use std::path::PathBuf;

use serde::Serialize;

/// One module in the dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    /// Path of the module on disk, as resolved during the walk.
    pub path: PathBuf,
    /// Modules this one imports with relative specifiers, in source order.
    /// Empty for modules recorded as shared leaves.
    pub imports: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Node for a module whose imports were already walked elsewhere.
    pub fn leaf(path: PathBuf) -> Self {
        Self {
            path,
            imports: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, the root included.
    pub fn count(&self) -> usize {
        1 + self.imports.iter().map(DependencyNode::count).sum::<usize>()
    }
}
