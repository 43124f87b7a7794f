//! Cursor to outline node resolution

use super::{NodePath, OutlineNode, Position};

/// Separator placed before every name in a breadcrumb
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Result of resolving a cursor position against an outline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Located {
    /// Deepest node whose code range contains the cursor (root if none)
    pub path: NodePath,
    /// `" > A > B"` for every node descended into; empty at the root
    pub breadcrumb: String,
}

impl Located {
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }
}

/// Descend from `root` into the first child containing `pos`, repeatedly.
///
/// `pos` is 0-based. Overlapping siblings are tolerated: the first one in
/// source order wins.
pub fn locate(root: &OutlineNode, pos: Position) -> Located {
    let mut located = Located::default();
    let mut current = root;

    while let Some((index, child)) = current
        .children
        .iter()
        .enumerate()
        .find(|(_, child)| child.code_range.contains(pos))
    {
        located.path.0.push(index);
        located.breadcrumb.push_str(BREADCRUMB_SEPARATOR);
        located.breadcrumb.push_str(&child.name);
        current = child;
    }

    located
}

/// Follow `path` down from `root`
pub fn node_at<'a>(root: &'a OutlineNode, path: &NodePath) -> Option<&'a OutlineNode> {
    path.0
        .iter()
        .try_fold(root, |node, &index| node.children.get(index))
}
