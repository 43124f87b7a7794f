//! Outline tree to text
//!
//! Renders an outline into box-drawn lines, one per non-root node in
//! pre-order, and records where each node's label landed so the view can
//! highlight it later. Columns are byte offsets: the display surface
//! addresses columns in encoded bytes, and both connectors and icons are
//! multi-byte.

use std::collections::HashMap;

use super::{NodePath, OutlineNode, BRANCH_CORNER, END_CORNER, FOLD_MARKER, VERTICAL_LINE};

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Append `: <line>` (1-based declaration line) after each name
    pub line_numbers: bool,
    /// Put a fold marker before the icon of folded nodes with children
    pub fold_markers: bool,
}

/// Where a node's label sits in the rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpan {
    pub path: NodePath,
    pub line: usize,
    /// Byte column where the icon starts
    pub start_col: usize,
    /// Byte column just past the name
    pub end_col: usize,
}

/// Output of [`render_outline`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedOutline {
    pub lines: Vec<String>,
    /// One span per line, in line order
    pub spans: Vec<NodeSpan>,
    /// Path to index into `spans`
    by_path: HashMap<NodePath, usize>,
}

impl RenderedOutline {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Span recorded for the node at `path`, if that node was rendered
    pub fn span_for(&self, path: &NodePath) -> Option<&NodeSpan> {
        self.by_path.get(path).and_then(|&index| self.spans.get(index))
    }
}

/// Render every descendant of `root` (the root itself is never shown)
pub fn render_outline(root: &OutlineNode, options: &RenderOptions) -> RenderedOutline {
    let count = root.descendant_count();
    let mut out = RenderedOutline {
        lines: Vec::with_capacity(count),
        spans: Vec::with_capacity(count),
        by_path: HashMap::with_capacity(count),
    };
    let root_path = NodePath::root();
    for (index, child) in root.children.iter().enumerate() {
        render_node(child, root_path.child(index), String::new(), options, &mut out);
    }
    out
}

fn render_node(
    node: &OutlineNode,
    path: NodePath,
    indent: String,
    options: &RenderOptions,
    out: &mut RenderedOutline,
) {
    let icon = node.kind.icon();
    let mut line = String::with_capacity(indent.len() + 1 + icon.len() + node.name.len() + 8);
    line.push_str(&indent);
    line.push(' ');
    if options.fold_markers && node.folded && node.is_collapsible() {
        line.push_str(FOLD_MARKER);
    }

    let start_col = line.len();
    line.push_str(icon);
    line.push_str(&node.name);
    let end_col = line.len();

    if options.line_numbers {
        line.push_str(": ");
        line.push_str(&(node.source_range.start.line + 1).to_string());
    }

    out.by_path.insert(path.clone(), out.spans.len());
    out.spans.push(NodeSpan {
        path: path.clone(),
        line: out.lines.len(),
        start_col,
        end_col,
    });
    out.lines.push(line);

    let indent = continue_indent(indent);
    match node.children.len() {
        0 => {}
        1 => render_node(&node.children[0], path.child(0), indent + " ", options, out),
        count => {
            for (index, child) in node.children.iter().enumerate() {
                let connector = if index + 1 == count {
                    END_CORNER
                } else {
                    BRANCH_CORNER
                };
                let child_indent = format!("{indent}{connector}");
                render_node(child, path.child(index), child_indent, options, out);
            }
        }
    }
}

/// Turn the connector a node was drawn with into what its children inherit.
///
/// A branch corner means more siblings follow below, so the line has to keep
/// flowing down past the children. An end corner has nothing below it.
fn continue_indent(indent: String) -> String {
    if let Some(prefix) = indent.strip_suffix(BRANCH_CORNER) {
        format!("{prefix}{VERTICAL_LINE}")
    } else if let Some(prefix) = indent.strip_suffix(END_CORNER) {
        format!("{prefix} ")
    } else {
        indent
    }
}
