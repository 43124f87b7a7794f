//! Outline tree model
//!
//! Structural outline of a source document as published by the analysis
//! server. The tree is replaced wholesale on every notification; rendering
//! and cursor lookup are pure functions over it.

pub mod locate;
pub mod render;

pub use locate::{locate, node_at, Located};
pub use render::{render_outline, NodeSpan, RenderOptions, RenderedOutline};

/// Vertical connector drawn where a sibling further down still needs a line
pub const VERTICAL_LINE: &str = "│";
/// Connector for every child except the last
pub const BRANCH_CORNER: &str = "├";
/// Connector for the last child of a list
pub const END_CORNER: &str = "└";
/// Marker placed before the icon of a folded node
pub const FOLD_MARKER: &str = "▸ ";

/// Symbol kind, used to pick an icon and a highlight group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutlineKind {
    TopLevelVariable,
    Class,
    Field,
    Constructor,
    ConstructorInvocation,
    Function,
    Method,
    #[default]
    Unknown,
}

impl OutlineKind {
    /// All kinds that have a dedicated icon
    pub const KNOWN: [OutlineKind; 7] = [
        OutlineKind::TopLevelVariable,
        OutlineKind::Class,
        OutlineKind::Field,
        OutlineKind::Constructor,
        OutlineKind::ConstructorInvocation,
        OutlineKind::Function,
        OutlineKind::Method,
    ];

    /// Parse the analysis server's kind string. Unrecognized kinds map to `Unknown`.
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "TOP_LEVEL_VARIABLE" => OutlineKind::TopLevelVariable,
            "CLASS" => OutlineKind::Class,
            "FIELD" => OutlineKind::Field,
            "CONSTRUCTOR" => OutlineKind::Constructor,
            "CONSTRUCTOR_INVOCATION" => OutlineKind::ConstructorInvocation,
            "FUNCTION" => OutlineKind::Function,
            "METHOD" => OutlineKind::Method,
            _ => OutlineKind::Unknown,
        }
    }

    /// Icon glyph emitted in front of the node name.
    ///
    /// Some glyphs carry their own trailing space; the rendered text must
    /// match them byte for byte.
    pub fn icon(&self) -> &'static str {
        match self {
            OutlineKind::TopLevelVariable => "\u{f435}",
            OutlineKind::Class => "\u{f0e8} ",
            OutlineKind::Field => "\u{f93d}",
            OutlineKind::Constructor => "\u{e624} ",
            OutlineKind::ConstructorInvocation => "\u{fc2a} ",
            OutlineKind::Function => "\u{0192} ",
            OutlineKind::Method => "\u{f6a6} ",
            OutlineKind::Unknown => "\u{e612}",
        }
    }

    /// Highlight group the surface syntax maps this kind's icon to
    pub fn highlight_group(&self) -> &'static str {
        match self {
            OutlineKind::TopLevelVariable | OutlineKind::Field => "Identifier",
            OutlineKind::Class => "Type",
            OutlineKind::Constructor | OutlineKind::Function | OutlineKind::Method => "Function",
            OutlineKind::ConstructorInvocation => "Special",
            OutlineKind::Unknown => "Normal",
        }
    }
}

/// A position in the source document (line/col are 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Half-open span `[start, end)` in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whole lines `start_line..end_line`, starting and ending at column 0
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self {
            start: Position::new(start_line, 0),
            end: Position::new(end_line, 0),
        }
    }

    /// Half-open containment test on (line, col)
    pub fn contains(&self, pos: Position) -> bool {
        let after_start = pos.line > self.start.line
            || (pos.line == self.start.line && pos.col >= self.start.col);
        let before_end =
            pos.line < self.end.line || (pos.line == self.end.line && pos.col < self.end.col);
        after_start && before_end
    }
}

/// Signature details the analysis server attaches to an element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementDetail {
    pub parameters: Option<String>,
    pub type_parameters: Option<String>,
    pub return_type: Option<String>,
}

/// A single node in the outline tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineNode {
    pub name: String,
    pub kind: OutlineKind,
    /// Span of the declaration itself
    pub source_range: Range,
    /// Span of the whole body, used for cursor containment
    pub code_range: Range,
    pub children: Vec<OutlineNode>,
    pub folded: bool,
    pub detail: ElementDetail,
}

impl OutlineNode {
    pub fn new(name: impl Into<String>, kind: OutlineKind, code_range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            source_range: code_range,
            code_range,
            children: Vec::new(),
            folded: false,
            detail: ElementDetail::default(),
        }
    }

    /// An unnamed root holding the given top-level nodes
    pub fn root(children: Vec<OutlineNode>) -> Self {
        let end = children
            .iter()
            .map(|c| c.code_range.end)
            .max()
            .unwrap_or_default();
        Self {
            code_range: Range::new(Position::default(), end),
            children,
            ..Self::default()
        }
    }

    /// Append a child (builder pattern)
    pub fn with_child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the folded flag (builder pattern)
    pub fn with_folded(mut self, folded: bool) -> Self {
        self.folded = folded;
        self
    }

    /// Set the declaration range (builder pattern)
    pub fn with_source_range(mut self, range: Range) -> Self {
        self.source_range = range;
        self
    }

    /// Whether this node has children
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes below this one (the node itself excluded)
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

/// Child indices leading from the root to a node. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
