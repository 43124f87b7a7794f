//! Display surface boundary
//!
//! The engine never talks to an editor directly. It writes lines, highlights
//! and cursor moves into a [`DisplaySurface`] and breadcrumbs into a
//! [`StatusIndicator`]. Both may fail at any time (the user closed the split,
//! the buffer was wiped); callers treat failures as "not updated this cycle".

use anyhow::{bail, Result};

use crate::outline::{OutlineKind, BRANCH_CORNER, END_CORNER, VERTICAL_LINE};

/// Highlight group used for the node under the cursor
pub const DEFAULT_HIGHLIGHT_GROUP: &str = "OutlineCurrent";

/// A styled column range on one surface line (byte columns, end exclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub group: String,
}

/// Glyph to highlight group mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRule {
    pub glyph: &'static str,
    pub group: &'static str,
}

/// Declarative styling issued once when a surface is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSyntax {
    /// Connector glyphs, styled as comments
    pub comment_glyphs: Vec<&'static str>,
    /// Icon glyphs and the semantic group each maps to
    pub icon_rules: Vec<SyntaxRule>,
}

impl SurfaceSyntax {
    /// Styling for the outline view
    pub fn outline() -> Self {
        let icon_rules = OutlineKind::KNOWN
            .iter()
            .chain(std::iter::once(&OutlineKind::Unknown))
            .map(|kind| SyntaxRule {
                glyph: kind.icon().trim_end(),
                group: kind.highlight_group(),
            })
            .collect();
        Self {
            comment_glyphs: vec![VERTICAL_LINE, BRANCH_CORNER, END_CORNER],
            icon_rules,
        }
    }
}

/// An addressable, line-oriented text view
pub trait DisplaySurface {
    /// Number of lines currently held
    fn line_count(&self) -> Result<usize>;

    /// Replace lines `[start, end)` with `lines`
    fn set_lines(&mut self, start: usize, end: usize, lines: &[String]) -> Result<()>;

    /// Remove every highlight previously placed by the engine
    fn clear_highlights(&mut self) -> Result<()>;

    fn add_highlight(&mut self, highlight: &Highlight) -> Result<()>;

    fn set_cursor(&mut self, line: usize, col: usize) -> Result<()>;

    fn apply_syntax(&mut self, syntax: &SurfaceSyntax) -> Result<()>;
}

/// Transient status line for breadcrumbs
pub trait StatusIndicator {
    fn show(&mut self, text: &str) -> Result<()>;
}

/// Creates the view's surface when the user opens it
pub trait SurfaceFactory {
    type Surface: DisplaySurface;

    /// Open a scratch view called `name`, `width` columns wide
    fn open(&mut self, name: &str, width: usize) -> Result<Self::Surface>;
}

/// Factory handing out fresh [`MemorySurface`]s
#[derive(Debug, Clone, Default)]
pub struct MemorySurfaceFactory {
    /// Names of every view opened so far
    pub opened: Vec<String>,
    /// Refuse to open views
    pub fail: bool,
}

impl SurfaceFactory for MemorySurfaceFactory {
    type Surface = MemorySurface;

    fn open(&mut self, name: &str, _width: usize) -> Result<MemorySurface> {
        if self.fail {
            bail!("cannot open view {}", name);
        }
        self.opened.push(name.to_string());
        Ok(MemorySurface::new())
    }
}

/// In-memory surface, also counting writes so callers can check diffing
#[derive(Debug, Clone)]
pub struct MemorySurface {
    lines: Vec<String>,
    highlights: Vec<Highlight>,
    cursor: Option<(usize, usize)>,
    syntax: Option<SurfaceSyntax>,
    /// Number of successful `set_lines` calls
    pub line_writes: usize,
    /// Number of successful highlight/cursor mutations
    pub highlight_writes: usize,
    available: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            highlights: Vec::new(),
            cursor: None,
            syntax: None,
            line_writes: 0,
            highlight_writes: 0,
            available: true,
        }
    }

    /// Surface pre-filled with `lines`
    pub fn with_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::new()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    pub fn syntax(&self) -> Option<&SurfaceSyntax> {
        self.syntax.as_ref()
    }

    /// Total successful mutations of any kind
    pub fn writes(&self) -> usize {
        self.line_writes + self.highlight_writes
    }

    /// Make every operation fail (or succeed again), like a closed buffer
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn check(&self) -> Result<()> {
        if !self.available {
            bail!("surface is not available");
        }
        Ok(())
    }
}

impl DisplaySurface for MemorySurface {
    fn line_count(&self) -> Result<usize> {
        self.check()?;
        Ok(self.lines.len())
    }

    fn set_lines(&mut self, start: usize, end: usize, lines: &[String]) -> Result<()> {
        self.check()?;
        let end = end.min(self.lines.len());
        if start > end {
            bail!(
                "line range {}..{} out of bounds for {} lines",
                start,
                end,
                self.lines.len()
            );
        }
        self.lines.splice(start..end, lines.iter().cloned());
        self.line_writes += 1;
        Ok(())
    }

    fn clear_highlights(&mut self) -> Result<()> {
        self.check()?;
        self.highlights.clear();
        self.highlight_writes += 1;
        Ok(())
    }

    fn add_highlight(&mut self, highlight: &Highlight) -> Result<()> {
        self.check()?;
        if highlight.line >= self.lines.len() {
            bail!("highlight line {} past end of surface", highlight.line);
        }
        self.highlights.push(highlight.clone());
        self.highlight_writes += 1;
        Ok(())
    }

    fn set_cursor(&mut self, line: usize, col: usize) -> Result<()> {
        self.check()?;
        if line >= self.lines.len() {
            bail!("cursor line {} past end of surface", line);
        }
        self.cursor = Some((line, col));
        self.highlight_writes += 1;
        Ok(())
    }

    fn apply_syntax(&mut self, syntax: &SurfaceSyntax) -> Result<()> {
        self.check()?;
        self.syntax = Some(syntax.clone());
        Ok(())
    }
}

/// Status indicator that remembers the last message
#[derive(Debug, Clone, Default)]
pub struct MemoryStatus {
    pub text: String,
    pub updates: usize,
}

impl StatusIndicator for MemoryStatus {
    fn show(&mut self, text: &str) -> Result<()> {
        self.text.clear();
        self.text.push_str(text);
        self.updates += 1;
        Ok(())
    }
}
