//! View synchronization
//!
//! Decides whether the display surface is behind the tree store and applies
//! the smallest mutation that brings it up to date. Nothing here returns an
//! error: a surface that cannot be written is simply left stale until the
//! next event.

use anyhow::Result;

use crate::outline::NodePath;
use crate::store::{DocumentId, TreeStore};
use crate::surface::{DisplaySurface, Highlight, SurfaceSyntax};

/// What a synchronize call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    /// Surface content was replaced
    pub redrawn: bool,
    /// Highlight and cursor were moved
    pub highlighted: bool,
    /// A surface operation failed and was swallowed
    pub failed: bool,
}

impl SyncOutcome {
    /// Nothing was written
    pub fn is_noop(&self) -> bool {
        !self.redrawn && !self.highlighted
    }
}

/// Keeps one display surface in step with the tree store
#[derive(Debug)]
pub struct ViewSynchronizer<S> {
    surface: Option<S>,
    active_document: Option<DocumentId>,
    highlight_group: String,
    last_highlight: Option<Highlight>,
}

impl<S: DisplaySurface> ViewSynchronizer<S> {
    pub fn new(highlight_group: impl Into<String>) -> Self {
        Self {
            surface: None,
            active_document: None,
            highlight_group: highlight_group.into(),
            last_highlight: None,
        }
    }

    /// Start driving `surface`, returning the one it replaces
    pub fn attach(&mut self, surface: S) -> Option<S> {
        self.last_highlight = None;
        self.surface.replace(surface)
    }

    /// Stop driving the current surface
    pub fn detach(&mut self) -> Option<S> {
        self.active_document = None;
        self.last_highlight = None;
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Document whose lines currently occupy the surface
    pub fn active_document(&self) -> Option<&DocumentId> {
        self.active_document.as_ref()
    }

    /// Install the surface's declarative styling. Returns false on failure.
    pub fn setup(&mut self, syntax: &SurfaceSyntax) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match surface.apply_syntax(syntax) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("sync: surface syntax setup failed: {:#}", e);
                false
            }
        }
    }

    /// Whether showing `document` requires rewriting the surface
    pub fn needs_redraw(&self, store: &TreeStore, document: &DocumentId, force: bool) -> bool {
        if force || self.active_document.as_ref() != Some(document) {
            return true;
        }
        match store.state(document) {
            Some(state) => state.version.is_none() || state.is_stale(),
            None => true,
        }
    }

    /// Bring the surface up to date with `document`.
    ///
    /// `current` is the node under the editor cursor within `document`.
    pub fn synchronize(
        &mut self,
        store: &mut TreeStore,
        document: &DocumentId,
        current: Option<&NodePath>,
        force: bool,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        if self.surface.is_none() {
            return outcome;
        }

        if self.needs_redraw(store, document, force) {
            match self.redraw(store, document) {
                Ok(()) => outcome.redrawn = true,
                Err(e) => {
                    tracing::debug!("sync: redraw of {} failed: {:#}", document, e);
                    outcome.failed = true;
                    return outcome;
                }
            }
        }

        if self.active_document.as_ref() == Some(document) {
            match self.move_highlight(store, document, current, outcome.redrawn) {
                Ok(moved) => outcome.highlighted = moved,
                Err(e) => {
                    tracing::debug!("sync: highlight in {} failed: {:#}", document, e);
                    outcome.failed = true;
                }
            }
        }

        outcome
    }

    fn redraw(&mut self, store: &mut TreeStore, document: &DocumentId) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        let (content, version) = match store.state(document) {
            Some(state) if state.version.is_some() => (state.rendered.lines.as_slice(), state.version),
            _ => (&[][..], None),
        };

        replace_content(surface, content)?;
        tracing::trace!(
            "sync: wrote {} lines of {} (version {:?})",
            content.len(),
            document,
            version
        );

        store.mark_rendered(document, version);
        self.active_document = Some(document.clone());

        // The old highlight points into content that no longer exists
        if self.last_highlight.take().is_some() {
            if let Err(e) = surface.clear_highlights() {
                tracing::debug!("sync: clearing stale highlight failed: {:#}", e);
            }
        }
        Ok(())
    }

    fn move_highlight(
        &mut self,
        store: &TreeStore,
        document: &DocumentId,
        current: Option<&NodePath>,
        redrawn: bool,
    ) -> Result<bool> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };

        let target = current
            .zip(store.state(document))
            .and_then(|(path, state)| state.rendered.span_for(path))
            .map(|span| Highlight {
                line: span.line,
                start_col: span.start_col,
                end_col: span.end_col,
                group: self.highlight_group.clone(),
            });

        match target {
            Some(highlight) => {
                if !redrawn && self.last_highlight.as_ref() == Some(&highlight) {
                    return Ok(false);
                }
                // Unknown surface state until all three writes land
                self.last_highlight = None;
                surface.clear_highlights()?;
                surface.add_highlight(&highlight)?;
                surface.set_cursor(highlight.line, 0)?;
                self.last_highlight = Some(highlight);
                Ok(true)
            }
            None => {
                if self.last_highlight.take().is_some() {
                    surface.clear_highlights()?;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }
}

/// Replace the whole surface with `content` without leaving a stale tail
fn replace_content<S: DisplaySurface>(surface: &mut S, content: &[String]) -> Result<()> {
    let len = surface.line_count()?;
    if len > content.len() {
        surface.set_lines(0, len, &[])?;
        surface.set_lines(0, 0, content)
    } else {
        surface.set_lines(0, len, content)
    }
}
