//! Per-document outline storage
//!
//! Holds the latest tree for each document together with its rendering and
//! the version counters the view synchronizer diffs against. Only the most
//! recent tree is kept; a new one replaces the old wholesale.

use std::collections::HashMap;
use std::fmt;

use crate::outline::{OutlineNode, RenderedOutline};

/// URI-like key identifying a document (e.g. `file:///lib/main.dart`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(uri: &str) -> Self {
        Self(uri.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// Everything known about one document's outline
#[derive(Debug, Clone, Default)]
pub struct DocumentOutlineState {
    pub tree: Option<OutlineNode>,
    pub rendered: RenderedOutline,
    /// Bumped on every new tree; `None` until the first one arrives
    pub version: Option<u64>,
    /// Version currently shown on the display surface
    pub rendered_version: Option<u64>,
}

impl DocumentOutlineState {
    /// Whether the surface is behind the stored tree
    pub fn is_stale(&self) -> bool {
        self.version != self.rendered_version
    }
}

/// Outline trees keyed by document
#[derive(Debug, Default)]
pub struct TreeStore {
    documents: HashMap<DocumentId, DocumentOutlineState>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tree for `document` and bump its version.
    ///
    /// The previous rendering is cleared; the caller renders the new tree
    /// with [`TreeStore::set_rendered`]. Returns the new version.
    pub fn put(&mut self, document: &DocumentId, tree: OutlineNode) -> u64 {
        let state = self.documents.entry(document.clone()).or_default();
        let version = state.version.map_or(0, |v| v + 1);
        state.tree = Some(tree);
        state.rendered = RenderedOutline::default();
        state.version = Some(version);
        tracing::debug!("store: {} now at version {}", document, version);
        version
    }

    /// Current tree for `document`, if one has arrived
    pub fn get(&self, document: &DocumentId) -> Option<&OutlineNode> {
        self.documents.get(document).and_then(|s| s.tree.as_ref())
    }

    pub fn state(&self, document: &DocumentId) -> Option<&DocumentOutlineState> {
        self.documents.get(document)
    }

    pub fn state_mut(&mut self, document: &DocumentId) -> Option<&mut DocumentOutlineState> {
        self.documents.get_mut(document)
    }

    pub fn version(&self, document: &DocumentId) -> Option<u64> {
        self.documents.get(document).and_then(|s| s.version)
    }

    pub fn rendered_version(&self, document: &DocumentId) -> Option<u64> {
        self.documents.get(document).and_then(|s| s.rendered_version)
    }

    /// Store the rendering of the current tree
    pub fn set_rendered(&mut self, document: &DocumentId, rendered: RenderedOutline) {
        if let Some(state) = self.documents.get_mut(document) {
            state.rendered = rendered;
        }
    }

    /// Record that `version` of `document` is now on the surface
    pub fn mark_rendered(&mut self, document: &DocumentId, version: Option<u64>) {
        if let Some(state) = self.documents.get_mut(document) {
            state.rendered_version = version;
        }
    }

    /// Forget that any surface shows this document, e.g. after the view closed
    pub fn invalidate_rendered(&mut self) {
        for state in self.documents.values_mut() {
            state.rendered_version = None;
        }
    }

    /// Drop everything stored for `document`
    pub fn remove(&mut self, document: &DocumentId) -> Option<DocumentOutlineState> {
        self.documents.remove(document)
    }

    pub fn contains(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
