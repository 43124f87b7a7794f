//! Session model - the complete state of the outline companion
//!
//! Owned and mutated only by [`crate::update::update`], one message at a time.

use std::collections::HashSet;

use crate::config::OutlineConfig;
use crate::outline::{locate, Located, NodePath, Position, RenderedOutline};
use crate::store::{DocumentId, TreeStore};

/// The complete session model
#[derive(Debug, Default)]
pub struct OutlineModel {
    /// Outline trees and renderings per document
    pub store: TreeStore,
    pub config: OutlineConfig,
    /// Documents the editor currently tracks
    open_documents: HashSet<DocumentId>,
    /// Document the editor cursor was last seen in
    pub focused_document: Option<DocumentId>,
    /// Last cursor position in the focused document (0-based)
    pub cursor: Option<Position>,
    /// Node under the cursor in the focused document
    pub current_node: Option<NodePath>,
    /// Last breadcrumb shown
    pub breadcrumb: String,
    /// Whether the user has the outline view open
    pub view_open: bool,
}

impl OutlineModel {
    pub fn new(config: OutlineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn open_document(&mut self, document: DocumentId) -> bool {
        self.open_documents.insert(document)
    }

    pub fn close_document(&mut self, document: &DocumentId) -> bool {
        self.open_documents.remove(document)
    }

    pub fn is_open(&self, document: &DocumentId) -> bool {
        self.open_documents.contains(document)
    }

    /// Current node, but only if it belongs to `document`
    pub fn current_node_in(&self, document: &DocumentId) -> Option<&NodePath> {
        if self.focused_document.as_ref() == Some(document) {
            self.current_node.as_ref()
        } else {
            None
        }
    }

    /// Rendering of `document`'s current tree
    pub fn rendered(&self, document: &DocumentId) -> Option<&RenderedOutline> {
        self.store.state(document).map(|s| &s.rendered)
    }

    /// Re-resolve the current node and breadcrumb from the last cursor
    /// position, e.g. after the focused document's tree changed.
    pub fn relocate_current(&mut self) -> Option<Located> {
        if !self.config.show_breadcrumb {
            return None;
        }
        let document = self.focused_document.as_ref()?;
        let located = locate(self.store.get(document)?, self.cursor?);
        self.current_node = Some(located.path.clone());
        self.breadcrumb.clone_from(&located.breadcrumb);
        Some(located)
    }
}
