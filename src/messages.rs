//! Message types for the Elm-style architecture
//!
//! Every inbound event (analysis server notification, editor autocommand,
//! user command) becomes one of these and flows through [`crate::update::update`].

use crate::outline::OutlineNode;
use crate::store::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The editor started tracking a document
    DocumentOpened(DocumentId),
    /// The editor stopped tracking a document
    DocumentClosed(DocumentId),
    /// The analysis server published a fresh outline
    OutlinePublished {
        document: DocumentId,
        outline: OutlineNode,
    },
    /// Cursor moved in a document, in the host's coordinate origin
    CursorMoved {
        document: DocumentId,
        line: usize,
        col: usize,
    },
    /// The user opened the outline view
    OpenView,
    /// The outline view was closed or destroyed
    ViewClosed,
    /// Toggle breadcrumb resolution
    SetBreadcrumbEnabled(bool),
}
