//! Command types for the Elm-style architecture
//!
//! Commands represent side effects against the display surface and status
//! indicator that the runtime performs after an update.

use crate::store::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Bring the surface in step with `document`
    Sync { document: DocumentId, force: bool },
    /// Show a breadcrumb on the status indicator
    ShowBreadcrumb(String),
    /// Create the view's surface
    OpenSurface { name: String, width: usize },
    /// Install the surface's syntax and highlight groups
    SetupSurface,
    /// Let go of the surface
    DetachSurface,
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    pub fn sync(document: DocumentId) -> Self {
        Cmd::Sync {
            document,
            force: false,
        }
    }

    pub fn force_sync(document: DocumentId) -> Self {
        Cmd::Sync {
            document,
            force: true,
        }
    }

    /// Flatten nested batches, dropping `None`s
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            cmd => vec![cmd],
        }
    }
}
