//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. They never touch
//! the display surface; they return [`Cmd`]s the runtime carries out.

mod outline;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::OutlineModel;

pub use outline::{on_cursor_moved, on_open_view, on_outline};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::DocumentOpened(document) => {
            model.open_document(document);
            None
        }
        Msg::DocumentClosed(document) => outline::on_document_closed(model, document),
        Msg::OutlinePublished { document, outline } => on_outline(model, document, outline),
        Msg::CursorMoved {
            document,
            line,
            col,
        } => on_cursor_moved(model, document, line, col),
        Msg::OpenView => on_open_view(model),
        Msg::ViewClosed => outline::on_view_closed(model),
        Msg::SetBreadcrumbEnabled(enabled) => outline::on_set_breadcrumb(model, enabled),
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    use tracing::{span, Level};

    let msg_name = msg_type_name(&msg);
    let span = span!(Level::DEBUG, "update", msg = %msg_name);
    let _guard = span.enter();

    let cmd = update_inner(model, msg);
    tracing::trace!(?cmd, "update produced");
    cmd
}

#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::DocumentOpened(_) => "DocumentOpened",
        Msg::DocumentClosed(_) => "DocumentClosed",
        Msg::OutlinePublished { .. } => "OutlinePublished",
        Msg::CursorMoved { .. } => "CursorMoved",
        Msg::OpenView => "OpenView",
        Msg::ViewClosed => "ViewClosed",
        Msg::SetBreadcrumbEnabled(_) => "SetBreadcrumbEnabled",
    }
}
