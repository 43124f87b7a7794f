//! Outline notification handlers

use crate::commands::Cmd;
use crate::model::OutlineModel;
use crate::outline::{locate, render_outline, OutlineNode};
use crate::store::DocumentId;

/// A new outline arrived from the analysis server
pub fn on_outline(model: &mut OutlineModel, document: DocumentId, tree: OutlineNode) -> Option<Cmd> {
    if !model.is_open(&document) {
        tracing::debug!("on_outline: dropping outline for untracked {}", document);
        return None;
    }

    let rendered = render_outline(&tree, &model.config.render_options());
    let version = model.store.put(&document, tree);
    model.store.set_rendered(&document, rendered);
    tracing::debug!("on_outline: {} rendered at version {}", document, version);

    let breadcrumb = if model.focused_document.as_ref() == Some(&document) {
        relocate_breadcrumb(model)
    } else {
        None
    };

    match breadcrumb {
        Some(show) => Some(Cmd::Batch(vec![show, Cmd::sync(document)])),
        None => Some(Cmd::sync(document)),
    }
}

/// Re-resolve the current node; a status update if the breadcrumb changed
fn relocate_breadcrumb(model: &mut OutlineModel) -> Option<Cmd> {
    let previous = model.breadcrumb.clone();
    let located = model.relocate_current()?;
    (located.breadcrumb != previous).then(|| Cmd::ShowBreadcrumb(located.breadcrumb))
}

/// The editor cursor moved (position in the host's origin)
pub fn on_cursor_moved(
    model: &mut OutlineModel,
    document: DocumentId,
    line: usize,
    col: usize,
) -> Option<Cmd> {
    let cursor = model.config.cursor_origin.normalize(line, col);
    if model.focused_document.as_ref() != Some(&document) {
        model.current_node = None;
    }
    model.focused_document = Some(document.clone());
    model.cursor = Some(cursor);

    let tree = model.store.get(&document)?;

    if !model.config.show_breadcrumb {
        model.current_node = None;
        return Some(Cmd::sync(document));
    }

    let located = locate(tree, cursor);
    tracing::trace!(
        "on_cursor_moved: {}:{}:{} -> {:?}",
        document,
        cursor.line,
        cursor.col,
        located.path
    );
    model.current_node = Some(located.path);
    model.breadcrumb = located.breadcrumb.clone();

    Some(Cmd::Batch(vec![
        Cmd::ShowBreadcrumb(located.breadcrumb),
        Cmd::sync(document),
    ]))
}

/// The user asked for the outline view
pub fn on_open_view(model: &mut OutlineModel) -> Option<Cmd> {
    model.view_open = true;
    model.store.invalidate_rendered();

    let mut cmds = vec![
        Cmd::OpenSurface {
            name: model.config.view_name.clone(),
            width: model.config.view_width,
        },
        Cmd::SetupSurface,
    ];
    if let Some(document) = model.focused_document.clone() {
        cmds.push(Cmd::force_sync(document));
    }
    Some(Cmd::Batch(cmds))
}

pub fn on_view_closed(model: &mut OutlineModel) -> Option<Cmd> {
    if !model.view_open {
        return None;
    }
    model.view_open = false;
    model.store.invalidate_rendered();
    Some(Cmd::DetachSurface)
}

pub fn on_document_closed(model: &mut OutlineModel, document: DocumentId) -> Option<Cmd> {
    model.close_document(&document);
    if model.config.evict_closed_documents {
        model.store.remove(&document);
        tracing::debug!("on_document_closed: evicted {}", document);
    }
    if model.focused_document.as_ref() == Some(&document) {
        model.focused_document = None;
        model.cursor = None;
        model.current_node = None;
    }
    None
}

pub fn on_set_breadcrumb(model: &mut OutlineModel, enabled: bool) -> Option<Cmd> {
    model.config.show_breadcrumb = enabled;
    if enabled {
        let mut cmds: Vec<Cmd> = relocate_breadcrumb(model).into_iter().collect();
        if let Some(document) = model.focused_document.clone() {
            cmds.push(Cmd::sync(document));
        }
        return (!cmds.is_empty()).then_some(Cmd::Batch(cmds));
    }
    model.current_node = None;
    model.breadcrumb.clear();
    let clear = Cmd::ShowBreadcrumb(String::new());
    match model.focused_document.clone() {
        Some(document) => Some(Cmd::Batch(vec![clear, Cmd::sync(document)])),
        None => Some(clear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlineConfig;
    use crate::messages::Msg;
    use crate::outline::{NodePath, OutlineKind, Range};
    use crate::update::update;

    fn tree() -> OutlineNode {
        OutlineNode::root(vec![OutlineNode::new("A", OutlineKind::Class, Range::lines(0, 10))
            .with_child(OutlineNode::new(
                "A1",
                OutlineKind::Method,
                Range::lines(2, 4),
            ))])
    }

    fn doc() -> DocumentId {
        DocumentId::from("file:///lib/main.dart")
    }

    fn open_model() -> OutlineModel {
        let mut model = OutlineModel::new(OutlineConfig::default());
        update(&mut model, Msg::DocumentOpened(doc()));
        model
    }

    #[test]
    fn test_outline_for_untracked_document_is_dropped() {
        let mut model = OutlineModel::default();
        let cmd = on_outline(&mut model, doc(), tree());
        assert!(cmd.is_none());
        assert!(model.store.get(&doc()).is_none());
    }

    #[test]
    fn test_outline_stores_renders_and_syncs() {
        let mut model = open_model();
        let cmd = on_outline(&mut model, doc(), tree());
        assert_eq!(cmd, Some(Cmd::sync(doc())));
        assert_eq!(model.store.version(&doc()), Some(0));
        assert_eq!(model.rendered(&doc()).map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_cursor_move_resolves_breadcrumb() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());

        // host coordinates are 1-based: line 4 is 0-based line 3
        let cmd = on_cursor_moved(&mut model, doc(), 4, 1);
        assert_eq!(
            cmd,
            Some(Cmd::Batch(vec![
                Cmd::ShowBreadcrumb(" > A > A1".to_string()),
                Cmd::sync(doc()),
            ]))
        );
        assert_eq!(model.current_node, Some(NodePath(vec![0, 0])));
        assert_eq!(model.current_node_in(&doc()), Some(&NodePath(vec![0, 0])));
    }

    #[test]
    fn test_cursor_move_without_tree_does_nothing() {
        let mut model = open_model();
        assert!(on_cursor_moved(&mut model, doc(), 1, 1).is_none());
        assert_eq!(model.focused_document, Some(doc()));
    }

    #[test]
    fn test_breadcrumb_disabled_still_syncs() {
        let mut model = open_model();
        model.config.show_breadcrumb = false;
        on_outline(&mut model, doc(), tree());

        let cmd = on_cursor_moved(&mut model, doc(), 4, 1);
        assert_eq!(cmd, Some(Cmd::sync(doc())));
        assert!(model.current_node.is_none());
        assert!(model.breadcrumb.is_empty());
    }

    #[test]
    fn test_new_outline_relocates_current_node() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        on_cursor_moved(&mut model, doc(), 10, 1);
        assert_eq!(model.current_node, Some(NodePath(vec![0])));

        let moved = OutlineNode::root(vec![
            OutlineNode::new("Z", OutlineKind::Class, Range::lines(0, 5)),
            OutlineNode::new("A", OutlineKind::Class, Range::lines(5, 12)),
        ]);
        on_outline(&mut model, doc(), moved);
        assert_eq!(model.current_node, Some(NodePath(vec![1])));
    }

    #[test]
    fn test_open_view_forces_sync_of_focused_document() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        model.store.mark_rendered(&doc(), Some(0));
        on_cursor_moved(&mut model, doc(), 1, 1);

        let cmds = on_open_view(&mut model).unwrap().into_vec();
        assert_eq!(
            cmds,
            vec![
                Cmd::OpenSurface {
                    name: "__flutter_widget_tree".to_string(),
                    width: 30,
                },
                Cmd::SetupSurface,
                Cmd::force_sync(doc()),
            ]
        );
        assert!(model.view_open);
        assert_eq!(model.store.rendered_version(&doc()), None);
    }

    #[test]
    fn test_view_closed_detaches_once() {
        let mut model = open_model();
        on_open_view(&mut model);
        assert_eq!(on_view_closed(&mut model), Some(Cmd::DetachSurface));
        assert!(on_view_closed(&mut model).is_none());
    }

    #[test]
    fn test_document_closed_keeps_outline_by_default() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        on_document_closed(&mut model, doc());
        assert!(!model.is_open(&doc()));
        assert!(model.store.get(&doc()).is_some());

        // no longer tracked: further outlines are dropped
        assert!(on_outline(&mut model, doc(), tree()).is_none());
        assert_eq!(model.store.version(&doc()), Some(0));
    }

    #[test]
    fn test_document_closed_evicts_when_configured() {
        let mut model = open_model();
        model.config.evict_closed_documents = true;
        on_outline(&mut model, doc(), tree());
        on_cursor_moved(&mut model, doc(), 3, 1);
        on_document_closed(&mut model, doc());
        assert!(model.store.get(&doc()).is_none());
        assert!(model.focused_document.is_none());
        assert!(model.current_node.is_none());
    }

    #[test]
    fn test_toggle_breadcrumb() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        on_cursor_moved(&mut model, doc(), 4, 1);

        assert_eq!(
            on_set_breadcrumb(&mut model, false),
            Some(Cmd::Batch(vec![
                Cmd::ShowBreadcrumb(String::new()),
                Cmd::sync(doc()),
            ]))
        );
        assert!(model.current_node.is_none());

        assert_eq!(
            on_set_breadcrumb(&mut model, true),
            Some(Cmd::Batch(vec![
                Cmd::ShowBreadcrumb(" > A > A1".to_string()),
                Cmd::sync(doc()),
            ]))
        );
        assert_eq!(model.current_node, Some(NodePath(vec![0, 0])));
        assert_eq!(model.breadcrumb, " > A > A1");
    }

    #[test]
    fn test_enable_breadcrumb_without_focus_does_nothing() {
        let mut model = open_model();
        model.config.show_breadcrumb = false;
        assert!(on_set_breadcrumb(&mut model, true).is_none());
    }

    #[test]
    fn test_new_outline_refreshes_stale_breadcrumb() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        on_cursor_moved(&mut model, doc(), 4, 1);
        assert_eq!(model.breadcrumb, " > A > A1");

        // A1 is gone; the cursor now sits directly in A
        let flattened = OutlineNode::root(vec![OutlineNode::new(
            "A",
            OutlineKind::Class,
            Range::lines(0, 10),
        )]);
        let cmd = on_outline(&mut model, doc(), flattened);
        assert_eq!(
            cmd,
            Some(Cmd::Batch(vec![
                Cmd::ShowBreadcrumb(" > A".to_string()),
                Cmd::sync(doc()),
            ]))
        );
        assert_eq!(model.current_node, Some(NodePath(vec![0])));
        assert_eq!(model.breadcrumb, " > A");
    }

    #[test]
    fn test_new_outline_with_same_breadcrumb_only_syncs() {
        let mut model = open_model();
        on_outline(&mut model, doc(), tree());
        on_cursor_moved(&mut model, doc(), 4, 1);
        assert_eq!(on_outline(&mut model, doc(), tree()), Some(Cmd::sync(doc())));
    }
}
