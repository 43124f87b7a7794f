//! Wire types for inbound notifications
//!
//! The outline notification shape is fixed by the analysis server
//! (`dart/textDocument/publishOutline`). Host events are newline-delimited
//! JSON objects tagged by `type`, as fed to the `replay` command.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::messages::Msg;
use crate::outline::{ElementDetail, OutlineKind, OutlineNode, Position, Range};
use crate::store::DocumentId;

/// Method name of the outline notification
pub const PUBLISH_OUTLINE_METHOD: &str = "dart/textDocument/publishOutline";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePosition {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRange {
    pub start: WirePosition,
    pub end: WirePosition,
}

impl From<WireRange> for Range {
    fn from(range: WireRange) -> Self {
        Range::new(
            Position::new(range.start.line, range.start.character),
            Position::new(range.end.line, range.end.character),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireElement {
    pub name: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<WireRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOutline {
    pub element: WireElement,
    pub range: WireRange,
    pub code_range: WireRange,
    #[serde(default)]
    pub children: Vec<WireOutline>,
    #[serde(default)]
    pub folded: bool,
}

impl From<WireOutline> for OutlineNode {
    fn from(outline: WireOutline) -> Self {
        let WireOutline {
            element,
            range,
            code_range,
            children,
            folded,
        } = outline;
        OutlineNode {
            kind: OutlineKind::from_wire(&element.kind),
            source_range: element.range.unwrap_or(range).into(),
            code_range: code_range.into(),
            children: children.into_iter().map(OutlineNode::from).collect(),
            folded,
            detail: ElementDetail {
                parameters: element.parameters,
                type_parameters: element.type_parameters,
                return_type: element.return_type,
            },
            name: element.name,
        }
    }
}

/// Params of the outline notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutlineParams {
    pub uri: String,
    pub outline: WireOutline,
}

impl PublishOutlineParams {
    /// Parse a JSON notification body
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid outline notification")
    }
}

/// One event from the editor host or the analysis server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    DocumentOpened { uri: String },
    DocumentClosed { uri: String },
    PublishOutline(PublishOutlineParams),
    /// Cursor in the host's own coordinate origin
    CursorMoved { uri: String, line: usize, col: usize },
    OpenView,
    CloseView,
    SetBreadcrumb { enabled: bool },
}

impl HostEvent {
    /// Parse one line of newline-delimited JSON
    pub fn from_json_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim())
            .with_context(|| format!("invalid host event: {}", truncate(line, 80)))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push_str("...");
    short
}

impl From<HostEvent> for Msg {
    fn from(event: HostEvent) -> Self {
        match event {
            HostEvent::DocumentOpened { uri } => Msg::DocumentOpened(DocumentId::from(uri)),
            HostEvent::DocumentClosed { uri } => Msg::DocumentClosed(DocumentId::from(uri)),
            HostEvent::PublishOutline(params) => Msg::OutlinePublished {
                document: DocumentId::from(params.uri),
                outline: OutlineNode::from(params.outline),
            },
            HostEvent::CursorMoved { uri, line, col } => Msg::CursorMoved {
                document: DocumentId::from(uri),
                line,
                col,
            },
            HostEvent::OpenView => Msg::OpenView,
            HostEvent::CloseView => Msg::ViewClosed,
            HostEvent::SetBreadcrumb { enabled } => Msg::SetBreadcrumbEnabled(enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTIFICATION: &str = r#"{
        "uri": "file:///lib/main.dart",
        "outline": {
            "element": { "name": "<unit>", "kind": "COMPILATION_UNIT" },
            "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 20, "character": 0 } },
            "codeRange": { "start": { "line": 0, "character": 0 }, "end": { "line": 20, "character": 0 } },
            "children": [
                {
                    "element": {
                        "name": "MyApp",
                        "kind": "CLASS",
                        "range": { "start": { "line": 2, "character": 6 }, "end": { "line": 2, "character": 11 } },
                        "typeParameters": "<T>"
                    },
                    "range": { "start": { "line": 2, "character": 0 }, "end": { "line": 9, "character": 1 } },
                    "codeRange": { "start": { "line": 2, "character": 0 }, "end": { "line": 9, "character": 1 } },
                    "children": [
                        {
                            "element": { "name": "build", "kind": "METHOD", "parameters": "(BuildContext context)", "returnType": "Widget" },
                            "range": { "start": { "line": 4, "character": 2 }, "end": { "line": 8, "character": 3 } },
                            "codeRange": { "start": { "line": 3, "character": 2 }, "end": { "line": 8, "character": 3 } },
                            "folded": true
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_notification() {
        let params = PublishOutlineParams::from_json(NOTIFICATION).unwrap();
        assert_eq!(params.uri, "file:///lib/main.dart");

        let root = OutlineNode::from(params.outline);
        assert_eq!(root.kind, OutlineKind::Unknown);
        assert_eq!(root.children.len(), 1);

        let class = &root.children[0];
        assert_eq!(class.name, "MyApp");
        assert_eq!(class.kind, OutlineKind::Class);
        assert_eq!(class.source_range.start, Position::new(2, 6));
        assert_eq!(class.code_range.end, Position::new(9, 1));
        assert_eq!(class.detail.type_parameters.as_deref(), Some("<T>"));

        let method = &class.children[0];
        assert_eq!(method.kind, OutlineKind::Method);
        assert!(method.folded);
        assert!(method.children.is_empty());
        // no element range: falls back to the outline range
        assert_eq!(method.source_range.start, Position::new(4, 2));
        assert_eq!(method.code_range.start, Position::new(3, 2));
        assert_eq!(method.detail.return_type.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_parse_host_events() {
        let event = HostEvent::from_json_line(r#"{"type":"cursorMoved","uri":"file:///a","line":3,"col":1}"#)
            .unwrap();
        assert_eq!(
            event,
            HostEvent::CursorMoved {
                uri: "file:///a".to_string(),
                line: 3,
                col: 1
            }
        );
        assert_eq!(
            HostEvent::from_json_line(r#"{"type":"openView"}"#).unwrap(),
            HostEvent::OpenView
        );

        let publish = format!(r#"{{"type":"publishOutline",{}"#, &NOTIFICATION.trim()[1..]);
        let event = HostEvent::from_json_line(&publish.replace('\n', " ")).unwrap();
        assert!(matches!(event, HostEvent::PublishOutline(_)));
    }

    #[test]
    fn test_bad_event_reports_context() {
        let err = HostEvent::from_json_line(r#"{"type":"bogus"}"#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid host event"));
    }

    #[test]
    fn test_event_into_msg() {
        let msg = Msg::from(HostEvent::DocumentOpened {
            uri: "file:///a".to_string(),
        });
        assert_eq!(msg, Msg::DocumentOpened(DocumentId::from("file:///a")));
        assert_eq!(Msg::from(HostEvent::CloseView), Msg::ViewClosed);
    }
}
