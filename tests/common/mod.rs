//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use outline_mirror::config::OutlineConfig;
use outline_mirror::messages::Msg;
use outline_mirror::outline::{OutlineKind, OutlineNode, Position, Range};
use outline_mirror::protocol::{HostEvent, PublishOutlineParams};
use outline_mirror::runtime::App;
use outline_mirror::store::DocumentId;
use outline_mirror::surface::{MemoryStatus, MemorySurfaceFactory};

pub const SAMPLE_OUTLINE: &str = include_str!("../../samples/outline.json");
pub const SAMPLE_SESSION: &str = include_str!("../../samples/session.jsonl");
pub const SAMPLE_URI: &str = "file:///project/lib/main.dart";

pub type TestApp = App<MemorySurfaceFactory, MemoryStatus>;

/// Runtime backed by in-memory surface and status line
pub fn test_app(config: OutlineConfig) -> TestApp {
    App::new(config, MemorySurfaceFactory::default(), MemoryStatus::default())
}

pub fn sample_doc() -> DocumentId {
    DocumentId::from(SAMPLE_URI)
}

/// The Flutter sample outline from `samples/outline.json`
pub fn sample_tree() -> OutlineNode {
    let params = PublishOutlineParams::from_json(SAMPLE_OUTLINE).unwrap();
    OutlineNode::from(params.outline)
}

/// Host events from `samples/session.jsonl`, in order
pub fn sample_events() -> Vec<Msg> {
    SAMPLE_SESSION
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| Msg::from(HostEvent::from_json_line(l).unwrap()))
        .collect()
}

/// Node spanning whole lines `start..end`
pub fn node(name: &str, kind: OutlineKind, start: usize, end: usize) -> OutlineNode {
    OutlineNode::new(name, kind, Range::lines(start, end))
}

/// Root with `count` classes, each spanning one line
pub fn flat_tree(count: usize) -> OutlineNode {
    OutlineNode::root(
        (0..count)
            .map(|i| node(&format!("C{i}"), OutlineKind::Class, i, i + 1))
            .collect(),
    )
}

/// Cursor message in 1-based host coordinates
pub fn cursor(document: &DocumentId, line: usize, col: usize) -> Msg {
    Msg::CursorMoved {
        document: document.clone(),
        line,
        col,
    }
}

pub fn publish(document: &DocumentId, outline: OutlineNode) -> Msg {
    Msg::OutlinePublished {
        document: document.clone(),
        outline,
    }
}

pub fn pos(line: usize, col: usize) -> Position {
    Position::new(line, col)
}
