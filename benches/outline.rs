//! Benchmarks for the outline hot paths: rendering a tree on every
//! notification and resolving the cursor on every cursor move.
//!
//! Run with: cargo bench outline

use outline_mirror::outline::{
    locate, render_outline, OutlineKind, OutlineNode, Position, Range, RenderOptions,
};
use outline_mirror::store::DocumentId;
use outline_mirror::surface::MemorySurface;
use outline_mirror::sync::ViewSynchronizer;
use outline_mirror::TreeStore;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Tree generation
// ============================================================================

/// `classes` classes, each with `members` methods holding a 4-deep widget chain.
/// Every method spans 6 lines.
fn widget_file(classes: usize, members: usize) -> OutlineNode {
    let mut line = 0;
    let mut top = Vec::with_capacity(classes);
    for c in 0..classes {
        let class_start = line;
        let mut methods = Vec::with_capacity(members);
        for m in 0..members {
            let start = line + 1;
            let mut widget = OutlineNode::new(
                "Text",
                OutlineKind::ConstructorInvocation,
                Range::lines(start + 4, start + 5),
            );
            for (depth, name) in ["Center", "Scaffold", "MaterialApp"].iter().enumerate() {
                widget = OutlineNode::new(
                    *name,
                    OutlineKind::ConstructorInvocation,
                    Range::lines(start + 3 - depth, start + 5),
                )
                .with_child(widget);
            }
            methods.push(
                OutlineNode::new(
                    format!("build{m}"),
                    OutlineKind::Method,
                    Range::lines(start, start + 6),
                )
                .with_child(widget),
            );
            line += 6;
        }
        line += 2;
        let mut class = OutlineNode::new(
            format!("Widget{c}"),
            OutlineKind::Class,
            Range::lines(class_start, line),
        );
        class.children = methods;
        top.push(class);
    }
    OutlineNode::root(top)
}

// ============================================================================
// Rendering
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn render_tree(bencher: divan::Bencher, classes: usize) {
    let tree = widget_file(classes, 5);
    let options = RenderOptions::default();
    bencher.bench_local(|| render_outline(divan::black_box(&tree), &options));
}

#[divan::bench(args = [10, 100, 1000])]
fn render_tree_line_numbers(bencher: divan::Bencher, classes: usize) {
    let tree = widget_file(classes, 5);
    let options = RenderOptions {
        line_numbers: true,
        fold_markers: true,
    };
    bencher.bench_local(|| render_outline(divan::black_box(&tree), &options));
}

// ============================================================================
// Cursor resolution
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn locate_deepest(bencher: divan::Bencher, classes: usize) {
    let tree = widget_file(classes, 5);
    // last widget of the last class
    let last_line = classes * (5 * 6 + 2) - 3;
    bencher.bench_local(|| locate(divan::black_box(&tree), Position::new(last_line, 0)));
}

#[divan::bench(args = [10, 100, 1000])]
fn locate_miss(bencher: divan::Bencher, classes: usize) {
    let tree = widget_file(classes, 5);
    let past_end = classes * (5 * 6 + 2) + 10;
    bencher.bench_local(|| locate(divan::black_box(&tree), Position::new(past_end, 0)));
}

// ============================================================================
// Synchronization
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn sync_unchanged(bencher: divan::Bencher, classes: usize) {
    let document = DocumentId::from("file:///bench.dart");
    let tree = widget_file(classes, 5);
    let rendered = render_outline(&tree, &RenderOptions::default());
    let mut store = TreeStore::new();
    store.put(&document, tree);
    store.set_rendered(&document, rendered);

    let mut sync = ViewSynchronizer::new("OutlineCurrent");
    sync.attach(MemorySurface::new());
    sync.synchronize(&mut store, &document, None, true);

    bencher.bench_local(|| sync.synchronize(&mut store, &document, None, false));
}

#[divan::bench(args = [10, 100, 1000])]
fn sync_new_version(bencher: divan::Bencher, classes: usize) {
    let document = DocumentId::from("file:///bench.dart");
    let tree = widget_file(classes, 5);
    let rendered = render_outline(&tree, &RenderOptions::default());
    let mut store = TreeStore::new();
    let mut sync = ViewSynchronizer::new("OutlineCurrent");
    sync.attach(MemorySurface::new());

    bencher.bench_local(|| {
        store.put(&document, tree.clone());
        store.set_rendered(&document, rendered.clone());
        sync.synchronize(&mut store, &document, None, false)
    });
}
