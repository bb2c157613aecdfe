//! Window report for the `treescroll` binary.
//!
//! Walks the root window and, for every node that lays out its children,
//! the child window resolved with the same scroll state. This mirrors how a
//! renderer nests one windowed list per expanded node.

use crate::model::{NodeId, Pixels, TreeState};
use crate::virtual_scroll::{ScrollSurface, VirtualScroll};
use serde::Serialize;
use std::io::{self, Write};

/// One rendered node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Node name.
    pub name: String,
    /// Nesting level; roots are 0.
    pub depth: usize,
    /// Offset from the top of the content.
    pub position: Pixels,
    /// Span of the node and its laid-out descendants.
    pub height: Pixels,
    /// Whether an expand toggle should be drawn.
    pub has_children: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    /// False when windowing is off and every node is listed.
    pub enabled: bool,
    /// Rendered rows in display order.
    pub nodes: Vec<ReportRow>,
    /// Height of the full virtual content.
    pub total_height: Pixels,
    /// Offset of the first rendered row.
    pub translate_y: Pixels,
    /// Scroll offset in blocks.
    pub offset_blocks: f64,
    /// Scroll offset in pixels, after quantization.
    pub scroll_offset: Pixels,
}

impl WindowReport {
    /// Snapshot the current window of `scroll` over `tree`.
    pub fn capture<T, S>(tree: &T, scroll: &VirtualScroll<S>) -> Self
    where
        T: TreeState + ?Sized,
        S: ScrollSurface,
    {
        let mut nodes = Vec::new();
        collect_rows(tree, scroll, scroll.viewport_nodes(), 0, &mut nodes);

        Self {
            enabled: scroll.is_enabled(tree),
            nodes,
            total_height: scroll.total_height(tree),
            translate_y: scroll.translate_y(tree),
            offset_blocks: scroll.scroll_state().offset_blocks(),
            scroll_offset: scroll.scroll_state().offset_pixels(),
        }
    }

    /// Plain text: `name position height` per row, indented by depth,
    /// followed by the totals.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.nodes {
            writeln!(
                out,
                "{:indent$}{} {} {}",
                "",
                row.name,
                row.position,
                row.height,
                indent = row.depth * 2
            )?;
        }
        writeln!(out, "total_height {}", self.total_height)?;
        writeln!(out, "translate_y {}", self.translate_y)
    }

    /// Pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

fn collect_rows<T, S>(
    tree: &T,
    scroll: &VirtualScroll<S>,
    window: &[NodeId],
    depth: usize,
    rows: &mut Vec<ReportRow>,
) where
    T: TreeState + ?Sized,
    S: ScrollSurface,
{
    for &id in window {
        let Some(node) = tree.node(id) else {
            continue;
        };
        rows.push(ReportRow {
            name: node.name().to_string(),
            depth,
            position: node.position(),
            height: node.height(),
            has_children: node.has_children(),
        });
        if node.lays_out_children() {
            let children = scroll.window_for(tree, node.visible_children());
            collect_rows(tree, scroll, children.nodes(), depth + 1, rows);
        }
    }
}
