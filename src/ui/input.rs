use crate::layout::{Layout, LayoutRect};
use crate::tree::arena::{DataTree, NodeId};

/// Hit-test: find which layout rectangle contains the given point.
/// Returns the topmost (deepest) rectangle at that point.
pub fn hit_test(layout_rects: &[LayoutRect], x: f64, y: f64) -> Option<NodeId> {
    // Iterate in reverse since deeper nodes come later in pre-order
    layout_rects
        .iter()
        .rev()
        .find(|rect| rect.contains(x, y))
        .map(|rect| rect.node)
}

/// Like [`hit_test`] but only tiles count; the padding gaps hit nothing.
pub fn hit_test_leaf(layout: &Layout, tree: &DataTree, x: f64, y: f64) -> Option<NodeId> {
    hit_test(&layout.rects, x, y).filter(|&id| tree.get(id).is_leaf)
}

/// Pointer transitions over tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter { node: NodeId, x: f64, y: f64 },
    Move { node: NodeId, x: f64, y: f64 },
    Leave { node: NodeId },
}

/// Turns raw pointer positions into enter/move/leave events.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pub x: f64,
    pub y: f64,
    pub hover_node: Option<NodeId>,
}

impl PointerTracker {
    pub fn pointer_moved(
        &mut self,
        layout: &Layout,
        tree: &DataTree,
        x: f64,
        y: f64,
    ) -> Vec<PointerEvent> {
        self.x = x;
        self.y = y;
        let hit = hit_test_leaf(layout, tree, x, y);

        let mut events = Vec::with_capacity(2);
        match (self.hover_node, hit) {
            (Some(old), Some(new)) if old == new => {
                events.push(PointerEvent::Move { node: new, x, y });
            }
            (old, new) => {
                if let Some(node) = old {
                    events.push(PointerEvent::Leave { node });
                }
                if let Some(node) = new {
                    events.push(PointerEvent::Enter { node, x, y });
                }
            }
        }
        self.hover_node = hit;
        events
    }

    /// The pointer left the canvas entirely.
    pub fn pointer_left(&mut self) -> Option<PointerEvent> {
        self.hover_node.take().map(|node| PointerEvent::Leave { node })
    }
}
