pub mod squarify;

use std::collections::HashMap;

use crate::tree::arena::{DataTree, NodeId};
use self::squarify::{squarify, Bounds};

/// Target aspect ratio for squarified rows: (1 + sqrt 5) / 2.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub depth: u16,
}

impl LayoutRect {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open containment, so shared edges belong to one rect only.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// True when the two rects share a region of positive area.
    pub fn overlaps(&self, other: &LayoutRect) -> bool {
        const EPS: f64 = 1e-9;
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        w > EPS && h > EPS
    }
}

/// The full layout result (rects + fast lookup).
#[derive(Debug)]
pub struct Layout {
    /// One rectangle per node, in pre-order (root first)
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn rect_of(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }

    /// Leaf rectangles in pre-order; these are the drawn tiles.
    pub fn leaf_rects<'a>(&'a self, tree: &'a DataTree) -> impl Iterator<Item = &'a LayoutRect> + 'a {
        self.rects.iter().filter(move |r| tree.get(r.node).is_leaf)
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Gap between adjacent sibling cells
    pub padding_inner: f64,
    /// Target aspect ratio for squarified rows
    pub ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_inner: 1.0,
            ratio: GOLDEN_RATIO,
        }
    }
}

/// Lay the whole tree out over a `width` x `height` canvas.
///
/// Each node's box is inset by half the inner padding (the root by
/// nothing); its children are tiled into the box grown back by the same
/// half padding, so siblings end up exactly `padding_inner` apart while
/// the outermost cells stay flush with the canvas.
pub fn compute_layout(tree: &DataTree, width: f64, height: f64, config: &LayoutConfig) -> Layout {
    let half_pad = config.padding_inner / 2.0;
    let mut boxes = vec![Bounds::default(); tree.len()];
    boxes[tree.root.index()] = Bounds::new(0.0, 0.0, width.max(0.0), height.max(0.0));

    let order = tree.preorder();
    let mut rects = Vec::with_capacity(order.len());
    let mut node_to_rect = HashMap::with_capacity(order.len());

    for id in order {
        let node = tree.get(id);
        let pad = if id == tree.root { 0.0 } else { half_pad };
        let own = boxes[id.index()].inset(pad);

        node_to_rect.insert(id, rects.len());
        rects.push(LayoutRect {
            node: id,
            x0: own.x0,
            y0: own.y0,
            x1: own.x1,
            y1: own.y1,
            depth: node.depth,
        });

        if node.first_child.is_none() {
            continue;
        }

        let children: Vec<NodeId> = tree.children(id).collect();
        let values: Vec<f64> = children.iter().map(|&c| tree.get(c).value).collect();
        let tiles = squarify(&values, config.ratio, own.inset(-half_pad));
        for (child, tile) in children.iter().zip(tiles) {
            boxes[child.index()] = tile;
        }
    }

    tracing::debug!(
        "Laid out {} nodes over {:.0}x{:.0} (padding {})",
        rects.len(),
        width,
        height,
        config.padding_inner
    );

    Layout {
        rects,
        node_to_rect,
        width,
        height,
    }
}
