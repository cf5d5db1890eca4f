use crate::render::svg::{escape_xml, fmt_num};
use crate::render::text::format_value;
use crate::tree::arena::{DataTree, NodeId};
use crate::ui::input::PointerEvent;

/// Tooltip offset from the pointer position.
pub const OFFSET_X: f64 = 10.0;
pub const OFFSET_Y: f64 = 20.0;

/// Information to display in the tooltip when hovering over a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub name: String,
    pub category: String,
    pub value: String,
}

impl TooltipInfo {
    pub fn from_node(tree: &DataTree, node_id: NodeId) -> Self {
        let node = tree.get(node_id);
        Self {
            name: node.name.to_string(),
            category: node.category.as_deref().unwrap_or_default().to_string(),
            value: format_value(node.value),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category),
            format!("Value: {}", self.value),
        ]
    }

    pub fn html(&self) -> String {
        self.lines()
            .iter()
            .map(|line| escape_xml(line))
            .collect::<Vec<_>>()
            .join("<br> ")
    }
}

/// Tooltip overlay state, owned by whoever renders the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub info: Option<TooltipInfo>,
}

impl Tooltip {
    pub fn handle(&mut self, event: &PointerEvent, tree: &DataTree) {
        match *event {
            PointerEvent::Enter { node, x, y } | PointerEvent::Move { node, x, y } => {
                self.visible = true;
                self.left = x + OFFSET_X;
                self.top = y + OFFSET_Y;
                self.info = Some(TooltipInfo::from_node(tree, node));
            }
            PointerEvent::Leave { .. } => {
                self.visible = false;
            }
        }
    }

    /// The overlay element in its current state.
    pub fn to_html(&self) -> String {
        let visibility = if self.visible { "visible" } else { "hidden" };
        let (data_value, body) = match &self.info {
            Some(info) => (escape_xml(&info.value), info.html()),
            None => (String::new(), String::new()),
        };
        format!(
            "<div id=\"tooltip\" data-value=\"{data_value}\" style=\"position: absolute; visibility: {visibility}; left: {}px; top: {}px; background: grey; padding: 10px; color: white; border-radius: 5px; font-size: 0.8rem; font-family: Helvetica;\">{body}</div>",
            fmt_num(self.left),
            fmt_num(self.top),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::arena::DataNode;

    fn tree() -> (DataTree, NodeId) {
        let mut tree = DataTree::new("root");
        let leaf = tree.add_child(tree.root, DataNode::leaf("Pebble <2>", "Design", 1500.0));
        (tree, leaf)
    }

    #[test]
    fn follows_pointer_and_hides_on_leave() {
        let (tree, leaf) = tree();
        let mut tooltip = Tooltip::default();
        assert!(!tooltip.visible);

        tooltip.handle(&PointerEvent::Enter { node: leaf, x: 5.0, y: 5.0 }, &tree);
        assert!(tooltip.visible);
        assert_eq!((tooltip.left, tooltip.top), (15.0, 25.0));

        tooltip.handle(&PointerEvent::Move { node: leaf, x: 40.0, y: 8.0 }, &tree);
        assert_eq!((tooltip.left, tooltip.top), (50.0, 28.0));

        tooltip.handle(&PointerEvent::Leave { node: leaf }, &tree);
        assert!(!tooltip.visible);
        assert!(tooltip.to_html().contains("visibility: hidden"));
    }

    #[test]
    fn shows_name_category_and_value() {
        let (tree, leaf) = tree();
        let info = TooltipInfo::from_node(&tree, leaf);
        assert_eq!(
            info.html(),
            "Name: Pebble &lt;2&gt;<br> Category: Design<br> Value: 1500"
        );

        let mut tooltip = Tooltip::default();
        tooltip.handle(&PointerEvent::Enter { node: leaf, x: 0.0, y: 0.0 }, &tree);
        let html = tooltip.to_html();
        assert!(html.contains("data-value=\"1500\""));
        assert!(html.contains("left: 10px; top: 20px"));
    }
}
