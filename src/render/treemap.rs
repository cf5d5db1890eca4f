use std::fmt::Write;

use rayon::prelude::*;

use super::colors::{AppColor, ColorScale};
use super::svg::{escape_xml, fmt_num};
use super::text::{format_grouped, format_value, split_words};
use super::RenderConfig;
use crate::layout::{Layout, LayoutRect};
use crate::tree::arena::DataTree;

/// Label placement inside a tile.
pub const LABEL_X: f64 = 4.0;
pub const LABEL_TOP: f64 = 13.0;
pub const LINE_HEIGHT: f64 = 10.0;

/// Render the treemap as an `<svg id="map">` element, one cell per leaf.
pub fn render_treemap(
    tree: &DataTree,
    layout: &Layout,
    colors: &mut ColorScale,
    config: &RenderConfig,
) -> String {
    let leaves: Vec<&LayoutRect> = layout.leaf_rects(tree).collect();

    // Colors are handed out in first-seen order, so assign them before going parallel
    colors.seed(
        leaves
            .iter()
            .filter_map(|r| tree.get(r.node).category.as_deref()),
    );
    let colors: &ColorScale = colors;

    let cells: Vec<String> = leaves
        .par_iter()
        .enumerate()
        .map(|(index, rect)| render_cell(tree, rect, index, colors))
        .collect();

    tracing::debug!("Rendered {} treemap cells", cells.len());

    let mut svg = String::with_capacity(cells.iter().map(String::len).sum::<usize>() + 256);
    let _ = write!(
        svg,
        "<svg id=\"map\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}\" font-size=\"{size}\">",
        w = fmt_num(config.width),
        h = fmt_num(config.height),
        font = escape_xml(&config.font_family),
        size = fmt_num(config.font_size),
    );
    for cell in &cells {
        svg.push_str(cell);
    }
    svg.push_str("</svg>");
    svg
}

fn render_cell(tree: &DataTree, rect: &LayoutRect, index: usize, colors: &ColorScale) -> String {
    let node = tree.get(rect.node);
    let category = node.category.as_deref().unwrap_or("");
    let fill = colors.get(category).unwrap_or(AppColor::GREY);
    let (w, h) = (fmt_num(rect.width()), fmt_num(rect.height()));
    let id = escape_xml(&node.id);
    let name = escape_xml(&node.name);
    let category = escape_xml(category);
    let value = format_value(node.value);

    let mut cell = String::new();
    let _ = write!(
        cell,
        "<g class=\"cell\" transform=\"translate({},{})\">",
        fmt_num(rect.x0),
        fmt_num(rect.y0)
    );
    let _ = write!(
        cell,
        "<rect id=\"{id}\" class=\"tile\" width=\"{w}\" height=\"{h}\" fill=\"{}\" data-name=\"{name}\" data-category=\"{category}\" data-value=\"{value}\"/>",
        fill.to_css()
    );
    // Clip in the cell's local space so labels never spill into neighbours
    let _ = write!(
        cell,
        "<clipPath id=\"clip-{index}\"><rect width=\"{w}\" height=\"{h}\"/></clipPath>"
    );
    let _ = write!(cell, "<text clip-path=\"url(#clip-{index})\">");
    for (line, word) in split_words(&node.name).into_iter().enumerate() {
        let _ = write!(
            cell,
            "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
            fmt_num(LABEL_X),
            fmt_num(LABEL_TOP + line as f64 * LINE_HEIGHT),
            escape_xml(word)
        );
    }
    cell.push_str("</text>");
    let _ = write!(
        cell,
        "<title>{id}\n{}</title></g>",
        format_grouped(node.value)
    );
    cell
}
