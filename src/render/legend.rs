use std::fmt::Write;

use super::colors::{AppColor, ColorScale};
use super::svg::{escape_xml, fmt_num};
use super::RenderConfig;

pub const SWATCH_SIZE: f64 = 20.0;
/// Vertical distance between consecutive entries.
pub const ROW_STEP: f64 = SWATCH_SIZE + 5.0;
/// Label starts this far right of its swatch.
pub const LABEL_OFFSET: f64 = SWATCH_SIZE * 1.2;

/// Column x positions; entries 0-6, 7-13 and 14+ go to columns 0, 1 and 2.
pub const COLUMN_X: [f64; 3] = [100.0, 300.0, 450.0];
/// Added to `index * ROW_STEP` so each column starts near the top.
pub const COLUMN_Y_OFFSET: [f64; 3] = [50.0, -120.0, -300.0];

/// One positioned legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: AppColor,
    /// Swatch top-left corner
    pub x: f64,
    pub y: f64,
}

impl LegendEntry {
    pub fn label_x(&self) -> f64 {
        self.x + LABEL_OFFSET
    }

    pub fn label_y(&self) -> f64 {
        self.y + SWATCH_SIZE / 2.0
    }
}

pub fn legend_column(index: usize) -> usize {
    match index {
        0..=6 => 0,
        7..=13 => 1,
        _ => 2,
    }
}

/// Swatch position for the entry at `index`.
pub fn swatch_position(index: usize) -> (f64, f64) {
    let column = legend_column(index);
    (
        COLUMN_X[column],
        index as f64 * ROW_STEP + COLUMN_Y_OFFSET[column],
    )
}

/// Position the top-level categories, coloring them from the shared scale.
pub fn legend_entries(categories: &[&str], colors: &mut ColorScale) -> Vec<LegendEntry> {
    categories
        .iter()
        .enumerate()
        .map(|(index, &name)| {
            let (x, y) = swatch_position(index);
            LegendEntry {
                name: name.to_string(),
                color: colors.color(name),
                x,
                y,
            }
        })
        .collect()
}

/// Render the legend as an `<svg id="legend">` element.
pub fn render_legend(entries: &[LegendEntry], config: &RenderConfig) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg id=\"legend\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}\">",
        w = fmt_num(config.legend_width),
        h = fmt_num(config.legend_height),
        font = escape_xml(&config.font_family),
    );
    for entry in entries {
        let fill = entry.color.to_css();
        let _ = write!(
            svg,
            "<rect class=\"legend-item\" x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" fill=\"{fill}\"/>",
            fmt_num(entry.x),
            fmt_num(entry.y),
            size = fmt_num(SWATCH_SIZE),
        );
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" fill=\"{fill}\" dominant-baseline=\"middle\">{}</text>",
            fmt_num(entry.label_x()),
            fmt_num(entry.label_y()),
            escape_xml(&entry.name)
        );
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_break_points() {
        assert_eq!(swatch_position(0), (100.0, 50.0));
        assert_eq!(swatch_position(6), (100.0, 200.0));
        assert_eq!(swatch_position(7), (300.0, 55.0));
        assert_eq!(swatch_position(13), (300.0, 205.0));
        assert_eq!(swatch_position(14), (450.0, 50.0));
        assert_eq!(swatch_position(18), (450.0, 150.0));
    }

    #[test]
    fn labels_sit_beside_swatches() {
        let mut colors = ColorScale::paired();
        let entries = legend_entries(&["Games", "Tech"], &mut colors);
        assert_eq!(entries[1].label_x(), 124.0);
        assert_eq!(entries[1].label_y(), 85.0);
        assert_eq!(entries[0].color, colors.get("Games").unwrap());
    }

    #[test]
    fn renders_swatch_and_label_per_category() {
        let mut colors = ColorScale::paired();
        let names: Vec<String> = (0..15).map(|i| format!("Category {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let entries = legend_entries(&refs, &mut colors);
        let svg = render_legend(&entries, &RenderConfig::default());

        assert!(svg.starts_with("<svg id=\"legend\""));
        assert_eq!(svg.matches("class=\"legend-item\"").count(), 15);
        assert_eq!(svg.matches("<text").count(), 15);
        assert!(svg.contains("x=\"450\" y=\"50\""));
    }
}
