pub mod colors;
pub mod legend;
pub mod page;
pub mod svg;
pub mod text;
pub mod treemap;

/// Canvas sizes and typography for the rendered views.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub legend_width: f64,
    pub legend_height: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 970.0,
            height: 600.0,
            legend_width: 600.0,
            legend_height: 250.0,
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
        }
    }
}
