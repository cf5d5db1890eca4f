use crate::error::{Error, MalformedInputError};
use crate::layout::{self, Layout, LayoutConfig};
use crate::render::colors::ColorScale;
use crate::render::legend::{legend_entries, render_legend};
use crate::render::page::{render_error_page, render_page};
use crate::render::treemap::render_treemap;
use crate::render::RenderConfig;
use crate::source::{DataSource, Dataset, Fetcher, RawNode};
use crate::tree::{self, arena::DataTree};
use crate::ui::tooltip::Tooltip;

/// Application state machine phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppPhase {
    /// Document not fetched yet
    Loading,
    /// Tree built and laid out
    Ready,
    /// Fetch or parse failed; the message is shown instead of the views
    Failed(String),
}

/// Top-level application state.
pub struct App {
    pub phase: AppPhase,
    pub dataset: Dataset,
    pub source: DataSource,

    // Data
    pub tree: Option<DataTree>,
    pub layout: Option<Layout>,
    pub layout_config: LayoutConfig,
    pub render_config: RenderConfig,

    // Shared between the treemap and the legend
    pub colors: ColorScale,
    pub tooltip: Tooltip,
}

impl App {
    pub fn new(
        dataset: Dataset,
        source: DataSource,
        layout_config: LayoutConfig,
        render_config: RenderConfig,
    ) -> Self {
        Self {
            phase: AppPhase::Loading,
            dataset,
            source,
            tree: None,
            layout: None,
            layout_config,
            render_config,
            colors: ColorScale::paired(),
            tooltip: Tooltip::default(),
        }
    }

    /// Fetch the document once and feed both views from it.
    pub async fn load(&mut self, fetcher: &Fetcher) -> Result<(), Error> {
        tracing::info!("Loading '{}' from {}", self.dataset.key, self.source);
        let result = match fetcher.fetch(&self.source).await {
            Ok(doc) => self.ingest(&doc).map_err(Error::from),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            self.fail(err);
        }
        result
    }

    /// Build, lay out and color the tree from an already fetched document.
    pub fn ingest(&mut self, doc: &RawNode) -> Result<(), MalformedInputError> {
        let tree = tree::build_tree(doc)?;
        let layout = layout::compute_layout(
            &tree,
            self.render_config.width,
            self.render_config.height,
            &self.layout_config,
        );

        // Legend order claims palette slots first so colors do not depend on render order
        self.colors.seed(tree.top_level_categories());
        for rect in layout.leaf_rects(&tree) {
            if let Some(category) = tree.get(rect.node).category.as_deref() {
                self.colors.color(category);
            }
        }

        tracing::info!(
            "Ready: {} tiles, {} categories",
            layout.leaf_rects(&tree).count(),
            self.colors.domain().len()
        );
        self.tree = Some(tree);
        self.layout = Some(layout);
        self.phase = AppPhase::Ready;
        Ok(())
    }

    pub fn fail(&mut self, err: &Error) {
        tracing::error!("Failed to load '{}': {}", self.dataset.key, err);
        self.tree = None;
        self.layout = None;
        self.phase = AppPhase::Failed(err.to_string());
    }

    /// The treemap SVG, once ready.
    pub fn treemap_svg(&mut self) -> Option<String> {
        let (Some(tree), Some(layout)) = (&self.tree, &self.layout) else {
            return None;
        };
        Some(render_treemap(tree, layout, &mut self.colors, &self.render_config))
    }

    /// The legend SVG, once ready.
    pub fn legend_svg(&mut self) -> Option<String> {
        let tree = self.tree.as_ref()?;
        let entries = legend_entries(&tree.top_level_categories(), &mut self.colors);
        Some(render_legend(&entries, &self.render_config))
    }

    /// The full page for the current phase.
    pub fn render_page(&mut self) -> String {
        let (title, description) = (self.dataset.title, self.dataset.description);
        match self.phase.clone() {
            AppPhase::Ready => match (self.legend_svg(), self.treemap_svg()) {
                (Some(legend), Some(map)) => {
                    render_page(title, description, &legend, &map, &self.tooltip)
                }
                _ => render_error_page(title, description, "no data to render"),
            },
            AppPhase::Failed(message) => render_error_page(title, description, &message),
            AppPhase::Loading => render_error_page(title, description, "dataset not loaded yet"),
        }
    }
}
