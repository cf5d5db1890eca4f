use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use crate::layout::LayoutConfig;
use crate::render::RenderConfig;
use crate::source::{find_dataset, DataSource, Dataset, DATASETS, DEFAULT_DATASET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Page with title, legend, treemap and tooltip
    Html,
    /// Bare treemap SVG
    Svg,
}

#[derive(Debug, Parser)]
#[command(
    name = "pledgemap",
    version,
    about = "Render a squarified treemap of hierarchical pledge data"
)]
pub struct Cli {
    /// Named dataset (kickstarter, movies, video-games)
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Override the dataset URL with another URL or a local JSON file
    #[arg(short, long, env = "PLEDGEMAP_SOURCE")]
    pub source: Option<String>,

    /// Where to write the result
    #[arg(short, long, default_value = "treemap.html")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Treemap canvas width
    #[arg(long, default_value_t = 970.0)]
    pub width: f64,

    /// Treemap canvas height
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Gap between neighbouring tiles
    #[arg(long, default_value_t = 1.0)]
    pub padding: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn dataset(&self) -> Result<&'static Dataset> {
        find_dataset(&self.dataset).ok_or_else(|| {
            let known: Vec<&str> = DATASETS.iter().map(|d| d.key).collect();
            anyhow!(
                "unknown dataset '{}' (known: {})",
                self.dataset,
                known.join(", ")
            )
        })
    }

    /// The explicit source if given, otherwise the dataset's URL.
    pub fn data_source(&self) -> Result<DataSource> {
        let raw = match &self.source {
            Some(source) => source.as_str(),
            None => self.dataset()?.url,
        };
        Ok(DataSource::parse(raw)?)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            padding_inner: self.padding.max(0.0),
            ..LayoutConfig::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width.max(0.0),
            height: self.height.max(0.0),
            ..RenderConfig::default()
        }
    }
}
