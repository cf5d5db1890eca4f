use anyhow::{Context, Result};
use clap::Parser;

use pledgemap_rs::app::{App, AppPhase};
use pledgemap_rs::cli::{Cli, OutputFormat};
use pledgemap_rs::source::Fetcher;

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("pledgemap_rs={level}").parse()?)
                .add_directive(format!("pledgemap={level}").parse()?),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let dataset = *cli.dataset()?;
    let source = cli.data_source()?;
    let fetcher = Fetcher::with_timeout(cli.timeout).context("failed to build HTTP client")?;

    let mut app = App::new(dataset, source, cli.layout_config(), cli.render_config());
    let loaded = app.load(&fetcher).await;

    let output = match cli.format {
        OutputFormat::Html => Some(app.render_page()),
        OutputFormat::Svg => app.treemap_svg(),
    };
    if let Some(output) = output {
        std::fs::write(&cli.output, output)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
        match app.phase {
            AppPhase::Ready => tracing::info!("Wrote {}", cli.output.display()),
            _ => tracing::warn!("Wrote error page to {}", cli.output.display()),
        }
    }

    loaded.with_context(|| format!("could not render dataset '{}'", dataset.key))
}
