/// Diagnostic tool to verify document → tree → layout pipeline
use pledgemap_rs::layout::{compute_layout, LayoutConfig};
use pledgemap_rs::render::RenderConfig;
use pledgemap_rs::source::{find_dataset, DataSource, Fetcher, DEFAULT_DATASET};
use pledgemap_rs::tree;
use pledgemap_rs::ui::input::PointerTracker;
use pledgemap_rs::ui::tooltip::Tooltip;

fn parse_probe(arg: &str) -> anyhow::Result<(f64, f64)> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("probe must look like X,Y, got '{arg}'"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pledgemap_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(arg) => DataSource::parse(&arg)?,
        None => DataSource::parse(find_dataset(DEFAULT_DATASET).map(|d| d.url).unwrap_or_default())?,
    };
    let probe = args.next().map(|arg| parse_probe(&arg)).transpose()?;

    println!("=== DIAGNOSTIC: Document → Tree → Layout Pipeline ===");
    println!("Source: {}", source);

    // Fetch
    let doc = Fetcher::new()?.fetch(&source).await?;
    println!("\n[1] Document fetched: root '{}'", doc.name.as_deref().unwrap_or("?"));

    // Build tree
    let tree = tree::build_tree(&doc)?;
    let root = tree.get(tree.root);
    println!(
        "\n[2] Tree built: {} nodes, {} leaves, height {}, total value {}",
        tree.len(),
        tree.leaves().len(),
        root.height,
        root.value
    );

    println!("\n[3] Top-level categories (packing order):");
    for (i, id) in tree.children(tree.root).enumerate() {
        let node = tree.get(id);
        println!(
            "    [{}] '{}' - value {} ({} children)",
            i,
            node.name,
            node.value,
            tree.children(id).count()
        );
    }

    // Compute layout
    let render = RenderConfig::default();
    let layout = compute_layout(&tree, render.width, render.height, &LayoutConfig::default());
    let leaves: Vec<_> = layout.leaf_rects(&tree).collect();
    println!("\n[4] Layout computed: {} rectangles ({} tiles)", layout.rects.len(), leaves.len());

    println!("\n[5] Top 10 largest tiles by area:");
    let mut sorted = leaves.clone();
    sorted.sort_by(|a, b| b.area().total_cmp(&a.area()));
    for (i, rect) in sorted.iter().take(10).enumerate() {
        let node = tree.get(rect.node);
        println!(
            "    [{}] '{}' - {:.1}x{:.1} at ({:.1}, {:.1}), value {}",
            i,
            node.id,
            rect.width(),
            rect.height(),
            rect.x0,
            rect.y0,
            node.value
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    let canvas = render.width * render.height;
    let covered: f64 = leaves.iter().map(|r| r.area()).sum();
    println!("    Tile area:   {:.0}", covered);
    println!("    Canvas area: {:.0}", canvas);
    println!("    Coverage: {:.1}%", covered / canvas * 100.0);

    let mut overlaps = 0usize;
    for (i, a) in leaves.iter().enumerate() {
        overlaps += leaves[i + 1..].iter().filter(|b| a.overlaps(b)).count();
    }
    println!("    Overlapping tile pairs: {}", overlaps);
    let empty = leaves.iter().filter(|r| r.area() <= 0.0).count();
    println!("    Zero-area tiles: {}", empty);

    if let Some((x, y)) = probe {
        println!("\n[7] Probe at ({}, {}):", x, y);
        let mut tracker = PointerTracker::default();
        let mut tooltip = Tooltip::default();
        for event in tracker.pointer_moved(&layout, &tree, x, y) {
            tooltip.handle(&event, &tree);
        }
        match (&tooltip.info, tooltip.visible) {
            (Some(info), true) => {
                for line in info.lines() {
                    println!("    {}", line);
                }
            }
            _ => println!("    (no tile under pointer)"),
        }
    }

    Ok(())
}
