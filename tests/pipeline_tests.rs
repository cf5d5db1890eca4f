// End-to-end tests: document → tree → layout → page

use std::path::PathBuf;

use pledgemap_rs::app::{App, AppPhase};
use pledgemap_rs::layout::{compute_layout, LayoutConfig};
use pledgemap_rs::render::colors::ColorScale;
use pledgemap_rs::render::legend::{legend_entries, COLUMN_X};
use pledgemap_rs::render::RenderConfig;
use pledgemap_rs::source::{find_dataset, parse_document, DataSource, Fetcher, RawNode};
use pledgemap_rs::tree::arena::{DataTree, NodeId};
use pledgemap_rs::tree::build_tree;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const FIXTURE: &str = include_str!("fixtures/kickstarter-sample.json");

fn document() -> RawNode {
    parse_document(FIXTURE.as_bytes()).unwrap()
}

fn app_for(source: DataSource) -> App {
    App::new(
        *find_dataset("kickstarter").unwrap(),
        source,
        LayoutConfig::default(),
        RenderConfig::default(),
    )
}

fn leaf_sum(tree: &DataTree, id: NodeId) -> f64 {
    let node = tree.get(id);
    if node.is_leaf {
        node.value
    } else {
        tree.children(id).map(|c| leaf_sum(tree, c)).sum()
    }
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn test_aggregates_equal_descendant_leaf_sums() {
    let tree = build_tree(&document()).unwrap();
    for id in tree.preorder() {
        let expected = leaf_sum(&tree, id);
        assert!(
            (tree.get(id).value - expected).abs() < 1e-6,
            "{} aggregates to {} instead of {}",
            tree.get(id).id,
            tree.get(id).value,
            expected
        );
    }
    assert_eq!(tree.get(tree.root).value, 154_720_204.0);
}

#[test]
fn test_identifiers_extend_parent_identifiers() {
    let tree = build_tree(&document()).unwrap();
    for id in tree.preorder() {
        let node = tree.get(id);
        match node.parent {
            None => assert_eq!(node.id, "Kickstarter"),
            Some(parent) => assert_eq!(node.id, format!("{}.{}", tree.get(parent).id, node.name)),
        }
    }
}

#[test]
fn test_leaves_follow_packing_order() {
    let tree = build_tree(&document()).unwrap();
    let first = tree.children(tree.root).next().unwrap();
    assert_eq!(tree.get(first).name.as_str(), "Product Design");
    let top_leaf = tree.leaves()[0];
    assert_eq!(
        tree.get(top_leaf).id,
        "Kickstarter.Product Design.Pebble Time - Awesome Smartwatch, No Compromises"
    );
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_tiles_are_disjoint_and_inside_canvas() {
    let tree = build_tree(&document()).unwrap();
    let layout = compute_layout(&tree, 970.0, 600.0, &LayoutConfig::default());
    let tiles: Vec<_> = layout.leaf_rects(&tree).collect();
    assert_eq!(tiles.len(), 29);

    for (i, a) in tiles.iter().enumerate() {
        assert!(a.x0 >= -1e-6 && a.y0 >= -1e-6, "{a:?}");
        assert!(a.x1 <= 970.0 + 1e-6 && a.y1 <= 600.0 + 1e-6, "{a:?}");
        for b in &tiles[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }

    let area: f64 = tiles.iter().map(|r| r.area()).sum();
    assert!(area < 970.0 * 600.0);
    assert!(area > 0.8 * 970.0 * 600.0, "padding should only cost a sliver, got {area}");
}

#[test]
fn test_zero_sized_canvas_is_degenerate() {
    let tree = build_tree(&document()).unwrap();
    let layout = compute_layout(&tree, 0.0, 600.0, &LayoutConfig::default());
    assert!(layout.leaf_rects(&tree).all(|r| r.area() == 0.0));
}

// ============================================================================
// Legend and colors
// ============================================================================

#[test]
fn test_legend_columns_by_index() {
    let tree = build_tree(&document()).unwrap();
    let categories = tree.top_level_categories();
    assert_eq!(categories.len(), 19);
    assert_eq!(categories[0], "Product Design");
    assert_eq!(categories[18], "Drinks");

    let entries = legend_entries(&categories, &mut ColorScale::paired());
    assert_eq!(entries[6].x, COLUMN_X[0]);
    assert_eq!(entries[7].x, COLUMN_X[1]);
    assert_eq!(entries[13].x, COLUMN_X[1]);
    assert_eq!(entries[14].x, COLUMN_X[2]);
    assert_eq!(entries[18].x, 450.0);
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = document();
    let mut first = app_for(DataSource::File(PathBuf::from("unused")));
    let mut second = app_for(DataSource::File(PathBuf::from("unused")));
    first.ingest(&doc).unwrap();
    second.ingest(&doc).unwrap();
    assert_eq!(first.render_page(), second.render_page());
    assert_eq!(
        first.colors.get("Sculpture"),
        second.colors.get("Sculpture")
    );
}

// ============================================================================
// Full runs
// ============================================================================

#[tokio::test]
async fn test_single_fetch_feeds_both_views() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kickstarter-funding-data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(FIXTURE),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let source =
        DataSource::parse(&format!("{}/kickstarter-funding-data.json", mock_server.uri())).unwrap();
    let mut app = app_for(source);
    app.load(&Fetcher::new().unwrap()).await.unwrap();
    assert_eq!(app.phase, AppPhase::Ready);

    let page = app.render_page();
    assert_eq!(page.matches("class=\"tile\"").count(), 29);
    assert_eq!(page.matches("class=\"legend-item\"").count(), 19);
    assert!(page.contains("<h1 id=\"title\">Kickstarter Pledges</h1>"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("treemap.html");
    std::fs::write(&out, &page).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), page);
}

#[tokio::test]
async fn test_unreachable_dataset_shows_error_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = app_for(DataSource::parse(&mock_server.uri()).unwrap());
    assert!(app.load(&Fetcher::new().unwrap()).await.is_err());

    let page = app.render_page();
    assert!(page.contains("id=\"error\""));
    assert!(page.contains("HTTP 503"));
    assert!(!page.contains("class=\"tile\""));
}
