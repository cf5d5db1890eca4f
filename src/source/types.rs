use serde::Deserialize;

/// One node of the fetched document, exactly as it appears on the wire.
///
/// Every field is optional here so that schema problems surface as
/// [`MalformedInputError`](crate::error::MalformedInputError) variants with
/// the offending node's position instead of an opaque serde message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    pub name: Option<String>,
    /// Present (possibly empty) on category nodes, absent on leaves.
    pub children: Option<Vec<RawNode>>,
    pub category: Option<String>,
    /// Number or numeric string.
    pub value: Option<serde_json::Value>,
}

impl RawNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// A named dataset the tool knows how to title and fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

pub const DEFAULT_DATASET: &str = "kickstarter";

pub const DATASETS: &[Dataset] = &[
    Dataset {
        key: "kickstarter",
        title: "Kickstarter Pledges",
        description: "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json",
    },
    Dataset {
        key: "movies",
        title: "Movie Sales",
        description: "Top 100 Highest Grossing Movies Grouped By Genre",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json",
    },
    Dataset {
        key: "video-games",
        title: "Video Game Sales",
        description: "Top 100 Most Sold Video Games Grouped by Platform",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json",
    },
];

/// Look up a dataset by key (case-insensitive).
pub fn find_dataset(key: &str) -> Option<&'static Dataset> {
    DATASETS.iter().find(|d| d.key.eq_ignore_ascii_case(key))
}
