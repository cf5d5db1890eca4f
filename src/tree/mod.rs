pub mod aggregate;
pub mod arena;

use std::collections::HashSet;

use serde_json::Value;

use self::arena::{DataNode, DataTree, NodeId};
use crate::error::MalformedInputError;
use crate::source::RawNode;

/// Build the category tree from a fetched document.
///
/// Identifiers are assigned in pre-order as nodes are appended, then values
/// are aggregated bottom-up and siblings sorted into packing order.
pub fn build_tree(doc: &RawNode) -> Result<DataTree, MalformedInputError> {
    let root_name = doc
        .name
        .as_deref()
        .ok_or_else(|| MalformedInputError::MissingName {
            parent: "(document)".to_string(),
        })?;

    let mut tree = if doc.is_leaf() {
        DataTree::with_root(leaf_node(doc, root_name, root_name)?)
    } else {
        DataTree::new(root_name)
    };

    // Nodes enter the arena as they are popped; children are pushed reversed
    // so siblings pop in document order and the arena stays in pre-order.
    let mut stack: Vec<(&RawNode, NodeId)> = Vec::new();
    if let Some(children) = doc.children.as_deref() {
        warn_duplicate_names(&tree.get(tree.root).id, children);
        stack.extend(children.iter().rev().map(|child| (child, tree.root)));
    }

    while let Some((raw, parent)) = stack.pop() {
        let parent_id = &tree.get(parent).id;
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| MalformedInputError::MissingName {
                parent: parent_id.clone(),
            })?;
        let node = if raw.is_leaf() {
            leaf_node(raw, name, &format!("{parent_id}.{name}"))?
        } else {
            DataNode::category(name)
        };
        let id = tree.add_child(parent, node);

        if let Some(children) = raw.children.as_deref() {
            warn_duplicate_names(&tree.get(id).id, children);
            stack.extend(children.iter().rev().map(|child| (child, id)));
        }
    }

    aggregate::aggregate_values(&mut tree);
    aggregate::sort_children(&mut tree);

    let leaves = tree.nodes.iter().filter(|n| n.is_leaf).count();
    tracing::info!(
        "Built tree '{}': {} nodes ({} leaves), total value {}",
        root_name,
        tree.len(),
        leaves,
        tree.get(tree.root).value
    );

    Ok(tree)
}

fn leaf_node(raw: &RawNode, name: &str, id: &str) -> Result<DataNode, MalformedInputError> {
    let value = raw
        .value
        .as_ref()
        .ok_or_else(|| MalformedInputError::MissingValue { id: id.to_string() })?;
    let value = parse_value(value, id)?;
    let category = raw
        .category
        .as_deref()
        .ok_or_else(|| MalformedInputError::MissingCategory { id: id.to_string() })?;
    Ok(DataNode::leaf(name, category, value))
}

/// Accepts JSON numbers and strings holding a number.
pub fn parse_value(raw: &Value, id: &str) -> Result<f64, MalformedInputError> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| MalformedInputError::NonNumericValue {
        id: id.to_string(),
        value: raw.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(MalformedInputError::InvalidValue {
            id: id.to_string(),
            value,
        });
    }
    Ok(value)
}

fn warn_duplicate_names(parent_id: &str, children: &[RawNode]) {
    let mut seen = HashSet::with_capacity(children.len());
    for name in children.iter().filter_map(|c| c.name.as_deref()) {
        if !seen.insert(name) {
            tracing::warn!(
                "Duplicate child name '{}' under '{}'; identifiers will collide",
                name,
                parent_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_document;

    fn build(json: &str) -> Result<DataTree, MalformedInputError> {
        build_tree(&parse_document(json.as_bytes()).unwrap())
    }

    #[test]
    fn builds_ids_values_and_order() {
        let tree = build(
            r#"{"name":"Categories","children":[
                {"name":"Solo","category":"Solo","value":10},
                {"name":"Tech","children":[
                    {"name":"Widget","category":"Tech","value":5},
                    {"name":"Gadget","category":"Tech","value":7}
                ]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(tree.get(tree.root).value, 22.0);
        let ids: Vec<_> = tree
            .leaves()
            .into_iter()
            .map(|id| tree.get(id).id.clone())
            .collect();
        assert_eq!(
            ids,
            vec![
                "Categories.Tech.Gadget",
                "Categories.Tech.Widget",
                "Categories.Solo"
            ]
        );
    }

    #[test]
    fn arena_stays_in_document_preorder() {
        let tree = build(
            r#"{"name":"r","children":[
                {"name":"a","children":[{"name":"a1","category":"a","value":1}]},
                {"name":"b","children":[{"name":"b1","category":"b","value":9}]}
            ]}"#,
        )
        .unwrap();
        let names: Vec<_> = tree.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["r", "a", "a1", "b", "b1"]);
        // Sorting moved b first, the legend order does not move
        assert_eq!(tree.top_level_categories(), vec!["a", "b"]);
        assert_eq!(tree.get(tree.children(tree.root).next().unwrap()).name.as_str(), "b");
    }

    #[test]
    fn accepts_numeric_strings() {
        let tree = build(
            r#"{"name":"r","children":[{"name":"x","category":"c","value":" 20338986 "}]}"#,
        )
        .unwrap();
        assert_eq!(tree.get(tree.root).value, 20338986.0);
    }

    #[test]
    fn root_leaf_is_a_single_tile() {
        let tree = build(r#"{"name":"only","category":"c","value":3}"#).unwrap();
        assert!(tree.get(tree.root).is_leaf);
        assert_eq!(tree.leaves(), vec![tree.root]);
    }

    #[test]
    fn rejects_missing_name() {
        let err = build(r#"{"name":"r","children":[{"category":"c","value":1}]}"#).unwrap_err();
        assert!(matches!(err, MalformedInputError::MissingName { ref parent } if parent == "r"));
        assert!(matches!(
            build(r#"{"children":[]}"#),
            Err(MalformedInputError::MissingName { .. })
        ));
    }

    #[test]
    fn rejects_bad_values() {
        let non_numeric =
            build(r#"{"name":"r","children":[{"name":"x","category":"c","value":"lots"}]}"#);
        assert!(matches!(
            non_numeric,
            Err(MalformedInputError::NonNumericValue { ref id, .. }) if id == "r.x"
        ));

        let negative = build(r#"{"name":"r","children":[{"name":"x","category":"c","value":-4}]}"#);
        assert!(matches!(negative, Err(MalformedInputError::InvalidValue { .. })));

        let missing = build(r#"{"name":"r","children":[{"name":"x","category":"c"}]}"#);
        assert!(matches!(missing, Err(MalformedInputError::MissingValue { .. })));

        let boolean = build(r#"{"name":"r","children":[{"name":"x","category":"c","value":true}]}"#);
        assert!(matches!(boolean, Err(MalformedInputError::NonNumericValue { .. })));
    }

    #[test]
    fn rejects_leaf_without_category() {
        let err = build(r#"{"name":"r","children":[{"name":"x","value":1}]}"#).unwrap_err();
        assert!(matches!(err, MalformedInputError::MissingCategory { .. }));
    }

    #[test]
    fn nested_categories_keep_preorder() {
        let tree = build(
            r#"{"name":"r","children":[
                {"name":"a","children":[
                    {"name":"a1","children":[{"name":"a1x","category":"a","value":1}]},
                    {"name":"a2","category":"a","value":2}
                ]},
                {"name":"b","category":"b","value":3}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<_> = tree.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["r", "r.a", "r.a.a1", "r.a.a1.a1x", "r.a.a2", "r.b"]);
        for (i, node) in tree.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent.index() < i);
            }
        }
    }

    #[test]
    fn empty_category_is_kept_with_zero_value() {
        let tree = build(r#"{"name":"r","children":[{"name":"none","children":[]}]}"#).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(tree.leaves().is_empty());
        assert_eq!(tree.top_level_categories(), vec!["none"]);
    }
}
