use compact_str::CompactString;

/// Index into the arena `Vec<DataNode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the category tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct DataNode {
    /// Display name (not the full path)
    pub name: CompactString,
    /// Dot-joined path of names from the root
    pub id: String,
    /// Category label carried by leaves
    pub category: Option<CompactString>,
    /// For leaves: the item's value. For category nodes: aggregated sum of children.
    pub value: f64,
    /// Whether this node is a leaf item
    pub is_leaf: bool,
    /// Longest path down to a leaf (leaves = 0)
    pub height: u16,
    /// Depth in the tree (root = 0)
    pub depth: u16,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl DataNode {
    pub fn category(name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            id: String::new(),
            category: None,
            value: 0.0,
            is_leaf: false,
            height: 0,
            depth: 0,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    pub fn leaf(name: &str, category: &str, value: f64) -> Self {
        Self {
            category: Some(CompactString::new(category)),
            value,
            is_leaf: true,
            ..Self::category(name)
        }
    }
}

/// The category tree stored as a flat arena of nodes.
///
/// Nodes are appended in pre-order, so a parent's index is always lower
/// than its children's. Sorting only re-links sibling lists, so the arena
/// index also records document order.
#[derive(Debug)]
pub struct DataTree {
    pub nodes: Vec<DataNode>,
    pub root: NodeId,
}

impl DataTree {
    /// Create a tree holding only a category root.
    pub fn new(root_name: &str) -> Self {
        Self::with_root(DataNode::category(root_name))
    }

    pub fn with_root(mut root: DataNode) -> Self {
        root.id = root.name.to_string();
        root.parent = None;
        root.depth = 0;
        DataTree {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Append a child after the parent's existing children. The child's
    /// identifier is derived from the parent's, which must already be set.
    pub fn add_child(&mut self, parent: NodeId, mut node: DataNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        let parent_node = &self.nodes[parent.index()];
        node.id = format!("{}.{}", parent_node.id, node.name);
        node.parent = Some(parent);
        node.depth = parent_node.depth + 1;
        node.next_sibling = None;
        let last_child = parent_node.last_child;

        match last_child {
            Some(last) => self.nodes[last.index()].next_sibling = Some(new_id),
            None => self.nodes[parent.index()].first_child = Some(new_id),
        }
        self.nodes[parent.index()].last_child = Some(new_id);

        self.nodes.push(node);
        new_id
    }

    pub fn get(&self, id: NodeId) -> &DataNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// All nodes, parents before children, following the current sibling order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            let first = stack.len();
            stack.extend(self.children(id));
            stack[first..].reverse();
        }
        order
    }

    /// Leaves in pre-order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.get(id).is_leaf)
            .collect()
    }

    /// Names of the root's direct children in document order.
    pub fn top_level_categories(&self) -> Vec<&str> {
        let mut ids: Vec<NodeId> = self.children(self.root).collect();
        ids.sort();
        ids.into_iter().map(|id| self.get(id).name.as_str()).collect()
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a DataTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}
