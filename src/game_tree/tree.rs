//! Arena-backed game trees built from flat node declarations

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, identifiers::NodeId};

/// Role of a node in the game tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// Terminal position with a static value
    Leaf(f64),
    /// Maximizing player to move
    Max,
    /// Minimizing player to move
    Min,
}

impl NodeKind {
    /// Parse a kind token: `MAX`, `MIN` (any case) or a numeric leaf value.
    ///
    /// # Examples
    ///
    /// ```
    /// use algoviz::game_tree::NodeKind;
    ///
    /// assert_eq!(NodeKind::parse("A", "max")?, NodeKind::Max);
    /// assert_eq!(NodeKind::parse("L1", "-3")?, NodeKind::Leaf(-3.0));
    /// assert!(NodeKind::parse("X", "CHANCE").is_err());
    /// # Ok::<(), algoviz::Error>(())
    /// ```
    pub fn parse(node: &str, token: &str) -> Result<Self> {
        let token = token.trim();
        match token.to_ascii_uppercase().as_str() {
            "MAX" => return Ok(NodeKind::Max),
            "MIN" => return Ok(NodeKind::Min),
            _ => {}
        }
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(NodeKind::Leaf(value)),
            _ => Err(Error::InvalidNodeKind {
                node: node.to_string(),
                kind: token.to_string(),
            }),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Leaf(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf(_) => f.write_str("LEAF"),
            NodeKind::Max => f.write_str("MAX"),
            NodeKind::Min => f.write_str("MIN"),
        }
    }
}

/// One line of the flat tree description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    pub kind: NodeKind,
    /// `None` marks the root
    pub parent: Option<NodeId>,
}

impl NodeSpec {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            kind,
            parent: parent.map(NodeId::from),
        }
    }
}

/// Node stored in the arena. Links are arena indices.
#[derive(Debug, Clone)]
pub struct GameNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Immutable game tree. Children keep declaration order.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<GameNode>,
    index: HashMap<NodeId, usize>,
    root: usize,
}

impl GameTree {
    /// Build and validate a tree from flat declarations.
    ///
    /// Rejects duplicate ids, unknown parents, zero or several roots, nodes
    /// not reachable from the root, leaves with children and MAX/MIN nodes
    /// without children.
    pub fn build(specs: Vec<NodeSpec>) -> Result<Self> {
        let mut index = HashMap::new();
        for (idx, spec) in specs.iter().enumerate() {
            if index.insert(spec.id.clone(), idx).is_some() {
                return Err(Error::DuplicateNode {
                    node: spec.id.to_string(),
                });
            }
        }

        let roots: Vec<usize> = specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.parent.is_none())
            .map(|(idx, _)| idx)
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(Error::MissingRoot),
            [root] => *root,
            many => {
                return Err(Error::MultipleRoots {
                    roots: many
                        .iter()
                        .map(|&idx| specs[idx].id.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        };

        let mut nodes: Vec<GameNode> = specs
            .iter()
            .map(|spec| GameNode {
                id: spec.id.clone(),
                kind: spec.kind,
                parent: None,
                children: Vec::new(),
            })
            .collect();

        for (idx, spec) in specs.iter().enumerate() {
            let Some(parent_id) = &spec.parent else {
                continue;
            };
            let parent = *index.get(parent_id.as_str()).ok_or_else(|| {
                Error::unknown_node_in(parent_id.as_str(), format!("parent of {}", spec.id))
            })?;
            nodes[idx].parent = Some(parent);
            nodes[parent].children.push(idx);
        }

        for node in &nodes {
            match node.kind {
                NodeKind::Leaf(_) if !node.children.is_empty() => {
                    return Err(Error::LeafWithChildren {
                        node: node.id.to_string(),
                    });
                }
                NodeKind::Max | NodeKind::Min if node.children.is_empty() => {
                    return Err(Error::ChildlessInternalNode {
                        node: node.id.to_string(),
                        kind: node.kind.to_string(),
                    });
                }
                _ => {}
            }
        }

        let mut reached = HashSet::new();
        let mut queue = VecDeque::from([root]);
        while let Some(idx) = queue.pop_front() {
            if reached.insert(idx) {
                queue.extend(nodes[idx].children.iter().copied());
            }
        }
        if let Some(orphan) = (0..nodes.len()).find(|idx| !reached.contains(idx)) {
            return Err(Error::UnreachableNode {
                node: nodes[orphan].id.to_string(),
                root: nodes[root].id.to_string(),
            });
        }

        Ok(Self { nodes, index, root })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn root_id(&self) -> &NodeId {
        &self.nodes[self.root].id
    }

    pub fn node(&self, idx: usize) -> &GameNode {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[GameNode] {
        &self.nodes
    }

    /// Arena index of the node named `id`.
    pub fn find(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes in the subtree rooted at `idx`, `idx` included.
    pub fn subtree_size(&self, idx: usize) -> usize {
        1 + self.nodes[idx]
            .children
            .iter()
            .map(|&child| self.subtree_size(child))
            .sum::<usize>()
    }

    /// Depth of each node (root = 0), indexed like the arena.
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.nodes.len()];
        let mut stack = vec![(self.root, 0)];
        while let Some((idx, depth)) = stack.pop() {
            depths[idx] = depth;
            for &child in &self.nodes[idx].children {
                stack.push((child, depth + 1));
            }
        }
        depths
    }
}
