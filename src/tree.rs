//! # Recommendation Tree Module
//!
//! A small generic tree used for every tree this crate produces: album
//! recommendation trees (`RecommendationTree<&Album>`), genre-rooted
//! recommendation trees and genre-forest trees.
//!
//! The empty tree is a separate variant, so "no root but children" cannot be
//! represented. Children are always [`TreeNode`]s and therefore never empty.
//!
//! [`flatten`] turns a tree into the vertex/edge lists a graph consumer needs.

use crate::catalog::Album;
use serde::Serialize;

/// Stable, human-readable vertex identifier
pub type VertexId = String;

/// Directed `(parent, child)` edge
pub type Edge = (VertexId, VertexId);

/// Values that can be placed in a flattened tree.
pub trait VertexLabel {
    fn vertex_label(&self) -> VertexId;
}

impl VertexLabel for Album {
    fn vertex_label(&self) -> VertexId {
        self.label()
    }
}

impl<T: VertexLabel + ?Sized> VertexLabel for &T {
    fn vertex_label(&self) -> VertexId {
        (**self).vertex_label()
    }
}

/// A non-empty tree node: one value plus its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    value: T,
    children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(value: T, children: Vec<TreeNode<T>>) -> Self {
        Self { value, children }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }

    pub fn children(&self) -> &[TreeNode<T>] {
        &self.children
    }

    pub fn add_child(&mut self, child: TreeNode<T>) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including itself
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    /// Levels below this node; a leaf has height 0
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order traversal paired with each node's depth below `self`
    pub fn iter(&self) -> Preorder<'_, T> {
        Preorder {
            stack: vec![(self, 0)],
        }
    }
}

/// Pre-order iterator over a [`TreeNode`], yielding `(depth, node)`.
pub struct Preorder<'a, T> {
    stack: Vec<(&'a TreeNode<T>, usize)>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = (usize, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((depth, node))
    }
}

/// A recommendation tree, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationTree<T> {
    Empty,
    Node(TreeNode<T>),
}

impl<T> Default for RecommendationTree<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> From<TreeNode<T>> for RecommendationTree<T> {
    fn from(node: TreeNode<T>) -> Self {
        Self::Node(node)
    }
}

impl<T> RecommendationTree<T> {
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self::Node(TreeNode::leaf(value))
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn root(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(&node.value),
        }
    }

    pub const fn node(&self) -> Option<&TreeNode<T>> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(node),
        }
    }

    pub fn children(&self) -> &[TreeNode<T>] {
        match self {
            Self::Empty => &[],
            Self::Node(node) => &node.children,
        }
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.node().map_or(0, TreeNode::len)
    }
}

/// Vertex and edge lists of a flattened tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flattened {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<Edge>,
}

impl Flattened {
    #[must_use]
    pub fn into_parts(self) -> (Vec<VertexId>, Vec<Edge>) {
        (self.vertices, self.edges)
    }
}

/// Flatten a tree into pre-order vertices and `(parent, child)` edges.
///
/// Each vertex is emitted once, followed for every child by the edge to that
/// child and then the child's own flattened output. Every vertex except the
/// root is the target of exactly one edge.
///
/// # Examples
///
/// ```
/// use albumtree::tree::{flatten, RecommendationTree, TreeNode, VertexLabel};
///
/// struct Name(&'static str);
/// impl VertexLabel for Name {
///     fn vertex_label(&self) -> String { self.0.to_string() }
/// }
///
/// let tree: RecommendationTree<Name> =
///     TreeNode::with_children(Name("a"), vec![TreeNode::leaf(Name("b"))]).into();
/// let flat = flatten(&tree);
/// assert_eq!(flat.vertices, ["a", "b"]);
/// assert_eq!(flat.edges, [("a".to_string(), "b".to_string())]);
/// ```
pub fn flatten<T: VertexLabel>(tree: &RecommendationTree<T>) -> Flattened {
    let mut flattened = Flattened::default();
    if let Some(node) = tree.node() {
        flatten_into(node, &mut flattened);
    }
    flattened
}

fn flatten_into<T: VertexLabel>(node: &TreeNode<T>, out: &mut Flattened) {
    let parent = node.value.vertex_label();
    out.vertices.push(parent.clone());
    for child in &node.children {
        out.edges.push((parent.clone(), child.value.vertex_label()));
        flatten_into(child, out);
    }
}
