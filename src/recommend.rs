//! # Recommendation Tree Builder
//!
//! Builds bounded-depth, bounded-branching album recommendation trees by
//! recursively applying [`rank_candidates`](crate::algorithm::rank_candidates).
//!
//! ## Uniqueness
//!
//! A single [`VisitedSet`] is threaded through the whole recursion. The root
//! is marked before its children are ranked, and every selected child is
//! marked before any of them is expanded, so no album can appear twice
//! anywhere in one tree, nor reappear across chained explorations that share
//! the same set.

use crate::algorithm::rank_candidates;
use crate::catalog::Album;
use crate::error::{RecommendError, Result};
use crate::tree::{RecommendationTree, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default number of children per node
pub const DEFAULT_BRANCHING: usize = 3;

/// Default number of levels below the root
pub const DEFAULT_DEPTH: usize = 2;

/// Album identities already placed during one recommendation session.
///
/// Keyed by name, then artist, so membership checks never allocate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedSet {
    albums: BTreeMap<String, BTreeSet<String>>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an album as visited. Returns `false` if it already was.
    pub fn insert(&mut self, album: &Album) -> bool {
        self.albums
            .entry(album.name.clone())
            .or_default()
            .insert(album.artist.clone())
    }

    #[must_use]
    pub fn contains(&self, album: &Album) -> bool {
        self.contains_identity(&album.name, &album.artist)
    }

    #[must_use]
    pub fn contains_identity(&self, name: &str, artist: &str) -> bool {
        self.albums
            .get(name)
            .is_some_and(|artists| artists.contains(artist))
    }

    pub fn clear(&mut self) {
        self.albums.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.albums.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

/// Shape limits for one tree build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    pub branching: usize,
    pub depth: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            branching: DEFAULT_BRANCHING,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl TreeParams {
    #[must_use]
    pub const fn new(branching: usize, depth: usize) -> Self {
        Self { branching, depth }
    }

    /// Validate signed values coming from user input.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidParameter`] if either value is
    /// negative or does not fit in `usize`. Negative values are never clamped.
    pub fn from_signed(branching: i64, depth: i64) -> Result<Self> {
        Ok(Self {
            branching: non_negative("branching", branching)?,
            depth: non_negative("depth", depth)?,
        })
    }
}

/// Convert a user-supplied count, rejecting negatives.
///
/// # Errors
///
/// Returns [`RecommendError::InvalidParameter`] for negative values.
pub fn non_negative(parameter: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        RecommendError::InvalidParameter(format!("{parameter} must not be negative (got {value})"))
    })
}

/// Build an album recommendation tree rooted at `root`.
///
/// - `depth == 0` yields `root` alone and leaves `visited` untouched.
/// - Otherwise `root` is marked visited, up to `branching` children are
///   ranked from `pool` excluding everything visited, all of them are marked
///   visited, and each is expanded left to right with `depth - 1`.
///
/// `branching == 0` therefore yields `root` alone at any depth.
///
/// # Examples
///
/// ```
/// use albumtree::catalog::Album;
/// use albumtree::recommend::{build_tree, VisitedSet};
///
/// let album = |name: &str, rank: u32, descriptors: &[&str]| Album {
///     name: name.to_string(),
///     artist: "Artist".to_string(),
///     genres: vec!["Rock".to_string()],
///     rank,
///     release: "2000-01-01".to_string(),
///     descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
/// };
/// let pool = vec![album("A", 1, &["x", "y"]), album("B", 2, &["y", "z"]), album("C", 3, &["x"])];
///
/// let mut visited = VisitedSet::new();
/// let tree = build_tree(&pool[0], &pool, 2, 1, &mut visited);
/// let children: Vec<_> = tree.children().iter().map(|c| c.value().name.as_str()).collect();
/// assert_eq!(children, ["B", "C"]);
/// assert_eq!(visited.len(), 3);
/// ```
pub fn build_tree<'a>(
    root: &'a Album,
    pool: &'a [Album],
    branching: usize,
    depth: usize,
    visited: &mut VisitedSet,
) -> RecommendationTree<&'a Album> {
    log::debug!(
        "Building recommendation tree for '{}' (branching {branching}, depth {depth})",
        root.label()
    );
    let tree = build_node(root, pool, branching, depth, visited);
    log::debug!("Recommendation tree has {} albums", tree.len());
    tree.into()
}

/// [`build_tree`] with bundled parameters
pub fn build_tree_with<'a>(
    root: &'a Album,
    pool: &'a [Album],
    params: TreeParams,
    visited: &mut VisitedSet,
) -> RecommendationTree<&'a Album> {
    build_tree(root, pool, params.branching, params.depth, visited)
}

fn build_node<'a>(
    root: &'a Album,
    pool: &'a [Album],
    branching: usize,
    depth: usize,
    visited: &mut VisitedSet,
) -> TreeNode<&'a Album> {
    let mut node = TreeNode::leaf(root);
    if depth == 0 {
        return node;
    }

    visited.insert(root);
    let picks = rank_candidates(root, pool, branching, visited);
    for pick in &picks {
        visited.insert(pick);
    }
    log::trace!(
        "'{}' -> [{}]",
        root.label(),
        picks.iter().map(|a| a.label()).collect::<Vec<_>>().join(", ")
    );

    for pick in picks {
        node.add_child(build_node(pick, pool, branching, depth - 1, visited));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::album;
    use crate::tree::flatten;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn abc() -> Vec<Album> {
        vec![album("A", 1, &["x", "y"]), album("B", 2, &["y", "z"]), album("C", 3, &["x"])]
    }

    fn child_names<'a>(node: &'a TreeNode<&Album>) -> Vec<&'a str> {
        node.children().iter().map(|c| c.value().name.as_str()).collect()
    }

    #[test]
    fn test_depth_zero_is_root_only() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        visited.insert(&pool[0]);
        let tree = build_tree(&pool[0], &pool, 3, 0, &mut visited);

        assert_eq!(tree.root().map(|a| a.name.as_str()), Some("A"));
        assert!(tree.children().is_empty());
        assert_eq!(visited.len(), 1, "depth 0 must not mark anything");
    }

    #[test]
    fn test_branching_zero_is_root_only() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        let tree = build_tree(&pool[0], &pool, 0, 5, &mut visited);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_abc_depth_one() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        let tree = build_tree(&pool[0], &pool, 2, 1, &mut visited);

        assert_eq!(child_names(tree.node().unwrap()), ["B", "C"]);
        assert!(tree.children().iter().all(TreeNode::is_leaf));
        assert!(pool.iter().all(|a| visited.contains(a)));
    }

    #[test]
    fn test_abc_depth_two_excludes_siblings_and_ancestors() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        let tree = build_tree(&pool[0], &pool, 2, 2, &mut visited);

        assert_eq!(child_names(tree.node().unwrap()), ["B", "C"]);
        assert_eq!(tree.len(), 3, "B and C have nothing left to recommend");
    }

    #[test]
    fn test_children_marked_before_recursion() {
        // B's best match is C, but C is B's sibling so B must get D instead.
        let pool = vec![
            album("A", 1, &["a", "b", "c"]),
            album("B", 2, &["a", "p", "q"]),
            album("C", 3, &["b", "p", "q"]),
            album("D", 4, &["p"]),
        ];
        let mut visited = VisitedSet::new();
        let tree = build_tree(&pool[0], &pool, 2, 2, &mut visited);
        let root = tree.node().unwrap();

        assert_eq!(child_names(root), ["B", "C"]);
        assert_eq!(child_names(&root.children()[0]), ["D"]);
        assert!(root.children()[1].is_leaf());
    }

    #[test]
    fn test_previously_visited_albums_are_skipped() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        visited.insert(&pool[1]);

        let tree = build_tree(&pool[0], &pool, 2, 1, &mut visited);
        assert_eq!(child_names(tree.node().unwrap()), ["C"]);
    }

    #[test]
    fn test_global_uniqueness_on_random_catalogs() {
        let vocabulary = ["dark", "warm", "cold", "lush", "raw", "epic", "sad", "calm", "loud"];
        let mut rng = StdRng::seed_from_u64(42);

        for round in 0..25 {
            let pool: Vec<Album> = (0..60)
                .map(|i| {
                    let count = rng.gen_range(1..=5);
                    let descriptors: Vec<&str> =
                        (0..count).map(|_| vocabulary[rng.gen_range(0..vocabulary.len())]).collect();
                    album(&format!("R{round}-{i}"), i + 1, &descriptors)
                })
                .collect();
            let root = &pool[rng.gen_range(0..pool.len())];
            let branching = rng.gen_range(0..5);
            let depth = rng.gen_range(0..4);

            let mut visited = VisitedSet::new();
            let tree = build_tree(root, &pool, branching, depth, &mut visited);
            let node = tree.node().unwrap();

            let mut seen = HashSet::new();
            for (level, entry) in node.iter() {
                assert!(seen.insert(entry.value().label()), "duplicate album in round {round}");
                assert!(entry.children().len() <= branching);
                assert!(level <= depth);
            }

            let flat = flatten(&tree);
            assert_eq!(flat.vertices.len(), tree.len());
            assert_eq!(flat.edges.len(), tree.len() - 1);
        }
    }

    #[test]
    fn test_visited_set_identity_uses_artist() {
        let pool = abc();
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.insert(&pool[0]));
        assert!(!visited.insert(&pool[0]));
        assert!(visited.contains_identity("A", "A Artist"));
        assert!(!visited.contains_identity("A", "Someone Else"));

        visited.clear();
        assert!(visited.is_empty());
        assert_eq!(visited.len(), 0);
    }

    #[test]
    fn test_params_reject_negative_values() {
        assert_eq!(TreeParams::from_signed(3, 2).unwrap(), TreeParams::new(3, 2));
        assert_eq!(TreeParams::from_signed(0, 0).unwrap(), TreeParams::new(0, 0));

        let err = TreeParams::from_signed(-1, 2).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidParameter(ref msg) if msg.contains("branching")));
        let err = TreeParams::from_signed(3, -2).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidParameter(ref msg) if msg.contains("depth")));

        assert_eq!(TreeParams::default(), TreeParams::new(DEFAULT_BRANCHING, DEFAULT_DEPTH));
    }
}
