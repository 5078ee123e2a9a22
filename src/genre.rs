//! # Genre Module
//!
//! Genre filtering over the popularity-ordered album pool, plus the genre
//! trees: the browsable genre forest and genre-rooted recommendation trees.
//!
//! ## Genre-rooted recommendations
//!
//! A genre tree has the genre as root and its most popular albums as direct
//! children. It never touches a [`VisitedSet`](crate::recommend::VisitedSet);
//! exploring one of its albums starts the usual album recommendation chain.

use crate::catalog::{Album, Catalog, Genre};
use crate::tree::{RecommendationTree, TreeNode, VertexId, VertexLabel};

/// Default number of albums under a genre-rooted tree
pub const DEFAULT_GENRE_CAP: usize = 10;

/// Label of the synthetic root of the genre forest
pub const GENRE_FOREST_ROOT: &str = "Genres";

/// Node of a genre-forest tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreNode<'a> {
    /// Synthetic parent of all top-level genres
    Root,
    Genre(&'a Genre),
}

impl VertexLabel for GenreNode<'_> {
    fn vertex_label(&self) -> VertexId {
        match self {
            Self::Root => GENRE_FOREST_ROOT.to_string(),
            Self::Genre(genre) => genre.name.clone(),
        }
    }
}

/// Node of a genre-rooted recommendation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationNode<'a> {
    Genre(&'a Genre),
    Album(&'a Album),
}

impl<'a> RecommendationNode<'a> {
    #[must_use]
    pub const fn album(&self) -> Option<&'a Album> {
        match *self {
            Self::Album(album) => Some(album),
            Self::Genre(_) => None,
        }
    }
}

impl VertexLabel for RecommendationNode<'_> {
    fn vertex_label(&self) -> VertexId {
        match self {
            Self::Genre(genre) => genre.name.clone(),
            Self::Album(album) => album.label(),
        }
    }
}

/// Every album in `pool` tagged with `genre_name`, in pool order.
#[must_use]
pub fn albums_by_genre<'a>(genre_name: &str, pool: &'a [Album]) -> Vec<&'a Album> {
    pool.iter().filter(|album| album.has_genre(genre_name)).collect()
}

/// The first `cap` albums of [`albums_by_genre`].
///
/// With a popularity-ordered pool these are the genre's most popular albums.
#[must_use]
pub fn top_albums_in_genre<'a>(genre_name: &str, pool: &'a [Album], cap: usize) -> Vec<&'a Album> {
    pool.iter()
        .filter(|album| album.has_genre(genre_name))
        .take(cap)
        .collect()
}

/// Genres that have at least one album, in catalog order.
///
/// Only these should be offered wherever a user picks a genre.
#[must_use]
pub fn exposed_genres(catalog: &Catalog) -> Vec<&Genre> {
    let exposed: Vec<&Genre> = catalog
        .genres()
        .iter()
        .filter(|genre| catalog.albums().iter().any(|album| album.has_genre(&genre.name)))
        .collect();
    log::debug!(
        "{} of {} genres have albums",
        exposed.len(),
        catalog.genres().len()
    );
    exposed
}

/// The synthetic `Genres` root with every top-level genre beneath it.
#[must_use]
pub fn genre_forest(catalog: &Catalog) -> RecommendationTree<GenreNode<'_>> {
    let children = catalog
        .top_level_genres()
        .map(|genre| TreeNode::leaf(GenreNode::Genre(genre)))
        .collect();
    TreeNode::with_children(GenreNode::Root, children).into()
}

/// `genre` with its direct subgenres beneath it.
#[must_use]
pub fn genre_subtree<'a>(catalog: &'a Catalog, genre: &'a Genre) -> RecommendationTree<GenreNode<'a>> {
    let children = catalog
        .subgenres(&genre.name)
        .map(|sub| TreeNode::leaf(GenreNode::Genre(sub)))
        .collect();
    TreeNode::with_children(GenreNode::Genre(genre), children).into()
}

/// `genre` with its `cap` most popular albums beneath it.
#[must_use]
pub fn genre_recommendation_tree<'a>(
    genre: &'a Genre,
    pool: &'a [Album],
    cap: usize,
) -> RecommendationTree<RecommendationNode<'a>> {
    let children: Vec<_> = top_albums_in_genre(&genre.name, pool, cap)
        .into_iter()
        .map(|album| TreeNode::leaf(RecommendationNode::Album(album)))
        .collect();
    log::debug!(
        "Genre tree for '{}' has {} albums (cap {cap})",
        genre.name,
        children.len()
    );
    TreeNode::with_children(RecommendationNode::Genre(genre), children).into()
}
