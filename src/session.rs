//! # Session Module
//!
//! A session is one user's chain of explorations. It owns the
//! [`VisitedSet`] that keeps albums from reappearing while the user clicks
//! from tree to tree, and decides when that set is reset.
//!
//! - [`Session::start_album`] and [`Session::start_genre`] begin a new chain
//!   and clear the set.
//! - [`Session::explore`] continues the chain from an album of a previous
//!   tree.
//!
//! The CLI persists a session between invocations as JSON.

use crate::catalog::{Album, Catalog, Genre};
use crate::genre::{genre_recommendation_tree, RecommendationNode};
use crate::recommend::{build_tree_with, TreeParams, VisitedSet};
use crate::tree::RecommendationTree;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One exploration chain and the albums it has shown so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    visited: VisitedSet,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Start a new chain at `album`.
    pub fn start_album<'a>(
        &mut self,
        catalog: &'a Catalog,
        album: &'a Album,
        params: TreeParams,
    ) -> RecommendationTree<&'a Album> {
        self.reset();
        build_tree_with(album, catalog.albums(), params, &mut self.visited)
    }

    /// Start a new chain at `genre`, showing its `cap` most popular albums.
    pub fn start_genre<'a>(
        &mut self,
        catalog: &'a Catalog,
        genre: &'a Genre,
        cap: usize,
    ) -> RecommendationTree<RecommendationNode<'a>> {
        self.reset();
        genre_recommendation_tree(genre, catalog.albums(), cap)
    }

    /// Continue the chain from `album`, excluding everything shown so far.
    pub fn explore<'a>(
        &mut self,
        catalog: &'a Catalog,
        album: &'a Album,
        params: TreeParams,
    ) -> RecommendationTree<&'a Album> {
        self.visited.insert(album);
        log::debug!(
            "Exploring '{}' with {} albums already visited",
            album.label(),
            self.visited.len()
        );
        build_tree_with(album, catalog.albums(), params, &mut self.visited)
    }

    pub fn reset(&mut self) {
        self.visited.clear();
    }

    /// Load a persisted session, or a fresh one if `path` does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Corrupt session file {}. Run `albumtree reset`.", path.display()))
    }

    /// Persist the session to `path`.
    ///
    /// # Errors
    ///
    /// Fails if the session cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write session file {}", path.display()))
    }
}
