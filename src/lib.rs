//! Album and genre recommendation trees from a static catalog.
//!
//! Core modules:
//! - [`algorithm`] - Descriptor-overlap similarity ranking
//! - [`recommend`] - Bounded-depth recommendation tree builder and visited set
//! - [`genre`] - Genre filtering, genre-rooted trees and the genre forest
//! - [`tree`] - Generic recommendation tree and flattening to vertices/edges
//! - [`catalog`] - Validated, popularity-ordered albums and genres
//!
//! ### Supporting Modules
//!
//! - [`session`] - Exploration sessions owning the visited set
//! - [`db`] - SQLite catalog store
//! - [`config`] - Data directory and tree-shape settings
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`output`] - Text and JSON rendering of trees
//!
//! ## Quick Start Example
//!
//! ```
//! use albumtree::catalog::{Album, Catalog};
//! use albumtree::recommend::{build_tree, VisitedSet};
//! use albumtree::tree::flatten;
//!
//! let album = |name: &str, rank: u32, descriptors: &[&str]| Album {
//!     name: name.to_string(),
//!     artist: "Artist".to_string(),
//!     genres: vec!["Ambient".to_string()],
//!     rank,
//!     release: "1994-01-01".to_string(),
//!     descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
//! };
//!
//! let catalog = Catalog::new(
//!     vec![album("A", 1, &["x", "y"]), album("B", 2, &["y", "z"]), album("C", 3, &["x"])],
//!     vec![],
//! )?;
//!
//! let mut visited = VisitedSet::new();
//! let root = catalog.find_album("A", "Artist")?;
//! let tree = build_tree(root, catalog.albums(), 2, 2, &mut visited);
//!
//! let flat = flatten(&tree);
//! assert_eq!(flat.vertices, ["A - Artist", "B - Artist", "C - Artist"]);
//! assert_eq!(flat.edges.len(), 2);
//! # Ok::<(), albumtree::error::RecommendError>(())
//! ```
//!
//! ## Algorithm
//!
//! - Similarity is the number of distinct descriptors two albums share.
//! - Ties go to the more popular album (the catalog is ordered by rank).
//! - Each node gets at most `branching` children, the tree at most `depth`
//!   levels below the root.
//! - An album appears at most once per tree, and at most once per
//!   exploration session.
//!
//! ## Error Handling
//!
//! Core operations return [`error::RecommendError`] (unknown album or genre,
//! negative parameters, malformed catalog). Storage, configuration and CLI
//! code use `anyhow::Result` with context.

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod genre;
pub mod output;
pub mod recommend;
pub mod session;
pub mod tree;
