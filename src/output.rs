//! Terminal and JSON output for trees.

use crate::tree::{flatten, RecommendationTree, VertexLabel};
use anyhow::{Context, Result};
use clap::ValueEnum;

/// How trees are written to stdout
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Indented tree, one vertex per line
    #[default]
    Text,
    /// `{"vertices": [...], "edges": [[parent, child], ...]}`
    Json,
}

/// Render a tree as indented text, two spaces per level.
#[must_use]
pub fn render_text<T: VertexLabel>(tree: &RecommendationTree<T>) -> String {
    let Some(root) = tree.node() else {
        return "(no recommendations)\n".to_string();
    };

    root.iter()
        .map(|(depth, node)| {
            let marker = if depth == 0 { "" } else { "└ " };
            format!("{}{marker}{}\n", "  ".repeat(depth), node.value().vertex_label())
        })
        .collect()
}

/// Render a tree's flattened vertices and edges as pretty JSON.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_json<T: VertexLabel>(tree: &RecommendationTree<T>) -> Result<String> {
    serde_json::to_string_pretty(&flatten(tree)).context("Failed to serialize tree")
}

/// Print a tree in the requested format.
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn print_tree<T: VertexLabel>(tree: &RecommendationTree<T>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(tree)),
        OutputFormat::Json => println!("{}", render_json(tree)?),
    }
    Ok(())
}
