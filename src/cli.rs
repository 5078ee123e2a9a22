//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Albumtree using Clap
//! derive macros.
//!
//! ## Commands
//!
//! - `import`: Load a JSON catalog into the local store
//! - `albums` / `genres`: Browse the catalog and the genre forest
//! - `similar`: Rank the albums most similar to one album
//! - `recommend`: Start a new session with an album recommendation tree
//! - `genre`: Start a new session with a genre's most popular albums
//! - `explore`: Continue the session from an album of a previous tree
//! - `reset`: Forget every album shown in the current session
//!
//! ## Examples
//!
//! ```bash
//! albumtree import rym_catalog.json
//! albumtree recommend "OK Computer - Radiohead" --branching 3 --depth 2
//! albumtree explore "Kid A - Radiohead"
//! albumtree genre "Shoegaze" --cap 5 --format json
//! ```

use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "albumtree")]
#[command(about = "Albumtree: album & genre recommendation trees from your catalog")]
#[command(version)]
pub struct Args {
    /// Directory holding the catalog store, session and settings
    ///
    /// Defaults to the platform data directory (e.g. ~/.local/share/albumtree).
    #[arg(long, global = true, env = "ALBUMTREE_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Tree shape and output options shared by the album tree commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct TreeArgs {
    /// Maximum recommendations per album (default from config.json, else 3)
    #[arg(short, long, allow_negative_numbers = true)]
    pub branching: Option<i64>,

    /// Levels of recommendations below the root (default from config.json, else 2)
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Import a JSON catalog into the local store
    ///
    /// The file holds `{"albums": [...], "genres": [...]}`. Albums need a
    /// name, artist, genres, rank, release and descriptors; genres a name and
    /// an optional parent.
    Import {
        /// Path to the catalog JSON file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Replace an existing catalog store
        #[arg(long)]
        force: bool,
    },

    /// List albums, most popular first
    Albums {
        /// Only albums tagged with this genre
        #[arg(short, long)]
        genre: Option<String>,

        /// Maximum number of albums to list
        #[arg(short, long, default_value = "25", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Browse the genre forest
    ///
    /// Without arguments shows the top-level genres; with --parent shows a
    /// genre's direct subgenres.
    Genres {
        /// Show the subgenres of this genre
        #[arg(short, long, conflicts_with = "with_albums")]
        parent: Option<String>,

        /// List every genre that has at least one album instead
        #[arg(long)]
        with_albums: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rank the albums most similar to an album by shared descriptors
    Similar {
        /// Album as "Name - Artist"
        #[arg(value_hint = clap::ValueHint::Other)]
        album: String,

        /// Number of albums to show
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Start a new session with an album recommendation tree
    Recommend {
        /// Root album as "Name - Artist"
        #[arg(value_hint = clap::ValueHint::Other)]
        album: String,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Start a new session with a genre's most popular albums
    Genre {
        /// Genre name (exact)
        genre: String,

        /// Number of albums under the genre (default from config.json, else 10)
        #[arg(short, long, allow_negative_numbers = true)]
        cap: Option<i64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Continue the current session from an album of a previous tree
    ///
    /// Albums already shown in this session are never recommended again.
    Explore {
        /// Album as "Name - Artist"
        #[arg(value_hint = clap::ValueHint::Other)]
        album: String,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Forget every album shown in the current session
    Reset,

    /// Generate shell completions
    ///
    /// Usage: albumtree completion bash > ~/.local/share/bash-completion/completions/albumtree
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate bash completion with album name completion
    ///
    /// Usage: albumtree completion-enhanced > ~/.local/share/bash-completion/completions/albumtree
    CompletionEnhanced,

    /// List album labels for completion (hidden command)
    #[command(hide = true)]
    CompleteAlbums,
}
