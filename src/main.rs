//! # Albumtree - Album Recommendation Trees
//!
//! Albumtree recommends albums by building small recommendation trees from a
//! local catalog: each album branches into the albums that share the most
//! descriptors with it, a few levels deep, never repeating an album.
//!
//! ## Usage
//!
//! ```bash
//! # Load the catalog once
//! albumtree import catalog.json
//!
//! # Start a session from an album or a genre
//! albumtree recommend "Loveless - My Bloody Valentine"
//! albumtree genre "Shoegaze"
//!
//! # Keep exploring from any album shown so far
//! albumtree explore "Souvlaki - Slowdive"
//! ```

use albumtree::catalog::{read_catalog_file, Catalog};
use albumtree::cli::{self, TreeArgs};
use albumtree::config::RuntimeConfig;
use albumtree::recommend::{non_negative, TreeParams, VisitedSet};
use albumtree::session::Session;
use albumtree::{algorithm, completion, db, genre, output};
use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};

/// Main entry point for the Albumtree application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate library functions.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug albumtree recommend ...` - Enable debug logging
/// - `RUST_LOG=albumtree::algorithm=trace albumtree ...` - Per-candidate ranking
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completion commands work without a data directory
    match args.command {
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
            return Ok(());
        }
        cli::Command::CompletionEnhanced => {
            completion::generate_enhanced_bash_completion();
            return Ok(());
        }
        _ => {}
    }

    let config = match args.data_dir {
        Some(dir) => RuntimeConfig::with_data_dir(dir)?,
        None => RuntimeConfig::new()?,
    };
    debug!("Using data directory {}", config.data_dir.display());

    match args.command {
        cli::Command::Import { file, force } => {
            info!("Importing catalog from: {}", file.display());
            let catalog = read_catalog_file(&file)?;
            let count = db::init_store(&config.db_path, &catalog, force)?;
            println!(
                "Imported {count} albums and {} genres into {}",
                catalog.genres().len(),
                config.db_path.display()
            );
        }
        cli::Command::Albums { genre: genre_name, limit } => {
            let limit = non_negative("limit", limit)?;
            let catalog = db::load_catalog(&config.db_path)?;
            list_albums(&catalog, genre_name.as_deref(), limit)?;
        }
        cli::Command::Genres { parent, with_albums, format } => {
            let catalog = db::load_catalog(&config.db_path)?;
            if with_albums {
                for exposed in genre::exposed_genres(&catalog) {
                    println!("{}", exposed.name);
                }
            } else if let Some(parent) = parent {
                let parent = catalog.find_genre(&parent)?;
                output::print_tree(&genre::genre_subtree(&catalog, parent), format)?;
            } else {
                output::print_tree(&genre::genre_forest(&catalog), format)?;
            }
        }
        cli::Command::Similar { album, limit } => {
            let limit = non_negative("limit", limit)?;
            let catalog = db::load_catalog(&config.db_path)?;
            let reference = catalog.find_album_by_label(&album)?;

            let ranked = algorithm::rank_candidates_scored(reference, catalog.albums(), limit, &VisitedSet::new());
            for (position, scored) in ranked.iter().enumerate() {
                println!(
                    "{:>3}. {} (shared descriptors: {}, rank: {})",
                    position + 1,
                    scored.album.label(),
                    scored.score,
                    scored.album.rank
                );
            }
        }
        cli::Command::Recommend { album, tree } => {
            let params = tree_params(&config, tree)?;
            let catalog = db::load_catalog(&config.db_path)?;
            let root = catalog.find_album_by_label(&album)?;

            info!("Starting new session from: {}", root.label());
            let mut session = Session::new();
            let result = session.start_album(&catalog, root, params);
            session.save(&config.session_path)?;
            output::print_tree(&result, tree.format)?;
        }
        cli::Command::Genre { genre: genre_name, cap, format } => {
            let cap = match cap {
                Some(cap) => non_negative("cap", cap)?,
                None => config.settings.genre_cap,
            };
            let catalog = db::load_catalog(&config.db_path)?;
            let selected = catalog.find_genre(&genre_name)?;

            info!("Starting new session from genre: {}", selected.name);
            let mut session = Session::new();
            let result = session.start_genre(&catalog, selected, cap);
            session.save(&config.session_path)?;
            output::print_tree(&result, format)?;
        }
        cli::Command::Explore { album, tree } => {
            let params = tree_params(&config, tree)?;
            let catalog = db::load_catalog(&config.db_path)?;
            let root = catalog.find_album_by_label(&album)?;

            let mut session = Session::load(&config.session_path)?;
            info!(
                "Exploring from {} ({} albums already shown)",
                root.label(),
                session.visited().len()
            );
            let result = session.explore(&catalog, root, params);
            session.save(&config.session_path)?;
            output::print_tree(&result, tree.format)?;
        }
        cli::Command::Reset => {
            Session::new().save(&config.session_path)?;
            println!("Session reset");
        }
        cli::Command::CompleteAlbums => {
            completion::print_album_completions(&config.db_path);
        }
        cli::Command::Completion { .. } | cli::Command::CompletionEnhanced => {
            unreachable!("handled before loading configuration")
        }
    }

    Ok(())
}

/// Resolve tree parameters: CLI flags first, then settings.
fn tree_params(config: &RuntimeConfig, args: TreeArgs) -> Result<TreeParams> {
    let defaults = config.settings.tree_params();
    let branching = args.branching.map_or(Ok(defaults.branching), |b| non_negative("branching", b))?;
    let depth = args.depth.map_or(Ok(defaults.depth), |d| non_negative("depth", d))?;
    Ok(TreeParams::new(branching, depth))
}

fn list_albums(catalog: &Catalog, genre_name: Option<&str>, limit: usize) -> Result<()> {
    let albums = match genre_name {
        Some(name) => {
            catalog.find_genre(name)?;
            genre::top_albums_in_genre(name, catalog.albums(), limit)
        }
        None => catalog.albums().iter().take(limit).collect(),
    };

    if albums.is_empty() {
        println!("No albums found");
        return Ok(());
    }

    for album in albums {
        println!(
            "{:>6}  {}  [{}]  ({})",
            album.rank,
            album.label(),
            album.genres.join(", "),
            album.release
        );
    }
    Ok(())
}
