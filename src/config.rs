//! # Configuration Module
//!
//! This module handles configuration management and data directory setup for
//! Albumtree. It provides platform-appropriate data storage locations and
//! loads the user's tree-shape settings.
//!
//! ## Data Storage
//!
//! Albumtree keeps its files in the platform-standard data directory:
//! - Linux: `~/.local/share/albumtree/`
//! - macOS: `~/Library/Application Support/albumtree/`
//! - Windows: `%APPDATA%\albumtree\`
//!
//! The directory holds:
//! - `catalog.db` - SQLite catalog store written by `albumtree import`
//! - `session.json` - visited albums of the current exploration session
//! - `config.json` - optional [`Settings`] overrides

use crate::genre::DEFAULT_GENRE_CAP;
use crate::recommend::{TreeParams, DEFAULT_BRANCHING, DEFAULT_DEPTH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "albumtree";
const DB_FILE: &str = "catalog.db";
const SESSION_FILE: &str = "session.json";
const SETTINGS_FILE: &str = "config.json";

/// Returns the platform-appropriate data directory for Albumtree, creating it
/// if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The albumtree subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    ensure_dir(data_dir.join(APP_DIR))
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir).with_context(|| {
        format!(
            "Failed to create Albumtree data directory at {}. Please check file permissions.",
            dir.display()
        )
    })?;
    Ok(dir)
}

/// Tree-shape defaults, read from `config.json`.
///
/// Missing fields fall back to the built-in defaults, so a file containing
/// only `{"depth": 3}` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Children per node in album trees
    pub branching: usize,
    /// Levels below the root in album trees
    pub depth: usize,
    /// Albums under a genre-rooted tree
    pub genre_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            branching: DEFAULT_BRANCHING,
            depth: DEFAULT_DEPTH,
            genre_cap: DEFAULT_GENRE_CAP,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    #[must_use]
    pub const fn tree_params(&self) -> TreeParams {
        TreeParams::new(self.branching, self.depth)
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory every other path lives in
    pub data_dir: PathBuf,
    /// Path to the SQLite catalog store
    pub db_path: PathBuf,
    /// Path to the persisted exploration session
    pub session_path: PathBuf,
    pub settings: Settings,
}

impl RuntimeConfig {
    /// Create a runtime configuration rooted at the platform data directory
    ///
    /// # Errors
    ///
    /// Fails if the data directory cannot be created or the settings file is
    /// invalid.
    pub fn new() -> Result<Self> {
        Self::with_data_dir(get_data_dir()?)
    }

    /// Create configuration rooted at an explicit directory
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or the settings file is
    /// invalid.
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self> {
        let data_dir = ensure_dir(data_dir)?;
        let settings = Settings::load(&data_dir.join(SETTINGS_FILE))?;

        Ok(Self {
            db_path: data_dir.join(DB_FILE),
            session_path: data_dir.join(SESSION_FILE),
            settings,
            data_dir,
        })
    }
}
