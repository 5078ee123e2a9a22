//! # Catalog Store
//!
//! SQLite persistence for the catalog. `albumtree import` writes a validated
//! [`Catalog`] once; every later command reads it back with
//! [`load_catalog`].
//!
//! ## Schema
//!
//! - `albums` - one row per album, `UNIQUE(name, artist)`
//! - `album_genres` / `album_descriptors` - ordered lists keyed by
//!   `(album_id, position)`
//! - `genres` - the genre forest, `parent` is NULL for top-level genres

use crate::catalog::{Album, Catalog, Genre};
use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE albums (
        id      INTEGER PRIMARY KEY,
        name    TEXT    NOT NULL,
        artist  TEXT    NOT NULL,
        rank    INTEGER NOT NULL,
        release TEXT    NOT NULL,
        UNIQUE(name, artist)
    );
    CREATE TABLE album_genres (
        album_id INTEGER NOT NULL REFERENCES albums(id),
        position INTEGER NOT NULL,
        genre    TEXT    NOT NULL,
        PRIMARY KEY (album_id, position)
    );
    CREATE TABLE album_descriptors (
        album_id   INTEGER NOT NULL REFERENCES albums(id),
        position   INTEGER NOT NULL,
        descriptor TEXT    NOT NULL,
        PRIMARY KEY (album_id, position)
    );
    CREATE TABLE genres (
        id     INTEGER PRIMARY KEY,
        name   TEXT NOT NULL UNIQUE,
        parent TEXT
    );
    CREATE INDEX idx_albums_rank ON albums(rank);
    CREATE INDEX idx_album_genres_genre ON album_genres(genre);
";

/// Open the store at `db_path`, creating the file if needed.
///
/// # Errors
///
/// Fails if SQLite cannot open the file.
pub fn connect(db_path: &Path) -> Result<Connection> {
    Connection::open(db_path)
        .with_context(|| format!("Failed to open catalog store at {}", db_path.display()))
}

/// Write `catalog` into a fresh store at `db_path`.
///
/// Refuses to touch an existing store unless `force` is set. The store is
/// built next to `db_path` in one transaction and only renamed into place
/// once committed, so a failed import leaves any previous store as it was.
///
/// Returns the number of albums written.
///
/// # Errors
///
/// Fails if the store exists and `force` is not set, or on any SQLite or
/// filesystem error.
pub fn init_store(db_path: &Path, catalog: &Catalog, force: bool) -> Result<usize> {
    if db_path.exists() && !force {
        anyhow::bail!(
            "Catalog store already exists at {}. Use --force to replace it.",
            db_path.display()
        );
    }

    let staging = staging_path(db_path);
    if staging.exists() {
        debug!("Removing stale staging store {}", staging.display());
        fs::remove_file(&staging)
            .with_context(|| format!("Failed to remove stale store {}", staging.display()))?;
    }

    if let Err(err) = write_store(&staging, catalog) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    if db_path.exists() {
        info!("Replacing existing catalog store at {}", db_path.display());
    }
    fs::rename(&staging, db_path)
        .with_context(|| format!("Failed to move new catalog store to {}", db_path.display()))?;

    info!(
        "Stored {} albums and {} genres in {}",
        catalog.len(),
        catalog.genres().len(),
        db_path.display()
    );
    Ok(catalog.len())
}

fn staging_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_store(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut conn = connect(path)?;
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)
        .context("Invalid SQL when creating catalog tables")?;
    {
        let mut insert_album = tx.prepare(
            "INSERT INTO albums (name, artist, rank, release) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut insert_genre_tag = tx.prepare(
            "INSERT INTO album_genres (album_id, position, genre) VALUES (?1, ?2, ?3)",
        )?;
        let mut insert_descriptor = tx.prepare(
            "INSERT INTO album_descriptors (album_id, position, descriptor) VALUES (?1, ?2, ?3)",
        )?;

        for album in catalog.albums() {
            insert_album
                .execute(params![album.name, album.artist, album.rank, album.release])
                .with_context(|| format!("Failed to INSERT album '{}'", album.label()))?;
            let album_id = tx.last_insert_rowid();

            for (position, genre) in album.genres.iter().enumerate() {
                insert_genre_tag.execute(params![album_id, position, genre])?;
            }
            for (position, descriptor) in album.descriptors.iter().enumerate() {
                insert_descriptor.execute(params![album_id, position, descriptor])?;
            }
        }

        let mut insert_genre =
            tx.prepare("INSERT INTO genres (name, parent) VALUES (?1, ?2)")?;
        for genre in catalog.genres() {
            insert_genre
                .execute(params![genre.name, genre.parent])
                .with_context(|| format!("Failed to INSERT genre '{}'", genre.name))?;
        }
    }
    tx.commit().context("Committing catalog transaction failed")?;
    Ok(())
}

/// Read the whole catalog back from the store at `db_path`.
///
/// Albums come back ordered by rank, then insertion order, and are
/// re-validated through [`Catalog::new`].
///
/// # Errors
///
/// Fails if the store does not exist, cannot be queried, or holds data that
/// breaks the catalog invariants.
pub fn load_catalog(db_path: &Path) -> Result<Catalog> {
    if !db_path.exists() {
        anyhow::bail!(
            "No catalog store at {}. Run `albumtree import <catalog.json>` first.",
            db_path.display()
        );
    }

    let conn = connect(db_path)?;
    let mut genre_tags = load_ordered_lists(&conn, "album_genres", "genre")?;
    let mut descriptors = load_ordered_lists(&conn, "album_descriptors", "descriptor")?;

    let mut stmt = conn
        .prepare("SELECT id, name, artist, rank, release FROM albums ORDER BY rank, id")
        .context("Invalid SQL when SELECTing albums")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            Album {
                name: row.get(1)?,
                artist: row.get(2)?,
                genres: Vec::new(),
                rank: row.get(3)?,
                release: row.get(4)?,
                descriptors: Vec::new(),
            },
        ))
    })?;

    let mut albums = Vec::new();
    for row in rows {
        let (id, mut album) = row.context("Failed to read album row")?;
        album.genres = genre_tags.remove(&id).unwrap_or_default();
        album.descriptors = descriptors.remove(&id).unwrap_or_default();
        albums.push(album);
    }

    let mut stmt = conn
        .prepare("SELECT name, parent FROM genres ORDER BY id")
        .context("Invalid SQL when SELECTing genres")?;
    let genres = stmt
        .query_map([], |row| {
            Ok(Genre {
                name: row.get(0)?,
                parent: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read genre rows")?;

    debug!("Loaded {} albums and {} genres from store", albums.len(), genres.len());
    Catalog::new(albums, genres)
        .with_context(|| format!("Catalog store {} holds invalid data", db_path.display()))
}

/// Read `(album_id, position, value)` rows into per-album ordered lists.
fn load_ordered_lists(conn: &Connection, table: &str, column: &str) -> Result<HashMap<i64, Vec<String>>> {
    let sql = format!("SELECT album_id, {column} FROM {table} ORDER BY album_id, position");
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("Invalid SQL when SELECTing from {table}"))?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

    let mut lists: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        let (album_id, value) = row.with_context(|| format!("Failed to read {table} row"))?;
        lists.entry(album_id).or_default().push(value);
    }
    Ok(lists)
}
