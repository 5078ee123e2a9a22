//! # Catalog Module
//!
//! The immutable album and genre collection every recommendation is computed
//! from. A [`Catalog`] is built once (from a JSON import or the SQLite store)
//! and then only ever borrowed.
//!
//! ## Invariants
//!
//! Construction through [`Catalog::new`] rejects:
//! - albums with an empty name, artist, genre list or descriptor list
//! - albums with a rank of zero
//! - two albums sharing the same `(name, artist)` identity
//! - two albums whose `"name - artist"` labels coincide, which happens when
//!   a name or artist contains the separator
//! - genres with an empty or duplicated name
//!
//! Albums are stably sorted by ascending rank here, once. Everything
//! downstream (ranking, genre filtering) relies on that order and never
//! re-sorts.

use crate::error::{RecommendError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Separator between album name and artist in vertex labels and CLI input
pub const ALBUM_LABEL_SEPARATOR: &str = " - ";

/// A musical album as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub artist: String,
    /// Primary genres first, then secondary ones. Duplicates are allowed.
    pub genres: Vec<String>,
    /// Popularity ordinal, lower is more popular
    pub rank: u32,
    /// Release date as `year-month-day`; never parsed
    pub release: String,
    /// Free-text tags, the only similarity signal
    pub descriptors: Vec<String>,
}

impl Album {
    /// Human-readable `"name - artist"` label, also used as the vertex id
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{ALBUM_LABEL_SEPARATOR}{}", self.name, self.artist)
    }

    /// Identity comparison on `(name, artist)`
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.artist == other.artist
    }

    /// Exact-match genre membership
    #[must_use]
    pub fn has_genre(&self, genre_name: &str) -> bool {
        self.genres.iter().any(|genre| genre == genre_name)
    }
}

/// A genre in the genre forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    /// `None` for top-level genres
    #[serde(default)]
    pub parent: Option<String>,
}

impl Genre {
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// On-disk shape of a catalog import file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub albums: Vec<Album>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Validated, popularity-ordered album and genre collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Album>,
    genres: Vec<Genre>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// Albums are stably sorted by rank, so albums sharing a rank keep the
    /// order they were supplied in.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::MalformedCatalog`] if any album or genre
    /// breaks the catalog invariants.
    pub fn new(mut albums: Vec<Album>, genres: Vec<Genre>) -> Result<Self> {
        let mut identities = HashSet::new();
        let mut labels = HashSet::new();
        for album in &albums {
            validate_album(album)?;
            if !identities.insert((album.name.as_str(), album.artist.as_str())) {
                return Err(RecommendError::MalformedCatalog(format!(
                    "duplicate album '{}'",
                    album.label()
                )));
            }
            let label = album.label();
            if labels.contains(&label) {
                return Err(RecommendError::MalformedCatalog(format!(
                    "album label '{label}' is ambiguous"
                )));
            }
            labels.insert(label);
        }

        let mut genre_names = HashSet::new();
        for genre in &genres {
            if genre.name.is_empty() {
                return Err(RecommendError::MalformedCatalog(
                    "genre with empty name".to_string(),
                ));
            }
            if !genre_names.insert(genre.name.as_str()) {
                return Err(RecommendError::MalformedCatalog(format!(
                    "duplicate genre '{}'",
                    genre.name
                )));
            }
        }

        albums.sort_by_key(|album| album.rank);
        log::debug!(
            "Built catalog with {} albums and {} genres",
            albums.len(),
            genres.len()
        );

        Ok(Self { albums, genres })
    }

    /// Albums ordered from most to least popular
    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    #[must_use]
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Look up an album by its identity.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::AlbumNotFound`] when no album matches.
    pub fn find_album(&self, name: &str, artist: &str) -> Result<&Album> {
        self.albums
            .iter()
            .find(|album| album.name == name && album.artist == artist)
            .ok_or_else(|| {
                RecommendError::AlbumNotFound(format!("{name}{ALBUM_LABEL_SEPARATOR}{artist}"))
            })
    }

    /// Look up an album by its `"name - artist"` label.
    ///
    /// Every occurrence of the separator is tried as the split point, so
    /// album names or artists that themselves contain `" - "` still resolve.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::AlbumNotFound`] when no split yields a
    /// catalog album.
    pub fn find_album_by_label(&self, label: &str) -> Result<&Album> {
        label
            .match_indices(ALBUM_LABEL_SEPARATOR)
            .find_map(|(index, _)| {
                let name = &label[..index];
                let artist = &label[index + ALBUM_LABEL_SEPARATOR.len()..];
                self.find_album(name, artist).ok()
            })
            .ok_or_else(|| RecommendError::AlbumNotFound(label.to_string()))
    }

    /// Look up a genre by name.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::GenreNotFound`] when no genre matches.
    pub fn find_genre(&self, name: &str) -> Result<&Genre> {
        self.genres
            .iter()
            .find(|genre| genre.name == name)
            .ok_or_else(|| RecommendError::GenreNotFound(name.to_string()))
    }

    /// Genres without a parent, in catalog order
    pub fn top_level_genres(&self) -> impl Iterator<Item = &Genre> {
        self.genres.iter().filter(|genre| genre.is_top_level())
    }

    /// Direct children of `parent`, in catalog order
    pub fn subgenres<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Genre> + 'a {
        self.genres
            .iter()
            .filter(move |genre| genre.parent.as_deref() == Some(parent))
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = RecommendError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        Self::new(file.albums, file.genres)
    }
}

fn validate_album(album: &Album) -> Result<()> {
    let problem = if album.name.is_empty() {
        Some("empty album name")
    } else if album.artist.is_empty() {
        Some("empty artist")
    } else if album.genres.is_empty() {
        Some("no genres")
    } else if album.descriptors.is_empty() {
        Some("no descriptors")
    } else if album.rank == 0 {
        Some("rank must be positive")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(RecommendError::MalformedCatalog(format!(
            "album '{}': {problem}",
            album.label()
        ))),
        None => Ok(()),
    }
}

/// Read and validate a JSON catalog import file.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid catalog JSON, or breaks the
/// catalog invariants.
pub fn read_catalog_file(path: &Path) -> anyhow::Result<Catalog> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let file: CatalogFile = serde_json::from_str(&contents)
        .with_context(|| format!("Catalog file {} is not valid catalog JSON", path.display()))?;
    let catalog = Catalog::try_from(file)
        .with_context(|| format!("Catalog file {} failed validation", path.display()))?;
    Ok(catalog)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Album with a single genre, handy for ranking and tree tests
    pub fn album(name: &str, rank: u32, descriptors: &[&str]) -> Album {
        album_in(name, rank, &["Rock"], descriptors)
    }

    pub fn album_in(name: &str, rank: u32, genres: &[&str], descriptors: &[&str]) -> Album {
        Album {
            name: name.to_string(),
            artist: format!("{name} Artist"),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            rank,
            release: "1999-01-01".to_string(),
            descriptors: descriptors.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    pub fn genre(name: &str, parent: Option<&str>) -> Genre {
        Genre {
            name: name.to_string(),
            parent: parent.map(str::to_string),
        }
    }
}
