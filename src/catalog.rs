//! Catalog loading and validation.
//!
//! The catalog is the gallery's only data source: an ordered list of albums,
//! each an ordered list of media entries. It is read once at startup from a
//! TOML file (or JSON, by extension) and is immutable afterwards.
//!
//! ```toml
//! [[albums]]
//! id = "navidad-2023"
//! title = "Navidad 2023"
//! date = "Diciembre 2023"
//! cover_image = "https://drive.google.com/file/d/COVER/view"
//!
//! [[albums.media]]
//! id = "cena"
//! kind = "photo"
//! source_url = "https://drive.google.com/file/d/ABC/view?usp=sharing"
//! caption = "La cena"
//!
//! [[albums.media]]
//! id = "brindis"
//! kind = "video"
//! source_url = "https://drive.google.com/open?id=XYZ"
//! thumbnail_url = "https://drive.google.com/open?id=THUMB"
//! ```
//!
//! ## Validation
//!
//! - Album ids are non-empty, unique across the catalog, and made of
//!   `[A-Za-z0-9_-]` only (they become directory names in the built site)
//! - Media ids are non-empty and unique within their album
//! - Every entry has a non-empty `source_url`
//! - Only videos carry a `thumbnail_url`
//!
//! Empty albums are valid; they render as "0 items" with no grid.

use crate::types::{Album, MediaKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Album #{0} has an empty id")]
    EmptyAlbumId(usize),
    #[error("Album id '{0}' may only contain letters, digits, '-' and '_'")]
    InvalidAlbumId(String),
    #[error("Duplicate album id: {0}")]
    DuplicateAlbumId(String),
    #[error("Entry #{index} in album '{album}' has an empty id")]
    EmptyMediaId { album: String, index: usize },
    #[error("Duplicate media id '{id}' in album '{album}'")]
    DuplicateMediaId { album: String, id: String },
    #[error("Media '{id}' in album '{album}' has no source_url")]
    EmptySourceUrl { album: String, id: String },
    #[error("Photo '{id}' in album '{album}' has a thumbnail_url (videos only)")]
    ThumbnailOnPhoto { album: String, id: String },
}

/// The full, ordered album list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub albums: Vec<Album>,
}

impl Catalog {
    /// Read and validate a catalog file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };
        Ok(catalog)
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut album_ids = HashSet::new();
        for (pos, album) in self.albums.iter().enumerate() {
            if album.id.is_empty() {
                return Err(CatalogError::EmptyAlbumId(pos + 1));
            }
            if !is_path_safe(&album.id) {
                return Err(CatalogError::InvalidAlbumId(album.id.clone()));
            }
            if !album_ids.insert(album.id.as_str()) {
                return Err(CatalogError::DuplicateAlbumId(album.id.clone()));
            }
            validate_album(album)?;
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.albums.iter().position(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Total number of media entries across all albums.
    pub fn media_count(&self) -> usize {
        self.albums.iter().map(Album::len).sum()
    }
}

fn is_path_safe(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_album(album: &Album) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for (pos, entry) in album.media.iter().enumerate() {
        if entry.id.is_empty() {
            return Err(CatalogError::EmptyMediaId {
                album: album.id.clone(),
                index: pos + 1,
            });
        }
        if !ids.insert(entry.id.as_str()) {
            return Err(CatalogError::DuplicateMediaId {
                album: album.id.clone(),
                id: entry.id.clone(),
            });
        }
        if entry.source_url.trim().is_empty() {
            return Err(CatalogError::EmptySourceUrl {
                album: album.id.clone(),
                id: entry.id.clone(),
            });
        }
        if entry.kind == MediaKind::Photo && entry.thumbnail_url.is_some() {
            return Err(CatalogError::ThumbnailOnPhoto {
                album: album.id.clone(),
                id: entry.id.clone(),
            });
        }
    }
    Ok(())
}
