//! Shared test utilities for the family-gallery test suite.
//!
//! Provides entry/album builders, a small in-memory catalog, and lookup
//! helpers that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog();
//! let album = find_album(&catalog, "navidad-2023");
//! assert_eq!(media_ids(album), vec!["cena", "regalos", "brindis"]);
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::types::{Album, MediaEntry, MediaKind};

// =========================================================================
// Builders
// =========================================================================

pub fn photo(id: &str, url: &str) -> MediaEntry {
    MediaEntry {
        id: id.to_string(),
        kind: MediaKind::Photo,
        source_url: url.to_string(),
        caption: None,
        thumbnail_url: None,
    }
}

pub fn video(id: &str, url: &str) -> MediaEntry {
    MediaEntry {
        kind: MediaKind::Video,
        ..photo(id, url)
    }
}

pub fn album(id: &str, media: Vec<MediaEntry>) -> Album {
    Album {
        id: id.to_string(),
        title: id.replace('-', " "),
        date: "2024".to_string(),
        cover_image: format!("https://example.com/{id}/cover.jpg"),
        media,
    }
}

pub fn catalog_of(albums: Vec<Album>) -> Catalog {
    Catalog { albums }
}

/// Three albums: three mixed entries, one photo, and an empty one.
///
/// ```text
/// navidad-2023  cena (photo), regalos (photo), brindis (video + thumbnail)
/// playa-2024    ola (photo)
/// vacio         (empty)
/// ```
pub fn sample_catalog() -> Catalog {
    let mut cena = photo("cena", "https://drive.google.com/file/d/CENA/view?usp=sharing");
    cena.caption = Some("La cena".to_string());
    let regalos = photo("regalos", "https://drive.google.com/open?id=REGALOS");
    let mut brindis = video("brindis", "https://drive.google.com/file/d/BRINDIS/view");
    brindis.thumbnail_url = Some("https://drive.google.com/open?id=BRINDIS_T".to_string());

    let mut navidad = album("navidad-2023", vec![cena, regalos, brindis]);
    navidad.title = "Navidad 2023".to_string();
    navidad.date = "Diciembre 2023".to_string();

    catalog_of(vec![
        navidad,
        album("playa-2024", vec![photo("ola", "https://example.com/ola.jpg")]),
        album("vacio", vec![]),
    ])
}

/// Path to the catalog under `fixtures/`.
pub fn fixture_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.toml")
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an album by id. Panics if not found.
pub fn find_album<'a>(catalog: &'a Catalog, id: &str) -> &'a Album {
    catalog.find(id).unwrap_or_else(|| {
        let ids = album_ids(catalog);
        panic!("album '{id}' not found. Available: {ids:?}")
    })
}

/// All album ids in catalog order.
pub fn album_ids(catalog: &Catalog) -> Vec<&str> {
    catalog.albums.iter().map(|a| a.id.as_str()).collect()
}

/// All media ids in album order.
pub fn media_ids(album: &Album) -> Vec<&str> {
    album.media.iter().map(|m| m.id.as_str()).collect()
}
