//! Catalog types shared by the session, the CLI output and the site generator.
//!
//! Both entities are deserialized once from the catalog file and never
//! mutated afterwards. Display URLs are computed on demand through
//! [`crate::drive::resolve`].

use crate::drive;
use serde::{Deserialize, Serialize};

/// Classification of a media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn is_video(self) -> bool {
        self == MediaKind::Video
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

/// One photo or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaEntry {
    /// Stable within its album, used as a rendering key.
    pub id: String,
    pub kind: MediaKind,
    /// Raw sharing link or direct link.
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Grid-only preview override for videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl MediaEntry {
    /// URL for the full-screen viewer. Ignores `thumbnail_url`.
    pub fn display_url(&self) -> String {
        drive::resolve(&self.source_url, self.kind.is_video())
    }

    /// URL for the grid tile.
    ///
    /// Videos with a custom thumbnail show that image; everything else shows
    /// the source resolved as a still image.
    pub fn grid_url(&self) -> String {
        match (&self.kind, &self.thumbnail_url) {
            (MediaKind::Video, Some(thumb)) => drive::resolve(thumb, false),
            _ => drive::resolve(&self.source_url, false),
        }
    }

    /// Whether the grid tile has an image at all. Videos without a custom
    /// thumbnail render a placeholder tile instead.
    pub fn has_grid_image(&self) -> bool {
        !self.kind.is_video() || self.thumbnail_url.is_some()
    }
}

/// One collection of memories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub date: String,
    /// Raw URL, resolved as a photo.
    pub cover_image: String,
    /// Display and navigation order.
    #[serde(default)]
    pub media: Vec<MediaEntry>,
}

impl Album {
    pub fn cover_url(&self) -> String {
        drive::resolve(&self.cover_image, false)
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{photo, video};

    #[test]
    fn photo_display_url_is_thumbnail() {
        let p = photo("p1", "https://drive.google.com/file/d/P1/view");
        assert_eq!(
            p.display_url(),
            "https://drive.google.com/thumbnail?id=P1&sz=w2048"
        );
    }

    #[test]
    fn video_display_url_is_preview_even_with_thumbnail() {
        let mut v = video("v1", "https://drive.google.com/file/d/V1/view");
        v.thumbnail_url = Some("https://drive.google.com/open?id=T1".to_string());
        assert_eq!(v.display_url(), "https://drive.google.com/file/d/V1/preview");
    }

    #[test]
    fn video_grid_prefers_custom_thumbnail() {
        let mut v = video("v1", "https://drive.google.com/file/d/V1/view");
        v.thumbnail_url = Some("https://drive.google.com/open?id=T1".to_string());
        assert_eq!(
            v.grid_url(),
            "https://drive.google.com/thumbnail?id=T1&sz=w2048"
        );
        assert!(v.has_grid_image());
    }

    #[test]
    fn video_without_thumbnail_has_placeholder_tile() {
        let v = video("v1", "https://drive.google.com/file/d/V1/view");
        assert!(!v.has_grid_image());
    }

    #[test]
    fn cover_resolves_as_photo() {
        let album = Album {
            id: "a".into(),
            title: "A".into(),
            date: "2024".into(),
            cover_image: "https://drive.google.com/open?id=COVER".into(),
            media: vec![],
        };
        assert_eq!(
            album.cover_url(),
            "https://drive.google.com/thumbnail?id=COVER&sz=w2048"
        );
        assert!(album.is_empty());
    }

    #[test]
    fn kind_deserializes_lowercase() {
        let entry: MediaEntry = toml::from_str(
            r#"
id = "x"
kind = "video"
source_url = "https://example.com/x.mp4"
"#,
        )
        .unwrap();
        assert_eq!(entry.kind, MediaKind::Video);
        assert_eq!(entry.caption, None);
    }
}
