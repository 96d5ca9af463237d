//! Drive sharing-link resolution.
//!
//! Albums are authored by pasting whatever link the drive UI hands out. Those
//! links point at an HTML viewer, not at the media itself, so every URL that
//! reaches an `<img>` or `<iframe>` goes through [`resolve`] first.
//!
//! ## Recognized Shapes
//!
//! ```text
//! https://drive.google.com/file/d/<ID>/view?usp=sharing   path form (tried first)
//! https://drive.google.com/open?id=<ID>                   query form
//! https://drive.google.com/uc?export=view&id=<ID>         query form
//! ```
//!
//! `<ID>` is `[A-Za-z0-9_-]+`. Anything else passes through untouched, so
//! direct links to other hosts keep working.
//!
//! ## Representations
//!
//! | Kind  | Endpoint | Why |
//! |-------|----------|-----|
//! | Photo | `thumbnail?id=<ID>&sz=w2048` | static rendition, loads in `<img>` |
//! | Video | `file/d/<ID>/preview` | embeddable player for an `<iframe>` |
//!
//! The thumbnail endpoint serves no motion content and the preview endpoint
//! is not an image, so callers pass the kind from the catalog entry instead
//! of guessing from the URL.

use regex::Regex;
use std::sync::LazyLock;

static FILE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file/d/([A-Za-z0-9_-]+)").unwrap());
static ID_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").unwrap());

/// Ordered extraction attempts; the first capture wins.
static PATTERNS: &[&LazyLock<Regex>] = &[&FILE_PATH_RE, &ID_PARAM_RE];

/// Fixed rendition width requested from the thumbnail endpoint.
pub const THUMBNAIL_WIDTH: u32 = 2048;

/// A drive file id pulled out of a sharing link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveId<'a>(&'a str);

impl<'a> DriveId<'a> {
    /// Extract the file id from `url`, trying the `file/d/<ID>` path form
    /// before the `id=<ID>` query form.
    ///
    /// Returns `None` for anything that is not a recognized drive link.
    pub fn extract(url: &'a str) -> Option<Self> {
        PATTERNS.iter().find_map(|re| {
            re.captures(url)
                .and_then(|caps| caps.get(1))
                .map(|m| DriveId(m.as_str()))
        })
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Embeddable player URL, for iframes.
    pub fn preview_url(&self) -> String {
        format!("https://drive.google.com/file/d/{}/preview", self.0)
    }

    /// Large static rendition, for image tags.
    pub fn thumbnail_url(&self) -> String {
        format!(
            "https://drive.google.com/thumbnail?id={}&sz=w{}",
            self.0, THUMBNAIL_WIDTH
        )
    }
}

/// Map a raw link to the URL a renderer should request.
///
/// - `""` → `""`
/// - drive link, `is_video` → preview URL
/// - drive link, photo → thumbnail URL
/// - anything else → `raw_url` unchanged
pub fn resolve(raw_url: &str, is_video: bool) -> String {
    if raw_url.is_empty() {
        return String::new();
    }
    match DriveId::extract(raw_url) {
        Some(id) if is_video => id.preview_url(),
        Some(id) => id.thumbnail_url(),
        None => raw_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_form_video_becomes_preview() {
        assert_eq!(
            resolve("https://drive.google.com/file/d/ABC123/view?usp=sharing", true),
            "https://drive.google.com/file/d/ABC123/preview"
        );
    }

    #[test]
    fn path_form_photo_becomes_thumbnail() {
        assert_eq!(
            resolve("https://drive.google.com/file/d/ABC123/view?usp=sharing", false),
            "https://drive.google.com/thumbnail?id=ABC123&sz=w2048"
        );
    }

    #[test]
    fn query_form_photo_becomes_thumbnail() {
        assert_eq!(
            resolve("https://drive.google.com/open?id=XYZ789", false),
            "https://drive.google.com/thumbnail?id=XYZ789&sz=w2048"
        );
    }

    #[test]
    fn query_form_matches_path_form_for_same_id() {
        let path = "https://drive.google.com/file/d/a_B-9/view";
        let query = "https://drive.google.com/uc?export=view&id=a_B-9";
        for is_video in [false, true] {
            assert_eq!(resolve(path, is_video), resolve(query, is_video));
        }
    }

    #[test]
    fn path_form_takes_precedence_over_query() {
        let url = "https://drive.google.com/file/d/PATHID/view?id=QUERYID";
        assert_eq!(DriveId::extract(url).map(|id| id.as_str()), Some("PATHID"));
    }

    #[test]
    fn id_stops_at_first_disallowed_character() {
        let url = "https://drive.google.com/file/d/abc.def/view";
        assert_eq!(DriveId::extract(url).map(|id| id.as_str()), Some("abc"));
    }

    #[test]
    fn id_param_needs_separator() {
        // `videoid=` is not the `id` parameter
        assert_eq!(DriveId::extract("https://host/watch?videoid=zzz"), None);
    }

    #[test]
    fn foreign_url_passes_through() {
        for is_video in [false, true] {
            assert_eq!(
                resolve("https://example.com/cat.png", is_video),
                "https://example.com/cat.png"
            );
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(resolve("", false), "");
        assert_eq!(resolve("", true), "");
    }

    #[test]
    fn empty_id_is_not_a_match() {
        assert_eq!(
            resolve("https://drive.google.com/file/d//view", false),
            "https://drive.google.com/file/d//view"
        );
    }
}
