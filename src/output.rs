//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity (album, media entry) leads with its positional index and
//! its human name, with URLs shown as indented context lines. The same
//! helpers ([`entity_header`], [`media_line`]) are used by `check`, `browse`
//! and `build`, so an album looks the same everywhere.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Albums
//! 001 Navidad 2023 (2 items)
//!     Date: Diciembre 2023
//!     Cover: https://drive.google.com/thumbnail?id=COVER&sz=w2048
//!     001 La cena [photo]
//!         Source: https://drive.google.com/file/d/CENA/view
//!         Resolved: https://drive.google.com/thumbnail?id=CENA&sz=w2048
//!     002 (regalos) [photo]
//!         Source: https://drive.google.com/open?id=REGALOS
//!         Resolved: https://drive.google.com/thumbnail?id=REGALOS&sz=w2048
//! 002 Vacío (0 items)
//!     Date: 2024
//!     Cover: https://example.com/cover.jpg
//!
//! 2 albums, 2 items
//! ```
//!
//! ## Browse
//!
//! ```text
//! Navidad 2023 · Diciembre 2023 · 3 items
//!     003 El brindis [video] 3/3
//!         Frame: https://drive.google.com/file/d/BRINDIS/preview
//!         Caption: El brindis
//!         Open in Drive: https://drive.google.com/file/d/BRINDIS/view
//!     ‹ prev
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::catalog::Catalog;
use crate::config::GalleryConfig;
use crate::generate::GenerateSummary;
use crate::lightbox::{LightboxView, Stage};
use crate::session::Screen;
use crate::types::{Album, MediaEntry};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count_label(n: usize) -> String {
    match n {
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    }
}

/// Format an album header: positional index + title + item count.
///
/// ```text
/// 001 Navidad 2023 (3 items)
/// ```
fn entity_header(index: usize, title: &str, count: usize) -> String {
    format!("{} {} ({})", format_index(index), title, count_label(count))
}

/// Format a media line: captioned entries show the caption, others show
/// their id in parens.
///
/// ```text
/// 001 La cena [photo]
/// 002 (regalos) [photo]
/// ```
fn media_line(index: usize, entry: &MediaEntry) -> String {
    let name = match entry.caption.as_deref() {
        Some(c) if !c.is_empty() => truncate(c, 60),
        _ => format!("({})", entry.id),
    };
    format!("{} {} [{}]", format_index(index), name, entry.kind.label())
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

// ============================================================================
// Check: catalog inventory
// ============================================================================

/// Format the whole catalog with raw and resolved URLs.
pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["Albums".to_string()];
    for (i, album) in catalog.albums.iter().enumerate() {
        lines.push(entity_header(i + 1, &album.title, album.len()));
        lines.push(format!("    Date: {}", album.date));
        lines.push(format!("    Cover: {}", album.cover_url()));
        for (j, entry) in album.media.iter().enumerate() {
            lines.push(format!("    {}", media_line(j + 1, entry)));
            lines.push(format!("        Source: {}", entry.source_url));
            let display = entry.display_url();
            if display != entry.source_url {
                lines.push(format!("        Resolved: {}", display));
            }
            if let Some(thumb) = &entry.thumbnail_url {
                lines.push(format!("        Thumbnail: {}", thumb));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} albums, {}",
        catalog.len(),
        count_label(catalog.media_count())
    ));
    lines
}

pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Browse: one screen at a time
// ============================================================================

fn format_login(error: Option<&str>, config: &GalleryConfig) -> Vec<String> {
    let mut lines = vec!["Locked. Type `login <password>` to enter.".to_string()];
    if let Some(err) = error {
        lines.push(format!("{}{}", indent(1), err));
    }
    if let Some(hint) = config.auth.visible_hint() {
        lines.push(format!("{}({})", indent(1), hint));
    }
    lines
}

fn format_album_list(albums: &[Album], config: &GalleryConfig) -> Vec<String> {
    let mut lines = vec![config.site.title.clone(), config.site.welcome.clone()];
    for (i, album) in albums.iter().enumerate() {
        lines.push(format!(
            "{}{} · {} [{}]",
            indent(1),
            entity_header(i + 1, &album.title, album.len()),
            album.date,
            album.id
        ));
    }
    lines
}

fn album_heading(album: &Album) -> String {
    format!(
        "{} · {} · {}",
        album.title,
        album.date,
        count_label(album.len())
    )
}

fn format_album_grid(album: &Album) -> Vec<String> {
    let mut lines = vec![album_heading(album)];
    for (i, entry) in album.media.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), media_line(i + 1, entry)));
        if entry.has_grid_image() {
            lines.push(format!("{}Tile: {}", indent(2), entry.grid_url()));
        } else {
            lines.push(format!("{}Tile: ▶ (no thumbnail)", indent(2)));
        }
    }
    lines
}

/// Format the open viewer.
pub fn format_viewer(album: &Album, view: &LightboxView<'_>) -> Vec<String> {
    let mut lines = vec![album_heading(album)];
    lines.push(format!(
        "{}{} {}",
        indent(1),
        media_line(view.index + 1, view.entry),
        view
    ));
    match &view.stage {
        Stage::Frame { src } => lines.push(format!("{}Frame: {}", indent(2), src)),
        Stage::Image { src } => lines.push(format!("{}Image: {}", indent(2), src)),
    }
    if let Some(caption) = view.caption() {
        lines.push(format!("{}Caption: {}", indent(2), caption));
    }
    if let Some(link) = view.external_link() {
        lines.push(format!("{}Open in Drive: {}", indent(2), link));
    }
    let controls: Vec<&str> = [(view.has_prev, "‹ prev"), (view.has_next, "next ›")]
        .into_iter()
        .filter_map(|(shown, label)| shown.then_some(label))
        .collect();
    if !controls.is_empty() {
        lines.push(format!("{}{}", indent(1), controls.join("   ")));
    }
    lines
}

/// Format whatever the session currently shows.
pub fn format_screen(screen: &Screen<'_>, config: &GalleryConfig) -> Vec<String> {
    match screen {
        Screen::Login { error } => format_login(*error, config),
        Screen::Albums { albums } => format_album_list(albums, config),
        Screen::Album { album } => format_album_grid(album),
        Screen::Viewer { album, view } => format_viewer(album, view),
    }
}

pub fn print_screen(screen: &Screen<'_>, config: &GalleryConfig) {
    for line in format_screen(screen, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build: generated pages
// ============================================================================

/// Format the site generation summary.
///
/// ```text
/// Login → login.html
/// Home → index.html
/// 001 Navidad 2023 → navidad-2023/index.html
///     3 viewer pages
///
/// Generated 2 albums, 4 viewer pages
/// ```
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![
        "Login → login.html".to_string(),
        "Home → index.html".to_string(),
    ];
    for (i, album) in summary.albums.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/index.html",
            format_index(i + 1),
            album.title,
            album.id
        ));
        if album.viewer_pages > 0 {
            lines.push(format!("{}{} viewer pages", indent(1), album.viewer_pages));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} albums, {} viewer pages",
        summary.albums.len(),
        summary.viewer_pages()
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::AlbumPages;
    use crate::lightbox::Lightbox;
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_singular_and_plural() {
        assert_eq!(entity_header(1, "Playa", 1), "001 Playa (1 item)");
        assert_eq!(entity_header(2, "Vacío", 0), "002 Vacío (0 items)");
    }

    #[test]
    fn media_line_prefers_caption() {
        let mut p = photo("cena", "https://e.com/c.jpg");
        assert_eq!(media_line(1, &p), "001 (cena) [photo]");
        p.caption = Some("La cena".into());
        assert_eq!(media_line(1, &p), "001 La cena [photo]");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("añoñaño", 3), "año...");
        assert_eq!(truncate("año", 3), "año");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn catalog_output_lists_resolved_urls() {
        let lines = format_catalog_output(&sample_catalog());
        assert_eq!(lines[0], "Albums");
        assert_eq!(lines[1], "001 Navidad 2023 (3 items)");
        assert!(lines.contains(
            &"        Resolved: https://drive.google.com/thumbnail?id=CENA&sz=w2048".to_string()
        ));
        assert!(lines.contains(&"003 vacio (0 items)".to_string()));
        assert_eq!(lines.last().unwrap(), "3 albums, 4 items");
    }

    #[test]
    fn catalog_output_skips_resolved_line_for_passthrough() {
        let lines = format_catalog_output(&sample_catalog());
        let ola = lines
            .iter()
            .position(|l| l.contains("(ola)"))
            .expect("ola listed");
        assert!(lines[ola + 1].contains("Source: https://example.com/ola.jpg"));
        assert!(!lines[ola + 2].contains("Resolved"));
    }

    #[test]
    fn login_screen_shows_error_and_hint() {
        let config = GalleryConfig::default();
        let lines = format_screen(&Screen::Login { error: Some("mal") }, &config);
        assert!(lines[0].starts_with("Locked"));
        assert_eq!(lines[1], "    mal");
        assert!(lines[2].contains("familia"));
    }

    #[test]
    fn album_grid_shows_placeholder_for_bare_video() {
        let a = album("a", vec![video("v", "https://drive.google.com/file/d/V/view")]);
        let lines = format_screen(&Screen::Album { album: &a }, &GalleryConfig::default());
        assert_eq!(lines[2], "        Tile: ▶ (no thumbnail)");
    }

    #[test]
    fn album_grid_uses_custom_video_thumbnail() {
        let catalog = sample_catalog();
        let navidad = find_album(&catalog, "navidad-2023");
        let lines = format_album_grid(navidad);
        assert!(lines.contains(
            &"        Tile: https://drive.google.com/thumbnail?id=BRINDIS_T&sz=w2048".to_string()
        ));
    }

    #[test]
    fn viewer_shows_frame_and_only_available_controls() {
        let catalog = sample_catalog();
        let navidad = find_album(&catalog, "navidad-2023");
        let mut lb = Lightbox::for_album(navidad);
        lb.open(2);
        let lines = format_viewer(navidad, &lb.view(navidad).unwrap());

        assert_eq!(lines[1], "    003 (brindis) [video] 3/3");
        assert_eq!(
            lines[2],
            "        Frame: https://drive.google.com/file/d/BRINDIS/preview"
        );
        assert!(lines[3].starts_with("        Open in Drive: "));
        assert_eq!(lines.last().unwrap(), "    ‹ prev");
    }

    #[test]
    fn viewer_single_item_has_no_controls() {
        let a = album("a", vec![photo("p", "https://e.com/p.jpg")]);
        let mut lb = Lightbox::for_album(&a);
        lb.open(0);
        let lines = format_viewer(&a, &lb.view(&a).unwrap());
        assert_eq!(lines.last().unwrap(), "        Image: https://e.com/p.jpg");
    }

    #[test]
    fn generate_output_summarizes_pages() {
        let summary = GenerateSummary {
            albums: vec![
                AlbumPages {
                    id: "navidad".into(),
                    title: "Navidad".into(),
                    viewer_pages: 3,
                },
                AlbumPages {
                    id: "vacio".into(),
                    title: "Vacío".into(),
                    viewer_pages: 0,
                },
            ],
        };
        let lines = format_generate_output(&summary);
        assert_eq!(lines[2], "001 Navidad → navidad/index.html");
        assert_eq!(lines[3], "    3 viewer pages");
        assert_eq!(lines[4], "002 Vacío → vacio/index.html");
        assert_eq!(lines.last().unwrap(), "Generated 2 albums, 3 viewer pages");
    }
}
