//! Static HTML site generation.
//!
//! Renders the catalog into a self-contained site that reproduces the
//! gallery session in the browser: a login gate, the album list, one grid
//! page per album and one viewer page per media entry.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── login.html                 # Shared-password form
//! ├── index.html                 # Album list
//! └── navidad-2023/
//!     ├── index.html             # Media grid
//!     ├── 1.html                 # Viewer pages, 1-based
//!     ├── 2.html
//!     └── 3.html
//! ```
//!
//! ## Session Semantics in the Browser
//!
//! - Every page but the login embeds `gate.js`, which redirects to the login
//!   page unless the configured storage key holds `"true"`.
//! - `login.js` compares the trimmed, lowercased attempt with the password
//!   and writes the flag on success.
//! - Viewer pages are rendered through [`Lightbox`], so prev/next links (and
//!   their keyboard and swipe bindings in `viewer.js`) exist only where the
//!   navigator reports `has_prev`/`has_next`. Escape returns to the grid.
//!
//! All links are relative, so the site works from any sub-path or straight
//! from the filesystem.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::catalog::Catalog;
use crate::config::{self, GalleryConfig};
use crate::lightbox::{Lightbox, LightboxView, Stage};
use crate::types::{Album, MediaEntry};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pages written for one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPages {
    pub id: String,
    pub title: String,
    pub viewer_pages: usize,
}

/// What [`generate`] wrote, for CLI output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub albums: Vec<AlbumPages>,
}

impl GenerateSummary {
    pub fn viewer_pages(&self) -> usize {
        self.albums.iter().map(|a| a.viewer_pages).sum()
    }
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const GATE_JS: &str = include_str!("../static/gate.js");
const LOGIN_JS: &str = include_str!("../static/login.js");
const VIEWER_JS: &str = include_str!("../static/viewer.js");

/// Iframe permissions for the drive preview player.
const FRAME_ALLOW: &str = "autoplay; fullscreen; encrypted-media; picture-in-picture";
const FRAME_SANDBOX: &str =
    "allow-scripts allow-same-origin allow-presentation allow-popups allow-forms";

pub fn generate(
    catalog: &Catalog,
    config: &GalleryConfig,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    let login_html = render_login_page(config, &css);
    fs::write(output_dir.join("login.html"), login_html.into_string())?;

    let index_html = render_index(catalog, config, &css);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    let mut summary = GenerateSummary::default();
    for album in &catalog.albums {
        let album_dir = output_dir.join(&album.id);
        fs::create_dir_all(&album_dir)?;

        let album_html = render_album_page(album, config, &css);
        fs::write(album_dir.join("index.html"), album_html.into_string())?;

        let mut lightbox = Lightbox::for_album(album);
        for idx in 0..album.len() {
            lightbox.open(idx);
            let Some(view) = lightbox.view(album) else {
                continue;
            };
            let page = render_viewer_page(album, &view, config, &css);
            fs::write(album_dir.join(viewer_filename(idx)), page.into_string())?;
        }

        summary.albums.push(AlbumPages {
            id: album.id.clone(),
            title: album.title.clone(),
            viewer_pages: album.len(),
        });
    }

    Ok(summary)
}

/// 1-based viewer page name for a 0-based index.
fn viewer_filename(idx: usize) -> String {
    format!("{}.html", idx + 1)
}

fn count_label(n: usize) -> String {
    match n {
        1 => "1 recuerdo".to_string(),
        n => format!("{} recuerdos", n),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
///
/// `root` is the relative path back to the site root (`""` or `"../"`).
/// Gated pages load `gate.js` before anything renders.
fn base_document(
    title: &str,
    css: &str,
    root: &str,
    config: &GalleryConfig,
    body_class: Option<&str>,
    gated: bool,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" data-auth-key=(config.auth.storage_key) data-login={ (root) "login.html" } {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) }
                @if gated {
                    script { (PreEscaped(GATE_JS)) }
                }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the sticky header. Album pages get a back link.
fn site_header(title: &str, back_href: Option<&str>) -> Markup {
    html! {
        header.site-header {
            @if let Some(href) = back_href {
                a.back-link href=(href) { "← Volver" }
            }
            h1 { (title) }
        }
    }
}

fn site_footer(config: &GalleryConfig) -> Markup {
    html! {
        footer.site-footer {
            p { (config.site.footer) }
            button.logout type="button" data-logout { "Cerrar sesión (Salir)" }
        }
    }
}

/// Renders one grid tile. Videos prefer their custom thumbnail and fall
/// back to a play placeholder.
fn media_tile(idx: usize, entry: &MediaEntry) -> Markup {
    let caption = entry.caption.as_deref().filter(|c| !c.is_empty());
    html! {
        a.tile href=(viewer_filename(idx)) data-kind=(entry.kind.label()) {
            @if entry.has_grid_image() {
                img src=(entry.grid_url()) alt=(caption.unwrap_or("")) loading="lazy";
            } @else {
                span.tile-placeholder { "▶" }
            }
            @if entry.kind.is_video() {
                span.tile-play aria-hidden="true" { "▶" }
            }
            @if let Some(text) = caption {
                span.tile-caption { (text) }
            }
        }
    }
}

/// Renders the viewer stage: an iframe for videos, an image for photos.
fn stage_markup(view: &LightboxView<'_>) -> Markup {
    match &view.stage {
        Stage::Frame { src } => html! {
            iframe src=(src) allow=(FRAME_ALLOW) allowfullscreen
                referrerpolicy="origin" sandbox=(FRAME_SANDBOX)
                title="Reproductor de video" {}
        },
        Stage::Image { src } => html! {
            img src=(src) alt=(view.caption().unwrap_or(""));
        },
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the login page with the shared-password form.
fn render_login_page(config: &GalleryConfig, css: &str) -> Markup {
    let content = html! {
        main.login-card {
            h1 { "Bienvenida a la Familia" }
            p { "Por favor, escribe la contraseña familiar para ver los recuerdos." }
            form #login-form data-secret=(config.auth.password) data-error=(config.auth.error_message) {
                input type="password" name="password" placeholder="Contraseña"
                    autocomplete="current-password" autofocus;
                p #auth-error .auth-error hidden {}
                button type="submit" { "Entrar" }
            }
            @if let Some(hint) = config.auth.visible_hint() {
                p.hint { "(" (hint) ")" }
            }
        }
        script { (PreEscaped(LOGIN_JS)) }
    };

    base_document(&config.site.title, css, "", config, Some("login"), false, content)
}

/// Renders the album list.
fn render_index(catalog: &Catalog, config: &GalleryConfig, css: &str) -> Markup {
    let content = html! {
        (site_header(&config.site.title, None))
        main.index-page {
            p.welcome { (config.site.welcome) }
            div.album-grid {
                @for album in &catalog.albums {
                    a.album-card href={ (album.id) "/" } {
                        img src=(album.cover_url()) alt="" loading="lazy";
                        span.album-info {
                            span.album-date { (album.date) }
                            span.album-title { (album.title) }
                            span.album-count { (count_label(album.len())) }
                        }
                    }
                }
            }
        }
        (site_footer(config))
    };

    base_document(&config.site.title, css, "", config, None, true, content)
}

/// Renders an album page with its media grid.
fn render_album_page(album: &Album, config: &GalleryConfig, css: &str) -> Markup {
    let content = html! {
        (site_header(&album.title, Some("../index.html")))
        main.album-page {
            p.album-meta {
                span { (album.date) }
                " • "
                span { (album.len()) " fotos/videos" }
            }
            @if album.is_empty() {
                p.empty-album { "Este álbum todavía no tiene fotos." }
            } @else {
                div.media-grid {
                    @for (idx, entry) in album.media.iter().enumerate() {
                        (media_tile(idx, entry))
                    }
                }
            }
        }
        (site_footer(config))
    };

    base_document(&album.title, css, "../", config, None, true, content)
}

/// Renders a full-screen viewer page.
fn render_viewer_page(
    album: &Album,
    view: &LightboxView<'_>,
    config: &GalleryConfig,
    css: &str,
) -> Markup {
    let prev_href = view.has_prev.then(|| viewer_filename(view.index - 1));
    let next_href = view.has_next.then(|| viewer_filename(view.index + 1));
    let page_title = format!("{} - {}", album.title, view);

    let content = html! {
        nav.viewer-bar {
            @if let Some(link) = view.external_link() {
                a.external href=(link) target="_blank" rel="noopener noreferrer" {
                    "¿Problemas? Abrir en Drive"
                }
            } @else {
                span {}
            }
            a.close href="index.html" aria-label="Cerrar" { "✕" }
        }
        @if let Some(href) = &prev_href {
            a.nav-prev href=(href) aria-label="Anterior" { "‹" }
        }
        @if let Some(href) = &next_href {
            a.nav-next href=(href) aria-label="Siguiente" { "›" }
        }
        figure.stage data-close="index.html" data-prev=[prev_href.as_deref()] data-next=[next_href.as_deref()] {
            (stage_markup(view))
            @if let Some(caption) = view.caption() {
                figcaption { (caption) }
            }
        }
        script { (PreEscaped(VIEWER_JS)) }
    };

    base_document(&page_title, css, "../", config, Some("viewer"), true, content)
}

// ============================================================================
// Tests
// ============================================================================
