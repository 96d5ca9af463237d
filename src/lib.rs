//! # Family Gallery
//!
//! A password-gated family photo and video gallery. A catalog file lists
//! albums of media hosted on Google Drive; the gallery resolves the raw
//! share links into embeddable URLs and lets family members browse albums
//! and step through them in a full-screen viewer.
//!
//! # Architecture
//!
//! ```text
//! catalog.toml ─┐
//!               ├─→ Session ─→ browse (terminal)
//! config.toml ──┘      │
//!                      └────→ generate ─→ dist/ (static site)
//! ```
//!
//! The two pure pieces sit underneath everything else:
//!
//! - [`drive::resolve`] turns a Drive share link into a preview URL (videos)
//!   or a large thumbnail URL (photos). Non-Drive links pass through.
//! - [`lightbox::Lightbox`] is the viewer state machine: closed or open at an
//!   index, with bounded next/prev and keyboard handling that only applies
//!   while the viewer is open.
//!
//! [`session::Session`] composes them with the shared-password gate and a
//! persisted "authenticated" flag behind the [`store::AuthStore`] port.
//! The static site re-creates the same session in the browser with
//! `localStorage` and a few lines of vanilla JavaScript.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`drive`] | Drive link → embeddable URL resolution |
//! | [`types`] | `MediaEntry`, `Album`, `MediaKind` |
//! | [`catalog`] | Catalog loading (TOML or JSON) and validation |
//! | [`lightbox`] | Viewer state machine and the rendered view model |
//! | [`store`] | Auth flag persistence: in-memory and JSON file stores |
//! | [`session`] | Login gate, album selection, viewer navigation |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Static HTML site rendering using Maud |
//! | [`output`] | CLI output formatting for check, browse and build |
//!
//! # Access Control
//!
//! The password is a shared family word, compared case-insensitively after
//! trimming. It is embedded in the generated login page. This keeps casual
//! visitors out and nothing more; do not put anything private in a catalog
//! whose site is publicly reachable.

pub mod catalog;
pub mod config;
pub mod drive;
pub mod generate;
pub mod lightbox;
pub mod output;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
