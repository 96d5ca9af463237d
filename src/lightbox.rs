//! Full-screen viewer navigation.
//!
//! A [`Lightbox`] tracks which entry of one album is on screen. It only knows
//! the album's length; the album itself is passed in when a view is needed,
//! which keeps the navigator `Copy` and lets the session own the catalog.
//!
//! ## States
//!
//! ```text
//!             open(i), i < len
//!   Closed ───────────────────────▶ Open(i)
//!     ▲                              │  next(): i+1 if i < len-1
//!     │        close() / Escape      │  prev(): i-1 if i > 0
//!     └──────────────────────────────┘
//! ```
//!
//! There is no wraparound, and every out-of-range request is a no-op: the
//! first and last items are ordinary boundaries, not faults.
//!
//! ## Keyboard Bindings
//!
//! Bindings are installed on open and removed on close or [`Lightbox::unmount`].
//! [`Lightbox::handle_key`] ignores keystrokes while no bindings are installed,
//! so a stale navigator never reacts to input.

use crate::types::{Album, MediaEntry};
use std::fmt;
use std::str::FromStr;

/// Keys the viewer reacts to. Anything else maps to [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Parse a DOM-style key name (`"Escape"`, `"ArrowLeft"`, ...).
    /// Short aliases (`esc`, `left`, `right`) are accepted for the CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Escape" | "Esc" | "esc" | "escape" => Key::Escape,
            "ArrowLeft" | "left" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "right" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        })
    }
}

/// What a navigation request changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened(usize),
    Moved { from: usize, to: usize },
    Closed,
}

/// Navigation state for one album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    len: usize,
    index: Option<usize>,
    bindings: bool,
}

impl Lightbox {
    /// A closed navigator over `len` items.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: None,
            bindings: false,
        }
    }

    pub fn for_album(album: &Album) -> Self {
        Self::new(album.len())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether keyboard bindings are currently installed.
    pub fn listening(&self) -> bool {
        self.bindings
    }

    /// Show item `index`. Out-of-range indices (including any index on an
    /// empty album) leave the navigator untouched and return `None`.
    pub fn open(&mut self, index: usize) -> Option<Transition> {
        if index >= self.len {
            return None;
        }
        self.index = Some(index);
        self.bindings = true;
        Some(Transition::Opened(index))
    }

    /// Hide the viewer. Returns `None` when it was already closed.
    pub fn close(&mut self) -> Option<Transition> {
        self.bindings = false;
        self.index.take().map(|_| Transition::Closed)
    }

    /// The owning view is going away: drop bindings and state.
    pub fn unmount(&mut self) {
        self.close();
    }

    pub fn has_next(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.len)
    }

    pub fn has_prev(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// Advance one item. Returns whether a move occurred.
    pub fn next(&mut self) -> bool {
        self.step_next().is_some()
    }

    /// Go back one item. Returns whether a move occurred.
    pub fn prev(&mut self) -> bool {
        self.step_prev().is_some()
    }

    fn step_next(&mut self) -> Option<Transition> {
        let from = self.index.filter(|_| self.has_next())?;
        self.index = Some(from + 1);
        Some(Transition::Moved { from, to: from + 1 })
    }

    fn step_prev(&mut self) -> Option<Transition> {
        let from = self.index.filter(|_| self.has_prev())?;
        self.index = Some(from - 1);
        Some(Transition::Moved { from, to: from - 1 })
    }

    /// Apply a keystroke. Ignored unless bindings are installed.
    pub fn handle_key(&mut self, key: Key) -> Option<Transition> {
        if !self.bindings {
            return None;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => self.step_next(),
            Key::ArrowLeft => self.step_prev(),
            Key::Other => None,
        }
    }

    /// The current entry of `album`, if open.
    ///
    /// `album` must be the album this navigator was created for.
    pub fn current<'a>(&self, album: &'a Album) -> Option<&'a MediaEntry> {
        self.index.and_then(|i| album.media.get(i))
    }

    /// Everything a renderer needs for the open viewer.
    pub fn view<'a>(&self, album: &'a Album) -> Option<LightboxView<'a>> {
        let index = self.index?;
        let entry = album.media.get(index)?;
        Some(LightboxView {
            entry,
            index,
            total: self.len,
            stage: Stage::for_entry(entry),
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        })
    }
}

/// How the main viewer area renders the current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Embedded player (`<iframe>`), for videos.
    Frame { src: String },
    /// Direct image rendering, for photos.
    Image { src: String },
}

impl Stage {
    /// Select the rendering for an entry. Custom thumbnails are grid-only
    /// and never reach the viewer.
    pub fn for_entry(entry: &MediaEntry) -> Self {
        let src = entry.display_url();
        if entry.kind.is_video() {
            Stage::Frame { src }
        } else {
            Stage::Image { src }
        }
    }

    pub fn src(&self) -> &str {
        match self {
            Stage::Frame { src } | Stage::Image { src } => src,
        }
    }
}

/// Snapshot of the open viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxView<'a> {
    pub entry: &'a MediaEntry,
    pub index: usize,
    pub total: usize,
    pub stage: Stage,
    pub has_prev: bool,
    pub has_next: bool,
}

impl LightboxView<'_> {
    pub fn caption(&self) -> Option<&str> {
        self.entry.caption.as_deref().filter(|c| !c.is_empty())
    }

    /// Raw link for the "open in drive" fallback. Videos only.
    pub fn external_link(&self) -> Option<&str> {
        self.entry
            .kind
            .is_video()
            .then_some(self.entry.source_url.as_str())
    }
}

impl fmt::Display for LightboxView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index + 1, self.total)
    }
}
