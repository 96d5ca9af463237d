//! Top-level gallery state.
//!
//! A [`Session`] owns the catalog, the authentication flag, the selected
//! album, and the [`Lightbox`] for that album. Every UI event becomes one
//! method call here; nothing else mutates this state.
//!
//! ## Screens
//!
//! ```text
//! Login ──login ok──▶ Albums ──select_album──▶ Album ──open(i)──▶ Viewer
//!   ▲                   ▲                        │ ▲                 │
//!   │                   └────────back────────────┘ └─────close───────┘
//!   └──────────────── logout (from anywhere) ─────────────────────────
//! ```
//!
//! ## Invariants
//!
//! - The viewer is open only while an album is selected: with no album the
//!   navigator is an empty, closed [`Lightbox`].
//! - Selecting an album or going back always starts from a closed navigator.
//! - The persisted flag is read once in [`Session::start`], written on a
//!   successful login and removed on logout.

use crate::catalog::Catalog;
use crate::config::AuthConfig;
use crate::lightbox::{Key, Lightbox, LightboxView, Transition};
use crate::store::{AuthStore, StoreError};
use crate::types::Album;
use thiserror::Error;

/// Stored value meaning "authenticated". Anything else means not.
pub const AUTHENTICATED: &str = "true";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Log in to browse albums")]
    Locked,
    #[error("No album with id '{0}'")]
    UnknownAlbum(String),
    #[error("Auth store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a password attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Denied,
}

/// Whether `attempt` matches the shared secret, ignoring case and
/// surrounding whitespace.
pub fn password_matches(auth: &AuthConfig, attempt: &str) -> bool {
    attempt.trim().to_lowercase() == auth.password
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Login { error: Option<&'a str> },
    Albums { albums: &'a [Album] },
    Album { album: &'a Album },
    Viewer { album: &'a Album, view: LightboxView<'a> },
}

pub struct Session<S: AuthStore> {
    catalog: Catalog,
    auth: AuthConfig,
    store: S,
    authenticated: bool,
    auth_error: Option<String>,
    selected: Option<usize>,
    lightbox: Lightbox,
}

impl<S: AuthStore> Session<S> {
    /// Start a session, restoring the persisted authentication flag.
    pub fn start(catalog: Catalog, auth: AuthConfig, store: S) -> Result<Self, StoreError> {
        let authenticated = store.get(&auth.storage_key)?.as_deref() == Some(AUTHENTICATED);
        Ok(Self {
            catalog,
            auth,
            store,
            authenticated,
            auth_error: None,
            selected: None,
            lightbox: Lightbox::default(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Message from the last failed login, cleared on success or logout.
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check a password attempt. A mismatch is not an error: it sets
    /// [`Session::auth_error`] and returns [`LoginOutcome::Denied`].
    pub fn login(&mut self, attempt: &str) -> Result<LoginOutcome, StoreError> {
        if !password_matches(&self.auth, attempt) {
            self.auth_error = Some(self.auth.error_message.clone());
            return Ok(LoginOutcome::Denied);
        }
        self.store.set(&self.auth.storage_key, AUTHENTICATED)?;
        self.authenticated = true;
        self.auth_error = None;
        Ok(LoginOutcome::Granted)
    }

    /// Forget the flag and all browsing state. Safe to call repeatedly.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.authenticated = false;
        self.auth_error = None;
        self.back();
        self.store.remove(&self.auth.storage_key)
    }

    // =========================================================================
    // Album selection
    // =========================================================================

    pub fn select_album(&mut self, id: &str) -> Result<&Album, SessionError> {
        if !self.authenticated {
            return Err(SessionError::Locked);
        }
        let pos = self
            .catalog
            .position(id)
            .ok_or_else(|| SessionError::UnknownAlbum(id.to_string()))?;
        let album = &self.catalog.albums[pos];
        self.selected = Some(pos);
        self.lightbox = Lightbox::for_album(album);
        Ok(album)
    }

    /// Return to the album list, closing the viewer.
    pub fn back(&mut self) {
        self.lightbox.unmount();
        self.lightbox = Lightbox::default();
        self.selected = None;
    }

    pub fn selected_album(&self) -> Option<&Album> {
        self.selected.map(|pos| &self.catalog.albums[pos])
    }

    // =========================================================================
    // Viewer delegation
    // =========================================================================

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn current_index(&self) -> Option<usize> {
        self.lightbox.index()
    }

    /// Open the viewer on item `index` of the selected album. No-op without
    /// a selected album or with an out-of-range index.
    pub fn open(&mut self, index: usize) -> Option<Transition> {
        self.selected?;
        self.lightbox.open(index)
    }

    pub fn close(&mut self) -> Option<Transition> {
        self.lightbox.close()
    }

    pub fn next(&mut self) -> bool {
        self.lightbox.next()
    }

    pub fn prev(&mut self) -> bool {
        self.lightbox.prev()
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Transition> {
        self.lightbox.handle_key(key)
    }

    pub fn lightbox_view(&self) -> Option<LightboxView<'_>> {
        self.selected_album()
            .and_then(|album| self.lightbox.view(album))
    }

    pub fn screen(&self) -> Screen<'_> {
        if !self.authenticated {
            return Screen::Login {
                error: self.auth_error(),
            };
        }
        match self.selected_album() {
            None => Screen::Albums {
                albums: &self.catalog.albums,
            },
            Some(album) => match self.lightbox.view(album) {
                Some(view) => Screen::Viewer { album, view },
                None => Screen::Album { album },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::*;

    fn session() -> Session<MemoryStore> {
        Session::start(sample_catalog(), AuthConfig::default(), MemoryStore::new()).unwrap()
    }

    fn logged_in() -> Session<MemoryStore> {
        let mut s = session();
        s.login("familia").unwrap();
        s
    }

    #[test]
    fn starts_unauthenticated_on_empty_store() {
        let s = session();
        assert!(!s.is_authenticated());
        assert!(matches!(s.screen(), Screen::Login { error: None }));
    }

    #[test]
    fn restores_persisted_flag() {
        let store = MemoryStore::with("isFamilyAuthenticated", "true");
        let s = Session::start(sample_catalog(), AuthConfig::default(), store).unwrap();
        assert!(s.is_authenticated());
    }

    #[test]
    fn other_stored_values_do_not_authenticate() {
        for value in ["TRUE", "1", "yes", ""] {
            let store = MemoryStore::with("isFamilyAuthenticated", value);
            let s = Session::start(sample_catalog(), AuthConfig::default(), store).unwrap();
            assert!(!s.is_authenticated(), "value {value:?}");
        }
    }

    #[test]
    fn login_is_trimmed_and_case_insensitive() {
        let mut s = session();
        assert_eq!(s.login("  FAMILIA  ").unwrap(), LoginOutcome::Granted);
        assert!(s.is_authenticated());
        assert_eq!(
            s.store().get("isFamilyAuthenticated").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(s.auth_error(), None);
    }

    #[test]
    fn wrong_password_sets_error() {
        let mut s = session();
        assert_eq!(s.login("familiaa").unwrap(), LoginOutcome::Denied);
        assert!(!s.is_authenticated());
        assert!(!s.auth_error().unwrap().is_empty());
        assert!(s.store().is_empty());
        assert!(matches!(s.screen(), Screen::Login { error: Some(_) }));
    }

    #[test]
    fn successful_login_clears_previous_error() {
        let mut s = session();
        s.login("nope").unwrap();
        s.login("familia").unwrap();
        assert_eq!(s.auth_error(), None);
    }

    #[test]
    fn login_uses_configured_password() {
        let auth = AuthConfig {
            password: "abuela".into(),
            ..AuthConfig::default()
        };
        let mut s = Session::start(sample_catalog(), auth, MemoryStore::new()).unwrap();
        assert_eq!(s.login("familia").unwrap(), LoginOutcome::Denied);
        assert_eq!(s.login("Abuela").unwrap(), LoginOutcome::Granted);
    }

    #[test]
    fn logout_clears_everything() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(1);
        s.logout().unwrap();

        assert!(!s.is_authenticated());
        assert!(s.selected_album().is_none());
        assert_eq!(s.current_index(), None);
        assert!(s.store().is_empty());
    }

    #[test]
    fn logout_is_idempotent() {
        let mut s = session();
        s.logout().unwrap();
        s.logout().unwrap();
        assert!(!s.is_authenticated());
        assert!(s.selected_album().is_none());
        assert!(s.store().is_empty());
    }

    #[test]
    fn albums_are_locked_before_login() {
        let mut s = session();
        assert!(matches!(
            s.select_album("navidad-2023"),
            Err(SessionError::Locked)
        ));
    }

    #[test]
    fn unknown_album_is_rejected() {
        let mut s = logged_in();
        assert!(matches!(
            s.select_album("nope"),
            Err(SessionError::UnknownAlbum(id)) if id == "nope"
        ));
        assert!(s.selected_album().is_none());
    }

    #[test]
    fn open_requires_selected_album() {
        let mut s = logged_in();
        assert_eq!(s.open(0), None);
        assert_eq!(s.current_index(), None);
    }

    #[test]
    fn three_item_album_walkthrough() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(0);
        assert!(!s.lightbox().has_prev());
        assert!(s.lightbox().has_next());

        assert!(s.next());
        assert!(s.next());
        assert_eq!(s.current_index(), Some(2));
        assert!(!s.lightbox().has_next());

        assert!(!s.next());
        assert_eq!(s.current_index(), Some(2));
    }

    #[test]
    fn selecting_album_resets_viewer() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(2);
        s.select_album("playa-2024").unwrap();
        assert_eq!(s.current_index(), None);
        assert!(!s.lightbox().listening());
        assert_eq!(s.lightbox().len(), 1);
    }

    #[test]
    fn back_closes_album_and_viewer() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(1);
        s.back();
        assert!(s.selected_album().is_none());
        assert_eq!(s.current_index(), None);
        assert!(matches!(s.screen(), Screen::Albums { .. }));
    }

    #[test]
    fn close_keeps_album_selected() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(1);
        assert_eq!(s.close(), Some(Transition::Closed));
        assert_eq!(s.selected_album().map(|a| a.id.as_str()), Some("navidad-2023"));
        assert!(matches!(s.screen(), Screen::Album { .. }));
    }

    #[test]
    fn empty_album_cannot_open() {
        let mut s = logged_in();
        s.select_album("vacio").unwrap();
        assert_eq!(s.open(0), None);
        assert!(matches!(s.screen(), Screen::Album { album } if album.is_empty()));
    }

    #[test]
    fn keys_only_act_while_viewer_open() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        assert_eq!(s.handle_key(Key::ArrowRight), None);

        s.open(0);
        assert_eq!(
            s.handle_key(Key::ArrowRight),
            Some(Transition::Moved { from: 0, to: 1 })
        );
        assert_eq!(s.handle_key(Key::Escape), Some(Transition::Closed));
        assert_eq!(s.handle_key(Key::ArrowRight), None);
        assert_eq!(s.current_index(), None);
    }

    #[test]
    fn viewer_screen_exposes_current_entry() {
        let mut s = logged_in();
        s.select_album("navidad-2023").unwrap();
        s.open(2);
        match s.screen() {
            Screen::Viewer { album, view } => {
                assert_eq!(album.id, "navidad-2023");
                assert_eq!(view.entry.id, "brindis");
                assert!(view.has_prev);
                assert!(!view.has_next);
            }
            other => panic!("expected viewer, got {other:?}"),
        }
        assert_eq!(s.lightbox_view().map(|v| v.index), Some(2));
    }
}
