//! Login session flag, pages and the access guard.

use tracing::{debug, info};

use crate::config::DEFAULT_SESSION_KEY;
use crate::error::Result;
use crate::storage::ItemStore;

/// The only stored flag value that counts as logged in.
const LOGGED_IN: &str = "true";

/// The two pages of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Login page, and where denied visitors are sent.
    Entry,
    /// The admin roster, which needs a logged-in session.
    Restricted,
}

impl Page {
    /// Document name of the page.
    #[must_use]
    pub fn document(&self) -> &'static str {
        match self {
            Self::Entry => "index.html",
            Self::Restricted => "admin.html",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.document())
    }
}

/// What the host should do after a page-level action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the current page.
    Stay,
    /// Full-page redirect to another page.
    Redirect(Page),
}

/// The logged-in flag in session storage.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    key: String,
}

impl<S: ItemStore> Session<S> {
    /// Create a session using the default `fleetAppLoggedIn` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_SESSION_KEY)
    }

    /// Create a session keeping its flag under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Whether the flag is set to exactly `"true"`.
    ///
    /// An unreadable store counts as logged out.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        match self.store.get_item(&self.key) {
            Ok(value) => value.as_deref() == Some(LOGGED_IN),
            Err(err) => {
                debug!("Session flag unreadable, treating as logged out: {}", err);
                false
            }
        }
    }

    /// Set the flag. This is the entry page's login action.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn login(&mut self) -> Result<()> {
        self.store.set_item(&self.key, LOGGED_IN)?;
        info!("Session logged in");
        Ok(())
    }

    /// Clear the flag. Clearing an already cleared flag is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove_item(&self.key)?;
        info!("Session logged out");
        Ok(())
    }
}

/// Boundary check for the restricted page.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Decide whether a visitor may stay on the restricted page.
    ///
    /// Anything other than a logged-in session is sent to the entry page.
    #[must_use]
    pub fn check<S: ItemStore>(session: &Session<S>) -> Navigation {
        if session.is_logged_in() {
            Navigation::Stay
        } else {
            debug!("Access denied, redirecting to {}", Page::Entry);
            Navigation::Redirect(Page::Entry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_page_documents() {
        assert_eq!(Page::Entry.to_string(), "index.html");
        assert_eq!(Page::Restricted.to_string(), "admin.html");
    }

    #[test]
    fn test_fresh_session_is_logged_out() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_logged_in());
        assert_eq!(
            AccessGuard::check(&session),
            Navigation::Redirect(Page::Entry)
        );
    }

    #[test]
    fn test_login_then_guard_allows() {
        let mut session = Session::new(MemoryStore::new());
        session.login().unwrap();

        assert!(session.is_logged_in());
        assert_eq!(AccessGuard::check(&session), Navigation::Stay);
    }

    #[test]
    fn test_only_literal_true_is_truthy() {
        for value in ["TRUE", "True", "1", "yes", " true", ""] {
            let mut store = MemoryStore::new();
            store.set_item("fleetAppLoggedIn", value).unwrap();
            let session = Session::new(store);

            assert!(!session.is_logged_in(), "{value:?} must not log in");
        }
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut session = Session::new(MemoryStore::new());
        session.login().unwrap();
        session.logout().unwrap();
        session.logout().unwrap();

        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_custom_key() {
        let mut store = MemoryStore::new();
        store.set_item("fleetAppLoggedIn", "true").unwrap();
        let session = Session::with_key(store, "otherFlag");

        assert!(!session.is_logged_in());
    }
}
