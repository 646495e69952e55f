//! Session context: the single currently authenticated user
//!
//! An explicit context object rather than process-global state: it is
//! constructed once per invocation by reading the persisted `user` key,
//! and every mutation updates storage and memory within the same call so
//! the two never diverge.

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::{Store, SESSION_KEY};
use crate::user::User;

/// Session context backed by the local store
#[derive(Debug)]
pub struct Session {
    store: Store,
    user: Option<User>,
}

impl Session {
    /// Restore the session from the store, if one was persisted
    pub fn load(store: Store) -> Result<Self> {
        let user: Option<User> = store.get_json(SESSION_KEY)?;
        if let Some(user) = &user {
            debug!(username = %user.username, "restored session");
        }
        Ok(Self { store, user })
    }

    /// The authenticated user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The authenticated user, or the not-logged-in error
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(Error::NotLoggedIn)
    }

    /// Set the authenticated user, persisting it in the same call
    pub fn login(&mut self, user: User) -> Result<()> {
        self.store.set_json(SESSION_KEY, &user)?;
        debug!(username = %user.username, "session persisted");
        self.user = Some(user);
        Ok(())
    }

    /// Clear the persisted key and drop the in-memory user
    ///
    /// The next invocation re-reads storage and finds nothing; in a CLI
    /// each process start is the "full reload".
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        self.user = None;
        debug!("session cleared");
        Ok(())
    }
}
