//! Module for handling the cached session and the gate built on top of it.
//!
//! The session granted by the identity provider is cached as a small JSON
//! file under the config directory so a restart does not force a new login.
//! A cached session is never trusted blindly: the gate replays it against
//! the provider once at startup and purges it when the provider disowns it.
//!

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{trace, warn};

use safar_common::config_dir;

use crate::{AuthError, IdentityClient, User};

/// Session cache filename, lives under the config dir.
const SESSION_FILE: &str = "session.json";

/// Disk cache for the current session.
///
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::in_dir(config_dir())
    }

    /// Use a different directory (tests).
    ///
    pub fn in_dir(dir: PathBuf) -> Self {
        SessionStore {
            path: dir.join(SESSION_FILE),
        }
    }

    /// Load the cached session, refusing expired ones.
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<User, AuthError> {
        trace!("load cached session {:?}", self.path);

        if !self.path.exists() {
            return Err(AuthError::NoSession);
        }
        let data = fs::read_to_string(&self.path).map_err(|_| AuthError::NoSession)?;
        let user: User = serde_json::from_str(&data).map_err(|_| AuthError::NoSession)?;

        // Check stored token expiration date
        //
        if Utc::now().timestamp() > user.expires_at {
            warn!("cached session in {:?} has expired, deleting!", self.path);
            self.purge();
            return Err(AuthError::Expired);
        }
        trace!("session is valid");
        Ok(user)
    }

    /// Store (overwrite) the session.
    ///
    #[tracing::instrument(skip(self, user))]
    pub fn store(&self, user: &User) -> Result<(), AuthError> {
        trace!("store session {:?}", self.path);

        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .map_err(|e| AuthError::Network(format!("session store: {e}")))?;
            }
        }
        let data = serde_json::json!(user).to_string();
        fs::write(&self.path, data).map_err(|e| AuthError::Network(format!("session store: {e}")))
    }

    /// Purge the cached session, best effort.
    ///
    #[tracing::instrument(skip(self))]
    pub fn purge(&self) {
        trace!("purge session {:?}", self.path);
        let _ = fs::remove_file(&self.path);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Which screen the application starts on.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartScreen {
    Home,
    Login,
}

/// Session-presence gate: one producer for the `current user` observable,
/// shared by every flow that can establish or tear down a session.
///
#[derive(Debug)]
pub struct SessionGate {
    client: IdentityClient,
    store: SessionStore,
    tx: watch::Sender<Option<User>>,
    rx: watch::Receiver<Option<User>>,
}

impl SessionGate {
    pub fn new(client: IdentityClient, store: SessionStore) -> Self {
        let (tx, rx) = watch::channel(None);
        SessionGate {
            client,
            store,
            tx,
            rx,
        }
    }

    /// The provider client, shared with the flows.
    ///
    pub fn client(&self) -> &IdentityClient {
        &self.client
    }

    /// Subscribe to the session observable.
    ///
    pub fn current_user(&self) -> watch::Receiver<Option<User>> {
        self.rx.clone()
    }

    /// Replay a previously cached session against the provider.  A stale or
    /// revoked credential forces sign-out, same as no session at all.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self) -> Option<User> {
        let user = match self.store.load() {
            Ok(user) => user,
            Err(e) => {
                trace!("no cached session: {e}");
                let _ = self.tx.send(None);
                return None;
            }
        };

        match self.client.lookup(&user.id_token).await {
            Ok(()) => {
                let _ = self.tx.send(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                warn!("cached session rejected by provider: {e}");
                self.store.purge();
                let _ = self.tx.send(None);
                None
            }
        }
    }

    /// Establish a fresh session: cache it and publish it.
    ///
    #[tracing::instrument(skip(self, user))]
    pub fn establish(&self, user: User) -> Result<(), AuthError> {
        self.store.store(&user)?;
        let _ = self.tx.send(Some(user));
        Ok(())
    }

    /// Tear the session down, locally and in the observable.
    ///
    #[tracing::instrument(skip(self))]
    pub fn sign_out(&self) {
        self.store.purge();
        let _ = self.tx.send(None);
    }

    /// Navigation decision at startup, a pure function of the observable.
    ///
    pub fn start_screen(&self) -> StartScreen {
        if self.rx.borrow().is_some() {
            StartScreen::Home
        } else {
            StartScreen::Login
        }
    }
}
