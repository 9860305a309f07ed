//! Login and registration flows.
//!
//! Each flow reduces the provider's multi-step async results into one small
//! observable state: `Idle`, `Loading`, `Success` or `Error(message)`.
//! Validation happens inline before any network call.  Both flows share a
//! single [`SessionGate`] collaborator, there is exactly one session cache.
//!

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use crate::{AuthError, SessionGate};

/// Observable state of a flow.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Map a raw provider message to the user-facing wording.  Substring match
/// on purpose, the provider's messages are not a structured taxonomy.
///
pub fn friendly_error(raw: &str) -> String {
    if raw.contains("user-not-found")
        || raw.contains("no user record")
        || raw.contains("Account not found")
        || raw.contains("INVALID_LOGIN_CREDENTIALS")
    {
        "Account not found. Please Sign Up.".to_owned()
    } else if raw.contains("password") {
        "Incorrect password.".to_owned()
    } else if raw.contains("network") {
        "Network error. Check internet connection.".to_owned()
    } else {
        raw.to_owned()
    }
}

/// Pre-flight checks for registration, surfaced before any network call.
///
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), AuthError> {
    if name.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || confirm.is_empty()
    {
        return Err(AuthError::EmptyFields);
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < 6 {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

/// The login side: email/password and federated sign-in in login-only mode.
///
#[derive(Debug)]
pub struct LoginFlow {
    gate: Arc<SessionGate>,
    tx: watch::Sender<AuthPhase>,
    rx: watch::Receiver<AuthPhase>,
}

impl LoginFlow {
    pub fn new(gate: Arc<SessionGate>) -> Self {
        let (tx, rx) = watch::channel(AuthPhase::Idle);
        LoginFlow { gate, tx, rx }
    }

    /// Subscribe to the flow state.
    ///
    pub fn state(&self) -> watch::Receiver<AuthPhase> {
        self.rx.clone()
    }

    /// Email/password login.
    ///
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) {
        trace!("login");

        if email.trim().is_empty() || password.is_empty() {
            let _ = self.tx.send(AuthPhase::Error(AuthError::EmptyFields.to_string()));
            return;
        }

        let _ = self.tx.send(AuthPhase::Loading);
        match self.gate.client().sign_in(email, password).await {
            Ok(user) => match self.gate.establish(user) {
                Ok(()) => {
                    let _ = self.tx.send(AuthPhase::Success);
                }
                Err(e) => {
                    let _ = self.tx.send(AuthPhase::Error(friendly_error(&e.to_string())));
                }
            },
            Err(e) => {
                let _ = self.tx.send(AuthPhase::Error(friendly_error(&e.to_string())));
            }
        }
    }

    /// Federated sign-in, login-only mode: an account the provider had to
    /// create on the fly is a failure.  The implicit account is deleted (or,
    /// failing that, signed out) so nothing orphaned is left behind.
    ///
    #[tracing::instrument(skip(self, id_token))]
    pub async fn login_federated(&self, id_token: &str) {
        trace!("federated login");

        let _ = self.tx.send(AuthPhase::Loading);
        match self.gate.client().sign_in_with_idp(id_token).await {
            Ok(res) if res.is_new => {
                if self
                    .gate
                    .client()
                    .delete_account(&res.user.id_token)
                    .await
                    .is_err()
                {
                    self.gate.sign_out();
                }
                let _ = self.tx.send(AuthPhase::Error(
                    "Account not found. Please Sign Up first.".to_owned(),
                ));
            }
            Ok(res) => match self.gate.establish(res.user) {
                Ok(()) => {
                    let _ = self.tx.send(AuthPhase::Success);
                }
                Err(e) => {
                    let _ = self.tx.send(AuthPhase::Error(friendly_error(&e.to_string())));
                }
            },
            Err(e) => {
                let _ = self.tx.send(AuthPhase::Error(friendly_error(&e.to_string())));
            }
        }
    }
}

/// The registration side.  Raw provider messages are surfaced unmapped, the
/// friendly wording only applies to login.
///
#[derive(Debug)]
pub struct SignUpFlow {
    gate: Arc<SessionGate>,
    tx: watch::Sender<AuthPhase>,
    rx: watch::Receiver<AuthPhase>,
}

impl SignUpFlow {
    pub fn new(gate: Arc<SessionGate>) -> Self {
        let (tx, rx) = watch::channel(AuthPhase::Idle);
        SignUpFlow { gate, tx, rx }
    }

    /// Subscribe to the flow state.
    ///
    pub fn state(&self) -> watch::Receiver<AuthPhase> {
        self.rx.clone()
    }

    /// Email/password registration with the full validation set.
    ///
    #[tracing::instrument(skip(self, password, confirm))]
    pub async fn register(&self, name: &str, email: &str, password: &str, confirm: &str) {
        trace!("register");

        if let Err(e) = validate_registration(name, email, password, confirm) {
            let _ = self.tx.send(AuthPhase::Error(e.to_string()));
            return;
        }

        let _ = self.tx.send(AuthPhase::Loading);
        match self.gate.client().sign_up(email, password).await {
            Ok(user) => match self.gate.establish(user) {
                Ok(()) => {
                    let _ = self.tx.send(AuthPhase::Success);
                }
                Err(e) => {
                    let _ = self.tx.send(AuthPhase::Error(e.to_string()));
                }
            },
            Err(e) => {
                let _ = self.tx.send(AuthPhase::Error(e.to_string()));
            }
        }
    }

    /// Federated sign-up: creating a new account is allowed here.
    ///
    #[tracing::instrument(skip(self, id_token))]
    pub async fn register_federated(&self, id_token: &str) {
        trace!("federated sign-up");

        let _ = self.tx.send(AuthPhase::Loading);
        match self.gate.client().sign_in_with_idp(id_token).await {
            Ok(res) => match self.gate.establish(res.user) {
                Ok(()) => {
                    let _ = self.tx.send(AuthPhase::Success);
                }
                Err(e) => {
                    let _ = self.tx.send(AuthPhase::Error(e.to_string()));
                }
            },
            Err(e) => {
                let _ = self.tx.send(AuthPhase::Error(e.to_string()));
            }
        }
    }
}
