//! This is the module handling the identity sub-commands (`login`, `signup`,
//! `logout`, `whoami`).
//!

use std::sync::Arc;

use eyre::{eyre, Result};
use tracing::trace;

use safar_auth::{AuthPhase, LoginFlow, SessionGate, SessionStore, SignUpFlow, StartScreen};

use crate::{Config, LoginOpts, SignupOpts};

/// Sign in, email/password or federated, and cache the session.
///
#[tracing::instrument(skip(cfg, lopts))]
pub async fn login(cfg: &Config, lopts: &LoginOpts) -> Result<()> {
    trace!("login");

    let gate = Arc::new(SessionGate::new(cfg.identity()?, SessionStore::new()));
    let flow = LoginFlow::new(Arc::clone(&gate));

    match &lopts.google {
        Some(id_token) => flow.login_federated(id_token).await,
        None => {
            // clap enforces presence when `--google` is absent.
            //
            let email = lopts.email.as_deref().unwrap_or_default();
            let password = lopts.password.as_deref().unwrap_or_default();
            flow.login(email, password).await
        }
    }
    let phase = flow.state().borrow().clone();
    finish(&gate, phase)
}

/// Create an account and cache the session.
///
#[tracing::instrument(skip(cfg, sopts))]
pub async fn signup(cfg: &Config, sopts: &SignupOpts) -> Result<()> {
    trace!("signup");

    let gate = Arc::new(SessionGate::new(cfg.identity()?, SessionStore::new()));
    let flow = SignUpFlow::new(Arc::clone(&gate));

    flow.register(&sopts.name, &sopts.email, &sopts.password, &sopts.confirm)
        .await;
    let phase = flow.state().borrow().clone();
    finish(&gate, phase)
}

/// Drop the cached session.  Purely local, no identity provider involved.
///
pub fn logout() {
    SessionStore::new().purge();
    eprintln!("Signed out.");
}

/// Restore the cached session and show who it belongs to.
///
#[tracing::instrument(skip(cfg))]
pub async fn whoami(cfg: &Config) -> Result<()> {
    trace!("whoami");

    let gate = SessionGate::new(cfg.identity()?, SessionStore::new());
    let user = gate.restore().await;

    match gate.start_screen() {
        StartScreen::Home => {
            if let Some(user) = user {
                eprintln!("Signed in as {} ({})", user.email, user.uid);
            }
        }
        StartScreen::Login => eprintln!("Not signed in."),
    }
    Ok(())
}

/// Common tail of the two flows.
///
fn finish(gate: &SessionGate, phase: AuthPhase) -> Result<()> {
    match phase {
        AuthPhase::Success => {
            if let Some(user) = gate.current_user().borrow().clone() {
                eprintln!("Signed in as {} ({})", user.email, user.uid);
            }
            Ok(())
        }
        AuthPhase::Error(msg) => Err(eyre!(msg)),
        _ => Err(eyre!("authentication did not finish")),
    }
}
