//! Identity provider specifics
//!
//! Phases:
//! 1. submit credentials (or a federated id token) to get a session token
//! 2. use the token for liveness lookups and account deletion
//!
//! The surface is the Identity Toolkit style REST API: one base URL, one API
//! key in the query string, JSON bodies both ways.  Remote rejections come
//! back as `{"error": {"message": "…"}}` and are surfaced verbatim in
//! [`AuthError::Provider`], friendly wording is the flows' business.
//!

use chrono::Utc;
use clap::{crate_name, crate_version};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::AuthError;

/// Session granted by the provider, also what we cache on disk.
///
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// Provider-side account id
    pub uid: String,
    /// Email as username
    pub email: String,
    /// Bearer token for subsequent operations
    pub id_token: String,
    /// Expiration date (unix seconds)
    pub expires_at: i64,
}

/// Result of a federated sign-in: the session plus whether the provider had
/// to create the account on the fly.
///
#[derive(Clone, Debug)]
pub struct FederatedSignIn {
    pub user: User,
    pub is_new: bool,
}

/// Credentials to submit to the provider to get a token
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials {
    /// Email as username
    email: String,
    /// Password
    password: String,
    return_secure_token: bool,
}

/// Payload for federated sign-in
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpPayload {
    post_body: String,
    request_uri: String,
    return_secure_token: bool,
}

/// Token shaped answer from sign-in/sign-up/sign-in-with-idp
///
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    #[serde(default)]
    email: String,
    local_id: String,
    #[serde(default)]
    expires_in: String,
    #[serde(default)]
    is_new_user: bool,
}

impl TokenResponse {
    fn into_user(self) -> User {
        let ttl = self.expires_in.parse::<i64>().unwrap_or(3600);
        User {
            uid: self.local_id,
            email: self.email,
            id_token: self.id_token,
            expires_at: Utc::now().timestamp() + ttl,
        }
    }
}

/// Error body from the provider
///
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// IdentityClient represents what is needed to connect & auth against the
/// identity provider.
///
#[derive(Clone, Debug)]
pub struct IdentityClient {
    /// Base site url taken from config
    pub base_url: String,
    /// API key appended to every call
    pub api_key: String,
    /// reqwest client
    pub client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        IdentityClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Email/password sign-in.
    ///
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        trace!("authenticate as ({:?})", email);

        let cred = Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
            return_secure_token: true,
        };
        let resp: TokenResponse = self.post("accounts:signInWithPassword", &cred).await?;
        Ok(resp.into_user())
    }

    /// Email/password account creation.
    ///
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        trace!("register ({:?})", email);

        let cred = Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
            return_secure_token: true,
        };
        let resp: TokenResponse = self.post("accounts:signUp", &cred).await?;
        Ok(resp.into_user())
    }

    /// Federated sign-in with an external id token.  The provider creates
    /// the account on the fly when it does not exist yet and reports that
    /// through `isNewUser`.
    ///
    #[tracing::instrument(skip(self, id_token))]
    pub async fn sign_in_with_idp(&self, id_token: &str) -> Result<FederatedSignIn, AuthError> {
        trace!("federated sign-in");

        let payload = IdpPayload {
            post_body: format!("id_token={id_token}&providerId=google.com"),
            request_uri: "http://localhost".to_owned(),
            return_secure_token: true,
        };
        let resp: TokenResponse = self.post("accounts:signInWithIdp", &payload).await?;
        let is_new = resp.is_new_user;
        Ok(FederatedSignIn {
            user: resp.into_user(),
            is_new,
        })
    }

    /// Liveness check on a cached token, fails when the account was revoked
    /// or removed server-side.
    ///
    #[tracing::instrument(skip(self, id_token))]
    pub async fn lookup(&self, id_token: &str) -> Result<(), AuthError> {
        trace!("lookup");

        let body = serde_json::json!({ "idToken": id_token });
        let _: serde_json::Value = self.post("accounts:lookup", &body).await?;
        Ok(())
    }

    /// Delete the account behind the token.
    ///
    #[tracing::instrument(skip(self, id_token))]
    pub async fn delete_account(&self, id_token: &str) -> Result<(), AuthError> {
        trace!("delete account");

        let body = serde_json::json!({ "idToken": id_token });
        let _: serde_json::Value = self.post("accounts:delete", &body).await?;
        Ok(())
    }

    /// One POST against the provider, JSON in, JSON out, provider error
    /// bodies decoded into [`AuthError::Provider`].
    ///
    async fn post<B, R>(&self, op: &str, body: &B) -> Result<R, AuthError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, op);
        let resp = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<R>()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))
        } else {
            let text = resp
                .text()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            debug!("provider error ({status}): {text}");
            let msg = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(err) => err.error.message,
                Err(_) => format!("{status}"),
            };
            Err(AuthError::Provider(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn setup(server: &MockServer) -> IdentityClient {
        init();
        IdentityClient::new(&server.base_url(), "KEY")
    }

    #[tokio::test]
    async fn test_sign_in_ok() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/accounts:signInWithPassword")
                    .query_param("key", "KEY")
                    .header(
                        "user-agent",
                        format!("{}/{}", crate_name!(), crate_version!()),
                    )
                    .json_body(json!({
                        "email": "user@example.net",
                        "password": "hunter42",
                        "returnSecureToken": true
                    }));
                then.status(200).json_body(json!({
                    "idToken": "FOOBAR",
                    "email": "user@example.net",
                    "localId": "uid-1",
                    "expiresIn": "3600"
                }));
            })
            .await;

        let client = setup(&server);
        let user = client.sign_in("user@example.net", "hunter42").await;
        m.assert_async().await;
        let user = user.unwrap();
        assert_eq!("FOOBAR", user.id_token);
        assert_eq!("uid-1", user.uid);
        assert!(user.expires_at > Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(400)
                    .json_body(json!({"error": {"message": "INVALID_LOGIN_CREDENTIALS"}}));
            })
            .await;

        let client = setup(&server);
        let res = client.sign_in("user@example.net", "nope").await;
        assert_eq!(
            Err(AuthError::Provider("INVALID_LOGIN_CREDENTIALS".into())),
            res
        );
    }

    #[tokio::test]
    async fn test_idp_reports_new_user() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithIdp");
                then.status(200).json_body(json!({
                    "idToken": "NEWTOK",
                    "email": "new@example.net",
                    "localId": "uid-9",
                    "expiresIn": "3600",
                    "isNewUser": true
                }));
            })
            .await;

        let client = setup(&server);
        let res = client.sign_in_with_idp("google-token").await.unwrap();
        assert!(res.is_new);
        assert_eq!("uid-9", res.user.uid);
    }
}
