// OAuth2 client-credentials tokens
//
// The bearer token is cached on the client and checked lazily on every
// authenticated request. Issuance itself is always signed with Basic auth
// over the API key/secret: a bearer token cannot bootstrap itself.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::auth::Credentials;
use crate::client::{FORM_CONTENT_TYPE, VegaClient, decode, encode_form};
use crate::error::Error;

/// The only token type the API is known to issue.
pub const BEARER: &str = "bearer";

/// An issued OAuth bearer token.
///
/// Immutable once built: a refresh replaces the whole value in the cache.
#[derive(Debug, Clone)]
pub struct Token {
    value: SecretString,
    token_type: String,
    expires_in: i64,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Token {
    /// Build a token issued at `issued_at`, valid for `expires_in` seconds.
    pub fn new(
        value: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        // Non-positive lifetimes expire on issue; overflow saturates upward.
        let expires_at = if expires_in <= 0 {
            issued_at
        } else {
            TimeDelta::try_seconds(expires_in)
                .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        };

        Self {
            value: SecretString::from(value.into()),
            token_type: token_type.into(),
            expires_in,
            issued_at,
            expires_at,
        }
    }

    pub fn value(&self) -> &SecretString {
        &self.value
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds, as reported by the token endpoint.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid strictly before `expires_at`. An empty token is never valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.expose_secret().is_empty() && now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// `200` body of `POST /1.0/token`.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
}

impl VegaClient {
    /// Return a valid bearer token, issuing a new one if the cache is
    /// empty or expired.
    ///
    /// The cache lock is held across issuance, so concurrent callers wait
    /// for the one in-flight exchange instead of starting their own. The
    /// cache is written only after a token passes every check; a failed or
    /// cancelled issuance leaves the previous value in place.
    pub async fn token(&self) -> Result<Arc<Token>, Error> {
        let mut slot = self.token_slot().lock().await;

        if let Some(token) = slot.as_ref().filter(|t| t.is_valid()) {
            trace!(expires_at = %token.expires_at(), "using cached bearer token");
            return Ok(Arc::clone(token));
        }

        let token = Arc::new(self.issue_token().await?);
        *slot = Some(Arc::clone(&token));
        Ok(token)
    }

    /// Exchange the API key/secret for a fresh token.
    ///
    /// `POST /1.0/token` with `grant_type=client_credentials`, Basic-auth
    /// signed. Does not touch the cache; use [`token`](Self::token) for that.
    pub async fn issue_token(&self) -> Result<Token, Error> {
        let Credentials::OAuth { key, secret } = self.credentials() else {
            return Err(Error::AuthenticationUnavailable {
                message: "token issuance requires an API key and secret".into(),
            });
        };

        let url = self.url("token")?;
        debug!("requesting bearer token at {url}");

        let request = self
            .http()
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .basic_auth(key, Some(secret.expose_secret()))
            .body(encode_form(&[("grant_type", "client_credentials".into())]))
            .build()?;

        let issued_at = Utc::now();
        let resp = self.send(request).await?;
        let raw: TokenResponse = decode(resp, StatusCode::OK, "issue token").await?;

        if raw.token_type != BEARER {
            return Err(Error::UnsupportedTokenType {
                token_type: raw.token_type,
            });
        }

        let token = Token::new(raw.access_token, raw.token_type, raw.expires_in, issued_at);
        debug!(expires_at = %token.expires_at(), "bearer token issued");
        Ok(token)
    }

    /// The currently cached token, valid or not.
    pub async fn cached_token(&self) -> Option<Arc<Token>> {
        self.token_slot().lock().await.clone()
    }

    /// Seed the cache with a previously issued token.
    pub async fn restore_token(&self, token: Token) {
        *self.token_slot().lock().await = Some(Arc::new(token));
    }

    /// Drop the cached token; the next OAuth request issues a new one.
    pub async fn clear_token(&self) {
        *self.token_slot().lock().await = None;
    }
}
