// VegaDNS API HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction, per-request
// auth stamping, and status-checked JSON decoding. Endpoint groups
// (tokens, domains, records, zones) live as inherent methods in their
// own files.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::auth::{AuthStrategy, Credentials};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::token::Token;
use crate::transport::TransportConfig;

/// The API version segment prefixed to every endpoint path.
pub const API_VERSION: &str = "1.0";

/// Sent on every request, including query-string ones; the API expects it.
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the VegaDNS REST API.
///
/// Holds the configured [`Credentials`] and, for OAuth, the most recently
/// issued bearer token. The token slot sits behind an async mutex so that
/// concurrent callers sharing one client trigger at most one issuance.
pub struct VegaClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    token: Mutex<Option<Arc<Token>>>,
}

impl std::fmt::Debug for VegaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VegaClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.credentials.strategy())
            .finish_non_exhaustive()
    }
}

impl VegaClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from the API root URL, credentials, and transport settings.
    ///
    /// `base_url` is the API root (e.g. `https://vegadns.example.com`);
    /// the `/1.0/` version segment is appended here.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        debug!(base_url = %base_url, auth = ?credentials.strategy(), "created VegaDNS client");
        Ok(Self {
            http,
            base_url,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// Build a client from a resolved [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        Self::new(
            config.base_url.as_str(),
            config.credentials.clone(),
            &config.transport,
        )
    }

    /// Append the version segment, keeping a trailing slash so that
    /// relative joins land under it.
    ///
    /// `https://host` -> `https://host/1.0/`
    /// `https://host/api/1.0` -> `https://host/api/1.0/`
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(&format!("/{API_VERSION}")) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/{API_VERSION}/"));
        }

        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The versioned API base URL (always ends in `/1.0/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The auth strategy requests are stamped with.
    pub fn auth_strategy(&self) -> AuthStrategy {
        self.credentials.strategy()
    }

    pub(crate) fn token_slot(&self) -> &Mutex<Option<Arc<Token>>> {
        &self.token
    }

    // ── Request building ─────────────────────────────────────────────

    /// Join a relative endpoint path (e.g. `"records/2"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Build a fully-formed, authorized request for one API call.
    ///
    /// `GET` and `DELETE` carry `params` as the query string and no body;
    /// every other method carries them as a form-encoded body.
    pub async fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Request, Error> {
        let url = self.url(path)?;
        debug!("{method} {url} params={params:?}");

        let query_only = method == Method::GET || method == Method::DELETE;
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        if query_only {
            if !params.is_empty() {
                builder = builder.query(params);
            }
        } else {
            builder = builder.body(encode_form(params));
        }

        let builder = self.authorize(builder).await?;
        Ok(builder.build()?)
    }

    /// Stamp exactly one authentication mechanism onto a request.
    ///
    /// OAuth may block on a token issuance round-trip before returning.
    async fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        match &self.credentials {
            Credentials::None => Ok(builder),
            Credentials::Basic { user, pass } => {
                Ok(builder.basic_auth(user, Some(pass.expose_secret())))
            }
            Credentials::OAuth { .. } => {
                let token = self.token().await?;
                Ok(builder.bearer_auth(token.value().expose_secret()))
            }
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    pub(crate) async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, Error> {
        Ok(self.http.execute(request).await?)
    }

    /// Build, send, and decode a JSON response.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        expected: StatusCode,
        operation: &'static str,
    ) -> Result<T, Error> {
        let request = self.build_request(method, path, params).await?;
        let resp = self.send(request).await?;
        decode(resp, expected, operation).await
    }

    /// Build, send, and check the status of a call with no response body.
    pub(crate) async fn call_empty(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        expected: StatusCode,
        operation: &'static str,
    ) -> Result<(), Error> {
        let request = self.build_request(method, path, params).await?;
        let resp = self.send(request).await?;
        expect_status(resp, expected, operation).await.map(drop)
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Fail with `UnexpectedStatus` unless the response carries `expected`.
///
/// The error body is read best-effort; a failed read reports it as empty.
pub(crate) async fn expect_status(
    resp: reqwest::Response,
    expected: StatusCode,
    operation: &'static str,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status == expected {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::UnexpectedStatus {
        operation,
        status: status.as_u16(),
        body,
    })
}

/// Check the status, then parse the body as JSON into `T`.
pub(crate) async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    expected: StatusCode,
    operation: &'static str,
) -> Result<T, Error> {
    let resp = expect_status(resp, expected, operation).await?;
    let body = resp.text().await?;

    serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
        operation,
        message: e.to_string(),
        body,
    })
}

pub(crate) fn encode_form(params: &[(&str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish()
}
