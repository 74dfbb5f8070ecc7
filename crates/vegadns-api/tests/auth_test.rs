#![allow(clippy::unwrap_used)]
// Authentication and token cache tests for `VegaClient` using wiremock.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vegadns_api::{AuthStrategy, Credentials, Error, Token, VegaClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(credentials: Credentials) -> (MockServer, VegaClient) {
    let server = MockServer::start().await;
    let client =
        VegaClient::from_reqwest(&server.uri(), reqwest::Client::new(), credentials).unwrap();
    (server, client)
}

fn token_body(token: &str) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 3600
    })
}

fn empty_domains() -> serde_json::Value {
    json!({ "status": "ok", "total_domains": 0, "domains": [] })
}

fn expired(value: &str) -> Token {
    Token::new(value, "bearer", 50, Utc::now() - TimeDelta::seconds(120))
}

async fn mount_domains(server: &MockServer, bearer: &str) {
    Mock::given(method("GET"))
        .and(path("/1.0/domains"))
        .and(bearer_token(bearer))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_domains()))
        .mount(server)
        .await;
}

// ── Strategy selection ──────────────────────────────────────────────

#[tokio::test]
async fn test_basic_auth_is_sent_without_token_call() {
    let (server, client) = setup(Credentials::basic("user", "secret")).await;
    assert_eq!(client.auth_strategy(), AuthStrategy::Basic);

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("X123Y")))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/domains"))
        .and(basic_auth("user", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_domains()))
        .expect(1)
        .mount(&server)
        .await;

    let domains = client.list_domains(None).await.unwrap();
    assert!(domains.is_empty());
}

#[tokio::test]
async fn test_no_credentials_surfaces_api_rejection() {
    let (server, client) = setup(Credentials::None).await;

    Mock::given(method("GET"))
        .and(path("/1.0/domains"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client.list_domains(None).await.unwrap_err();
    match err {
        Error::UnexpectedStatus {
            operation,
            status,
            ref body,
        } => {
            assert_eq!(operation, "list domains");
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        ref other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
    assert!(err.is_auth_failure());
}

// ── Token issuance ──────────────────────────────────────────────────

#[tokio::test]
async fn test_oauth_issues_token_then_sends_bearer() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .and(basic_auth("user", "secret"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("X123Y")))
        .expect(1)
        .mount(&server)
        .await;
    mount_domains(&server, "X123Y").await;

    let before = Utc::now();
    client.list_domains(None).await.unwrap();
    // Second call reuses the cached token.
    client.list_domains(None).await.unwrap();

    let token = client.cached_token().await.unwrap();
    assert_eq!(token.value().expose_secret(), "X123Y");
    assert_eq!(token.token_type(), "bearer");
    assert!(token.issued_at() >= before);
    assert_eq!(token.expires_at() - token.issued_at(), TimeDelta::seconds(3600));
}

#[tokio::test]
async fn test_valid_cached_token_skips_issuance() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    mount_domains(&server, "X123Z").await;

    client
        .restore_token(Token::new("X123Z", "bearer", 50, Utc::now()))
        .await;

    client.list_domains(None).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("FRESH")))
        .expect(1)
        .mount(&server)
        .await;
    mount_domains(&server, "FRESH").await;

    client.restore_token(expired("STALE")).await;
    client.list_domains(None).await.unwrap();

    let token = client.cached_token().await.unwrap();
    assert_eq!(token.value().expose_secret(), "FRESH");
    assert!(token.is_valid());
}

#[tokio::test]
async fn test_concurrent_callers_share_one_issuance() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("SHARED"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_domains(&server, "SHARED").await;

    let (a, b) = tokio::join!(client.list_domains(None), client.list_domains(None));
    a.unwrap();
    b.unwrap();
}

// ── Issuance failures leave the cache alone ─────────────────────────

#[tokio::test]
async fn test_token_endpoint_error_status() {
    let (server, client) = setup(Credentials::oauth("user", "wrong")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    client.restore_token(expired("STALE")).await;
    let err = client.list_domains(None).await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::UnexpectedStatus { operation: "issue token", status: 400, ref body } if body == "invalid_client"
        ),
        "got: {err:?}"
    );
    let cached = client.cached_token().await.unwrap();
    assert_eq!(cached.value().expose_secret(), "STALE");
}

#[tokio::test]
async fn test_token_endpoint_malformed_body() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_domains(None).await.unwrap_err();
    assert!(
        matches!(err, Error::MalformedResponse { operation: "issue token", .. }),
        "got: {err:?}"
    );
    assert!(client.cached_token().await.is_none());
}

#[tokio::test]
async fn test_non_bearer_token_is_rejected() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "MAC123",
            "token_type": "mac",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    client.restore_token(expired("STALE")).await;
    let err = client.list_domains(None).await.unwrap_err();

    assert!(
        matches!(err, Error::UnsupportedTokenType { ref token_type } if token_type == "mac"),
        "got: {err:?}"
    );
    let cached = client.cached_token().await.unwrap();
    assert_eq!(cached.value().expose_secret(), "STALE");
}

#[tokio::test]
async fn test_explicit_issuance_does_not_touch_cache() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("NEW")))
        .mount(&server)
        .await;

    client
        .restore_token(Token::new("KEEP", "bearer", 600, Utc::now()))
        .await;

    let issued = client.issue_token().await.unwrap();
    assert_eq!(issued.value().expose_secret(), "NEW");

    let cached = client.cached_token().await.unwrap();
    assert_eq!(cached.value().expose_secret(), "KEEP");

    client.clear_token().await;
    assert!(client.cached_token().await.is_none());
}

#[tokio::test]
async fn test_cancelled_issuance_leaves_cache_untouched() {
    let (server, client) = setup(Credentials::oauth("user", "secret")).await;

    Mock::given(method("POST"))
        .and(path("/1.0/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("LATE"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    client.restore_token(expired("STALE")).await;

    let outcome =
        tokio::time::timeout(Duration::from_millis(50), client.list_domains(None)).await;
    assert!(outcome.is_err(), "expected the call to be cancelled");

    let cached = client.cached_token().await.unwrap();
    assert_eq!(cached.value().expose_secret(), "STALE");
}
