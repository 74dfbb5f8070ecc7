//! Shared configuration for VegaDNS tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `vegadns_api::ClientConfig`. Callers with their own
//! overrides (CLI flags) layer them onto a cloned [`Profile`] and pass
//! secrets through [`SecretOverrides`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vegadns_api::{ClientConfig, Credentials, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {secret} configured for profile '{profile}'")]
    NoCredentials {
        profile: String,
        secret: &'static str,
    },

    #[error("profile '{profile}' sets both username (basic auth) and api_key (OAuth); pick one")]
    ConflictingCredentials { profile: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names().join(", "),
            })
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// TTL in seconds for records created by the ACME helpers.
    #[serde(default = "default_ttl")]
    pub ttl: i64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            ttl: default_ttl(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_ttl() -> i64 {
    vegadns_api::acme::DEFAULT_TTL
}

/// A named VegaDNS API profile.
///
/// Setting `username` selects basic auth, setting `api_key` selects OAuth.
/// Setting neither sends requests unauthenticated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API root URL (e.g., "https://vegadns.example.com"), without `/1.0`.
    pub url: String,

    /// Account email for basic auth.
    pub username: Option<String>,

    /// Basic auth password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// OAuth API key.
    pub api_key: Option<String>,

    /// OAuth API secret (plaintext; prefer keyring or env var).
    pub api_secret: Option<String>,

    /// Environment variable name containing the API secret.
    pub api_secret_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override challenge record TTL.
    pub ttl: Option<i64>,
}

impl Profile {
    pub fn effective_timeout(&self, defaults: &Defaults) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(defaults.timeout))
    }

    pub fn effective_ttl(&self, defaults: &Defaults) -> i64 {
        self.ttl.unwrap_or(defaults.ttl)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vegadns", "vegadns").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vegadns");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment.
///
/// Environment keys use `__` as the nesting separator, e.g.
/// `VEGADNS_DEFAULTS__TIMEOUT=10` or `VEGADNS_PROFILES__PROD__URL=...`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VEGADNS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Secrets supplied outside the profile. They win over the profile's
/// env var, keyring, and plaintext sources.
#[derive(Debug, Default)]
pub struct SecretOverrides {
    pub password: Option<SecretString>,
    pub api_secret: Option<SecretString>,
}

/// Resolve one secret: named env var → system keyring → plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    keyring_entry: &str,
    plaintext: Option<&str>,
    profile_name: &str,
    secret: &'static str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's *_env → env var lookup
    if let Some(env_name) = env_name {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("vegadns", &format!("{profile_name}/{keyring_entry}")) {
        if let Ok(value) = entry.get_password() {
            return Ok(SecretString::from(value));
        }
    }

    // 3. Plaintext in config
    if let Some(value) = plaintext {
        return Ok(SecretString::from(value.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        secret,
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_secret(
        profile.password_env.as_deref(),
        "password",
        non_empty(profile.password.as_ref()),
        profile_name,
        "password",
    )
}

fn resolve_api_secret(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    resolve_secret(
        profile.api_secret_env.as_deref(),
        "api-secret",
        non_empty(profile.api_secret.as_ref()),
        profile_name,
        "API secret",
    )
}

/// Resolve `Credentials` from which fields a profile sets.
///
/// `username` selects basic auth and `api_key` selects OAuth; setting both
/// is a conflict. The matching secret comes from `overrides` first, then
/// the profile's env var, keyring entry, and plaintext value.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    overrides: &SecretOverrides,
) -> Result<Credentials, ConfigError> {
    match (
        non_empty(profile.username.as_ref()),
        non_empty(profile.api_key.as_ref()),
    ) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingCredentials {
            profile: profile_name.into(),
        }),
        (Some(user), None) => {
            let pass = match overrides.password {
                Some(ref pass) => pass.clone(),
                None => resolve_password(profile, profile_name)?,
            };
            Ok(Credentials::Basic {
                user: user.to_owned(),
                pass,
            })
        }
        (None, Some(key)) => {
            let secret = match overrides.api_secret {
                Some(ref secret) => secret.clone(),
                None => resolve_api_secret(profile, profile_name)?,
            };
            Ok(Credentials::OAuth {
                key: key.to_owned(),
                secret,
            })
        }
        (None, None) => Ok(Credentials::None),
    }
}

/// TLS mode for a profile: `insecure` wins over `ca_cert`.
pub fn resolve_tls(profile: &Profile, defaults: &Defaults) -> TlsMode {
    if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    }
}

/// Parse and validate a profile's API root URL.
pub fn parse_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("expected http or https, got '{other}'"),
        }),
    }
}

/// Build a `ClientConfig` from a profile.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    overrides: &SecretOverrides,
) -> Result<ClientConfig, ConfigError> {
    let base_url = parse_url(&profile.url)?;
    let credentials = resolve_credentials(profile, profile_name, overrides)?;

    Ok(ClientConfig {
        base_url,
        credentials,
        transport: TransportConfig {
            tls: resolve_tls(profile, defaults),
            timeout: profile.effective_timeout(defaults),
        },
    })
}
