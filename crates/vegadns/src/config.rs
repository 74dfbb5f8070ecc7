//! Flag-aware profile resolution.
//!
//! Global flags and their `VEGADNS_*` env vars are layered onto the active
//! profile, then `vegadns-config` resolves it into a `ClientConfig`.

use secrecy::SecretString;

use vegadns_api::ClientConfig;
use vegadns_config::{Config, Profile, SecretOverrides};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A profile after flags have been applied.
#[derive(Debug)]
pub struct Resolved {
    pub profile: String,
    pub client: ClientConfig,
    /// TTL for records created without an explicit `--ttl`.
    pub ttl: i64,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate the active profile + global flags into a `ClientConfig`.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => config.profile(&profile_name)?.clone(),
        None => Profile::default(),
    };
    apply_flags(&mut profile, global);

    if profile.url.is_empty() {
        return Err(CliError::NoConfig {
            path: vegadns_config::config_path().display().to_string(),
        });
    }

    let overrides = SecretOverrides {
        password: filled(global.password.as_deref()).map(|p| SecretString::from(p.to_owned())),
        api_secret: filled(global.api_secret.as_deref())
            .map(|s| SecretString::from(s.to_owned())),
    };
    let client = vegadns_config::profile_to_client_config(
        &profile,
        &profile_name,
        &config.defaults,
        &overrides,
    )?;

    Ok(Resolved {
        client,
        ttl: profile.effective_ttl(&config.defaults),
        profile: profile_name,
    })
}

/// Layer global flags (and their env vars) onto a profile.
///
/// `--username` switches to basic auth even if the profile is OAuth, and
/// `--api-key` does the reverse. Passing both is left for credential
/// resolution to reject.
fn apply_flags(profile: &mut Profile, global: &GlobalOpts) {
    let flag_user = filled(global.username.as_deref());
    let flag_key = filled(global.api_key.as_deref());

    if let Some(url) = filled(global.url.as_deref()) {
        profile.url = url.to_owned();
    }
    if let Some(user) = flag_user {
        profile.username = Some(user.to_owned());
        if flag_key.is_none() {
            profile.api_key = None;
        }
    }
    if let Some(key) = flag_key {
        profile.api_key = Some(key.to_owned());
        if flag_user.is_none() {
            profile.username = None;
        }
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use secrecy::ExposeSecret;

    use vegadns_api::{AuthStrategy, Credentials, TlsMode};

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["vegadns"];
        argv.extend_from_slice(args);
        argv.push("token");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                url: "https://vegadns.example.com".into(),
                api_key: Some("key".into()),
                api_secret: Some("profile-secret".into()),
                ttl: Some(60),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let resolved = resolve(&global(&[]), &config()).unwrap();
        assert_eq!(resolved.profile, "default");
        assert_eq!(resolved.ttl, 60);
        assert_eq!(resolved.client.credentials.strategy(), AuthStrategy::OAuth);
        assert_eq!(resolved.client.transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_profile() {
        let resolved = resolve(
            &global(&[
                "--url",
                "http://127.0.0.1:5000",
                "--api-secret",
                "flag-secret",
                "--timeout",
                "3",
                "-k",
            ]),
            &config(),
        )
        .unwrap();

        assert_eq!(resolved.client.base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(resolved.client.transport.timeout, Duration::from_secs(3));
        assert!(matches!(
            resolved.client.transport.tls,
            TlsMode::DangerAcceptInvalid
        ));
        match resolved.client.credentials {
            Credentials::OAuth { ref secret, .. } => {
                assert_eq!(secret.expose_secret(), "flag-secret");
            }
            ref other => panic!("expected OAuth, got {other:?}"),
        }
    }

    #[test]
    fn username_flag_switches_to_basic() {
        let resolved = resolve(
            &global(&["--username", "admin@example.com", "--password", "pw"]),
            &config(),
        )
        .unwrap();
        assert_eq!(resolved.client.credentials.strategy(), AuthStrategy::Basic);
    }

    #[test]
    fn api_key_flag_replaces_basic_profile() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                url: "https://vegadns.example.com".into(),
                username: Some("admin@example.com".into()),
                password: Some("pw".into()),
                ..Profile::default()
            },
        );

        let resolved = resolve(
            &global(&["--api-key", "key", "--api-secret", "flag-secret"]),
            &cfg,
        )
        .unwrap();
        match resolved.client.credentials {
            Credentials::OAuth { ref key, ref secret } => {
                assert_eq!(key, "key");
                assert_eq!(secret.expose_secret(), "flag-secret");
            }
            ref other => panic!("expected OAuth, got {other:?}"),
        }
    }

    #[test]
    fn both_credential_flags_conflict() {
        let err = resolve(
            &global(&["--username", "admin", "--api-key", "key"]),
            &config(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::ConflictingCredentials { .. }));
    }

    #[test]
    fn missing_url_reports_config_path() {
        let err = resolve(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let err = resolve(&global(&["--profile", "staging"]), &config()).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref name, ref available } if name == "staging" && available == "default")
        );
    }

    #[test]
    fn url_flag_alone_is_anonymous() {
        let resolved = resolve(
            &global(&["--url", "https://vegadns.example.com"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(resolved.client.credentials.strategy(), AuthStrategy::None);
        assert_eq!(resolved.ttl, vegadns_api::acme::DEFAULT_TTL);
    }
}
