use secrecy::SecretString;

/// Which authentication strategy a client stamps onto its requests.
///
/// Marker enum (no data) -- the actual credentials live in [`Credentials`].
/// Useful for branching on auth flow without carrying secret material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// No `Authorization` header; the API decides what to do.
    None,
    /// HTTP Basic auth on every request.
    Basic,
    /// OAuth2 client-credentials: a bearer token issued by `POST /1.0/token`.
    OAuth,
}

/// Credentials for authenticating with a VegaDNS API.
///
/// Exactly one variant is active per client. "Both configured" cannot be
/// represented here; configuration layers reject it before building a client.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// No credentials. Requests go out unauthenticated.
    #[default]
    None,

    /// Account email/username and password, sent as HTTP Basic auth.
    Basic { user: String, pass: SecretString },

    /// API key and secret, exchanged for a bearer token.
    /// Generated in the VegaDNS UI under "API Keys".
    OAuth { key: String, secret: SecretString },
}

impl Credentials {
    /// Basic auth credentials.
    pub fn basic(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self::Basic {
            user: user.into(),
            pass: SecretString::from(pass.into()),
        }
    }

    /// OAuth client-credentials.
    pub fn oauth(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::OAuth {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// The strategy these credentials select.
    pub fn strategy(&self) -> AuthStrategy {
        match self {
            Self::None => AuthStrategy::None,
            Self::Basic { .. } => AuthStrategy::Basic,
            Self::OAuth { .. } => AuthStrategy::OAuth,
        }
    }
}
