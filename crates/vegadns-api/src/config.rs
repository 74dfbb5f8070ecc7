use url::Url;

use crate::auth::Credentials;
use crate::transport::TransportConfig;

/// Everything needed to build a [`VegaClient`](crate::VegaClient).
///
/// Produced by configuration layers (profiles, env, CLI flags); the client
/// itself never reads files or the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without the `/1.0` version segment.
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}
