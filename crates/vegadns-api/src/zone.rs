// Authoritative zone resolution
//
// Hosted zones can sit at any depth: `c.d.e` may be hosted while
// `a.b.c.d.e` is just a record inside it. The resolver walks parent
// suffixes from most to least specific and stops at the first hosted one.

use serde::Serialize;
use tracing::{debug, trace};

use crate::client::VegaClient;
use crate::error::Error;

/// The hosted domain that owns a given name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthZone {
    pub zone: String,
    pub domain_id: i64,
}

/// Candidate zones for `fqdn`, most specific first.
///
/// One trailing dot is ignored. The name itself and the bare TLD are never
/// candidates: `a.b.example.com` yields `b.example.com`, `example.com`.
pub fn zone_candidates(fqdn: &str) -> Vec<String> {
    let name = fqdn.strip_suffix('.').unwrap_or(fqdn);
    let labels: Vec<&str> = name.split('.').collect();

    (1..labels.len().saturating_sub(1))
        .filter_map(|i| labels.get(i..))
        .map(|suffix| suffix.join("."))
        .collect()
}

impl VegaClient {
    /// Find the closest hosted ancestor zone of `fqdn`.
    ///
    /// Example: for `a.b.c.d.e` with `c.d.e` hosted, returns `c.d.e`.
    /// A candidate that is not hosted moves the walk on; any other failure
    /// (transport, status, decoding) ends it.
    pub async fn resolve_auth_zone(&self, fqdn: &str) -> Result<AuthZone, Error> {
        for candidate in zone_candidates(fqdn) {
            match self.get_domain_id(&candidate).await {
                Ok(domain_id) => {
                    debug!(fqdn, zone = %candidate, domain_id, "resolved auth zone");
                    return Ok(AuthZone {
                        zone: candidate,
                        domain_id,
                    });
                }
                Err(Error::NotFound { .. }) => {
                    trace!(candidate = %candidate, "not a hosted domain");
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::NotFound {
            entity: "auth zone",
            identifier: fqdn.strip_suffix('.').unwrap_or(fqdn).to_owned(),
        })
    }
}
