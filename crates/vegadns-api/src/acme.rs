// ACME DNS-01 helpers
//
// Present and clean up `_acme-challenge` TXT records. The record name is
// the full challenge FQDN without its trailing dot.

use tracing::info;

use crate::client::VegaClient;
use crate::error::Error;
use crate::zone::AuthZone;

/// TTL for challenge records when the caller has no preference.
pub const DEFAULT_TTL: i64 = 10;

const TXT: &str = "TXT";

impl VegaClient {
    /// Publish `value` as a TXT record at `fqdn` inside its auth zone.
    pub async fn present_txt(&self, fqdn: &str, value: &str, ttl: i64) -> Result<AuthZone, Error> {
        let name = unqualified(fqdn);
        let zone = self.resolve_auth_zone(name).await?;

        self.create_txt_record(zone.domain_id, name, value, ttl)
            .await?;

        info!(name, zone = %zone.zone, ttl, "challenge record presented");
        Ok(zone)
    }

    /// Remove the TXT record at `fqdn`, returning the deleted record id.
    pub async fn cleanup_txt(&self, fqdn: &str) -> Result<i64, Error> {
        let name = unqualified(fqdn);
        let zone = self.resolve_auth_zone(name).await?;

        let record_id = self.get_record_id(zone.domain_id, name, TXT).await?;
        self.delete_record(record_id).await?;

        info!(name, zone = %zone.zone, record_id, "challenge record removed");
        Ok(record_id)
    }
}

fn unqualified(fqdn: &str) -> &str {
    fqdn.strip_suffix('.').unwrap_or(fqdn)
}
