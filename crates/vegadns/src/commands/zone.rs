//! Auth zone lookup.

use vegadns_api::{AuthZone, VegaClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(client: &VegaClient, fqdn: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let zone = client.resolve_auth_zone(fqdn).await?;
    let out = output::render_single(
        global.format(),
        &zone,
        |z: &AuthZone| {
            util::detail(&[
                ("Zone", z.zone.clone()),
                ("Domain ID", z.domain_id.to_string()),
            ])
        },
        |z| z.zone.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
