//! ACME DNS-01 challenge handlers.

use vegadns_api::VegaClient;

use crate::cli::{AcmeArgs, AcmeCommand, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &VegaClient,
    args: AcmeArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AcmeCommand::Present { fqdn, value, ttl } => {
            let ttl = ttl.unwrap_or(resolved.ttl);
            let zone = client.present_txt(&fqdn, &value, ttl).await?;
            output::print_status(
                &format!("Challenge record for {fqdn} created in zone {}", zone.zone),
                global.quiet,
            );
            Ok(())
        }

        AcmeCommand::Cleanup { fqdn } => {
            let record_id = client.cleanup_txt(&fqdn).await?;
            output::print_status(
                &format!("Challenge record {record_id} for {fqdn} removed"),
                global.quiet,
            );
            Ok(())
        }
    }
}
