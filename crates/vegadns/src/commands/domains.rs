//! Domain command handlers.

use tabled::Tabled;
use vegadns_api::{Domain, VegaClient};

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Owner")]
    owner: i64,
}

impl From<&Domain> for DomainRow {
    fn from(d: &Domain) -> Self {
        Self {
            id: d.domain_id,
            domain: d.domain.clone(),
            status: d.status.clone(),
            owner: d.owner_id,
        }
    }
}

fn domain_detail(d: &Domain) -> String {
    util::detail(&[
        ("ID", d.domain_id.to_string()),
        ("Domain", d.domain.clone()),
        ("Status", d.status.clone()),
        ("Owner", d.owner_id.to_string()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &VegaClient,
    args: DomainsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List { search } => {
            let domains = client.list_domains(search.as_deref()).await?;
            let out = output::render_list(
                global.format(),
                &domains,
                |d| DomainRow::from(d),
                |d| d.domain_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DomainsCommand::Id { domain } => {
            let found = client.find_domain(&domain).await?;
            let out = output::render_single(global.format(), &found, domain_detail, |d| {
                d.domain_id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
