//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod acme;
pub mod config_cmd;
pub mod domains;
pub mod records;
pub mod token;
pub mod util;
pub mod zone;

use vegadns_api::VegaClient;

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &VegaClient,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Domains(args) => domains::handle(client, args, global).await,
        Command::Records(args) => records::handle(client, args, resolved, global).await,
        Command::Zone { fqdn } => zone::handle(client, &fqdn, global).await,
        Command::Acme(args) => acme::handle(client, args, resolved, global).await,
        Command::Token => token::handle(client, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
