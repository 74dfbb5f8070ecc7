mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use vegadns_api::VegaClient;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    // Completions never depend on the config file.
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "vegadns", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = vegadns_config::load_config()?;

    if cli.global.output.is_none() {
        cli.global.output = Some(
            OutputFormat::from_str(&cfg.defaults.output, true).map_err(|_| {
                CliError::Validation {
                    field: "defaults.output".into(),
                    reason: format!("unknown output format '{}'", cfg.defaults.output),
                }
            })?,
        );
    }

    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, &cfg, &cli.global),

        cmd => {
            let resolved = config::resolve(&cli.global, &cfg)?;
            let client = VegaClient::from_config(&resolved.client)
                .map_err(|e| CliError::from_api(e, &resolved.profile))?;

            tracing::debug!(
                profile = %resolved.profile,
                auth = ?client.auth_strategy(),
                "dispatching command"
            );
            commands::dispatch(cmd, &client, &resolved, &cli.global)
                .await
                .map_err(|e| e.with_profile(&resolved.profile))
        }
    }
}
