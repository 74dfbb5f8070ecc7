//! Clap derive structures for the `vegadns` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vegadns -- command-line client for the VegaDNS REST API
#[derive(Debug, Parser)]
#[command(
    name = "vegadns",
    version,
    about = "Manage VegaDNS domains and records from the command line",
    long_about = "A CLI for the VegaDNS REST API (v1.0).\n\n\
        Supports anonymous, HTTP basic and OAuth client-credentials access,\n\
        plus ACME DNS-01 challenge helpers.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "VEGADNS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "VEGADNS_URL", global = true)]
    pub url: Option<String>,

    /// Account email for basic auth
    #[arg(long, env = "VEGADNS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "VEGADNS_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// OAuth API key
    #[arg(long, env = "VEGADNS_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// OAuth API secret
    #[arg(long, env = "VEGADNS_API_SECRET", global = true, hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "VEGADNS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "VEGADNS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VEGADNS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Output format after config defaults have been applied.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up hosted domains
    #[command(alias = "d")]
    Domains(DomainsArgs),

    /// Manage DNS records
    #[command(alias = "r")]
    Records(RecordsArgs),

    /// Find the hosted zone that owns a name
    Zone {
        /// Fully qualified name (trailing dot optional)
        fqdn: String,
    },

    /// ACME DNS-01 challenge helpers
    Acme(AcmeArgs),

    /// Issue an OAuth access token and show its type and expiry
    Token,

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Domains ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List domains
    #[command(alias = "ls")]
    List {
        /// Server-side substring filter
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show the domain with exactly this name
    Id {
        /// Domain name, e.g. example.com
        domain: String,
    },
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List the records of a domain
    #[command(alias = "ls")]
    List {
        /// Domain id
        domain_id: i64,

        /// Only show records of this type
        #[arg(long = "type", short = 't')]
        record_type: Option<String>,
    },

    /// Print the id of the first record matching name and type
    Id {
        /// Domain id
        domain_id: i64,

        /// Record name
        name: String,

        /// Record type
        #[arg(long = "type", short = 't', default_value = "TXT")]
        record_type: String,
    },

    /// Create a TXT record
    CreateTxt {
        /// Domain id
        domain_id: i64,

        /// Record name
        name: String,

        /// TXT value
        value: String,

        /// TTL in seconds [default: profile ttl]
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record id
        record_id: i64,
    },
}

// ── ACME ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AcmeArgs {
    #[command(subcommand)]
    pub command: AcmeCommand,
}

#[derive(Debug, Subcommand)]
pub enum AcmeCommand {
    /// Publish a challenge TXT record
    Present {
        /// Challenge name, e.g. _acme-challenge.www.example.com.
        fqdn: String,

        /// Key authorization digest
        value: String,

        /// TTL in seconds [default: profile ttl]
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Remove a challenge TXT record
    Cleanup {
        /// Challenge name
        fqdn: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the loaded configuration (secrets masked)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
