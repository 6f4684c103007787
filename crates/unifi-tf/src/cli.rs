//! Clap derive structures for the `unifi-tf` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this module
//! depends on nothing but clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unifi-tf -- declarative lifecycle for UniFi controller resources
#[derive(Debug, Parser)]
#[command(
    name = "unifi-tf",
    version,
    about = "Import, apply and destroy UniFi resources against a local state file",
    long_about = "Drives UniFi controller objects through a declarative lifecycle.\n\n\
        Resources are tracked in a JSON state file by address. Plans are JSON\n\
        documents using the resource's attribute names; `{\"unknown\": true}`\n\
        marks a value that is not known yet.",
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
    /// Controller URL (overrides config file)
    #[arg(long, env = "UNIFI_URL", global = true)]
    pub url: Option<String>,

    /// Default site for resources that do not name one
    #[arg(long, short = 's', env = "UNIFI_SITE", global = true)]
    pub site: Option<String>,

    /// Username for session login
    #[arg(long, env = "UNIFI_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for session login
    #[arg(long, env = "UNIFI_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// API key (takes precedence over username/password)
    #[arg(long, env = "UNIFI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "UNIFI_INSECURE", global = true)]
    pub insecure: bool,

    /// Custom CA certificate (PEM)
    #[arg(long, env = "UNIFI_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "UNIFI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// State file tracking managed resources
    #[arg(
        long,
        env = "UNIFI_TF_STATE",
        default_value = "unifi-tf.state.json",
        global = true
    )]
    pub state: PathBuf,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Log Enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List supported resource types and their lifecycle behaviour
    Kinds,

    /// Start tracking an existing controller object
    Import(ImportArgs),

    /// Refresh tracked state from the controller
    #[command(alias = "read")]
    Refresh(RefreshArgs),

    /// Create or update a resource from a plan
    Apply(ApplyArgs),

    /// Delete a tracked resource
    #[command(alias = "rm")]
    Destroy(DestroyArgs),

    /// Print tracked state
    #[command(alias = "ls")]
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Resource type (e.g. unifi_network)
    pub resource_type: String,

    /// State address to track the resource under
    pub address: String,

    /// Import identifier: `<id>`, `<site>:<id>`, `name=<name>` or a MAC
    pub identifier: String,
}

#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Only refresh this address
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Resource type (e.g. unifi_network)
    pub resource_type: String,

    /// State address of the resource
    pub address: String,

    /// JSON plan file (`-` for stdin)
    #[arg(long, short = 'p')]
    pub plan: PathBuf,
}

#[derive(Debug, Args)]
pub struct DestroyArgs {
    /// State address of the resource
    pub address: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Only show this address
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
