//! Clap derive structures for the `insights` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// insights -- query and sync the Insights network inventory
#[derive(Debug, Parser)]
#[command(
    name = "insights",
    version,
    about = "Query and sync the Insights network inventory from the command line",
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
    /// Service profile to use
    #[arg(long, short = 'p', env = "INSIGHTS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, short = 'u', env = "INSIGHTS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API token (overrides profile)
    #[arg(long, env = "INSIGHTS_API_TOKEN", global = true, hide_env = true)]
    pub api_token: Option<String>,

    /// Output format (falls back to `defaults.output` in the config, then table)
    #[arg(
        id = "output",
        long = "output",
        short = 'o',
        env = "INSIGHTS_OUTPUT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// Effective output format, resolved after parsing.
    #[arg(skip)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "INSIGHTS_INSECURE", global = true)]
    pub insecure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
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

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange credentials for a fresh API token
    Auth(AuthArgs),

    /// Browse schools
    #[command(alias = "s")]
    Schools(SchoolsArgs),

    /// List, normalize, and bulk-sync access points
    #[command(alias = "ap", alias = "access-points")]
    Aps(ApsArgs),

    /// List switches and report their state
    #[command(alias = "sw")]
    Switches(SwitchesArgs),

    /// Send an error report to the service
    Report(ReportArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Username to authenticate as (defaults to the profile's)
    #[arg(long)]
    pub username: Option<String>,

    /// Print the token to stdout instead of storing it in the keyring
    #[arg(long)]
    pub print: bool,
}

// ── Schools ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchoolsArgs {
    #[command(subcommand)]
    pub command: SchoolsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchoolsCommand {
    /// List schools (first page only)
    #[command(alias = "ls")]
    List {
        /// Filter by short internal name
        #[arg(long)]
        short_name: Option<String>,

        /// Page size
        #[arg(long, default_value_t = 20)]
        limit: u32,

        /// Activation status filter
        #[arg(long, default_value = "active")]
        status: String,
    },

    /// Show a single school
    Get {
        /// School ID
        id: String,
    },
}

// ── Access points ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApsArgs {
    #[command(subcommand)]
    pub command: ApsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApsCommand {
    /// List a school's access points (first page only)
    #[command(alias = "ls")]
    List {
        /// School ID
        school: String,
    },

    /// Split an AP name into building / floor / room
    Normalize {
        /// Access point name
        name: String,
    },

    /// Bulk-sync access points from a JSON file
    ///
    /// The file holds an array of {name, mac_addresses, serial, switch}
    /// records. Records are sent 100 at a time; a failed chunk stops the
    /// sync without undoing chunks already sent.
    Sync {
        /// School ID
        school: String,

        /// JSON file with the access point records ("-" for stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

// ── Switches ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SwitchesArgs {
    #[command(subcommand)]
    pub command: SwitchesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SwitchesCommand {
    /// List a school's switches
    #[command(alias = "ls")]
    List {
        /// School ID
        school: String,
    },

    /// Report a switch as up or down
    Status {
        /// Organisation short internal name
        org: String,

        /// Switch name
        name: String,

        /// Reported state
        state: StateArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Up,
    Down,
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Error message
    pub message: String,

    /// Organisation short internal name
    #[arg(long)]
    pub org: String,

    /// Where the error happened
    #[arg(long, default_value = "")]
    pub context: String,

    /// Severity label
    #[arg(long, default_value = "error")]
    pub severity: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (tokens masked)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
