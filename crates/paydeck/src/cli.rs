//! Clap derive structures for the `paydeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// paydeck -- kubectl-style CLI for the payments back office
#[derive(Debug, Parser)]
#[command(
    name = "paydeck",
    version,
    about = "Operate the payments back office from the command line",
    long_about = "A CLI for payments back-office operators.\n\n\
        Lists, inspects, and mutates transactions, partners, platforms,\n\
        device authorizations, commissions, and transfers over the admin\n\
        REST API.",
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
    /// Environment profile to use
    #[arg(long, short = 'p', env = "PAYDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Back-office base URL (overrides profile)
    #[arg(long, short = 'u', env = "PAYDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API token
    #[arg(long, env = "PAYDECK_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PAYDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PAYDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PAYDECK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
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

// ── Shared list flags ────────────────────────────────────────────────

/// Flags shared by every `list` subcommand.
#[derive(Debug, Args)]
pub struct ListOpts {
    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Records per page
    #[arg(long, default_value = "20")]
    pub page_size: u32,

    /// Sort field; prefix with '-' for descending (e.g. -created_at)
    #[arg(long)]
    pub sort: Option<String>,

    /// Only records created on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only records created on or before this date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Fetch every page (bounded data only)
    #[arg(long)]
    pub all: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect transactions and decide cancellation requests
    #[command(alias = "tx", alias = "t")]
    Transactions(TransactionsArgs),

    /// Manage partner accounts
    #[command(alias = "pa")]
    Partners(PartnersArgs),

    /// Manage integration platforms and aggregator mappings
    #[command(alias = "pl")]
    Platforms(PlatformsArgs),

    /// Approve or revoke payment-terminal authorizations
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Review and pay out accrued commissions
    #[command(alias = "com", alias = "c")]
    Commissions(CommissionsArgs),

    /// List balance transfers
    #[command(alias = "tr")]
    Transfers(TransfersArgs),

    /// Back-office overview counters
    Stats,

    /// Manage CLI configuration and profiles
    #[command(alias = "cfg")]
    Config(ConfigArgs),
}

// ── Transactions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    pub command: TransactionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TransactionsCommand {
    /// List transactions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (pending, completed, failed,
        /// cancellation_requested, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// Filter by transaction type (purchase, refund, payout)
        #[arg(long = "type")]
        transaction_type: Option<String>,
    },

    /// Show one transaction
    Get { uid: Uuid },

    /// Approve a pending cancellation request
    ApproveCancel {
        uid: Uuid,

        /// Operator notes recorded with the decision
        #[arg(long)]
        notes: String,
    },

    /// Reject a pending cancellation request
    RejectCancel {
        uid: Uuid,

        /// Operator notes recorded with the decision
        #[arg(long)]
        notes: String,
    },

    /// Aggregate transaction counters
    Stats,
}

// ── Partners ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PartnersArgs {
    #[command(subcommand)]
    pub command: PartnersCommand,
}

#[derive(Debug, Subcommand)]
pub enum PartnersCommand {
    /// List partners
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Only active (true) or inactive (false) partners
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show one partner
    Get { uid: Uuid },

    /// Activate a partner
    Enable {
        uid: Uuid,

        /// Why the partner is being re-enabled
        #[arg(long)]
        notes: String,
    },

    /// Deactivate a partner
    Disable {
        uid: Uuid,

        /// Why the partner is being disabled
        #[arg(long)]
        notes: String,
    },

    /// Show a partner's commission terms
    CommissionConfig { uid: Uuid },

    /// Update a partner's commission terms
    SetCommission {
        uid: Uuid,

        /// New percentage rate, e.g. 1.75
        #[arg(long)]
        rate: Option<rust_decimal::Decimal>,

        /// New flat fee per transaction
        #[arg(long)]
        fixed_fee: Option<rust_decimal::Decimal>,
    },
}

// ── Platforms ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlatformsArgs {
    #[command(subcommand)]
    pub command: PlatformsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlatformsCommand {
    /// List platforms
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Only active (true) or inactive (false) platforms
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show one platform
    Get { uid: Uuid },

    /// Activate a platform
    Enable {
        uid: Uuid,
        #[arg(long)]
        notes: String,
    },

    /// Deactivate a platform
    Disable {
        uid: Uuid,
        #[arg(long)]
        notes: String,
    },

    /// List a platform's aggregator mappings
    Mappings { uid: Uuid },

    /// Route a platform onto an aggregator
    Map {
        uid: Uuid,

        /// Aggregator UID (see `paydeck platforms aggregators`)
        #[arg(long)]
        aggregator: Uuid,

        /// Merchant identifier on the aggregator side
        #[arg(long)]
        external_id: String,
    },

    /// List available aggregators
    Aggregators {
        #[command(flatten)]
        opts: ListOpts,
    },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List device authorization requests
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (pending, approved, revoked)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one device authorization
    Get { uid: Uuid },

    /// Approve a pending device
    Approve {
        uid: Uuid,

        /// Optional operator notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Revoke a device authorization
    Revoke {
        uid: Uuid,

        /// Why the device is being revoked
        #[arg(long)]
        reason: String,
    },
}

// ── Commissions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CommissionsArgs {
    #[command(subcommand)]
    pub command: CommissionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommissionsCommand {
    /// List commission entries
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (accrued, paid)
        #[arg(long)]
        status: Option<String>,

        /// Filter by accounting period, e.g. 2026-07
        #[arg(long)]
        period: Option<String>,
    },

    /// Show one commission entry
    Get { uid: Uuid },

    /// Pay out an accrued commission
    Pay { uid: Uuid },
}

// ── Transfers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TransfersArgs {
    #[command(subcommand)]
    pub command: TransfersCommand,
}

#[derive(Debug, Subcommand)]
pub enum TransfersCommand {
    /// List balance transfers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        opts: ListOpts,

        /// Filter by status (pending, completed, failed)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one transfer
    Get { uid: Uuid },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the merged configuration (tokens redacted)
    Show,

    /// Store a token in the OS keyring for a profile
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}
