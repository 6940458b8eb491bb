//! `paydeck-tui` — terminal dashboard for the payments back office.
//!
//! Built on [ratatui](https://ratatui.rs) over `paydeck-core`'s
//! [`RemoteList`](paydeck_core::RemoteList) view-model. Screens are
//! navigable via number keys (1-7): Overview, Transactions, Partners,
//! Platforms, Devices, Commissions, and Transfers.
//!
//! Logs are written to a file (default `/tmp/paydeck-tui.log`) to avoid
//! corrupting the terminal UI. Fetches run on background tasks reporting
//! back through the action channel; nothing blocks the event loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod fetch;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use paydeck_core::{Backoffice, ClientConfig, TlsVerification};

use crate::app::App;

/// Terminal dashboard for operating the payments back office.
#[derive(Parser, Debug)]
#[command(name = "paydeck-tui", version, about)]
struct Cli {
    /// Back-office base URL (e.g. https://ops.example.com)
    #[arg(short = 'u', long, env = "PAYDECK_API_URL")]
    api_url: Option<String>,

    /// API token
    #[arg(short = 't', long, env = "PAYDECK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Environment profile from the config file
    #[arg(short = 'p', long, env = "PAYDECK_PROFILE")]
    profile: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/paydeck-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("paydeck={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("paydeck-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`ClientConfig`] from CLI flags, if a URL and token were given.
fn config_from_flags(cli: &Cli) -> Option<ClientConfig> {
    let base_url: url::Url = cli.api_url.as_deref()?.parse().ok()?;
    let token = SecretString::from(cli.token.clone()?);
    Some(ClientConfig {
        base_url,
        token,
        tls: TlsVerification::SystemDefaults,
        timeout: std::time::Duration::from_secs(30),
    })
}

/// Build a [`ClientConfig`] from the shared config file.
fn config_from_file(cli: &Cli) -> Option<ClientConfig> {
    let cfg = paydeck_config::load_config().ok()?;
    let profile_name = cli
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = cfg.profiles.get(&profile_name)?;
    paydeck_config::profile_to_client_config(profile, &profile_name).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        url = cli.api_url.as_deref().unwrap_or("(from config)"),
        "starting paydeck-tui"
    );

    // Priority: CLI flags > config file
    let config = config_from_flags(&cli)
        .or_else(|| config_from_file(&cli))
        .ok_or_else(|| {
            eyre!(
                "no back-office configured: pass --api-url and --token, \
                 or create a profile at {}",
                paydeck_config::config_path().display()
            )
        })?;

    let backoffice = Backoffice::new(&config).map_err(|e| eyre!(e.to_string()))?;

    let mut app = App::new(backoffice);
    app.run().await?;

    Ok(())
}
