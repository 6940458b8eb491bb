//! Command handlers, one module per resource.

pub mod commissions;
pub mod config_cmd;
pub mod devices;
pub mod partners;
pub mod platforms;
pub mod stats;
pub mod transactions;
pub mod transfers;
pub mod util;

use paydeck_core::Backoffice;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    cmd: Command,
    backoffice: &Backoffice,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Transactions(args) => transactions::handle(backoffice, args, global).await,
        Command::Partners(args) => partners::handle(backoffice, args, global).await,
        Command::Platforms(args) => platforms::handle(backoffice, args, global).await,
        Command::Devices(args) => devices::handle(backoffice, args, global).await,
        Command::Commissions(args) => commissions::handle(backoffice, args, global).await,
        Command::Transfers(args) => transfers::handle(backoffice, args, global).await,
        Command::Stats => stats::handle(backoffice, global).await,
        // Normally intercepted in main() before a connection is built.
        Command::Config(args) => config_cmd::handle(args, global),
    }
}
