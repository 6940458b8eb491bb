//! Back-office overview counters.

use paydeck_core::Backoffice;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(backoffice: &Backoffice, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = backoffice.dashboard_stats().await?;

    let out = output::render_single(
        &global.output,
        &stats,
        |s| {
            [
                format!("Transactions today:       {}", s.transactions_today),
                format!(
                    "Volume today:             {}",
                    output::money(s.volume_today, &s.currency)
                ),
                format!("Pending cancellations:    {}", s.pending_cancellations),
                format!("Active partners:          {}", s.active_partners),
                format!(
                    "Pending device requests:  {}",
                    s.pending_device_authorizations
                ),
                format!(
                    "Unpaid commissions:       {}",
                    output::money(s.unpaid_commissions_total, &s.currency)
                ),
            ]
            .join("\n")
        },
        |s| s.transactions_today.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
