//! Commission command handlers.

use tabled::Tabled;

use paydeck_core::{Backoffice, Commission};

use crate::cli::{CommissionsArgs, CommissionsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CommissionRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Partner")]
    partner: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn to_row(c: &Commission, color: bool) -> CommissionRow {
    CommissionRow {
        uid: c.uid.to_string(),
        partner: c.partner_name.clone().unwrap_or_else(|| "-".into()),
        period: c.period.clone(),
        amount: output::money(c.amount, &c.currency),
        status: output::status_cell(&c.status.to_string(), color),
    }
}

fn detail(c: &Commission) -> String {
    let mut lines = vec![
        format!("UID:      {}", c.uid),
        format!("Partner:  {}", c.partner_name.as_deref().unwrap_or("-")),
        format!("Period:   {}", c.period),
        format!("Amount:   {}", output::money(c.amount, &c.currency)),
        format!("Status:   {}", c.status),
        format!("Created:  {}", c.created_at.to_rfc3339()),
    ];
    if let Some(paid_at) = c.paid_at {
        lines.push(format!("Paid:     {}", paid_at.to_rfc3339()));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: CommissionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CommissionsCommand::List { opts, status, period } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(ref status) = status {
                    params = params.filter("status", status.clone());
                }
                if let Some(ref period) = period {
                    params = params.filter("period", period.clone());
                }
                async move { backoffice.list_commissions(&params).await }
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |c| to_row(c, color),
                |c| c.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }

        CommissionsCommand::Get { uid } => {
            let commission = backoffice.get_commission(&uid).await?;
            let out =
                output::render_single(&global.output, &commission, detail, |c| c.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CommissionsCommand::Pay { uid } => {
            let commission = backoffice.get_commission(&uid).await?;
            if !util::confirm(
                &format!(
                    "Pay out {} to {}?",
                    output::money(commission.amount, &commission.currency),
                    commission.partner_name.as_deref().unwrap_or("(unknown)")
                ),
                global.yes,
            )? {
                return Ok(());
            }
            let paid = backoffice.pay_commission(&uid).await?;
            if !global.quiet {
                eprintln!(
                    "Commission paid: {}",
                    output::money(paid.amount, &paid.currency)
                );
            }
            Ok(())
        }
    }
}
