//! Transfer command handlers (read-only).

use tabled::Tabled;

use paydeck_core::{Backoffice, Transfer};

use crate::cli::{GlobalOpts, TransfersArgs, TransfersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Partner")]
    partner: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn to_row(t: &Transfer, color: bool) -> TransferRow {
    TransferRow {
        uid: t.uid.to_string(),
        reference: t.reference.clone(),
        partner: t.partner_name.clone().unwrap_or_else(|| "-".into()),
        amount: output::money(t.amount, &t.currency),
        direction: t.direction.clone(),
        status: output::status_cell(&t.status.to_string(), color),
    }
}

fn detail(t: &Transfer) -> String {
    [
        format!("UID:        {}", t.uid),
        format!("Reference:  {}", t.reference),
        format!("Partner:    {}", t.partner_name.as_deref().unwrap_or("-")),
        format!("Amount:     {}", output::money(t.amount, &t.currency)),
        format!("Direction:  {}", t.direction),
        format!("Status:     {}", t.status),
        format!("Created:    {}", t.created_at.to_rfc3339()),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: TransfersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TransfersCommand::List { opts, status } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(ref status) = status {
                    params = params.filter("status", status.clone());
                }
                async move { backoffice.list_transfers(&params).await }
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |t| to_row(t, color),
                |t| t.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }

        TransfersCommand::Get { uid } => {
            let transfer = backoffice.get_transfer(&uid).await?;
            let out =
                output::render_single(&global.output, &transfer, detail, |t| t.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
