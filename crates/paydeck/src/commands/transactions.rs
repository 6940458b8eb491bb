//! Transaction command handlers.

use tabled::Tabled;

use paydeck_core::{Backoffice, Transaction};

use crate::cli::{GlobalOpts, TransactionsArgs, TransactionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    tx_type: String,
    #[tabled(rename = "Partner")]
    partner: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn to_row(tx: &Transaction, color: bool) -> TransactionRow {
    TransactionRow {
        uid: tx.uid.to_string(),
        reference: tx.reference.clone(),
        amount: output::money(tx.amount, &tx.currency),
        status: output::status_cell(&tx.status.to_string(), color),
        tx_type: tx.transaction_type.clone(),
        partner: tx.partner_name.clone().unwrap_or_else(|| "-".into()),
        created: tx.created_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn detail(tx: &Transaction) -> String {
    let mut lines = vec![
        format!("UID:        {}", tx.uid),
        format!("Reference:  {}", tx.reference),
        format!("Amount:     {}", output::money(tx.amount, &tx.currency)),
        format!("Status:     {}", tx.status),
        format!("Type:       {}", tx.transaction_type),
        format!("Partner:    {}", tx.partner_name.as_deref().unwrap_or("-")),
        format!("Platform:   {}", tx.platform_name.as_deref().unwrap_or("-")),
        format!("Created:    {}", tx.created_at.to_rfc3339()),
    ];
    if let Some(ref reason) = tx.cancellation_reason {
        lines.push(format!("Cancellation reason: {reason}"));
    }
    if let Some(ref notes) = tx.admin_notes {
        lines.push(format!("Admin notes: {notes}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: TransactionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TransactionsCommand::List {
            opts,
            status,
            transaction_type,
        } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(ref status) = status {
                    params = params.filter("status", status.clone());
                }
                if let Some(ref tx_type) = transaction_type {
                    params = params.filter("transaction_type", tx_type.clone());
                }
                async move { backoffice.list_transactions(&params).await }
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |tx| to_row(tx, color),
                |tx| tx.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }

        TransactionsCommand::Get { uid } => {
            let tx = backoffice.get_transaction(&uid).await?;
            let out = output::render_single(&global.output, &tx, detail, |tx| tx.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransactionsCommand::ApproveCancel { uid, notes } => {
            if !util::confirm(
                &format!("Approve cancellation of transaction {uid}? Funds will be returned."),
                global.yes,
            )? {
                return Ok(());
            }
            let tx = backoffice.approve_cancellation(&uid, &notes).await?;
            if !global.quiet {
                eprintln!("Cancellation approved; transaction is now {}", tx.status);
            }
            Ok(())
        }

        TransactionsCommand::RejectCancel { uid, notes } => {
            let tx = backoffice.reject_cancellation(&uid, &notes).await?;
            if !global.quiet {
                eprintln!("Cancellation rejected; transaction is now {}", tx.status);
            }
            Ok(())
        }

        TransactionsCommand::Stats => {
            let stats = backoffice.transaction_stats().await?;
            let out = output::render_single(
                &global.output,
                &stats,
                |s| {
                    let mut lines = vec![
                        format!("Total:   {}", s.total),
                        format!("Volume:  {}", output::money(s.volume, &s.currency)),
                    ];
                    let mut statuses: Vec<_> = s.by_status.iter().collect();
                    statuses.sort();
                    for (status, count) in statuses {
                        lines.push(format!("{status:<24} {count}"));
                    }
                    lines.join("\n")
                },
                |s| s.total.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
