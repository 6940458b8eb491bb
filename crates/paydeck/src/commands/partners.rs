//! Partner command handlers.

use tabled::Tabled;

use paydeck_core::{Backoffice, CommissionConfigUpdate, Partner};

use crate::cli::{GlobalOpts, PartnersArgs, PartnersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PartnerRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

fn to_row(p: &Partner, color: bool) -> PartnerRow {
    PartnerRow {
        uid: p.uid.to_string(),
        name: p.name.clone(),
        email: p.email.clone(),
        active: output::status_cell(if p.is_active { "active" } else { "inactive" }, color),
        balance: output::money(p.balance, &p.currency),
    }
}

fn detail(p: &Partner) -> String {
    let mut lines = vec![
        format!("UID:      {}", p.uid),
        format!("Name:     {}", p.name),
        format!("Email:    {}", p.email),
        format!("Phone:    {}", p.phone.as_deref().unwrap_or("-")),
        format!("Active:   {}", p.is_active),
        format!("Balance:  {}", output::money(p.balance, &p.currency)),
        format!("Created:  {}", p.created_at.to_rfc3339()),
    ];
    if !p.permissions.is_empty() {
        lines.push(format!("Permissions: {}", p.permissions.join(", ")));
    }
    if let Some(ref notes) = p.notes {
        lines.push(format!("Notes: {notes}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: PartnersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PartnersCommand::List { opts, active } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(active) = active {
                    params = params.filter("is_active", active.to_string());
                }
                async move { backoffice.list_partners(&params).await }
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |p| to_row(p, color),
                |p| p.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }

        PartnersCommand::Get { uid } => {
            let partner = backoffice.get_partner(&uid).await?;
            let out =
                output::render_single(&global.output, &partner, detail, |p| p.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PartnersCommand::Enable { uid, notes } => {
            backoffice.set_partner_active(&uid, true, &notes).await?;
            if !global.quiet {
                eprintln!("Partner activated");
            }
            Ok(())
        }

        PartnersCommand::Disable { uid, notes } => {
            if !util::confirm(
                &format!("Disable partner {uid}? Their platforms stop accepting payments."),
                global.yes,
            )? {
                return Ok(());
            }
            backoffice.set_partner_active(&uid, false, &notes).await?;
            if !global.quiet {
                eprintln!("Partner disabled");
            }
            Ok(())
        }

        PartnersCommand::CommissionConfig { uid } => {
            let config = backoffice.get_commission_config(&uid).await?;
            let out = output::render_single(
                &global.output,
                &config,
                |c| {
                    format!(
                        "Rate:      {}%\nFixed fee: {}\nUpdated:   {}",
                        c.rate_pct,
                        output::money(c.fixed_fee, &c.currency),
                        c.updated_at.map_or_else(|| "-".into(), |t| t.to_rfc3339()),
                    )
                },
                |c| c.rate_pct.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PartnersCommand::SetCommission { uid, rate, fixed_fee } => {
            if rate.is_none() && fixed_fee.is_none() {
                return Err(CliError::Validation {
                    field: "rate/fixed-fee".into(),
                    reason: "provide at least one of --rate or --fixed-fee".into(),
                });
            }
            let update = CommissionConfigUpdate {
                rate_pct: rate,
                fixed_fee,
            };
            let config = backoffice.update_commission_config(&uid, &update).await?;
            if !global.quiet {
                eprintln!(
                    "Commission terms updated: {}% + {}",
                    config.rate_pct,
                    output::money(config.fixed_fee, &config.currency)
                );
            }
            Ok(())
        }
    }
}
