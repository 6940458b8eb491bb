//! Device authorization command handlers.

use tabled::Tabled;

use paydeck_core::{Backoffice, DeviceAuthorization};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Partner")]
    partner: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Requested")]
    requested: String,
}

fn to_row(d: &DeviceAuthorization, color: bool) -> DeviceRow {
    DeviceRow {
        uid: d.uid.to_string(),
        serial: d.serial_number.clone(),
        label: d.label.clone().unwrap_or_else(|| "-".into()),
        partner: d.partner_name.clone().unwrap_or_else(|| "-".into()),
        status: output::status_cell(&d.status.to_string(), color),
        requested: d.requested_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn detail(d: &DeviceAuthorization) -> String {
    let mut lines = vec![
        format!("UID:        {}", d.uid),
        format!("Serial:     {}", d.serial_number),
        format!("Label:      {}", d.label.as_deref().unwrap_or("-")),
        format!("Partner:    {}", d.partner_name.as_deref().unwrap_or("-")),
        format!("Status:     {}", d.status),
        format!("Requested:  {}", d.requested_at.to_rfc3339()),
    ];
    if let Some(decided_at) = d.decided_at {
        lines.push(format!(
            "Decided:    {} by {}",
            decided_at.to_rfc3339(),
            d.decided_by.as_deref().unwrap_or("-")
        ));
    }
    if let Some(ref notes) = d.notes {
        lines.push(format!("Notes:      {notes}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List { opts, status } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(ref status) = status {
                    params = params.filter("status", status.clone());
                }
                async move { backoffice.list_devices(&params).await }
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |d| to_row(d, color),
                |d| d.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }

        DevicesCommand::Get { uid } => {
            let device = backoffice.get_device(&uid).await?;
            let out =
                output::render_single(&global.output, &device, detail, |d| d.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Approve { uid, notes } => {
            let device = backoffice.approve_device(&uid, notes.as_deref()).await?;
            if !global.quiet {
                eprintln!("Device {} approved", device.serial_number);
            }
            Ok(())
        }

        DevicesCommand::Revoke { uid, reason } => {
            if !util::confirm(
                &format!("Revoke device {uid}? The terminal stops accepting payments."),
                global.yes,
            )? {
                return Ok(());
            }
            let device = backoffice.revoke_device(&uid, &reason).await?;
            if !global.quiet {
                eprintln!("Device {} revoked", device.serial_number);
            }
            Ok(())
        }
    }
}
