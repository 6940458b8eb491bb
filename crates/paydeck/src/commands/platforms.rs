//! Platform and aggregator command handlers.

use tabled::Tabled;

use paydeck_core::{Aggregator, Backoffice, ListParams, Platform, PlatformMapping};

use crate::cli::{GlobalOpts, PlatformsArgs, PlatformsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlatformRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Partner")]
    partner: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn to_row(p: &Platform, color: bool) -> PlatformRow {
    PlatformRow {
        uid: p.uid.to_string(),
        name: p.name.clone(),
        code: p.code.clone(),
        partner: p.partner_name.clone().unwrap_or_else(|| "-".into()),
        active: output::status_cell(if p.is_active { "active" } else { "inactive" }, color),
    }
}

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Aggregator")]
    aggregator: String,
    #[tabled(rename = "External ID")]
    external_id: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn mapping_row(m: &PlatformMapping, color: bool) -> MappingRow {
    MappingRow {
        uid: m.uid.to_string(),
        aggregator: m
            .aggregator_name
            .clone()
            .unwrap_or_else(|| m.aggregator.to_string()),
        external_id: m.external_id.clone(),
        active: output::status_cell(if m.is_active { "active" } else { "inactive" }, color),
    }
}

#[derive(Tabled)]
struct AggregatorRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn aggregator_row(a: &Aggregator, color: bool) -> AggregatorRow {
    AggregatorRow {
        uid: a.uid.to_string(),
        name: a.name.clone(),
        code: a.code.clone(),
        active: output::status_cell(if a.is_active { "active" } else { "inactive" }, color),
    }
}

fn detail(p: &Platform) -> String {
    [
        format!("UID:      {}", p.uid),
        format!("Name:     {}", p.name),
        format!("Code:     {}", p.code),
        format!("Partner:  {}", p.partner_name.as_deref().unwrap_or("-")),
        format!("Active:   {}", p.is_active),
        format!("Created:  {}", p.created_at.to_rfc3339()),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    backoffice: &Backoffice,
    args: PlatformsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PlatformsCommand::List { opts, active } => {
            let page = util::fetch_page(&opts, |mut params| {
                if let Some(active) = active {
                    params = params.filter("is_active", active.to_string());
                }
                async move { backoffice.list_platforms(&params).await }
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

        PlatformsCommand::Get { uid } => {
            let platform = backoffice.get_platform(&uid).await?;
            let out =
                output::render_single(&global.output, &platform, detail, |p| p.uid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlatformsCommand::Enable { uid, notes } => {
            backoffice.set_platform_active(&uid, true, &notes).await?;
            if !global.quiet {
                eprintln!("Platform activated");
            }
            Ok(())
        }

        PlatformsCommand::Disable { uid, notes } => {
            if !util::confirm(
                &format!("Disable platform {uid}? It stops accepting payments."),
                global.yes,
            )? {
                return Ok(());
            }
            backoffice.set_platform_active(&uid, false, &notes).await?;
            if !global.quiet {
                eprintln!("Platform disabled");
            }
            Ok(())
        }

        PlatformsCommand::Mappings { uid } => {
            let page = backoffice
                .list_platform_mappings(&uid, &ListParams::new(100))
                .await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |m| mapping_row(m, color),
                |m| m.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlatformsCommand::Map {
            uid,
            aggregator,
            external_id,
        } => {
            let mapping = backoffice
                .create_platform_mapping(&uid, &aggregator, &external_id)
                .await?;
            if !global.quiet {
                let aggregator_label = mapping
                    .aggregator_name
                    .clone()
                    .unwrap_or_else(|| mapping.aggregator.to_string());
                eprintln!(
                    "Platform mapped to {aggregator_label} as '{}'",
                    mapping.external_id
                );
            }
            Ok(())
        }

        PlatformsCommand::Aggregators { opts } => {
            let page = util::fetch_page(&opts, |params| async move {
                backoffice.list_aggregators(&params).await
            })
            .await?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &page.results,
                |a| aggregator_row(a, color),
                |a| a.uid.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_footer(&page, &opts, global);
            Ok(())
        }
    }
}
