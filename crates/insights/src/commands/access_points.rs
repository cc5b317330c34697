//! Access point command handlers.

use std::io::Read;
use std::path::Path;

use insights_api::{AccessPoint, ApPattern, InsightsClient, SyncAp};
use tabled::Tabled;
use tracing::info;

use crate::cli::{ApsArgs, ApsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Switch")]
    switch: String,
    #[tabled(rename = "Building")]
    building: String,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Room")]
    room: String,
}

impl From<&AccessPoint> for ApRow {
    fn from(ap: &AccessPoint) -> Self {
        Self {
            name: ap.name.clone(),
            mac: ap.mac_addresses.join(", "),
            serial: ap.serial.clone().unwrap_or_default(),
            switch: ap.switch.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            building: ap
                .building
                .as_ref()
                .map(|b| b.name.clone())
                .unwrap_or_default(),
            floor: ap.floor.clone().unwrap_or_default(),
            room: ap.room.clone().unwrap_or_default(),
        }
    }
}

fn pattern_detail(p: &ApPattern) -> String {
    format!(
        "Building:  {}\nFloor:     {}\nRoom:      {}",
        p.building, p.floor, p.room
    )
}

/// Read sync records from a JSON file, or stdin when the path is `-`.
fn read_sync_file(path: &Path) -> Result<Vec<SyncAp>, CliError> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(client: &InsightsClient, args: ApsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ApsCommand::List { school } => {
            let page = client.list_access_points(&school)?;
            let out = output::render_list(
                &global.output,
                &page.data,
                |ap| ApRow::from(ap),
                |ap| ap.name.clone(),
            );
            output::print_output(&out, global.quiet);
            output::print_next_url(page.next_url.as_deref(), global.quiet);
            Ok(())
        }

        ApsCommand::Normalize { name } => {
            let pattern = client.normalize_ap_name(&name)?;
            let out = output::render_single(&global.output, &pattern, pattern_detail, |p| {
                format!("{}/{}/{}", p.building, p.floor, p.room)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApsCommand::Sync { school, file } => {
            let aps = read_sync_file(&file)?;
            info!(school = %school, count = aps.len(), "syncing access points");

            let result = client.bulk_sync_access_points(&school, &aps)?;
            let out = output::render_single(
                &global.output,
                &result,
                |r| format!("Processed: {}\nSkipped:   {}", r.processed, r.skipped),
                |r| r.accounted().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
