//! Switch command handlers.

use std::time::Duration;

use insights_api::{InsightsClient, Switch, SwitchState, SwitchStatus};
use tabled::Tabled;

use crate::cli::{GlobalOpts, StateArg, SwitchesArgs, SwitchesCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Last Heartbeat")]
    last_heartbeat: String,
}

impl SwitchRow {
    fn new(s: &Switch, color: bool) -> Self {
        Self {
            name: s.name.clone(),
            state: output::switch_state(s.status, color),
            uptime: format_uptime(s.uptime),
            last_heartbeat: s.last_heartbeat.clone().unwrap_or_default(),
        }
    }
}

/// Seconds as a human duration; negative values render as-is.
fn format_uptime(secs: i64) -> String {
    u64::try_from(secs).map_or_else(
        |_| secs.to_string(),
        |s| humantime::format_duration(Duration::from_secs(s)).to_string(),
    )
}

impl From<StateArg> for SwitchState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Up => Self::Up,
            StateArg::Down => Self::Down,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    client: &InsightsClient,
    args: SwitchesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        SwitchesCommand::List { school } => {
            let switches = client.list_switches(&school)?;
            let out = output::render_list(
                &global.output,
                &switches,
                |s| SwitchRow::new(s, color),
                |s| s.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SwitchesCommand::Status { org, name, state } => {
            let status = SwitchStatus {
                org,
                status: state.into(),
                name,
            };
            let switch = client.report_switch_status(&status)?;
            let out = output::render_single(
                &global.output,
                &switch,
                |s| {
                    format!(
                        "{}  {}  up {}",
                        s.name,
                        output::switch_state(s.status, color),
                        format_uptime(s.uptime)
                    )
                },
                |s| s.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
