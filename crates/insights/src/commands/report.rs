//! Error report command handler.

use insights_api::{ErrorReport, InsightsClient};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::error::CliError;

pub fn handle(
    client: &InsightsClient,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = ErrorReport {
        message: args.message,
        context: args.context,
        org: args.org,
        severity: args.severity,
    };

    let recorded = client.report_error(&report)?;
    if !global.quiet {
        if recorded {
            eprintln!("Error report recorded");
        } else {
            eprintln!("Service declined the error report");
        }
    }
    Ok(())
}
