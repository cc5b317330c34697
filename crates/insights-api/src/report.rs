// Error reporting endpoint.

use tracing::debug;

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::ErrorReport;

impl InsightsClient {
    /// Send an error report to the service.
    ///
    /// `POST /error/`; returns the service's acknowledgement flag.
    pub fn report_error(&self, report: &ErrorReport) -> Result<bool, Error> {
        debug!(org = %report.org, severity = %report.severity, "reporting error");
        self.post("/error/", report)
    }
}
