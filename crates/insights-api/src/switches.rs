// Switch endpoints
//
// Per-school listing and uptime updates, plus the org-scoped status report.

use tracing::debug;

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::{Switch, SwitchStatus, UpdateSwitchUptime};

impl InsightsClient {
    /// List a school's switches.
    ///
    /// `GET /schools/{id}/switches`
    pub fn list_switches(&self, school_id: &str) -> Result<Vec<Switch>, Error> {
        debug!(school_id, "listing switches");
        self.get(&format!("/schools/{school_id}/switches"))
    }

    /// Set uptime for a batch of switches.
    ///
    /// `PUT /schools/{id}/switches/`
    pub fn update_switch_uptime(
        &self,
        school_id: &str,
        uptimes: &[UpdateSwitchUptime],
    ) -> Result<(), Error> {
        debug!(school_id, count = uptimes.len(), "updating switch uptime");
        self.put_no_response(&format!("/schools/{school_id}/switches/"), uptimes)
    }

    /// Report one switch's up/down state; returns the service's view of it.
    ///
    /// `POST /switches/sync/`
    pub fn report_switch_status(&self, status: &SwitchStatus) -> Result<Switch, Error> {
        debug!(org = %status.org, name = %status.name, state = %status.status, "reporting switch status");
        self.post("/switches/sync/", status)
    }
}
