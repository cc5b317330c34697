// Telemetry endpoints: datapoints and device-to-user mappings.
//
// Both take the whole batch in one request. Unlike access point sync there
// is no chunking here.

use tracing::debug;

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::{DataPoint, UserDevice};

impl InsightsClient {
    /// Post a batch of datapoints for a school.
    ///
    /// `POST /schools/{id}/datapoints/`
    ///
    /// When the service rejects the batch, its explanation is in the
    /// returned error's [`response_body`](Error::response_body).
    pub fn post_datapoints(&self, school_id: &str, points: &[DataPoint]) -> Result<(), Error> {
        debug!(school_id, count = points.len(), "posting datapoints");
        self.post_no_response(&format!("/schools/{school_id}/datapoints/"), points)
    }

    /// Post MAC-to-username mappings for a school.
    ///
    /// `POST /schools/{id}/device_mapping`
    pub fn post_device_mapping(&self, school_id: &str, devices: &[UserDevice]) -> Result<(), Error> {
        debug!(school_id, count = devices.len(), "posting device mapping");
        self.post_no_response(&format!("/schools/{school_id}/device_mapping"), devices)
    }
}
