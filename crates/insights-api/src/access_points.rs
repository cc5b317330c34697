// Access point endpoints
//
// Listing, name normalization, and chunked bulk inventory sync.

use tracing::{debug, trace};

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::{AccessPoint, ApPattern, ApPatternRequest, ApSyncResult, Page, SyncAp};

/// Maximum number of records the sync endpoint accepts per request.
pub const SYNC_CHUNK_SIZE: usize = 100;

impl InsightsClient {
    /// List a school's access points.
    ///
    /// `GET /schools/{id}/access_points/`
    pub fn list_access_points(&self, school_id: &str) -> Result<Page<AccessPoint>, Error> {
        let url = self.url(&format!("/schools/{school_id}/access_points/"))?;
        debug!(school_id, "listing access points");
        self.get_page(url)
    }

    /// Ask the service to split an AP name into building / floor / room.
    ///
    /// `POST /access_points/pattern/` with `{"name": "..."}`
    pub fn normalize_ap_name(&self, name: &str) -> Result<ApPattern, Error> {
        debug!(name, "normalizing access point name");
        self.post("/access_points/pattern/", &ApPatternRequest { name })
    }

    /// Push a school's access point inventory, [`SYNC_CHUNK_SIZE`] records
    /// per request.
    ///
    /// Chunks go out in input order, one at a time. The first failing chunk
    /// aborts the call; chunks sent before it are **not** rolled back, and
    /// calling again resends everything. Once every chunk is accepted, the
    /// service's `processed + skipped` totals must add up to `aps.len()`,
    /// otherwise the call fails with [`Error::SyncIncomplete`]. An empty
    /// slice sends nothing and fails with [`Error::NothingToSync`].
    pub fn bulk_sync_access_points(
        &self,
        school_id: &str,
        aps: &[SyncAp],
    ) -> Result<ApSyncResult, Error> {
        if aps.is_empty() {
            return Err(Error::NothingToSync);
        }

        let path = format!("/schools/{school_id}/access_points/sync/");
        let chunk_count = aps.len().div_ceil(SYNC_CHUNK_SIZE);
        debug!(school_id, total = aps.len(), chunk_count, "bulk syncing access points");

        let mut total = ApSyncResult::default();
        for (index, chunk) in aps.chunks(SYNC_CHUNK_SIZE).enumerate() {
            trace!(chunk = index + 1, of = chunk_count, size = chunk.len(), "sending sync chunk");
            total += self.sync_chunk(&path, chunk)?;
        }

        if total.accounted() != aps.len() {
            return Err(Error::SyncIncomplete {
                expected: aps.len(),
                accounted: total.accounted(),
            });
        }

        debug!(processed = total.processed, skipped = total.skipped, "bulk sync complete");
        Ok(total)
    }

    /// `POST /schools/{id}/access_points/sync/` with one chunk.
    fn sync_chunk(&self, path: &str, chunk: &[SyncAp]) -> Result<ApSyncResult, Error> {
        debug_assert!(chunk.len() <= SYNC_CHUNK_SIZE);
        self.post(path, chunk)
    }
}
