// School endpoints
//
// Schools are the tenant scope for almost every other resource; their IDs
// are passed through to the other endpoint groups untouched.

use tracing::debug;

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::{Page, School, SchoolQuery};

impl InsightsClient {
    /// List schools matching `query`.
    ///
    /// `GET /schools?limit=..&activated_status=..[&apogee_short_internal_name=..]`
    ///
    /// Only the first page is fetched; follow-up is up to the caller via
    /// [`Page::next_url`].
    pub fn list_schools(&self, query: &SchoolQuery) -> Result<Page<School>, Error> {
        let mut url = self.url("/schools")?;
        url.query_pairs_mut().extend_pairs(query.to_params());
        debug!(?query, "listing schools");
        self.get_page(url)
    }

    /// Get a single school by ID.
    ///
    /// `GET /schools/{id}`
    pub fn get_school(&self, school_id: &str) -> Result<School, Error> {
        debug!(school_id, "fetching school");
        self.get(&format!("/schools/{school_id}"))
    }
}
