// Insights API request and response types
//
// Plain value records mirroring the service's JSON. Response fields use
// `#[serde(default)]` where the service omits empty values; request payloads
// serialize exactly the fields the service expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// Single-resource envelope: `{ "data": T }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// List envelope: `{ "data": [T], "meta": { "next_url": "..." } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListMeta {
    #[serde(default)]
    pub next_url: Option<String>,
}

/// One page of a list endpoint.
///
/// `next_url` is handed back as-is; the client never follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub next_url: Option<String>,
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        let next_url = envelope
            .meta
            .and_then(|m| m.next_url)
            .filter(|url| !url.is_empty());
        Self {
            data: envelope.data,
            next_url,
        }
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
}

// ── Schools ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub activated: bool,
    #[serde(default, rename = "apogee_short_internal_name")]
    pub short_name: String,
    /// Unix seconds.
    #[serde(default, rename = "activated_timestamp")]
    pub activated_at: i64,
}

/// Query parameters for `GET /schools`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolQuery {
    pub limit: u32,
    pub activated_status: String,
    /// Filter by `apogee_short_internal_name`; omitted from the query when `None`.
    pub short_name: Option<String>,
}

impl Default for SchoolQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            activated_status: "active".into(),
            short_name: None,
        }
    }
}

impl SchoolQuery {
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("activated_status", self.activated_status.clone()),
        ];
        if let Some(ref name) = self.short_name {
            if !name.is_empty() {
                params.push(("apogee_short_internal_name", name.clone()));
            }
        }
        params
    }
}

// ── Access points ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub mac_addresses: Vec<String>,
    #[serde(default, rename = "created_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch: Option<Switch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<Building>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(
        default,
        rename = "last_health_check_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_health_check: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// Bulk-sync wire record: the subset of `AccessPoint` the sync endpoint takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAp {
    pub name: String,
    pub mac_addresses: Vec<String>,
    pub serial: String,
    /// Name of the switch the AP hangs off.
    pub switch: String,
}

/// Per-chunk outcome reported by the sync endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApSyncResult {
    #[serde(rename = "number_processed")]
    pub processed: usize,
    #[serde(rename = "number_skipped")]
    pub skipped: usize,
}

impl ApSyncResult {
    /// Records the service accounted for, either way.
    ///
    /// Saturates at `usize::MAX`, so oversized service counts can never
    /// add up to a plausible total.
    pub fn accounted(&self) -> usize {
        self.processed.saturating_add(self.skipped)
    }
}

impl std::ops::AddAssign for ApSyncResult {
    fn add_assign(&mut self, rhs: Self) {
        self.processed = self.processed.saturating_add(rhs.processed);
        self.skipped = self.skipped.saturating_add(rhs.skipped);
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ApPatternRequest<'a> {
    pub name: &'a str,
}

/// Location parsed out of an AP name by the service's naming patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApPattern {
    #[serde(default, rename = "building_alias")]
    pub building: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub room: String,
}

// ── Switches ─────────────────────────────────────────────────────────

/// Switch up/down state. The wire carries a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SwitchState {
    #[default]
    Down,
    Up,
    /// Any value the service sends that we do not know about.
    Unknown(i64),
}

impl From<i64> for SwitchState {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::Down,
            1 => Self::Up,
            other => Self::Unknown(other),
        }
    }
}

impl From<SwitchState> for i64 {
    fn from(state: SwitchState) -> Self {
        match state {
            SwitchState::Down => 0,
            SwitchState::Up => 1,
            SwitchState::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Down => f.write_str("down"),
            Self::Up => f.write_str("up"),
            Self::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "created_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updated_timestamp")]
    pub updated_at: Option<String>,
    #[serde(default, rename = "last_heartbeat_timestamp")]
    pub last_heartbeat: Option<String>,
    #[serde(default)]
    pub status: SwitchState,
    /// Seconds.
    #[serde(default)]
    pub uptime: i64,
}

/// Status report for a single switch, keyed by organisation short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchStatus {
    #[serde(rename = "apogee_short_internal_name")]
    pub org: String,
    pub status: SwitchState,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSwitchUptime {
    #[serde(rename = "name")]
    pub switch_name: String,
    pub uptime: i64,
}

// ── Telemetry ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(rename = "datasource")]
    pub source: String,
    /// Unix seconds.
    #[serde(rename = "ts")]
    pub timestamp: i64,
    pub dimensions: Vec<Dimension>,
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub value: f64,
    pub value_type: String,
}

/// MAC-to-user mapping for a school's client devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDevice {
    #[serde(rename = "mac_address")]
    pub mac: String,
    pub username: String,
}

// ── Error reporting ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub context: String,
    #[serde(rename = "apogee_short_internal_name")]
    pub org: String,
    pub severity: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn list_envelope_exposes_next_url() {
        let raw = json!({
            "data": [{ "id": "s1", "name": "North High" }],
            "meta": { "next_url": "/schools?offset=20" }
        });
        let page: Page<School> = serde_json::from_value::<ListEnvelope<School>>(raw)
            .unwrap()
            .into();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.next_url.as_deref(), Some("/schools?offset=20"));
    }

    #[test]
    fn empty_next_url_means_last_page() {
        let raw = json!({ "data": [], "meta": { "next_url": "" } });
        let page: Page<School> = serde_json::from_value::<ListEnvelope<School>>(raw)
            .unwrap()
            .into();
        assert!(page.next_url.is_none());

        let raw = json!({ "data": [] });
        let page: Page<School> = serde_json::from_value::<ListEnvelope<School>>(raw)
            .unwrap()
            .into();
        assert!(page.next_url.is_none());
    }

    #[test]
    fn oversized_sync_counts_saturate() {
        let mut total = ApSyncResult {
            processed: usize::MAX,
            skipped: 0,
        };
        total += ApSyncResult {
            processed: 5,
            skipped: 1,
        };
        assert_eq!(total.processed, usize::MAX);
        assert_eq!(total.accounted(), usize::MAX);
    }

    #[test]
    fn school_query_skips_empty_short_name() {
        let params = SchoolQuery::default().to_params();
        assert_eq!(
            params,
            vec![
                ("limit", "20".to_string()),
                ("activated_status", "active".to_string()),
            ]
        );

        let params = SchoolQuery::default().short_name("nhs").to_params();
        assert_eq!(params[2], ("apogee_short_internal_name", "nhs".to_string()));
    }

    #[test]
    fn switch_state_round_trips_as_integer() {
        let status = SwitchStatus {
            org: "nhs".into(),
            status: SwitchState::Up,
            name: "idf-1".into(),
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({ "apogee_short_internal_name": "nhs", "status": 1, "name": "idf-1" })
        );

        let sw: Switch = serde_json::from_value(json!({ "name": "idf-2", "status": 7 })).unwrap();
        assert_eq!(sw.status, SwitchState::Unknown(7));
        assert_eq!(sw.status.to_string(), "unknown(7)");
    }

    #[test]
    fn access_point_decodes_sparse_record() {
        let ap: AccessPoint = serde_json::from_value(json!({
            "id": "ap-1",
            "name": "NHS-B1-F2-R201",
            "mac_addresses": ["aa:bb:cc:dd:ee:ff"],
            "created_timestamp": "2024-03-01T12:00:00Z",
            "building": { "id": "b1", "name": "Main" },
            "location": { "latitude": 40.1 }
        }))
        .unwrap();
        assert_eq!(ap.id.as_deref(), Some("ap-1"));
        assert_eq!(ap.building.unwrap().name, "Main");
        assert!(ap.created_at.is_some());
        assert!(ap.switch.is_none());
        assert!((ap.location.unwrap().longitude - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sync_results_accumulate() {
        let mut total = ApSyncResult::default();
        total += ApSyncResult {
            processed: 90,
            skipped: 10,
        };
        total += ApSyncResult {
            processed: 49,
            skipped: 1,
        };
        assert_eq!(total.accounted(), 150);
    }
}
