// insights-api: Blocking Rust client for the Insights inventory and telemetry API
//
// One `InsightsClient` per configured service. Endpoint groups live in their
// own modules as inherent `impl InsightsClient` blocks; `client` owns request
// construction, execution, and envelope decoding.

pub mod access_points;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod report;
pub mod schools;
pub mod switches;
pub mod telemetry;
pub mod transport;

pub use access_points::SYNC_CHUNK_SIZE;
pub use auth::TokenStore;
pub use client::InsightsClient;
pub use error::Error;
pub use models::{
    AccessPoint, ApPattern, ApSyncResult, Building, DataPoint, Dimension, ErrorReport, Location,
    Measure, Page, School, SchoolQuery, Switch, SwitchState, SwitchStatus, SyncAp,
    UpdateSwitchUptime, UserDevice,
};
pub use transport::{TlsMode, TransportConfig};
