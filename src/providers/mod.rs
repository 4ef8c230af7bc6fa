//! Contracts for the three external collaborators, plus the shipped
//! implementations.
//!
//! The pipeline only ever sees these traits, so it can be exercised against
//! fixed graphs, canned search results and canned sensor readings without
//! network access.

mod gazetteer;
mod streets;
mod telemetry;

pub use gazetteer::StaticGazetteer;
pub use streets::{StreetGraph, StreetGraphBuilder, StreetNetwork};
pub use telemetry::CaliAirApi;

use chrono::NaiveDate;

use crate::Error;
use crate::model::{GeoPoint, NodeId, Place, PollutantReading, SensorMeta, TravelMode};

/// Provider of mode-specific routable street networks.
///
/// `fetch_network` is assumed idempotent; no call is retried in-core.
pub trait GraphProvider {
    type Network;

    /// Obtains the street network of `area` for the given travel mode.
    fn fetch_network(&self, area: &str, mode: TravelMode) -> Result<Self::Network, Error>;

    /// Snaps an arbitrary coordinate to the nearest graph node.
    fn nearest_node(&self, network: &Self::Network, point: GeoPoint) -> Result<NodeId, Error>;

    /// Shortest path weighted by physical edge length, for every mode.
    fn shortest_path(
        &self,
        network: &Self::Network,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<NodeId>, Error>;

    fn node_location(&self, network: &Self::Network, node: NodeId) -> Result<GeoPoint, Error>;

    /// Physical length of the edge `from -> to` in meters, if the edge
    /// carries one.
    fn edge_length_m(&self, network: &Self::Network, from: NodeId, to: NodeId) -> Option<f64>;
}

/// Free-text place search. Results are ranked; may be empty.
pub trait PlaceSearch {
    fn search(&self, query: &str, area: &str, limit: usize) -> Result<Vec<Place>, Error>;
}

/// Municipal air-quality telemetry: device registry plus time-series metrics.
pub trait TelemetryProvider {
    fn list_sensor_nodes(&self) -> Result<Vec<SensorMeta>, Error>;

    /// Latest reading for the device on the given date, if any.
    fn latest_metrics(
        &self,
        device_id: &str,
        date: NaiveDate,
    ) -> Result<Option<PollutantReading>, Error>;
}
