//! Route planning over urban street networks with air-quality annotation.
//!
//! Given an origin, a destination (explicit coordinates, a free-text place
//! query, or a "nearest of this type" request) and a travel mode, the crate
//! computes a length-weighted shortest path over a street graph, reduces it
//! to a bounded sequence of navigation steps, and overlays an air-quality
//! assessment sampled along the path from the nearest municipal sensors.
//!
//! The street graph, place search and sensor telemetry are external
//! collaborators behind the narrow traits in [`providers`], so the whole
//! pipeline runs against fixed in-memory stubs in tests. Shipped
//! implementations cover the in-memory street network, the static Cali
//! gazetteer and the municipal air-quality HTTP API.

pub mod air;
pub mod config;
mod error;
pub mod model;
pub mod planner;
pub mod prelude;
pub mod providers;
pub mod routing;

pub use config::PlannerConfig;
pub use error::Error;
pub use planner::RoutePlanner;
