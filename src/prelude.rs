//! Convenience re-exports for typical planner usage.

pub use crate::config::PlannerConfig;
pub use crate::error::Error;

// Re-export key components
pub use crate::planner::RoutePlanner;
pub use crate::providers::{
    CaliAirApi, GraphProvider, PlaceSearch, StaticGazetteer, StreetGraph, StreetNetwork,
    TelemetryProvider,
};
pub use crate::routing::{ComputedPath, compute_path};

// Core data types
pub use crate::model::{GeoPoint, NodeId, Place, RouteResult, TravelMode};
