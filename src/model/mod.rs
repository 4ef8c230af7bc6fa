//! Data model for route planning and air-quality attribution.

pub mod point;
pub mod route;
pub mod sensors;

pub use point::{GeoPoint, NodeId, RouteNode, TravelMode};
pub use route::{
    MapBounds, MapData, MapMarker, NearestSearchInfo, Place, PointAirQuality, RouteAirQuality,
    RouteEndpoint, RouteResult, RouteStep, RouteSummary, SamplePoint, StepKind,
};
pub use sensors::{
    AirQualitySample, AirQualitySnapshot, PollutantReading, SensorMeta, SensorNode,
};

/// Rounding used throughout the response payload.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
