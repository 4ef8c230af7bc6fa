//! The route response payload.
//!
//! Serialized field names are the external contract consumed by map UIs;
//! renames below keep the wire shape stable regardless of internal naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::air::Located;
use crate::model::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    Navigation,
    Arrival,
}

/// Air-quality estimate attributed to a single point of the route.
#[derive(Debug, Clone, Serialize)]
pub struct PointAirQuality {
    pub score: f64,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_sensor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_distance_km: Option<f64>,
}

impl PointAirQuality {
    /// Neutral estimate when no telemetry snapshot exists.
    pub fn no_data() -> Self {
        Self {
            score: 50.0,
            level: "no data".to_string(),
            nearest_sensor: None,
            sensor_distance_km: None,
        }
    }

    /// Neutral estimate when the snapshot holds no sensor within radius.
    pub fn no_nearby_data() -> Self {
        Self {
            score: 50.0,
            level: "no nearby data".to_string(),
            nearest_sensor: None,
            sensor_distance_km: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStep {
    /// 1-based and contiguous across the sequence.
    pub step_number: usize,
    pub instruction: String,
    pub coordinates: GeoPoint,
    pub distance_from_start_km: f64,
    pub estimated_time_min: f64,
    pub air_quality: PointAirQuality,
    #[serde(rename = "type")]
    pub kind: StepKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteEndpoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl RouteEndpoint {
    pub fn new(point: GeoPoint, name: impl Into<String>) -> Self {
        Self {
            lat: point.lat,
            lng: point.lng,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub total_distance_km: f64,
    pub total_distance_m: f64,
    pub estimated_duration_min: f64,
    pub transport_mode: String,
    pub nodes_in_route: usize,
    pub coordinates_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Rendering hints for centering and framing the route on a map.
#[derive(Debug, Clone, Serialize)]
pub struct MapData {
    pub bounds: MapBounds,
    pub center: GeoPoint,
    pub origin_marker: MapMarker,
    pub destination_marker: MapMarker,
}

impl MapData {
    pub fn from_path(coordinates: &[GeoPoint], origin: GeoPoint, destination: GeoPoint) -> Self {
        let fallback = [origin, destination];
        let points = if coordinates.is_empty() {
            &fallback[..]
        } else {
            coordinates
        };

        let mut north = points[0].lat;
        let mut south = points[0].lat;
        let mut east = points[0].lng;
        let mut west = points[0].lng;
        for point in points {
            north = north.max(point.lat);
            south = south.min(point.lat);
            east = east.max(point.lng);
            west = west.min(point.lng);
        }

        Self {
            bounds: MapBounds {
                north,
                south,
                east,
                west,
            },
            center: points[points.len() / 2],
            origin_marker: MapMarker {
                lat: origin.lat,
                lng: origin.lng,
                kind: "origin",
            },
            destination_marker: MapMarker {
                lat: destination.lat,
                lng: destination.lng,
                kind: "destination",
            },
        }
    }
}

/// One sampled route point that joined to a sensor.
#[derive(Debug, Clone, Serialize)]
pub struct SamplePoint {
    pub coordinates: GeoPoint,
    pub score: f64,
    pub quality_level: String,
    pub nearest_sensor: String,
}

/// Route-level air-quality summary: either a full analysis or a degraded
/// neutral form when no sensor data could be attributed to the route.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RouteAirQuality {
    Analyzed {
        average_score: f64,
        quality_level: String,
        samples_analyzed: usize,
        min_score: f64,
        max_score: f64,
        sample_points: Vec<SamplePoint>,
        recommendation: String,
    },
    NoData {
        average_score: f64,
        quality_level: String,
        message: String,
    },
}

impl RouteAirQuality {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData {
            average_score: 50.0,
            quality_level: "no data".to_string(),
            message: message.into(),
        }
    }
}

/// A candidate destination from the place-search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    pub category: String,
    pub address: String,
}

impl Located for Place {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Straight-line vs routed distance comparison for nearest-of-type requests.
#[derive(Debug, Clone, Serialize)]
pub struct NearestSearchInfo {
    pub search_type: String,
    pub straight_line_distance_km: f64,
    pub actual_route_distance_km: f64,
}

/// The assembled itinerary response.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub success: bool,
    #[serde(rename = "route_summary")]
    pub summary: RouteSummary,
    #[serde(rename = "step_by_step_instructions")]
    pub steps: Vec<RouteStep>,
    #[serde(rename = "route_coordinates")]
    pub coordinates: Vec<GeoPoint>,
    #[serde(rename = "air_quality_analysis")]
    pub air_quality: RouteAirQuality,
    pub map_data: MapData,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_info: Option<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_destinations: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_search: Option<NearestSearchInfo>,
}
