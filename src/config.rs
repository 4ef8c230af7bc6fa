//! Pipeline configuration.
//!
//! Every tunable the pipeline consumes lives here and is passed in at
//! construction time, so tests can run the whole pipeline with alternate
//! speeds, radii and scoring weights. Defaults reproduce the production
//! constants for Cali, Colombia.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::TravelMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Area name handed to the graph provider, e.g. `"Cali, Colombia"`.
    pub area: String,

    /// Assumed average speeds for duration estimates, km/h.
    pub drive_speed_kmh: f64,
    pub walk_speed_kmh: f64,
    pub bike_speed_kmh: f64,
    /// Applied when a textual mode keyword is not recognized.
    pub fallback_speed_kmh: f64,

    /// Maximum sensor distance for attributing air quality to a point, km.
    pub sensor_join_radius_km: f64,
    /// Default radius for nearest-destination searches, km.
    pub nearest_search_radius_km: f64,
    /// Maximum number of place-search candidates requested.
    pub search_limit: usize,

    /// Bounds on the number of navigation segments per route.
    pub min_step_segments: usize,
    pub max_step_segments: usize,
    /// One step segment / analysis sample per this many route nodes.
    pub route_sample_divisor: usize,
    /// Sample points echoed back in the route air-quality summary.
    pub max_sample_points: usize,

    /// Air-quality score: per-pollutant slopes and blend weights.
    pub pm25_slope: f64,
    pub pm10_slope: f64,
    pub pm25_weight: f64,
    pub pm10_weight: f64,

    /// Per-call timeout for the telemetry API, seconds.
    pub telemetry_timeout_secs: u64,
    /// Budget for obtaining a street network; fetching an entire urban area
    /// is expensive. Ignored by in-memory providers.
    pub graph_timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            area: "Cali, Colombia".to_string(),
            drive_speed_kmh: 40.0,
            walk_speed_kmh: 5.0,
            bike_speed_kmh: 15.0,
            fallback_speed_kmh: 20.0,
            sensor_join_radius_km: 3.0,
            nearest_search_radius_km: 10.0,
            search_limit: 5,
            min_step_segments: 3,
            max_step_segments: 8,
            route_sample_divisor: 10,
            max_sample_points: 3,
            pm25_slope: 2.0,
            pm10_slope: 0.5,
            pm25_weight: 0.7,
            pm10_weight: 0.3,
            telemetry_timeout_secs: 10,
            graph_timeout_secs: 300,
        }
    }
}

impl PlannerConfig {
    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Drive => self.drive_speed_kmh,
            TravelMode::Walk => self.walk_speed_kmh,
            TravelMode::Bike => self.bike_speed_kmh,
        }
    }

    /// Speed lookup for textual mode keywords, as received from
    /// conversational front-ends. Unrecognized keywords fall back to
    /// [`Self::fallback_speed_kmh`].
    pub fn speed_for_keyword(&self, keyword: &str) -> f64 {
        TravelMode::from_keyword(keyword)
            .map_or(self.fallback_speed_kmh, |mode| self.speed_kmh(mode))
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_secs(self.telemetry_timeout_secs)
    }

    pub fn graph_timeout(&self) -> Duration {
        Duration::from_secs(self.graph_timeout_secs)
    }
}
