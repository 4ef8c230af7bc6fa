//! Air-quality sensor registry rows and per-request snapshots.

use serde::{Deserialize, Serialize};

use crate::air::Located;
use crate::model::GeoPoint;

/// A row of the sensor registry as reported by the telemetry provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorMeta {
    pub name: String,
    pub location: GeoPoint,
    pub address: String,
    /// Absent for registry entries that are plain points of interest.
    pub device_id: Option<String>,
    pub description: String,
}

/// Latest raw pollutant averages for one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pm2_5_avg: Option<f64>,
    pub pm10_avg: Option<f64>,
    pub timestamp: Option<String>,
}

/// A scored reading, derived deterministically from [`PollutantReading`].
#[derive(Debug, Clone, Serialize)]
pub struct AirQualitySample {
    pub device_id: String,
    pub timestamp: Option<String>,
    pub pm2_5_avg: Option<f64>,
    pub pm10_avg: Option<f64>,
    /// Bounded 0-100, higher is better.
    pub score: f64,
}

/// A sensor that produced data for the current request. Registry rows
/// without a device or without readings never become sensor nodes.
#[derive(Debug, Clone, Serialize)]
pub struct SensorNode {
    pub name: String,
    pub location: GeoPoint,
    pub sample: AirQualitySample,
}

impl Located for SensorNode {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Sensor data valid for the lifetime of one routing request.
///
/// `Unavailable` (the telemetry fetch failed) is deliberately distinct from
/// `Ready` with an empty sensor list; the analyzer reports them differently.
#[derive(Debug, Clone)]
pub enum AirQualitySnapshot {
    Unavailable,
    Ready(Vec<SensorNode>),
}

impl AirQualitySnapshot {
    pub fn sensors(&self) -> Option<&[SensorNode]> {
        match self {
            Self::Unavailable => None,
            Self::Ready(sensors) => Some(sensors),
        }
    }
}
