//! Coordinates, travel modes and graph-anchored route nodes.

use std::fmt;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Opaque node identifier assigned by the graph provider.
pub type NodeId = i64;

/// Immutable WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidData(format!(
                "coordinates out of range: ({lat}, {lng})"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_km(&self, other: GeoPoint) -> f64 {
        Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Drive,
    Walk,
    Bike,
}

impl TravelMode {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "drive" => Some(Self::Drive),
            "walk" => Some(Self::Walk),
            "bike" => Some(Self::Bike),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Walk => "walk",
            Self::Bike => "bike",
        }
    }

    /// Human-facing name used in instructions and the route summary.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Drive => "driving",
            Self::Walk => "walking",
            Self::Bike => "cycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A point on a computed route, anchored to a graph node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteNode {
    pub node_id: NodeId,
    pub location: GeoPoint,
}
