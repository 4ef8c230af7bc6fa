use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::model::{GeoPoint, RouteAirQuality, RouteResult};

impl RouteResult {
    /// Converts the itinerary to a `GeoJSON` `FeatureCollection`: the
    /// route polyline, the two endpoint markers and any analyzed air
    /// quality sample points.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = vec![
            self.route_feature()?,
            endpoint_feature(
                GeoPoint {
                    lat: self.summary.origin.lat,
                    lng: self.summary.origin.lng,
                },
                "origin",
                &self.summary.origin.name,
            )?,
            endpoint_feature(
                GeoPoint {
                    lat: self.summary.destination.lat,
                    lng: self.summary.destination.lng,
                },
                "destination",
                &self.summary.destination.name,
            )?,
        ];

        if let RouteAirQuality::Analyzed { sample_points, .. } = &self.air_quality {
            for sample in sample_points {
                let geometry = Geometry::new(GeoJsonValue::from(&sample.coordinates.to_point()));
                let value = json!({
                    "type": "Feature",
                    "geometry": geometry,
                    "properties": {
                        "marker_type": "air_quality_sample",
                        "score": sample.score,
                        "quality_level": sample.quality_level,
                        "nearest_sensor": sample.nearest_sensor,
                    }
                });
                features.push(
                    Feature::from_json_value(value).map_err(|e| Error::InvalidData(e.to_string()))?,
                );
            }
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::InvalidData(e.to_string()))
    }

    fn route_feature(&self) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self
            .coordinates
            .iter()
            .map(|point| Coord {
                x: point.lng,
                y: point.lat,
            })
            .collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "feature_type": "route",
                "transport_mode": self.summary.transport_mode,
                "total_distance_km": self.summary.total_distance_km,
                "estimated_duration_min": self.summary.estimated_duration_min,
            }
        });

        Feature::from_json_value(value).map_err(|e| Error::InvalidData(e.to_string()))
    }
}

fn endpoint_feature(location: GeoPoint, marker_type: &str, name: &str) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&location.to_point()));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "marker_type": marker_type,
            "name": name,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{MapData, RouteEndpoint, RouteSummary, SamplePoint};

    fn result_with(air_quality: RouteAirQuality) -> RouteResult {
        let coordinates = vec![
            GeoPoint { lat: 3.44, lng: -76.54 },
            GeoPoint { lat: 3.42, lng: -76.53 },
            GeoPoint { lat: 3.40, lng: -76.53 },
        ];
        RouteResult {
            success: true,
            summary: RouteSummary {
                origin: RouteEndpoint::new(coordinates[0], "Origin"),
                destination: RouteEndpoint::new(coordinates[2], "Destination"),
                total_distance_km: 4.9,
                total_distance_m: 4900.0,
                estimated_duration_min: 7.4,
                transport_mode: "drive".to_string(),
                nodes_in_route: 3,
                coordinates_count: 3,
            },
            steps: vec![],
            coordinates: coordinates.clone(),
            air_quality,
            map_data: MapData::from_path(&coordinates, coordinates[0], coordinates[2]),
            timestamp: Utc::now(),
            destination_info: None,
            search_query: None,
            alternative_destinations: vec![],
            nearest_search: None,
        }
    }

    #[test]
    fn degraded_route_exports_polyline_and_markers() {
        let collection = result_with(RouteAirQuality::no_data("telemetry down"))
            .to_geojson()
            .unwrap();

        assert_eq!(collection.features.len(), 3);
        let route = &collection.features[0];
        let properties = route.properties.as_ref().unwrap();
        assert_eq!(properties["feature_type"], "route");
        assert_eq!(properties["total_distance_km"], 4.9);

        let markers: Vec<_> = collection.features[1..]
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["marker_type"].clone())
            .collect();
        assert_eq!(markers, vec!["origin", "destination"]);
    }

    #[test]
    fn analyzed_route_exports_sample_point_features() {
        let analyzed = RouteAirQuality::Analyzed {
            average_score: 72.5,
            quality_level: "good".to_string(),
            samples_analyzed: 4,
            min_score: 60.0,
            max_score: 85.0,
            sample_points: vec![SamplePoint {
                coordinates: GeoPoint { lat: 3.43, lng: -76.535 },
                score: 72.5,
                quality_level: "good".to_string(),
                nearest_sensor: "Estación Norte".to_string(),
            }],
            recommendation: "Good conditions for outdoor activities".to_string(),
        };

        let collection = result_with(analyzed).to_geojson().unwrap();
        assert_eq!(collection.features.len(), 4);
        let sample = collection.features[3].properties.as_ref().unwrap();
        assert_eq!(sample["marker_type"], "air_quality_sample");
        assert_eq!(sample["nearest_sensor"], "Estación Norte");
    }

    #[test]
    fn geojson_string_round_trips_through_serde() {
        let text = result_with(RouteAirQuality::no_data("telemetry down"))
            .to_geojson_string()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }
}
