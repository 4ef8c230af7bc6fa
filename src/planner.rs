//! The three planning entry points, composed from path computation, step
//! synthesis and air-quality analysis.

use chrono::Utc;
use log::{info, warn};
use serde_json::json;

use crate::Error;
use crate::air::{air_quality_snapshot, nearest_within};
use crate::config::PlannerConfig;
use crate::model::{
    GeoPoint, MapData, NearestSearchInfo, Place, RouteEndpoint, RouteResult, RouteSummary,
    TravelMode, round1, round2,
};
use crate::providers::{GraphProvider, PlaceSearch, TelemetryProvider};
use crate::routing::{analyze_route_air_quality, compute_path, synthesize_steps};

/// Composes a graph provider, a place-search backend and a telemetry
/// source into itinerary responses.
///
/// The planner holds no per-request state; a single instance serves any
/// number of sequential requests.
pub struct RoutePlanner<G, S, T> {
    graph: G,
    search: S,
    telemetry: T,
    config: PlannerConfig,
}

impl<G, S, T> RoutePlanner<G, S, T>
where
    G: GraphProvider,
    S: PlaceSearch,
    T: TelemetryProvider,
{
    pub fn new(graph: G, search: S, telemetry: T, config: PlannerConfig) -> Self {
        Self {
            graph,
            search,
            telemetry,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Route between two explicit coordinates.
    pub fn plan_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> Result<RouteResult, Error> {
        self.assemble(origin, destination, "Destination", mode)
    }

    /// Route to the first-ranked match of a free-text destination query.
    ///
    /// Up to two further candidates are attached as alternatives; zero
    /// matches is a `NotFound` failure.
    pub fn plan_route_to_place(
        &self,
        origin: GeoPoint,
        query: &str,
        mode: TravelMode,
    ) -> Result<RouteResult, Error> {
        info!("resolving destination query {query:?}");
        let mut candidates = self
            .search
            .search(query, &self.config.area, self.config.search_limit)?;
        if candidates.is_empty() {
            return Err(Error::NotFound(format!("destination '{query}' not found")));
        }

        let alternatives: Vec<Place> = candidates.drain(1..).take(2).collect();
        let chosen = candidates.remove(0);

        let mut result = self.assemble(origin, chosen.location, &chosen.name, mode)?;
        result.destination_info = Some(chosen);
        result.search_query = Some(query.to_string());
        result.alternative_destinations = alternatives;
        Ok(result)
    }

    /// Route to the nearest place of a given type within the configured
    /// search radius.
    ///
    /// Zero search results is `NotFound`; candidates that all exceed the
    /// radius are `OutOfRange`. The result carries the straight-line vs
    /// routed distance comparison.
    pub fn plan_route_to_nearest(
        &self,
        origin: GeoPoint,
        destination_type: &str,
        mode: TravelMode,
    ) -> Result<RouteResult, Error> {
        info!("searching nearest {destination_type:?}");
        let candidates =
            self.search
                .search(destination_type, &self.config.area, self.config.search_limit)?;
        if candidates.is_empty() {
            return Err(Error::NotFound(format!(
                "no '{destination_type}' found in {}",
                self.config.area
            )));
        }

        let radius_km = self.config.nearest_search_radius_km;
        let Some((chosen, straight_line_km)) = nearest_within(origin, &candidates, radius_km)
        else {
            return Err(Error::OutOfRange {
                query: destination_type.to_string(),
                radius_km,
            });
        };
        let chosen = chosen.clone();

        let mut result = self.assemble(origin, chosen.location, &chosen.name, mode)?;
        result.nearest_search = Some(NearestSearchInfo {
            search_type: destination_type.to_string(),
            straight_line_distance_km: round2(straight_line_km),
            actual_route_distance_km: result.summary.total_distance_km,
        });
        result.destination_info = Some(chosen);
        result.search_query = Some(destination_type.to_string());
        Ok(result)
    }

    /// [`Self::plan_route`], rendered as the structured JSON payload.
    pub fn plan_route_response(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> serde_json::Value {
        into_response(self.plan_route(origin, destination, mode))
    }

    pub fn plan_route_to_place_response(
        &self,
        origin: GeoPoint,
        query: &str,
        mode: TravelMode,
    ) -> serde_json::Value {
        into_response(self.plan_route_to_place(origin, query, mode))
    }

    pub fn plan_route_to_nearest_response(
        &self,
        origin: GeoPoint,
        destination_type: &str,
        mode: TravelMode,
    ) -> serde_json::Value {
        into_response(self.plan_route_to_nearest(origin, destination_type, mode))
    }

    /// The shared pipeline behind every entry point. Routing failures
    /// abort; air-quality degradation never does.
    fn assemble(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        destination_name: &str,
        mode: TravelMode,
    ) -> Result<RouteResult, Error> {
        let path = compute_path(&self.graph, &self.config.area, origin, destination, mode)?;

        let snapshot = air_quality_snapshot(&self.telemetry, &self.config, Utc::now().date_naive());

        let total_km = path.total_length_km();
        let steps = synthesize_steps(&self.config, &path.nodes, mode, total_km, &snapshot);
        let air_quality = analyze_route_air_quality(&self.config, &path.nodes, &snapshot);

        let coordinates = path.coordinates();
        let summary = RouteSummary {
            origin: RouteEndpoint::new(origin, "Origin"),
            destination: RouteEndpoint::new(destination, destination_name),
            total_distance_km: round2(total_km),
            total_distance_m: round2(path.total_length_m),
            estimated_duration_min: round1(total_km / self.config.speed_kmh(mode) * 60.0),
            transport_mode: mode.to_string(),
            nodes_in_route: path.nodes.len(),
            coordinates_count: coordinates.len(),
        };
        let map_data = MapData::from_path(&coordinates, origin, destination);

        Ok(RouteResult {
            success: true,
            summary,
            steps,
            coordinates,
            air_quality,
            map_data,
            timestamp: Utc::now(),
            destination_info: None,
            search_query: None,
            alternative_destinations: Vec::new(),
            nearest_search: None,
        })
    }
}

/// Renders a planning outcome as the wire payload: the serialized result
/// on success, a flat `success`/`error` object otherwise.
fn into_response(result: Result<RouteResult, Error>) -> serde_json::Value {
    match result.and_then(|route| {
        serde_json::to_value(&route).map_err(|e| Error::InvalidData(e.to_string()))
    }) {
        Ok(value) => value,
        Err(err) => {
            warn!("planning request failed: {err}");
            json!({ "success": false, "error": err.to_string() })
        }
    }
}
