//! Shortest-path computation over the graph provider.

use itertools::Itertools;
use log::{debug, info};

use crate::Error;
use crate::model::{GeoPoint, RouteNode, TravelMode};
use crate::providers::GraphProvider;

/// An ordered node path plus its physical length.
#[derive(Debug, Clone)]
pub struct ComputedPath {
    pub nodes: Vec<RouteNode>,
    pub total_length_m: f64,
}

impl ComputedPath {
    pub fn total_length_km(&self) -> f64 {
        self.total_length_m / 1000.0
    }

    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.nodes.iter().map(|node| node.location).collect()
    }
}

/// Snaps both endpoints to the network and computes the length-weighted
/// shortest path between them.
///
/// The objective is pure distance minimization for every travel mode; the
/// mode only selects which network is fetched. Edges without length
/// metadata contribute 0 to the total.
pub fn compute_path<G: GraphProvider>(
    provider: &G,
    area: &str,
    origin: GeoPoint,
    destination: GeoPoint,
    mode: TravelMode,
) -> Result<ComputedPath, Error> {
    info!("fetching {mode} network for {area}");
    let network = provider.fetch_network(area, mode)?;

    let origin_node = provider.nearest_node(&network, origin)?;
    let destination_node = provider.nearest_node(&network, destination)?;
    debug!("snapped endpoints to nodes {origin_node} and {destination_node}");

    let path = provider.shortest_path(&network, origin_node, destination_node)?;

    let mut nodes = Vec::with_capacity(path.len());
    for &id in &path {
        nodes.push(RouteNode {
            node_id: id,
            location: provider.node_location(&network, id)?,
        });
    }

    let total_length_m = path
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| provider.edge_length_m(&network, from, to).unwrap_or(0.0))
        .sum();

    debug!("path has {} nodes, {total_length_m:.0} m", nodes.len());
    Ok(ComputedPath {
        nodes,
        total_length_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{StreetGraph, StreetNetwork};

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    fn provider() -> StreetNetwork {
        let mut builder = StreetGraph::builder();
        builder
            .add_node(10, point(3.4400, -76.5400))
            .add_node(20, point(3.4450, -76.5400))
            .add_node(30, point(3.4500, -76.5400))
            .add_two_way(10, 20, 600.0)
            .add_two_way(20, 30, 600.0);

        let mut network = StreetNetwork::new();
        network.insert("Cali, Colombia", TravelMode::Drive, builder.build());
        network
    }

    #[test]
    fn sums_edge_lengths_along_the_path() {
        let path = compute_path(
            &provider(),
            "Cali, Colombia",
            point(3.4400, -76.5400),
            point(3.4500, -76.5400),
            TravelMode::Drive,
        )
        .unwrap();

        assert_eq!(path.nodes.len(), 3);
        assert_eq!(path.total_length_m, 1200.0);
        assert_eq!(path.nodes[0].node_id, 10);
        assert_eq!(path.nodes[2].node_id, 30);
    }

    #[test]
    fn identical_requests_yield_identical_paths() {
        let provider = provider();
        let origin = point(3.4401, -76.5401);
        let destination = point(3.4499, -76.5399);

        let first = compute_path(&provider, "Cali, Colombia", origin, destination, TravelMode::Drive).unwrap();
        let second = compute_path(&provider, "Cali, Colombia", origin, destination, TravelMode::Drive).unwrap();

        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.total_length_m, second.total_length_m);
    }

    #[test]
    fn missing_network_propagates_the_provider_error() {
        let err = compute_path(
            &provider(),
            "Cali, Colombia",
            point(3.44, -76.54),
            point(3.45, -76.54),
            TravelMode::Bike,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ProviderUnavailable(_)));
    }
}
