//! In-memory street networks backing the [`GraphProvider`] seam.
//!
//! Graphs are registered per (area, mode) pair and shared via `Arc`, so a
//! "fetch" is a cheap lookup. Snapping uses an R-tree over node
//! coordinates; shortest paths use Dijkstra with predecessor
//! reconstruction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::Error;
use crate::model::{GeoPoint, NodeId, TravelMode};
use crate::providers::GraphProvider;

type SnapPoint = GeomWithData<[f64; 2], NodeIndex>;

#[derive(Debug, Clone)]
struct StreetNode {
    id: NodeId,
    location: GeoPoint,
}

#[derive(Debug, Clone, Copy)]
struct StreetEdge {
    length_m: f64,
}

/// A routable street graph for one area and travel mode.
pub struct StreetGraph {
    graph: DiGraph<StreetNode, StreetEdge>,
    ids: HashMap<NodeId, NodeIndex>,
    rtree: RTree<SnapPoint>,
}

impl StreetGraph {
    pub fn builder() -> StreetGraphBuilder {
        StreetGraphBuilder::default()
    }

    fn index_of(&self, node: NodeId) -> Result<NodeIndex, Error> {
        self.ids
            .get(&node)
            .copied()
            .ok_or_else(|| Error::InvalidData(format!("unknown graph node {node}")))
    }

    /// Dijkstra over edge lengths, tracing predecessors so the node path
    /// can be reconstructed. Returns `None` when `target` is unreachable.
    fn shortest_path_indices(
        &self,
        start: NodeIndex,
        target: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        let estimated = self.graph.node_count().min(1000);
        let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated);
        let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated);
        let mut heap = BinaryHeap::with_capacity(estimated / 4);

        heap.push(State {
            cost: 0.0,
            node: start,
        });
        distances.insert(start, 0.0);

        while let Some(State { cost, node }) = heap.pop() {
            if node == target {
                break;
            }
            // Skip stale heap entries for which a better path is known
            if let Some(&best) = distances.get(&node)
                && cost > best
            {
                continue;
            }

            for edge in self.graph.edges(node) {
                let next = edge.target();
                let next_cost = cost + edge.weight().length_m;

                match distances.entry(next) {
                    hashbrown::hash_map::Entry::Vacant(entry) => {
                        entry.insert(next_cost);
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                    hashbrown::hash_map::Entry::Occupied(mut entry) => {
                        if next_cost < *entry.get() {
                            *entry.get_mut() = next_cost;
                            predecessors.insert(next, node);
                            heap.push(State {
                                cost: next_cost,
                                node: next,
                            });
                        }
                    }
                }
            }
        }

        if target != start && !predecessors.contains_key(&target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != start {
            current = *predecessors.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from the standard BinaryHeap order)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub struct StreetGraphBuilder {
    graph: DiGraph<StreetNode, StreetEdge>,
    ids: HashMap<NodeId, NodeIndex>,
}

impl StreetGraphBuilder {
    pub fn add_node(&mut self, id: NodeId, location: GeoPoint) -> &mut Self {
        self.ids
            .entry(id)
            .or_insert_with(|| self.graph.add_node(StreetNode { id, location }));
        self
    }

    /// Adds a one-way street segment. Segments referencing unknown nodes
    /// are dropped, as happens with incomplete OSM extracts.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) -> &mut Self {
        match (self.ids.get(&from), self.ids.get(&to)) {
            (Some(&a), Some(&b)) => {
                self.graph.add_edge(a, b, StreetEdge { length_m });
            }
            _ => warn!("dropping edge {from}->{to}: endpoint not in graph"),
        }
        self
    }

    /// Adds a two-way street segment.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, length_m: f64) -> &mut Self {
        self.add_edge(a, b, length_m);
        self.add_edge(b, a, length_m)
    }

    pub fn build(self) -> StreetGraph {
        let points: Vec<SnapPoint> = self
            .graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                GeomWithData::new([node.location.lng, node.location.lat], idx)
            })
            .collect();

        StreetGraph {
            graph: self.graph,
            ids: self.ids,
            rtree: RTree::bulk_load(points),
        }
    }
}

/// Registry of pre-built street graphs keyed by area and travel mode.
pub struct StreetNetwork {
    networks: HashMap<(String, TravelMode), Arc<StreetGraph>>,
    /// Snapping beyond this distance fails; `None` accepts any node.
    snap_radius_km: Option<f64>,
}

impl Default for StreetNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl StreetNetwork {
    pub fn new() -> Self {
        Self {
            networks: HashMap::new(),
            snap_radius_km: None,
        }
    }

    pub fn with_snap_radius(mut self, km: f64) -> Self {
        self.snap_radius_km = Some(km);
        self
    }

    pub fn insert(&mut self, area: impl Into<String>, mode: TravelMode, graph: StreetGraph) {
        self.networks.insert((area.into(), mode), Arc::new(graph));
    }
}

impl GraphProvider for StreetNetwork {
    type Network = Arc<StreetGraph>;

    fn fetch_network(&self, area: &str, mode: TravelMode) -> Result<Self::Network, Error> {
        self.networks
            .get(&(area.to_string(), mode))
            .cloned()
            .ok_or_else(|| {
                Error::ProviderUnavailable(format!("no {mode} street network loaded for '{area}'"))
            })
    }

    fn nearest_node(&self, network: &Self::Network, point: GeoPoint) -> Result<NodeId, Error> {
        let hit = network
            .rtree
            .nearest_neighbor(&[point.lng, point.lat])
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "no routable node near ({}, {})",
                    point.lat, point.lng
                ))
            })?;

        let node = &network.graph[hit.data];
        if let Some(radius_km) = self.snap_radius_km
            && point.distance_km(node.location) > radius_km
        {
            return Err(Error::NotFound(format!(
                "no routable node within {radius_km} km of ({}, {})",
                point.lat, point.lng
            )));
        }
        Ok(node.id)
    }

    fn shortest_path(
        &self,
        network: &Self::Network,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<NodeId>, Error> {
        let start = network.index_of(origin)?;
        let target = network.index_of(destination)?;

        let path = network
            .shortest_path_indices(start, target)
            .ok_or_else(|| Error::NotFound("no path between the selected points".to_string()))?;

        Ok(path.into_iter().map(|idx| network.graph[idx].id).collect())
    }

    fn node_location(&self, network: &Self::Network, node: NodeId) -> Result<GeoPoint, Error> {
        let idx = network.index_of(node)?;
        Ok(network.graph[idx].location)
    }

    fn edge_length_m(&self, network: &Self::Network, from: NodeId, to: NodeId) -> Option<f64> {
        let a = network.ids.get(&from)?;
        let b = network.ids.get(&to)?;
        let edge = network.graph.find_edge(*a, *b)?;
        Some(network.graph[edge].length_m)
    }
}
