//! Raw road-network records as handed over by the map-parsing collaborator.

use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{NodeId, WayId};

/// Planar projected coordinates (metres) plus geographic coordinates
/// (radians) of one network point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub x: f64,
    pub y: f64,
    pub lat: f64,
    pub lon: f64,
}

impl GeoPosition {
    /// Projected view for geometry consumers.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// Traversal directions a way permits, from its `oneway` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WayDirection {
    Both,
    Forward,
    Reverse,
}

impl WayDirection {
    /// `oneway` tag values: `"no"` (default), `"yes"`, `"-1"`.
    pub fn from_oneway_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("yes") => WayDirection::Forward,
            Some("-1") => WayDirection::Reverse,
            _ => WayDirection::Both,
        }
    }
}

/// Road segment record: an ordered node sequence with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadWay {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    /// Road classification tag (`highway` value), kept for reporting and
    /// rendering collaborators.
    pub kind: String,
    pub lanes: u8,
    pub direction: WayDirection,
}

/// Network node: coordinates plus the ways it occurs in, one entry per
/// occurrence in input order.
#[derive(Debug, Clone)]
pub struct RoadNode {
    pub id: NodeId,
    pub position: GeoPosition,
    pub ways: Vec<WayId>,
}

/// Immutable raw network: id-indexed node and way tables.
#[derive(Debug, Default)]
pub struct RoadNetwork {
    nodes: HashMap<NodeId, RoadNode>,
    ways: HashMap<WayId, RoadWay>,
}

impl RoadNetwork {
    /// Associate parsed records into a network.
    ///
    /// Nodes on no way are dropped; way references to unknown nodes are
    /// logged and skipped so one broken record cannot poison the build.
    pub fn from_records(
        positions: impl IntoIterator<Item = (NodeId, GeoPosition)>,
        ways: Vec<RoadWay>,
    ) -> Self {
        let positions: HashMap<NodeId, GeoPosition> = positions.into_iter().collect();
        let mut nodes: HashMap<NodeId, RoadNode> = HashMap::new();
        let mut kept_ways: HashMap<WayId, RoadWay> = HashMap::with_capacity(ways.len());

        for mut way in ways {
            way.nodes.retain(|node_id| {
                let known = positions.contains_key(node_id);
                if !known {
                    warn!("way {} references unknown node {node_id}, skipping it", way.id);
                }
                known
            });
            for &node_id in &way.nodes {
                nodes
                    .entry(node_id)
                    .or_insert_with(|| RoadNode {
                        id: node_id,
                        position: positions[&node_id],
                        ways: Vec::new(),
                    })
                    .ways
                    .push(way.id);
            }
            kept_ways.insert(way.id, way);
        }

        RoadNetwork {
            nodes,
            ways: kept_ways,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.nodes.get(&id)
    }

    pub fn way(&self, id: WayId) -> Option<&RoadWay> {
        self.ways.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.nodes.values()
    }

    pub fn ways(&self) -> impl Iterator<Item = &RoadWay> {
        self.ways.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cumulative Haversine length in kilometres along a node id sequence.
    /// Ids missing from the network are skipped.
    pub fn segment_length_km(&self, ids: &[NodeId]) -> f64 {
        ids.iter()
            .filter_map(|&id| self.nodes.get(&id))
            .map(|node| node.position)
            .tuple_windows()
            .map(|(a, b)| crate::model::geodesy::haversine_km(&a, &b))
            .sum()
    }

    /// Road-kind frequency table, for reporting collaborators.
    pub fn kind_census(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for way in self.ways.values() {
            *counts.entry(way.kind.as_str()).or_default() += 1;
        }
        let mut census: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(kind, count)| (kind.to_owned(), count))
            .collect();
        census.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        census
    }
}
