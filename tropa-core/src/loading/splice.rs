//! Splicing of off-network spots into the route graph.
//!
//! Each spot is attached to the nearest network node, found through an
//! R-tree over projected coordinates. When that node is a pass-through
//! node it is promoted first: the nearest significant node in each
//! direction along its way becomes a neighbour, so the node is routable
//! before the spot hangs off it.

use log::debug;
use petgraph::graph::NodeIndex;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::model::geodesy::haversine_km;
use crate::model::graph::{GraphNode, NodeKind, RouteGraph, Spot};
use crate::model::network::{RoadNetwork, RoadNode};
use crate::{Error, NodeId};

/// R-tree entry: projected `[x, y]` point with the associated node id.
struct SnapEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for SnapEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SnapEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

pub(super) fn splice_spots(
    graph: &mut RouteGraph,
    network: &RoadNetwork,
    spots: &[Spot],
) -> Result<(), Error> {
    if spots.is_empty() {
        return Ok(());
    }
    if network.is_empty() {
        return Err(Error::NoPointsFound);
    }

    let tree = RTree::bulk_load(
        network
            .nodes()
            .map(|node| {
                let point = node.position.point();
                SnapEntry {
                    point: [point.x(), point.y()],
                    id: node.id,
                }
            })
            .collect(),
    );

    for spot in spots {
        let entry = tree
            .nearest_neighbor(&[spot.position.x, spot.position.y])
            .ok_or(Error::NoPointsFound)?;
        let anchor = network.node(entry.id).ok_or(Error::UnknownNode(entry.id))?;
        let anchor_index = match graph.index_of(anchor.id) {
            Ok(index) => index,
            Err(_) => promote_pass_through(graph, network, anchor)?,
        };

        let spot_index = graph.add_node(GraphNode {
            id: spot.id,
            kind: NodeKind::Spot,
            position: spot.position,
        });
        let weight = haversine_km(&spot.position, &anchor.position);
        graph.add_edge_pair(spot_index, anchor_index, weight)?;
        debug!(
            "spliced spot {} onto node {} ({weight:.4} km)",
            spot.id, anchor.id
        );
    }
    Ok(())
}

/// Make a pass-through node routable by connecting it to the nearest
/// significant node in each direction along its way.
///
/// A way always has significant endpoints, so failing to find a neighbour
/// on either side means the input topology is inconsistent.
fn promote_pass_through(
    graph: &mut RouteGraph,
    network: &RoadNetwork,
    node: &RoadNode,
) -> Result<NodeIndex, Error> {
    // A pass-through node is interior to exactly one way; anything on
    // several ways would already be significant.
    for &way_id in &node.ways {
        let Some(way) = network.way(way_id) else {
            continue;
        };
        let Some(here) = way.nodes.iter().position(|&id| id == node.id) else {
            continue;
        };
        let before = (0..here).rev().find(|&i| graph.contains(way.nodes[i]));
        let after = (here + 1..way.nodes.len()).find(|&i| graph.contains(way.nodes[i]));
        if let (Some(before), Some(after)) = (before, after) {
            let index = graph.add_node(GraphNode {
                id: node.id,
                kind: NodeKind::Road,
                position: node.position,
            });
            let before_index = graph.index_of(way.nodes[before])?;
            let after_index = graph.index_of(way.nodes[after])?;
            graph.add_edge_pair(index, before_index, network.segment_length_km(&way.nodes[before..=here]))?;
            graph.add_edge_pair(index, after_index, network.segment_length_km(&way.nodes[here..=after]))?;
            debug!(
                "promoted pass-through node {} between {} and {}",
                node.id, way.nodes[before], way.nodes[after]
            );
            return Ok(index);
        }
    }
    Err(Error::GraphInconsistency {
        node: node.id,
        way: node.ways.first().copied().unwrap_or_default(),
    })
}
