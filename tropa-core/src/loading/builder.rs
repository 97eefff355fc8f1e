use log::info;

use super::splice::splice_spots;
use crate::model::graph::{GraphNode, NodeKind, RouteGraph, Spot};
use crate::model::network::{RoadNetwork, RoadNode, RoadWay, WayDirection};
use crate::timing::Stopwatch;
use crate::{Error, NodeId};

/// Builds the simplified route graph from a raw network and splices the
/// given spots into it.
///
/// Only significant nodes survive: branch points (more than one way
/// occurrence) and way endpoints. Interior pass-through nodes are skipped,
/// with their geometry folded into the edge weight, and stay available in
/// the network for later path expansion. Splicing happens here, before the
/// graph is ever visible to a query, so no caller can observe a partially
/// spliced graph.
///
/// # Errors
///
/// Returns an error if a spot cannot be attached to the network
/// ([`Error::NoPointsFound`], [`Error::GraphInconsistency`]).
pub fn build_route_graph(network: &RoadNetwork, spots: &[Spot]) -> Result<RouteGraph, Error> {
    let watch = Stopwatch::start();
    info!(
        "Building route graph from {} nodes and {} ways",
        network.node_count(),
        network.way_count()
    );

    let mut graph = RouteGraph::default();
    for node in network.nodes() {
        if is_significant(node, network) {
            graph.add_node(GraphNode {
                id: node.id,
                kind: NodeKind::Road,
                position: node.position,
            });
        }
    }
    info!(
        "{} significant nodes out of {}",
        graph.node_count(),
        network.node_count()
    );

    for way in network.ways() {
        add_way_edges(&mut graph, network, way)?;
    }

    splice_spots(&mut graph, network, spots)?;

    info!(
        "Route graph ready: {} nodes, {} edges ({} spots spliced) in {:.3} sec",
        graph.node_count(),
        graph.edge_count(),
        spots.len(),
        watch.elapsed().as_secs_f64()
    );
    Ok(graph)
}

/// Significance is keyed by node identity: a node occurring more than once
/// across ways is a branch point, and the first or last node of any of its
/// ways is a preserved dead end.
fn is_significant(node: &RoadNode, network: &RoadNetwork) -> bool {
    node.ways.len() > 1
        || node.ways.iter().any(|&way_id| {
            network.way(way_id).is_some_and(|way| {
                way.nodes.first() == Some(&node.id) || way.nodes.last() == Some(&node.id)
            })
        })
}

/// Walk one way in its effective direction and emit an edge per consecutive
/// pair of significant nodes, weighted by the along-way distance over the
/// skipped interior.
fn add_way_edges(
    graph: &mut RouteGraph,
    network: &RoadNetwork,
    way: &RoadWay,
) -> Result<(), Error> {
    let sequence: Vec<NodeId> = match way.direction {
        WayDirection::Reverse => way.nodes.iter().rev().copied().collect(),
        _ => way.nodes.clone(),
    };

    let mut previous: Option<&RoadNode> = None;
    let mut last_significant = None;
    let mut accumulated = 0.0;

    for &node_id in &sequence {
        let Some(node) = network.node(node_id) else {
            continue;
        };
        if let Some(prev) = previous {
            accumulated += crate::model::geodesy::haversine_km(&prev.position, &node.position);
        }
        if let Ok(index) = graph.index_of(node_id) {
            if let Some(last) = last_significant {
                match way.direction {
                    WayDirection::Both => graph.add_edge_pair(last, index, accumulated)?,
                    _ => graph.add_edge(last, index, accumulated)?,
                }
            }
            last_significant = Some(index);
            accumulated = 0.0;
        }
        previous = Some(node);
    }
    Ok(())
}
