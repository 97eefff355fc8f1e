use thiserror::Error;

use crate::{NodeId, WayId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("No road nodes available for snapping")]
    NoPointsFound,
    #[error("Node {0} is not part of the route graph")]
    UnknownNode(NodeId),
    #[error("Empty target set")]
    EmptyTargetSet,
    #[error("Negative weight {weight} on edge {from} -> {to}")]
    NegativeEdgeWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },
    #[error("Terminal {0} is unreachable from the tour end")]
    DisconnectedTerminal(NodeId),
    #[error("Cannot promote node {node}: no significant neighbour along way {way}")]
    GraphInconsistency { node: NodeId, way: WayId },
}
