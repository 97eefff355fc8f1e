//! Simplified weighted directed graph over significant nodes.
//!
//! Node weights carry the external identifier and coordinates, so
//! heuristics read everything they need from the graph itself — no
//! ambient coordinate context. The graph is mutated only while
//! [`build_route_graph`](crate::loading::build_route_graph) runs; once
//! returned it is immutable and freely shareable across query threads.

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::model::network::GeoPosition;
use crate::{Error, NodeId};

/// Whether a graph node came from the road network or was spliced in as a
/// point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Road,
    Spot,
}

/// Off-network point of interest to splice into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Caller-assigned id; must not collide with network node ids.
    pub id: NodeId,
    pub position: GeoPosition,
}

/// Node payload of the simplified graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: GeoPosition,
}

/// Simplified routing graph: significant road nodes and spliced spots,
/// directed edges weighted in kilometres.
#[derive(Debug, Default)]
pub struct RouteGraph {
    pub(crate) graph: DiGraph<GraphNode, f64>,
    index: HashMap<NodeId, NodeIndex>,
}

impl RouteGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn index_of(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.index.get(&id).copied().ok_or(Error::UnknownNode(id))
    }

    pub fn node(&self, index: NodeIndex) -> &GraphNode {
        &self.graph[index]
    }

    pub fn node_id(&self, index: NodeIndex) -> NodeId {
        self.graph[index].id
    }

    /// Ids of every node kept in the simplified graph.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|node| node.id)
    }

    /// Ids of the significant road nodes (spliced spots excluded).
    pub fn significant_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .node_weights()
            .filter(|node| node.kind == NodeKind::Road)
            .map(|node| node.id)
    }

    /// Outgoing `(neighbor, weight)` pairs of `index`.
    pub fn edges(&self, index: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph
            .edges(index)
            .map(|edge| (edge.target(), *edge.weight()))
    }

    pub(crate) fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let id = node.id;
        let index = self.graph.add_node(node);
        self.index.insert(id, index);
        index
    }

    /// Insert a directed edge; the only place weights enter the graph, so
    /// every query can rely on them being non-negative.
    pub(crate) fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        weight: f64,
    ) -> Result<(), Error> {
        if weight < 0.0 {
            return Err(Error::NegativeEdgeWeight {
                from: self.node_id(from),
                to: self.node_id(to),
                weight,
            });
        }
        self.graph.add_edge(from, to, weight);
        Ok(())
    }

    pub(crate) fn add_edge_pair(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        weight: f64,
    ) -> Result<(), Error> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }
}
