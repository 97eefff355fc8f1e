use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::model::RouteGraph;

/// A least-cost path over simplified-graph nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    /// Sum of edge weights in kilometres; infinite when unreachable.
    pub cost: f64,
    /// Node ids from source to destination; empty when unreachable.
    pub nodes: Vec<NodeId>,
}

impl RoutePath {
    /// The "no path" sentinel: infinite cost, empty sequence.
    pub fn unreachable() -> Self {
        RoutePath {
            cost: f64::INFINITY,
            nodes: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Walk the flat predecessor map backward from `target` to `source` and
/// reverse into a source-first path.
pub(super) fn trace(
    graph: &RouteGraph,
    predecessor: &[Option<NodeIndex>],
    source: NodeIndex,
    target: NodeIndex,
    cost: f64,
) -> RoutePath {
    let mut nodes = vec![graph.node_id(target)];
    let mut current = target;
    while current != source {
        match predecessor[current.index()] {
            Some(prev) => {
                nodes.push(graph.node_id(prev));
                current = prev;
            }
            None => return RoutePath::unreachable(),
        }
    }
    nodes.reverse();
    RoutePath { cost, nodes }
}
