use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, HashSet};
use petgraph::graph::NodeIndex;

use crate::model::RouteGraph;
use crate::routing::path::{RoutePath, trace};
use crate::{Error, NodeId};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Multi-target label-setting (Dijkstra) search.
///
/// Settles nodes in cost order and exits early once every requested target
/// has been settled. Unreachable targets are simply absent from the result.
///
/// # Errors
///
/// [`Error::UnknownNode`] when the source or a target is not in the graph.
pub fn dijkstra(
    graph: &RouteGraph,
    source: NodeId,
    targets: &[NodeId],
) -> Result<HashMap<NodeId, RoutePath>, Error> {
    let start = graph.index_of(source)?;
    let mut remaining: HashSet<NodeIndex> = targets
        .iter()
        .map(|&id| graph.index_of(id))
        .collect::<Result<_, _>>()?;

    let node_count = graph.node_count();
    let mut distance = vec![f64::INFINITY; node_count];
    let mut predecessor: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();

    distance[start.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if settled.contains(node.index()) {
            continue;
        }
        settled.insert(node.index());

        remaining.remove(&node);
        if remaining.is_empty() {
            break;
        }

        for (next, weight) in graph.edges(node) {
            let next_cost = cost + weight;
            if next_cost < distance[next.index()] {
                distance[next.index()] = next_cost;
                predecessor[next.index()] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let mut paths = HashMap::with_capacity(targets.len());
    for &target in targets {
        let index = graph.index_of(target)?;
        let cost = distance[index.index()];
        if cost.is_finite() {
            paths.insert(target, trace(graph, &predecessor, start, index, cost));
        }
    }
    Ok(paths)
}
