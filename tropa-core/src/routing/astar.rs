use std::{cmp::Ordering, collections::BinaryHeap};

use petgraph::graph::NodeIndex;

use crate::model::{Heuristic, RouteGraph};
use crate::routing::path::{RoutePath, trace};
use crate::{Error, NodeId};

#[derive(Copy, Clone, PartialEq)]
struct State {
    /// Cost so far plus heuristic estimate to the target.
    estimate: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap ordering, as in the Dijkstra engine.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Heuristic-guided (A*) single-target search.
///
/// The frontier is keyed by cost-so-far plus the heuristic estimate;
/// neighbours are relaxed only on strict improvement, and the search stops
/// the moment the target is popped as the frontier minimum — correct as
/// long as the heuristic never overestimates. Returns the
/// [`RoutePath::unreachable`] sentinel when the frontier empties first.
///
/// # Errors
///
/// [`Error::UnknownNode`] when the source or target is not in the graph.
pub fn astar(
    graph: &RouteGraph,
    source: NodeId,
    target: NodeId,
    heuristic: Heuristic,
) -> Result<RoutePath, Error> {
    let start = graph.index_of(source)?;
    let goal = graph.index_of(target)?;
    let goal_position = graph.node(goal).position;

    let node_count = graph.node_count();
    let mut cost_so_far = vec![f64::INFINITY; node_count];
    let mut best_estimate = vec![f64::INFINITY; node_count];
    let mut predecessor: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut frontier = BinaryHeap::new();

    cost_so_far[start.index()] = 0.0;
    let start_estimate = heuristic.estimate(&graph.node(start).position, &goal_position);
    best_estimate[start.index()] = start_estimate;
    frontier.push(State {
        estimate: start_estimate,
        node: start,
    });

    while let Some(State { estimate, node }) = frontier.pop() {
        if node == goal {
            return Ok(trace(
                graph,
                &predecessor,
                start,
                goal,
                cost_so_far[goal.index()],
            ));
        }
        // Stale entry superseded by a later improvement.
        if estimate > best_estimate[node.index()] {
            continue;
        }

        for (next, weight) in graph.edges(node) {
            let tentative = cost_so_far[node.index()] + weight;
            if tentative < cost_so_far[next.index()] {
                cost_so_far[next.index()] = tentative;
                predecessor[next.index()] = Some(node);
                let next_estimate =
                    tentative + heuristic.estimate(&graph.node(next).position, &goal_position);
                best_estimate[next.index()] = next_estimate;
                frontier.push(State {
                    estimate: next_estimate,
                    node: next,
                });
            }
        }
    }

    Ok(RoutePath::unreachable())
}
