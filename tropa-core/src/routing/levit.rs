use std::collections::VecDeque;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::model::RouteGraph;
use crate::routing::path::{RoutePath, trace};
use crate::{Error, NodeId};

/// Per-node bucket of the label-correcting search.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    QueuedNormal,
    QueuedUrgent,
    Scanned,
}

/// Label-correcting (Levit) search with a normal and an urgent queue.
///
/// A freshly discovered node enters the normal queue; a scanned node whose
/// distance improves re-enters through the urgent queue, which is always
/// drained first. The whole reachable component is processed in one pass
/// and `targets` only filter the output.
///
/// # Errors
///
/// [`Error::UnknownNode`] when the source or a target is not in the graph.
pub fn levit(
    graph: &RouteGraph,
    source: NodeId,
    targets: &[NodeId],
) -> Result<HashMap<NodeId, RoutePath>, Error> {
    let start = graph.index_of(source)?;
    let node_count = graph.node_count();

    let mut distance = vec![f64::INFINITY; node_count];
    let mut predecessor: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut label = vec![Label::Unvisited; node_count];
    let mut normal = VecDeque::new();
    let mut urgent = VecDeque::new();

    distance[start.index()] = 0.0;
    label[start.index()] = Label::QueuedNormal;
    normal.push_back(start);

    while let Some(node) = urgent.pop_front().or_else(|| normal.pop_front()) {
        label[node.index()] = Label::Scanned;

        for (next, weight) in graph.edges(node) {
            let candidate = distance[node.index()] + weight;
            let improved = candidate < distance[next.index()];
            if improved {
                distance[next.index()] = candidate;
                predecessor[next.index()] = Some(node);
            }
            match label[next.index()] {
                Label::Unvisited => {
                    label[next.index()] = Label::QueuedNormal;
                    normal.push_back(next);
                }
                Label::Scanned if improved => {
                    label[next.index()] = Label::QueuedUrgent;
                    urgent.push_back(next);
                }
                _ => {}
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
