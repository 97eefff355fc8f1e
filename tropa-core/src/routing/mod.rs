//! Shortest-path engines over the simplified route graph.

mod astar;
mod dijkstra;
mod expand;
mod levit;
mod path;

pub use astar::astar;
pub use dijkstra::dijkstra;
pub use expand::expand_path;
pub use levit::levit;
pub use path::RoutePath;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Heuristic, RouteGraph};
use crate::{Error, NodeId};

/// Selectable shortest-path algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathAlgorithm {
    Dijkstra,
    Levit,
    AStar(Heuristic),
}

/// Computes shortest paths from `source` to every node in `targets` with
/// the chosen algorithm.
///
/// Returns a map holding only the *reached* targets; a missing entry means
/// the target is unreachable, which is not an error. The query itself is
/// validated before any search starts.
///
/// # Errors
///
/// [`Error::EmptyTargetSet`] for an empty target set and
/// [`Error::UnknownNode`] when the source or a target is not part of the
/// graph.
pub fn shortest_paths(
    graph: &RouteGraph,
    source: NodeId,
    targets: &[NodeId],
    algorithm: PathAlgorithm,
) -> Result<HashMap<NodeId, RoutePath>, Error> {
    validate_query(graph, source, targets)?;
    match algorithm {
        PathAlgorithm::Dijkstra => dijkstra(graph, source, targets),
        PathAlgorithm::Levit => levit(graph, source, targets),
        PathAlgorithm::AStar(heuristic) => {
            let mut paths = HashMap::with_capacity(targets.len());
            for &target in targets {
                let path = astar(graph, source, target, heuristic)?;
                if path.is_reachable() {
                    paths.insert(target, path);
                }
            }
            Ok(paths)
        }
    }
}

fn validate_query(graph: &RouteGraph, source: NodeId, targets: &[NodeId]) -> Result<(), Error> {
    if targets.is_empty() {
        return Err(Error::EmptyTargetSet);
    }
    graph.index_of(source)?;
    for &target in targets {
        graph.index_of(target)?;
    }
    Ok(())
}
