//! Re-expansion of simplified paths to the full-resolution node sequence.

use itertools::Itertools;

use crate::NodeId;
use crate::model::RoadNetwork;
use crate::routing::RoutePath;

/// Expands a path over simplified-graph nodes into the full ordered
/// sequence of network nodes, splicing the interior pass-through nodes of
/// the connecting way back in.
///
/// When two consecutive nodes share several ways (a loop offers two arcs),
/// the segment with minimum cumulative length wins. Spot endpoints are not
/// part of the network and pass through unexpanded. Applying this to an
/// already-expanded path returns it unchanged.
pub fn expand_path(network: &RoadNetwork, path: &RoutePath) -> Vec<NodeId> {
    let Some(&last) = path.nodes.last() else {
        return Vec::new();
    };
    let mut expanded: Vec<NodeId> = path
        .nodes
        .iter()
        .tuple_windows()
        .flat_map(|(&from, &to)| leading_segment(network, from, to))
        .collect();
    expanded.push(last);
    expanded
}

/// The way segment from `from` (inclusive) to `to` (exclusive), chosen as
/// the shortest over all ways shared by both endpoints; just `[from]` when
/// no shared way exists (spot attachments, promoted neighbours).
fn leading_segment(network: &RoadNetwork, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let (Some(a), Some(b)) = (network.node(from), network.node(to)) else {
        return vec![from];
    };

    let best = a
        .ways
        .iter()
        .copied()
        .filter(|way_id| b.ways.contains(way_id))
        .filter_map(|way_id| {
            let way = network.way(way_id)?;
            let i = way.nodes.iter().position(|&id| id == from)?;
            let j = way.nodes.iter().position(|&id| id == to)?;
            let segment = &way.nodes[i.min(j)..=i.max(j)];
            Some((network.segment_length_km(segment), segment))
        })
        .min_by(|(len_a, _), (len_b, _)| len_a.total_cmp(len_b));

    match best {
        Some((_, segment)) => {
            let mut nodes: Vec<NodeId> = segment.to_vec();
            if nodes.first() != Some(&from) {
                nodes.reverse();
            }
            nodes.pop();
            nodes
        }
        None => vec![from],
    }
}
