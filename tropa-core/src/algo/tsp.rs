//! Approximate closed tours over a set of must-visit terminals.
//!
//! Construction is nearest-neighbor; refinement is simulated annealing
//! with segment-reversal mutations under the Metropolis criterion. Both
//! operate on a complete pairwise [`DistanceMatrix`] whose entries are
//! shortest simplified-graph paths, so every tour leg can later be
//! expanded for rendering.

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::RouteGraph;
use crate::routing::{PathAlgorithm, RoutePath, shortest_paths};
use crate::timing::Stopwatch;
use crate::{Error, NodeId};

/// Pairwise shortest paths over a terminal set.
#[derive(Debug, Default)]
pub struct DistanceMatrix {
    rows: HashMap<NodeId, HashMap<NodeId, RoutePath>>,
}

impl DistanceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one multi-target query per terminal, fanned out over the
    /// rayon pool; independent queries share nothing but the immutable
    /// graph.
    ///
    /// # Errors
    ///
    /// Propagates query validation failures from
    /// [`shortest_paths`].
    pub fn build(
        graph: &RouteGraph,
        terminals: &[NodeId],
        algorithm: PathAlgorithm,
    ) -> Result<Self, Error> {
        let rows = terminals
            .par_iter()
            .map(|&source| {
                shortest_paths(graph, source, terminals, algorithm).map(|paths| (source, paths))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(DistanceMatrix {
            rows: rows.into_iter().collect(),
        })
    }

    /// Manual entry, for callers supplying their own matrix.
    pub fn insert(&mut self, from: NodeId, to: NodeId, path: RoutePath) {
        self.rows.entry(from).or_default().insert(to, path);
    }

    pub fn path(&self, from: NodeId, to: NodeId) -> Option<&RoutePath> {
        self.rows.get(&from)?.get(&to)
    }

    /// Finite cost from `from` to `to`; `None` when the pair is missing or
    /// unreachable. Zero-cost by definition when the endpoints coincide.
    pub fn cost(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        self.path(from, to)
            .map(|path| path.cost)
            .filter(|cost| cost.is_finite())
    }

    pub fn terminals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A closed tour: first and last stop are the fixed start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub cost: f64,
    pub stops: Vec<NodeId>,
}

/// Total matrix cost along a stop sequence.
fn tour_cost(matrix: &DistanceMatrix, stops: &[NodeId]) -> Result<f64, Error> {
    stops
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| {
            matrix
                .cost(from, to)
                .ok_or(Error::DisconnectedTerminal(to))
        })
        .sum()
}

/// Greedy tour construction: repeatedly append the unvisited terminal
/// nearest to the current tour end, then close back to `start`.
///
/// Candidates are scanned in ascending id order, so ties resolve
/// deterministically. A start-only matrix yields the trivial closed tour
/// `[start, start]` with cost 0.
///
/// # Errors
///
/// [`Error::DisconnectedTerminal`] when no unvisited terminal is reachable
/// from the current tour end — a disconnected terminal must surface, never
/// be silently skipped.
pub fn nearest_neighbor(start: NodeId, matrix: &DistanceMatrix) -> Result<Tour, Error> {
    let mut left: Vec<NodeId> = matrix.terminals().filter(|&t| t != start).collect();
    left.sort_unstable();

    let mut stops = Vec::with_capacity(left.len() + 2);
    stops.push(start);
    let mut cost = 0.0;
    let mut current = start;

    while !left.is_empty() {
        let mut best: Option<(f64, usize)> = None;
        for (i, &candidate) in left.iter().enumerate() {
            if let Some(leg) = matrix.cost(current, candidate) {
                if best.is_none_or(|(best_leg, _)| leg < best_leg) {
                    best = Some((leg, i));
                }
            }
        }
        let Some((leg, i)) = best else {
            return Err(Error::DisconnectedTerminal(left[0]));
        };
        current = left.remove(i);
        stops.push(current);
        cost += leg;
    }

    let closing = matrix
        .cost(current, start)
        .ok_or(Error::DisconnectedTerminal(start))?;
    stops.push(start);
    Ok(Tour {
        cost: cost + closing,
        stops,
    })
}

/// Knobs for [`simulated_annealing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnealingOptions {
    /// Fixed mutation budget; the only runtime bound.
    pub steps: usize,
    /// RNG seed for reproducible refinement; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        AnnealingOptions {
            steps: 1000,
            seed: None,
        }
    }
}

/// Refines a closed tour by simulated annealing.
///
/// Each step reverses the segment between two interior positions and
/// accepts the mutation if it improves the cost, or with Metropolis
/// probability `exp(-delta / temperature)` otherwise. The temperature
/// decays cubically from the seed tour's cost magnitude down to zero over
/// the step budget. The best tour observed is returned, so the result
/// never costs more than the seed; accepted and uphill mutation counts are
/// logged for diagnostics.
///
/// # Errors
///
/// [`Error::DisconnectedTerminal`] when the matrix is missing a pair the
/// tour needs.
pub fn simulated_annealing(
    seed_tour: &Tour,
    matrix: &DistanceMatrix,
    options: &AnnealingOptions,
) -> Result<Tour, Error> {
    // Fewer than two interior stops leaves nothing to mutate.
    if seed_tour.stops.len() < 4 || options.steps == 0 {
        return Ok(seed_tour.clone());
    }

    let mut rng = match options.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut current = seed_tour.stops.clone();
    let mut current_cost = tour_cost(matrix, &current)?;
    let initial_temperature = current_cost;
    let mut best = current.clone();
    let mut best_cost = current_cost;
    let (mut accepted, mut uphill) = (0usize, 0usize);

    let span = options.steps as f64;
    for remaining in (1..=options.steps).rev() {
        let temperature = initial_temperature * (remaining as f64 / span).powi(3);

        let interior = 1..current.len() - 1;
        let i = rng.gen_range(interior.clone());
        let j = rng.gen_range(interior);
        if i == j {
            continue;
        }
        let (i, j) = (i.min(j), i.max(j));

        let mut candidate = current.clone();
        candidate[i..=j].reverse();
        let candidate_cost = tour_cost(matrix, &candidate)?;

        let delta = candidate_cost - current_cost;
        let take = delta < 0.0 || rng.gen_range(0.0..1.0) < (-delta / temperature).exp();
        if take {
            accepted += 1;
            if delta >= 0.0 {
                uphill += 1;
            }
            current = candidate;
            current_cost = candidate_cost;
            if current_cost < best_cost {
                best_cost = current_cost;
                best = current.clone();
            }
        }
    }

    debug!(
        "annealing accepted {accepted} of {} mutations ({uphill} uphill)",
        options.steps
    );
    Ok(Tour {
        cost: best_cost,
        stops: best,
    })
}

/// Knobs for [`plan_tour`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TourOptions {
    /// Shortest-path algorithm used for the distance matrix.
    pub algorithm: PathAlgorithm,
    /// Annealing refinement; `None` keeps the construction tour.
    pub annealing: Option<AnnealingOptions>,
}

impl Default for TourOptions {
    fn default() -> Self {
        TourOptions {
            algorithm: PathAlgorithm::Dijkstra,
            annealing: Some(AnnealingOptions::default()),
        }
    }
}

/// Everything a tour query produces: the construction tour, the final
/// (possibly refined) tour, and the matrix whose entries are the per-leg
/// simplified paths.
#[derive(Debug)]
pub struct TourPlan {
    pub construction: Tour,
    pub tour: Tour,
    pub matrix: DistanceMatrix,
}

/// End-to-end tour query: builds the pairwise distance matrix over
/// `start` and `terminals`, constructs a nearest-neighbor tour, and
/// refines it when annealing is enabled.
///
/// # Errors
///
/// Query validation failures from the matrix build, plus
/// [`Error::DisconnectedTerminal`] for terminals unreachable from the
/// growing tour.
pub fn plan_tour(
    graph: &RouteGraph,
    start: NodeId,
    terminals: &[NodeId],
    options: &TourOptions,
) -> Result<TourPlan, Error> {
    let watch = Stopwatch::start();

    let mut seen: HashSet<NodeId> = HashSet::with_capacity(terminals.len() + 1);
    let mut all = Vec::with_capacity(terminals.len() + 1);
    for &terminal in std::iter::once(&start).chain(terminals) {
        if seen.insert(terminal) {
            all.push(terminal);
        }
    }

    let matrix = DistanceMatrix::build(graph, &all, options.algorithm)?;
    info!(
        "distance matrix over {} terminals built in {:.3} sec",
        all.len(),
        watch.elapsed().as_secs_f64()
    );

    let construction = nearest_neighbor(start, &matrix)?;
    let tour = match &options.annealing {
        Some(annealing) => simulated_annealing(&construction, &matrix, annealing)?,
        None => construction.clone(),
    };
    info!(
        "tour over {} stops: {:.1} km constructed, {:.1} km final",
        all.len(),
        construction.cost,
        tour.cost
    );

    Ok(TourPlan {
        construction,
        tour,
        matrix,
    })
}
