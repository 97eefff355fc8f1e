// Re-export key components
pub use crate::algo::tsp::{
    AnnealingOptions, DistanceMatrix, Tour, TourOptions, TourPlan, nearest_neighbor, plan_tour,
    simulated_annealing,
};
pub use crate::loading::build_route_graph;
pub use crate::model::{
    GeoPosition, Heuristic, NodeKind, RoadNetwork, RoadWay, RouteGraph, Spot, WayDirection,
};
pub use crate::routing::{
    PathAlgorithm, RoutePath, astar, dijkstra, expand_path, levit, shortest_paths,
};
pub use crate::timing::{Metrics, Stopwatch};

// Core identifier types
pub use crate::Error;
pub use crate::NodeId;
pub use crate::WayId;
