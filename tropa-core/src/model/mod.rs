//! Data model for road-network route planning
//!
//! Contains the raw network records, the simplified route graph, and the
//! geodesic distance oracle.

pub mod geodesy;
pub mod graph;
pub mod network;

pub use geodesy::Heuristic;
pub use graph::{GraphNode, NodeKind, RouteGraph, Spot};
pub use network::{GeoPosition, RoadNetwork, RoadNode, RoadWay, WayDirection};
