//! Reduction of the raw network to the simplified route graph, including
//! splicing of off-network points of interest.

mod builder;
mod splice;

pub use builder::build_route_graph;
