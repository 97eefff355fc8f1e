//! Higher-level algorithms built on top of the shortest-path engines.

pub mod tsp;
