//! Route planning and tour approximation over road networks.
//!
//! The crate takes already-parsed node/way records, reduces them to a
//! simplified weighted directed graph over significant nodes, answers
//! shortest-path queries with three interchangeable algorithms, re-expands
//! simplified paths to the full-resolution node sequence, and approximates
//! closed multi-stop tours with nearest-neighbor construction refined by
//! simulated annealing.
//!
//! Raw map parsing, rendering, and report writing live in surrounding
//! collaborators; this crate only exchanges plain data types with them.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod timing;


pub use error::Error;

/// Stable, externally assigned node identifier (OSM-style).
pub type NodeId = i64;
/// Stable, externally assigned way identifier.
pub type WayId = i64;
