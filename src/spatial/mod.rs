//! Spatial indexing for collision candidate lookup.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
