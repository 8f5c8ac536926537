//! Layout Solver.
//!
//! This module contains:
//! - `config`: layout constants and their sanitisation
//! - `lanes`: per-stage horizontal lane targets
//! - `seed`: injectable seed sources for the starting configuration
//! - `force`: the owned simulation buffer and its step function
//! - `guard`: finite / clamp guards for every coordinate
//! - `depth`: deterministic z lift
//! - `solver`: the `compute_layout` entry point

pub mod config;
pub mod depth;
pub mod force;
pub mod guard;
pub mod lanes;
pub mod seed;
pub mod solver;

pub use config::LayoutConfig;
pub use seed::{FixedSeeds, SeedSource, StdRngSeeds};
pub use solver::{compute_layout, compute_layout_with_seeds, layout_graph, LayoutResult, Position3};
