//! Layout constants.

use serde::{Deserialize, Serialize};

/// Upper bound on simulation steps accepted from callers.
pub const MAX_ITERATIONS: u32 = 10_000;
/// Upper bound on collision passes per step accepted from callers.
pub const MAX_COLLISION_ITERATIONS: u32 = 16;

/// Configuration for the lane-constrained force layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Total width W across which stage lanes are spread (default: 60.0).
    pub lane_width: f32,
    /// Fixed number of simulation steps (default: 300).
    pub iterations: u32,
    /// Target separation of linked nodes (default: 10.0).
    pub link_distance: f32,
    /// Base link strength, modulated per edge by its strength (default: 0.3).
    pub link_strength: f32,
    /// Pairwise charge; negative repels (default: -30.0).
    pub charge: f32,
    /// Distance below which repulsion stops growing (default: 1.0).
    pub min_charge_distance: f32,
    /// Pull towards the stage lane on x (default: 1.0).
    pub lane_strength: f32,
    /// Pull towards y = 0 (default: 0.1).
    pub center_strength: f32,
    /// Disk radius for collision avoidance (default: 2.5).
    pub collision_radius: f32,
    /// Collision passes per step (default: 3).
    pub collision_iterations: u32,
    /// Fraction of velocity lost per step (default: 0.4).
    pub velocity_decay: f32,
    /// Alpha reached after `iterations` steps (default: 0.001).
    pub alpha_min: f32,
    /// Emitted x/y are clamped to [-bound, bound] (default: 50.0).
    pub coordinate_bound: f32,
    /// Radius of the random seed jitter around the lane target (default: 10.0).
    pub seed_spread: f32,
    /// Depth multiplier K (default: 37).
    pub z_multiplier: u32,
    /// Depth modulus M (default: 17).
    pub z_modulus: u32,
    /// Depth spread (default: 6.0).
    pub z_spread: f32,
    /// Seed for the default seed source (default: 0x5EED).
    pub random_seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_width: 60.0,
            iterations: 300,
            link_distance: 10.0,
            link_strength: 0.3,
            charge: -30.0,
            min_charge_distance: 1.0,
            lane_strength: 1.0,
            center_strength: 0.1,
            collision_radius: 2.5,
            collision_iterations: 3,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            coordinate_bound: 50.0,
            seed_spread: 10.0,
            z_multiplier: 37,
            z_modulus: 17,
            z_spread: 6.0,
            random_seed: 0x5EED,
        }
    }
}

impl LayoutConfig {
    /// Replace non-finite or out-of-domain values with their defaults.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();

        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let non_negative =
            |v: f32, fallback: f32| if v.is_finite() && v >= 0.0 { v } else { fallback };

        Self {
            lane_width: non_negative(self.lane_width, d.lane_width),
            iterations: self.iterations.min(MAX_ITERATIONS),
            link_distance: non_negative(self.link_distance, d.link_distance),
            link_strength: non_negative(self.link_strength, d.link_strength),
            charge: finite(self.charge, d.charge),
            min_charge_distance: positive(self.min_charge_distance, d.min_charge_distance),
            lane_strength: non_negative(self.lane_strength, d.lane_strength).min(1.0),
            center_strength: non_negative(self.center_strength, d.center_strength).min(1.0),
            collision_radius: non_negative(self.collision_radius, d.collision_radius),
            collision_iterations: self.collision_iterations.min(MAX_COLLISION_ITERATIONS),
            velocity_decay: if (0.0..=1.0).contains(&self.velocity_decay) {
                self.velocity_decay
            } else {
                d.velocity_decay
            },
            alpha_min: if self.alpha_min > 0.0 && self.alpha_min < 1.0 {
                self.alpha_min
            } else {
                d.alpha_min
            },
            coordinate_bound: positive(self.coordinate_bound, d.coordinate_bound),
            seed_spread: non_negative(self.seed_spread, d.seed_spread),
            z_multiplier: self.z_multiplier,
            z_modulus: if self.z_modulus == 0 { d.z_modulus } else { self.z_modulus },
            z_spread: finite(self.z_spread, d.z_spread),
            random_seed: self.random_seed,
        }
    }

    /// Per-step alpha decay so that alpha reaches `alpha_min` after
    /// `iterations` steps.
    pub fn alpha_decay(&self) -> f32 {
        if self.iterations == 0 {
            return 0.0;
        }
        1.0 - self.alpha_min.powf(1.0 / self.iterations as f32)
    }
}
