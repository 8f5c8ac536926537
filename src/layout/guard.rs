//! Numerical-safety guards applied to every coordinate the solver reads or
//! writes.

use super::force::SimulationState;

/// `value` if finite, otherwise `fallback`.
#[inline]
pub fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Clamp into `[-bound, bound]`. Non-finite input maps to 0.
#[inline]
pub fn clamp_coord(value: f32, bound: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-bound, bound)
    } else {
        0.0
    }
}

/// Repairs a simulation buffer after a step.
///
/// Non-finite positions fall back to the node's seed, non-finite velocities
/// drop to 0, and every position is clamped to the coordinate bound.
pub struct StabilityGuard<'a> {
    seed_x: &'a [f32],
    seed_y: &'a [f32],
    bound: f32,
}

impl<'a> StabilityGuard<'a> {
    pub fn new(seed_x: &'a [f32], seed_y: &'a [f32], bound: f32) -> Self {
        Self { seed_x, seed_y, bound }
    }

    /// Returns the number of coordinates that had to be replaced.
    pub fn repair(&self, state: &mut SimulationState) -> usize {
        let mut repaired = 0;

        for i in 0..state.len() {
            if !state.pos_x[i].is_finite() {
                state.pos_x[i] = clamp_coord(self.seed_x.get(i).copied().unwrap_or(0.0), self.bound);
                state.vel_x[i] = 0.0;
                repaired += 1;
            }
            if !state.pos_y[i].is_finite() {
                state.pos_y[i] = clamp_coord(self.seed_y.get(i).copied().unwrap_or(0.0), self.bound);
                state.vel_y[i] = 0.0;
                repaired += 1;
            }
            if !state.vel_x[i].is_finite() {
                state.vel_x[i] = 0.0;
                repaired += 1;
            }
            if !state.vel_y[i].is_finite() {
                state.vel_y[i] = 0.0;
                repaired += 1;
            }

            state.pos_x[i] = clamp_coord(state.pos_x[i], self.bound);
            state.pos_y[i] = clamp_coord(state.pos_y[i], self.bound);
        }

        if !state.alpha.is_finite() {
            state.alpha = 0.0;
            repaired += 1;
        }

        repaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(1.5, 0.0), 1.5);
        assert_eq!(sanitize(f32::NAN, 2.0), 2.0);
        assert_eq!(sanitize(f32::NEG_INFINITY, -1.0), -1.0);
    }

    #[test]
    fn test_clamp_coord() {
        assert_eq!(clamp_coord(10.0, 50.0), 10.0);
        assert_eq!(clamp_coord(1e9, 50.0), 50.0);
        assert_eq!(clamp_coord(-1e9, 50.0), -50.0);
        assert_eq!(clamp_coord(f32::NAN, 50.0), 0.0);
        assert_eq!(clamp_coord(f32::INFINITY, 50.0), 0.0);
    }

    #[test]
    fn test_repair_restores_seed_and_clamps() {
        let seed_x = [3.0, -4.0];
        let seed_y = [1.0, 2.0];
        let mut state = SimulationState::from_seeds(&seed_x, &seed_y);
        state.pos_x[0] = f32::NAN;
        state.vel_x[0] = 12.0;
        state.pos_y[1] = 400.0;
        state.vel_y[1] = f32::INFINITY;

        let guard = StabilityGuard::new(&seed_x, &seed_y, 50.0);
        let repaired = guard.repair(&mut state);

        assert_eq!(repaired, 2);
        assert_eq!(state.pos_x[0], 3.0);
        assert_eq!(state.vel_x[0], 0.0);
        assert_eq!(state.pos_y[1], 50.0);
        assert_eq!(state.vel_y[1], 0.0);
    }

    #[test]
    fn test_repair_clean_state_is_noop() {
        let seed_x = [1.0];
        let seed_y = [1.0];
        let mut state = SimulationState::from_seeds(&seed_x, &seed_y);
        let guard = StabilityGuard::new(&seed_x, &seed_y, 50.0);
        assert_eq!(guard.repair(&mut state), 0);
        assert_eq!((state.pos_x[0], state.pos_y[0]), (1.0, 1.0));
    }
}
