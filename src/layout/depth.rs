//! Deterministic depth lift.
//!
//! z is never simulated. It is derived from the node ordinal so the same
//! ordered node list always produces the same depth for the same node.

/// `(((ordinal * k) mod m) / m - 0.5) * spread`. Returns 0 when `m == 0`.
pub fn depth_for(ordinal: usize, k: u32, m: u32, spread: f32) -> f32 {
    if m == 0 {
        return 0.0;
    }
    let wrapped = (ordinal as u64).wrapping_mul(k as u64) % m as u64;
    (wrapped as f32 / m as f32 - 0.5) * spread
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_formula() {
        // (0 * 37) % 17 = 0
        assert_eq!(depth_for(0, 37, 17, 6.0), -3.0);
        // (1 * 37) % 17 = 3
        let expected = (3.0 / 17.0 - 0.5) * 6.0;
        assert!((depth_for(1, 37, 17, 6.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_depth_range_and_repeatability() {
        for ordinal in 0..500 {
            let z = depth_for(ordinal, 37, 17, 6.0);
            assert!(z >= -3.0 && z < 3.0, "z={z}");
            assert_eq!(z, depth_for(ordinal, 37, 17, 6.0));
        }
    }

    #[test]
    fn test_zero_modulus() {
        assert_eq!(depth_for(5, 37, 0, 6.0), 0.0);
    }
}
