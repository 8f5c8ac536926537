//! Easing curves.

/// Cubic ease-out: fast start, slow finish. Input is clamped to [0, 1];
/// non-finite input maps to 0.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
