//! Animation Driver.
//!
//! - `easing`: the cubic ease-out curve
//! - `driver`: the frame-scheduled progress state machine
//! - `raf`: `requestAnimationFrame` binding for the browser

pub mod driver;
pub mod easing;
pub mod raf;

pub use driver::{
    AnimationConfig, AnimationDriver, AnimationState, FrameScheduler, ManualScheduler,
    DEFAULT_DURATION_MS, DEFAULT_SETTLE_DELAY_MS,
};
pub use easing::ease_out_cubic;
pub use raf::{EntranceAnimation, RafScheduler};
