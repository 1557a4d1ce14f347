//! Animation timing and interpolation settings

use serde::{Deserialize, Serialize};

use crate::engine::timestep::{PLAYBACK_SPEEDUP, TICKS_PER_SECOND};

/// How narrated play time becomes animation ticks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Animation ticks per second (default: 10)
    pub ticks_per_second: u32,
    /// Animation seconds per narrated second (default: 0.75)
    pub playback_speedup: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            playback_speedup: PLAYBACK_SPEEDUP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Segment fraction at which the animation label switches to the next
    /// keyframe's (default: 0.5)
    pub animation_switch: f32,
    /// An actor missing from both bracketing keyframes holds its nearest
    /// known pose instead of being left out of the frame (default: false)
    pub hold_absent_actors: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self { animation_switch: 0.5, hold_absent_actors: false }
    }
}
