//! Play expansion: waypoint adapter, keyframe interpolation and the clock
//! and heading helpers they share.

pub mod adapter;
pub mod angles;
pub mod interpolation;
pub mod timestep;

pub use adapter::waypoints_to_keyframes;
pub use interpolation::expand_keyframes;

use crate::config::EngineConfig;
use crate::models::{Keyframe, PlayDescription, PlayResult};

/// Sparse keyframes for either play shape
pub fn to_keyframes(play: &PlayDescription, config: &EngineConfig) -> Vec<Keyframe> {
    match play {
        PlayDescription::Keyframes(p) => p.keyframes.clone(),
        PlayDescription::Waypoints(p) => waypoints_to_keyframes(p, &config.timing),
    }
}

/// Adapt (if needed) and expand a narrowed play into its dense result.
pub fn build_play_result(play: &PlayDescription, config: &EngineConfig) -> PlayResult {
    let keyframes = to_keyframes(play, config);
    let frames = expand_keyframes(&keyframes, &config.interpolation);
    if frames.len() <= 1 {
        log::warn!("Play expanded to {} frame(s); playback has no duration", frames.len());
    }

    PlayResult {
        outcome: play.outcome(),
        summary: play.summary().to_string(),
        time_elapsed: play.time_elapsed(),
        frames,
    }
}
