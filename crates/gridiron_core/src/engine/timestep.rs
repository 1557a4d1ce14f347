/// timestep.rs
/// Play clock constants
///
/// Every play is animated on a fixed 10 Hz tick grid. Narrated game-clock
/// time is compressed before it becomes animation time so plays stay brisk.

/// Animation ticks per second
pub const TICKS_PER_SECOND: u32 = 10;

/// Animation time / narrated time
pub const PLAYBACK_SPEEDUP: f32 = 0.75;

/// Elapsed game-clock seconds assumed when a play omits them
pub const DEFAULT_ELAPSED_SECS: f32 = 15.0;

/// Longest narrated play accepted from a model
pub const MAX_PLAY_SECS: f32 = 120.0;

/// Whole ticks covering `secs` of animation time
pub fn seconds_to_ticks(secs: f32, ticks_per_second: u32) -> u32 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * ticks_per_second as f32).round() as u32
}

pub fn ticks_to_seconds(ticks: u32, ticks_per_second: u32) -> f32 {
    if ticks_per_second == 0 {
        return 0.0;
    }
    ticks as f32 / ticks_per_second as f32
}

/// Highest keyframe tick a play may use at `ticks_per_second`
pub fn max_play_ticks(ticks_per_second: u32) -> u32 {
    seconds_to_ticks(MAX_PLAY_SECS, ticks_per_second)
}

/// Animation ticks for a play that narrates `elapsed_secs` of game clock
pub fn play_ticks(elapsed_secs: f32, speedup: f32, ticks_per_second: u32) -> u32 {
    seconds_to_ticks(elapsed_secs * speedup, ticks_per_second)
}
