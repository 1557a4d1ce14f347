//! Waypoint → keyframe adapter
//!
//! Models describe *where* actors go, not *when*. The ball path is the
//! master clock: its N points are spread evenly over the play's tick range
//! and every actor's own (independently sized) waypoint list is remapped by
//! index proportion onto those same ticks. An actor with fewer waypoints
//! than the ball repeats its last reached waypoint; this can look like a
//! jump when the final waypoint lands early, and is kept as is.

use crate::config::TimingConfig;
use crate::engine::timestep::play_ticks;
use crate::models::{Keyframe, PlayerPose, Vec3, WaypointPlay};

/// Tick of the i-th of `n` ball points spread over `[0, total_ticks]`
pub fn ball_point_tick(i: usize, n: usize, total_ticks: u32) -> u32 {
    if i == 0 || n < 2 {
        return 0;
    }
    let fraction = i as f32 / (n - 1) as f32;
    (fraction * total_ticks as f32).round() as u32
}

/// Which of an actor's `count` waypoints is shown at ball point `i` of `n`
pub fn waypoint_index(i: usize, n: usize, count: usize) -> usize {
    if count <= 1 || n < 2 {
        return 0;
    }
    let fraction = i as f32 / (n - 1) as f32;
    let idx = (fraction * (count - 1) as f32).round() as usize;
    idx.min(count - 1)
}

/// One keyframe per ball point. Events ride on the tick-0 keyframe only.
pub fn waypoints_to_keyframes(play: &WaypointPlay, timing: &TimingConfig) -> Vec<Keyframe> {
    let n = play.ball_path.len();
    if n == 0 {
        log::warn!("Waypoint play has an empty ball path; no keyframes produced");
        return Vec::new();
    }

    let total_ticks = play_ticks(play.time_elapsed, timing.playback_speedup, timing.ticks_per_second);
    log::debug!(
        "Adapting {} ball points and {} actors over {} ticks",
        n,
        play.player_paths.len(),
        total_ticks
    );

    play.ball_path
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let players = play
                .player_paths
                .iter()
                .filter(|path| !path.waypoints.is_empty())
                .map(|path| {
                    let wp = &path.waypoints[waypoint_index(i, n, path.waypoints.len())];
                    PlayerPose {
                        id: path.id.clone(),
                        x: wp.x,
                        z: wp.z,
                        rotation: wp.rotation,
                        animation: wp.animation,
                    }
                })
                .collect();

            Keyframe {
                tick: ball_point_tick(i, n, total_ticks),
                ball: Vec3::from(*point),
                players,
                events: if i == 0 { play.events.clone() } else { Vec::new() },
            }
        })
        .collect()
}
