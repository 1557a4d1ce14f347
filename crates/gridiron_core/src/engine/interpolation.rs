//! Keyframe interpolation engine
//!
//! Expands a sparse, irregularly spaced keyframe list into one [`Frame`] per
//! integer tick from the first keyframe tick to the last, inclusive.
//!
//! - ball and planar player positions: per-axis linear interpolation
//! - headings: shortest-arc blend (radians)
//! - animation labels: hard switch at `animation_switch` (0.5) of a segment
//! - events: only on frames whose tick equals a declaring keyframe's tick

use std::collections::HashMap;

use crate::config::InterpolationConfig;
use crate::engine::angles::lerp_angle;
use crate::models::{lerp, BallFrame, Frame, Keyframe, PlayerPose};

/// Expand sparse keyframes into dense per-tick frames.
///
/// Input need not be sorted; duplicate ticks are tolerated (the earliest of
/// a duplicate group is the segment start). An empty input yields an empty
/// output, which callers must check before deriving a playback duration.
pub fn expand_keyframes(keyframes: &[Keyframe], config: &InterpolationConfig) -> Vec<Frame> {
    if keyframes.is_empty() {
        log::warn!("expand_keyframes called with no keyframes; returning no frames");
        return Vec::new();
    }

    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by_key(|kf| kf.tick);

    if sorted.len() == 1 {
        return vec![frame_from_keyframe(sorted[0])];
    }

    let actors = actor_order(&sorted);
    let events = events_by_tick(&sorted);
    let first_tick = sorted[0].tick;
    let last_tick = sorted[sorted.len() - 1].tick;

    (first_tick..=last_tick)
        .map(|tick| {
            let (before_idx, after_idx) = bracket(&sorted, tick);
            let before = sorted[before_idx];
            let after = sorted[after_idx];
            let t = segment_factor(before.tick, after.tick, tick);

            let players = actors
                .iter()
                .filter_map(|id| {
                    interpolate_actor(id, &sorted, before_idx, after_idx, t, config)
                })
                .collect();

            Frame {
                tick,
                ball: BallFrame::from(before.ball.lerp(after.ball, t)),
                players,
                events: events.get(&tick).cloned().unwrap_or_default(),
            }
        })
        .collect()
}

/// Normalized position of `tick` between two keyframe ticks, 0 when equal.
pub fn segment_factor(before: u32, after: u32, tick: u32) -> f32 {
    if after <= before {
        return 0.0;
    }
    ((tick.saturating_sub(before)) as f32 / (after - before) as f32).clamp(0.0, 1.0)
}

fn frame_from_keyframe(kf: &Keyframe) -> Frame {
    Frame {
        tick: kf.tick,
        ball: BallFrame::from(kf.ball),
        players: kf.players.clone(),
        events: kf.events.clone(),
    }
}

/// Every actor seen anywhere, in order of first appearance.
fn actor_order<'a>(sorted: &[&'a Keyframe]) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for kf in sorted {
        for pose in &kf.players {
            if !seen.contains(&pose.id.as_str()) {
                seen.push(pose.id.as_str());
            }
        }
    }
    seen
}

fn events_by_tick(sorted: &[&Keyframe]) -> HashMap<u32, Vec<String>> {
    let mut events: HashMap<u32, Vec<String>> = HashMap::new();
    for kf in sorted.iter().filter(|kf| !kf.events.is_empty()) {
        events.entry(kf.tick).or_default().extend(kf.events.iter().cloned());
    }
    events
}

/// (before, after) indices into the sorted keyframes.
///
/// `before` is the earliest keyframe carrying the greatest tick <= target;
/// `after` is the first keyframe with a greater tick, or the last keyframe
/// when the target sits at or beyond the end.
fn bracket(sorted: &[&Keyframe], tick: u32) -> (usize, usize) {
    let upper = sorted.partition_point(|kf| kf.tick <= tick);
    if upper == 0 {
        return (0, 0);
    }
    let before_tick = sorted[upper - 1].tick;
    let before = sorted.partition_point(|kf| kf.tick < before_tick);
    let after = upper.min(sorted.len() - 1);
    (before, after)
}

fn interpolate_actor(
    id: &str,
    sorted: &[&Keyframe],
    before_idx: usize,
    after_idx: usize,
    t: f32,
    config: &InterpolationConfig,
) -> Option<PlayerPose> {
    let from = sorted[before_idx].pose(id);
    let to = sorted[after_idx].pose(id);

    let (from, to) = match (from, to) {
        (Some(a), Some(b)) => (a, b),
        // One-sided presence: hold the known pose at both ends.
        (Some(a), None) => (a, a),
        (None, Some(b)) => (b, b),
        (None, None) if config.hold_absent_actors => {
            let nearest = nearest_pose(id, sorted, before_idx)?;
            (nearest, nearest)
        }
        (None, None) => return None,
    };

    Some(PlayerPose {
        id: id.to_string(),
        x: lerp(from.x, to.x, t),
        z: lerp(from.z, to.z, t),
        rotation: lerp_angle(from.rotation, to.rotation, t),
        animation: if t < config.animation_switch { from.animation } else { to.animation },
    })
}

/// Latest pose at or before `idx`, else the earliest one after it.
fn nearest_pose<'a>(id: &str, sorted: &[&'a Keyframe], idx: usize) -> Option<&'a PlayerPose> {
    sorted[..=idx]
        .iter()
        .rev()
        .find_map(|kf| kf.pose(id))
        .or_else(|| sorted[idx + 1..].iter().find_map(|kf| kf.pose(id)))
}
