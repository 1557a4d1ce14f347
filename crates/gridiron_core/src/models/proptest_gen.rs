//! Property-based test generators for play data
//!
//! Strategies stay inside the ranges a model is prompted with: a ~53 yard
//! wide field, 2-4 ball points, 1-4 waypoints per actor.

use super::raw::{RawKeyframe, RawKeyframePlay, RawPlay, RawPlayerPath, RawPlayerPose, RawWaypoint, RawWaypointPlay};
use super::*;
use proptest::prelude::*;

pub fn animation_strategy() -> impl Strategy<Value = Animation> {
    prop::sample::select(Animation::ALL.to_vec())
}

pub fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop::sample::select(Outcome::ALL.to_vec())
}

/// Whole tenths of a yard
pub fn coord_strategy() -> impl Strategy<Value = f32> {
    (-600i32..=600).prop_map(|t| t as f32 / 10.0)
}

pub fn rotation_strategy() -> impl Strategy<Value = f32> {
    -std::f32::consts::TAU..std::f32::consts::TAU
}

pub fn waypoint_strategy() -> impl Strategy<Value = Waypoint> {
    (coord_strategy(), coord_strategy(), rotation_strategy(), animation_strategy())
        .prop_map(|(x, z, rotation, animation)| Waypoint { x, z, rotation, animation })
}

pub fn player_path_strategy() -> impl Strategy<Value = PlayerPath> {
    (
        prop_oneof![Just("off_"), Just("def_"), Just("off "), Just("wr ")],
        1u32..=11,
        prop::collection::vec(waypoint_strategy(), 1..=4),
    )
        .prop_map(|(prefix, n, waypoints)| PlayerPath { id: format!("{prefix}{n}"), waypoints })
}

pub fn waypoint_play_strategy() -> impl Strategy<Value = WaypointPlay> {
    (
        outcome_strategy(),
        -15i32..=99,
        1u32..=40,
        "[A-Za-z0-9 .,!'|-]{0,60}",
        prop::collection::vec((coord_strategy(), 0u32..=300, coord_strategy()), 2..=4),
        prop::collection::vec(player_path_strategy(), 0..=6),
        prop::collection::vec("[a-z_]{1,6}( [a-z_]{1,6})?", 0..=3),
    )
        .prop_map(|(outcome, yards_gained, secs, summary, ball, player_paths, events)| WaypointPlay {
            outcome,
            yards_gained,
            time_elapsed: secs as f32,
            summary,
            ball_path: ball.into_iter().map(|(x, y, z)| [x, y as f32 / 10.0, z]).collect(),
            player_paths,
            events,
        })
}

pub fn player_pose_strategy(id: String) -> impl Strategy<Value = PlayerPose> {
    (coord_strategy(), coord_strategy(), rotation_strategy(), animation_strategy())
        .prop_map(move |(x, z, rotation, animation)| PlayerPose {
            id: id.clone(),
            x,
            z,
            rotation,
            animation,
        })
}

pub fn keyframe_strategy() -> impl Strategy<Value = Keyframe> {
    (
        0u32..=200,
        (coord_strategy(), 0u32..=300, coord_strategy()),
        prop::collection::vec(
            (0u32..6).prop_flat_map(|n| player_pose_strategy(format!("off_{n}"))),
            0..=4,
        ),
        prop::collection::vec("[a-z]{1,8}", 0..=2),
    )
        .prop_map(|(tick, (x, y, z), mut players, events)| {
            players.sort_by(|a, b| a.id.cmp(&b.id));
            players.dedup_by(|a, b| a.id == b.id);
            Keyframe { tick, ball: Vec3::new(x, y as f32 / 10.0, z), players, events }
        })
}

/// 1-10 keyframes in any order, duplicate ticks allowed
pub fn keyframes_strategy() -> impl Strategy<Value = Vec<Keyframe>> {
    prop::collection::vec(keyframe_strategy(), 1..=10)
}

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        animation_strategy().prop_map(|a| a.as_str().to_string()),
        outcome_strategy().prop_map(|o| o.as_str().to_string()),
        Just("Jogging".to_string()),
        Just("PICK SIX".to_string()),
        Just("crouch".to_string()),
        Just("td".to_string()),
        "[A-Za-z ]{0,12}",
    ]
}

/// Untrusted replies with arbitrary labels and optional numbers
pub fn raw_play_strategy() -> impl Strategy<Value = RawPlay> {
    let pose = (label_strategy(), coord_strategy(), coord_strategy()).prop_map(|(animation, x, z)| {
        RawPlayerPose { id: "off_1".into(), x, z, rotation: 0.0, animation }
    });
    let keyframe = (0u32..100, prop::collection::vec(pose, 0..3)).prop_map(|(tick, players)| {
        RawKeyframe { tick: tick as f64, ball: Vec3::ZERO, players, events: Vec::new() }
    });
    let waypoint = (label_strategy(), coord_strategy())
        .prop_map(|(animation, x)| RawWaypoint { x, z: 0.0, rotation: 0.0, animation });

    let optional_yards = prop::option::of((-20i32..=99).prop_map(|y| y as f32));
    let summary = prop_oneof![
        Just(String::new()),
        (1u32..80).prop_map(|n| format!("Gain of {n} yards")),
        (1u32..15).prop_map(|n| format!("Sacked for a loss of {n}")),
        "[A-Za-z ]{0,20}",
    ];

    prop_oneof![
        (label_strategy(), summary.clone(), optional_yards.clone(), prop::collection::vec(keyframe, 1..4))
            .prop_map(|(outcome, summary, yards_gained, keyframes)| {
                RawPlay::Keyframes(RawKeyframePlay {
                    outcome,
                    summary,
                    yards_gained,
                    time_elapsed: None,
                    keyframes,
                })
            }),
        (label_strategy(), summary, optional_yards, prop::collection::vec(waypoint, 1..4)).prop_map(
            |(outcome, summary, yards_gained, waypoints)| {
                RawPlay::Waypoints(RawWaypointPlay {
                    outcome,
                    summary,
                    yards_gained,
                    time_elapsed: Some(8.0),
                    ball_path: vec![[0.0, 1.0, 0.0], [0.0, 1.0, 5.0]],
                    player_paths: vec![RawPlayerPath { id: "off_1".into(), waypoints }],
                    events: Vec::new(),
                })
            }
        ),
    ]
}
