use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::vocab::{Animation, Outcome};
use crate::config::RulesConfig;

/// World-space point. x across the field, y up, z downfield.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default, JsonSchema)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            z: lerp(self.z, other.z, t),
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(p: [f32; 3]) -> Self {
        Vec3 { x: p[0], y: p[1], z: p[2] }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ============================================================================
// Waypoint form
// ============================================================================

/// Untimed sample on one actor's path. Rotation in radians.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Waypoint {
    pub x: f32,
    pub z: f32,
    pub rotation: f32,
    pub animation: Animation,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PlayerPath {
    /// `off_<n>` / `def_<n>`
    pub id: String,
    /// 1-4 waypoints, start to finish
    pub waypoints: Vec<Waypoint>,
}

/// Sparse "where does everyone go" description of a play.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaypointPlay {
    pub outcome: Outcome,
    pub yards_gained: i32,
    /// Narrated game-clock seconds consumed by the play
    pub time_elapsed: f32,
    pub summary: String,
    /// 2-4 `[x, y, z]` ball positions; the master clock for every actor
    pub ball_path: Vec<[f32; 3]>,
    pub player_paths: Vec<PlayerPath>,
    #[serde(default)]
    pub events: Vec<String>,
}

// ============================================================================
// Keyframe form
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PlayerPose {
    pub id: String,
    pub x: f32,
    pub z: f32,
    pub rotation: f32,
    pub animation: Animation,
}

/// Timed cross-actor snapshot used as an interpolation control point.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Keyframe {
    pub tick: u32,
    pub ball: Vec3,
    #[serde(default)]
    pub players: Vec<PlayerPose>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

impl Keyframe {
    pub fn pose(&self, id: &str) -> Option<&PlayerPose> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyframePlay {
    pub outcome: Outcome,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yards_gained: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f32>,
    pub keyframes: Vec<Keyframe>,
}

/// A well-typed play, whichever shape the model answered in.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayDescription {
    Keyframes(KeyframePlay),
    Waypoints(WaypointPlay),
}

impl PlayDescription {
    pub fn outcome(&self) -> Outcome {
        match self {
            PlayDescription::Keyframes(p) => p.outcome,
            PlayDescription::Waypoints(p) => p.outcome,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            PlayDescription::Keyframes(p) => &p.summary,
            PlayDescription::Waypoints(p) => &p.summary,
        }
    }

    pub fn yards_gained(&self) -> Option<i32> {
        match self {
            PlayDescription::Keyframes(p) => p.yards_gained,
            PlayDescription::Waypoints(p) => Some(p.yards_gained),
        }
    }

    pub fn time_elapsed(&self) -> Option<f32> {
        match self {
            PlayDescription::Keyframes(p) => p.time_elapsed,
            PlayDescription::Waypoints(p) => Some(p.time_elapsed),
        }
    }
}

// ============================================================================
// Dense output
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct BallFrame {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rotation: Vec3,
}

impl From<Vec3> for BallFrame {
    fn from(p: Vec3) -> Self {
        BallFrame { x: p.x, y: p.y, z: p.z, rotation: Vec3::ZERO }
    }
}

/// One fully-interpolated sample per tick
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Frame {
    pub tick: u32,
    pub ball: BallFrame,
    pub players: Vec<PlayerPose>,
    #[serde(default)]
    pub events: Vec<String>,
}

/// Dense play handed to the renderer and archived in the play log.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub outcome: Outcome,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f32>,
    pub frames: Vec<Frame>,
}

impl PlayResult {
    /// Game-clock seconds the play took, or the rules' default when the
    /// model did not say.
    pub fn elapsed_or_default(&self, rules: &RulesConfig) -> f32 {
        self.time_elapsed.unwrap_or(rules.default_elapsed_secs)
    }

    /// Ticks spanned by the frames; 0 for an empty or single-frame play.
    pub fn duration_ticks(&self) -> u32 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.tick.saturating_sub(first.tick),
            _ => 0,
        }
    }
}
