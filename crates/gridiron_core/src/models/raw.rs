//! Untrusted model output.
//!
//! Model responses are decoded into one of two raw shapes whose labels are
//! still free text. The sanitizer repairs them in place, then [`RawPlay::narrow`]
//! turns the result into a well-typed [`PlayDescription`].

use serde::{Deserialize, Serialize};

use super::play::{
    KeyframePlay, Keyframe, PlayDescription, PlayerPath, PlayerPose, Vec3, Waypoint, WaypointPlay,
};
use super::vocab::{Animation, Outcome};
use crate::codec;
use crate::config::EngineConfig;
use crate::engine::timestep::{max_play_ticks, MAX_PLAY_SECS};
use crate::error::DecodeError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RawPlayerPose {
    pub id: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub animation: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RawKeyframe {
    pub tick: f64,
    #[serde(default)]
    pub ball: Vec3,
    #[serde(default)]
    pub players: Vec<RawPlayerPose>,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyframePlay {
    pub outcome: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub yards_gained: Option<f32>,
    #[serde(default)]
    pub time_elapsed: Option<f32>,
    pub keyframes: Vec<RawKeyframe>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RawWaypoint {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub animation: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RawPlayerPath {
    pub id: String,
    #[serde(default)]
    pub waypoints: Vec<RawWaypoint>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawWaypointPlay {
    pub outcome: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub yards_gained: Option<f32>,
    #[serde(default)]
    pub time_elapsed: Option<f32>,
    pub ball_path: Vec<[f32; 3]>,
    #[serde(default)]
    pub player_paths: Vec<RawPlayerPath>,
    #[serde(default)]
    pub events: Vec<String>,
}

/// Either response shape. Keyframe form is tried first; it is the only one
/// carrying a `keyframes` field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawPlay {
    Keyframes(RawKeyframePlay),
    Waypoints(RawWaypointPlay),
}

impl RawPlay {
    pub fn outcome(&self) -> &str {
        match self {
            RawPlay::Keyframes(p) => &p.outcome,
            RawPlay::Waypoints(p) => &p.outcome,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            RawPlay::Keyframes(p) => &p.summary,
            RawPlay::Waypoints(p) => &p.summary,
        }
    }

    pub fn yards_gained(&self) -> Option<f32> {
        match self {
            RawPlay::Keyframes(p) => p.yards_gained,
            RawPlay::Waypoints(p) => p.yards_gained,
        }
    }

    /// Validate-then-narrow. Expects sanitized labels; anything still outside
    /// the closed vocabularies is reported rather than guessed. Play lengths
    /// and keyframe ticks beyond [`MAX_PLAY_SECS`] are rejected so a reply
    /// cannot size the frame buffer.
    pub fn narrow(self, config: &EngineConfig) -> Result<PlayDescription, DecodeError> {
        let max_tick = max_play_ticks(config.timing.ticks_per_second);
        match self {
            RawPlay::Keyframes(raw) => {
                let outcome = narrow_outcome(&raw.outcome)?;
                let time_elapsed = raw.time_elapsed.map(check_elapsed).transpose()?;
                let keyframes = raw
                    .keyframes
                    .into_iter()
                    .map(|kf| {
                        let players = kf
                            .players
                            .into_iter()
                            .map(|p| {
                                Ok(PlayerPose {
                                    animation: narrow_animation(&p.animation)?,
                                    id: p.id,
                                    x: p.x,
                                    z: p.z,
                                    rotation: p.rotation,
                                })
                            })
                            .collect::<Result<Vec<_>, DecodeError>>()?;
                        Ok(Keyframe {
                            tick: tick_from_raw(kf.tick, max_tick)?,
                            ball: kf.ball,
                            players,
                            events: kf.events,
                        })
                    })
                    .collect::<Result<Vec<_>, DecodeError>>()?;

                Ok(PlayDescription::Keyframes(KeyframePlay {
                    outcome,
                    summary: raw.summary,
                    yards_gained: raw.yards_gained.map(yards_from_raw),
                    time_elapsed,
                    keyframes,
                }))
            }
            RawPlay::Waypoints(raw) => {
                let outcome = narrow_outcome(&raw.outcome)?;
                let time_elapsed = match raw.time_elapsed {
                    Some(secs) => check_elapsed(secs)?,
                    None => config.rules.default_elapsed_secs,
                };
                let player_paths = raw
                    .player_paths
                    .into_iter()
                    .map(|path| {
                        let waypoints = path
                            .waypoints
                            .into_iter()
                            .map(|w| {
                                Ok(Waypoint {
                                    x: w.x,
                                    z: w.z,
                                    rotation: w.rotation,
                                    animation: narrow_animation(&w.animation)?,
                                })
                            })
                            .collect::<Result<Vec<_>, DecodeError>>()?;
                        Ok(PlayerPath { id: path.id, waypoints })
                    })
                    .collect::<Result<Vec<_>, DecodeError>>()?;

                Ok(PlayDescription::Waypoints(WaypointPlay {
                    outcome,
                    yards_gained: raw.yards_gained.map(yards_from_raw).unwrap_or(0),
                    time_elapsed,
                    summary: raw.summary,
                    ball_path: raw.ball_path,
                    player_paths,
                    events: raw.events,
                }))
            }
        }
    }
}

impl From<WaypointPlay> for RawPlay {
    fn from(play: WaypointPlay) -> Self {
        RawPlay::Waypoints(RawWaypointPlay {
            outcome: play.outcome.as_str().to_string(),
            summary: play.summary,
            yards_gained: Some(play.yards_gained as f32),
            time_elapsed: Some(play.time_elapsed),
            ball_path: play.ball_path,
            player_paths: play
                .player_paths
                .into_iter()
                .map(|path| RawPlayerPath {
                    id: path.id,
                    waypoints: path
                        .waypoints
                        .into_iter()
                        .map(|w| RawWaypoint {
                            x: w.x,
                            z: w.z,
                            rotation: w.rotation,
                            animation: w.animation.as_str().to_string(),
                        })
                        .collect(),
                })
                .collect(),
            events: play.events,
        })
    }
}

fn narrow_outcome(label: &str) -> Result<Outcome, DecodeError> {
    Outcome::from_label(label)
        .ok_or_else(|| DecodeError::UnknownLabel { field: "outcome", value: label.to_string() })
}

fn narrow_animation(label: &str) -> Result<Animation, DecodeError> {
    Animation::from_label(label)
        .ok_or_else(|| DecodeError::UnknownLabel { field: "animation", value: label.to_string() })
}

fn check_elapsed(secs: f32) -> Result<f32, DecodeError> {
    if secs > MAX_PLAY_SECS {
        return Err(DecodeError::OutOfRange { field: "timeElapsed", value: secs as f64 });
    }
    Ok(secs)
}

/// Negative and NaN ticks collapse to 0.
fn tick_from_raw(tick: f64, max_tick: u32) -> Result<u32, DecodeError> {
    let rounded = tick.round();
    if rounded > max_tick as f64 {
        return Err(DecodeError::OutOfRange { field: "tick", value: tick });
    }
    Ok(if rounded > 0.0 { rounded as u32 } else { 0 })
}

pub(crate) fn yards_from_raw(yards: f32) -> i32 {
    if yards.is_finite() {
        yards.round().clamp(-100.0, 100.0) as i32
    } else {
        0
    }
}

// ============================================================================
// Response text
// ============================================================================

/// Pull the outermost JSON object out of a model reply that may carry
/// markdown fences or prose around it.
pub fn extract_json_object(text: &str) -> Result<&str, DecodeError> {
    if text.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    let start = text.find('{').ok_or(DecodeError::Truncated)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    Err(DecodeError::Truncated)
}

/// Decode a model reply in either JSON form or the compact wire form.
pub fn decode_response(text: &str, compact: bool) -> Result<RawPlay, DecodeError> {
    let trimmed = strip_fences(text);
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    // Models asked for the compact form still answer in JSON now and then.
    if compact && looks_compact(trimmed) {
        let play = codec::decode_play(trimmed)?;
        return Ok(RawPlay::from(play));
    }

    let json = extract_json_object(trimmed)?;
    Ok(serde_json::from_str(json)?)
}

/// No JSON object at all, or a compact header (outcome code, digits, `:`)
/// right before the first `|`.
fn looks_compact(text: &str) -> bool {
    if !text.contains('{') {
        return true;
    }
    let Some((header, _)) = text.split_once('|') else {
        return false;
    };
    let mut chars = header.trim().chars();
    let is_code = chars
        .next()
        .is_some_and(|c| Outcome::from_code(c.to_ascii_uppercase()).is_some());
    is_code && chars.all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '-')
}

fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop an optional language tag on the fence line.
        s = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    }
    if let Some(body) = s.trim_end().strip_suffix("```") {
        s = body;
    }
    s.trim()
}
