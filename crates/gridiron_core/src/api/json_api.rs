//! JSON-string entry points for a host (browser bridge, CLI, scripting).
//! Errors come back as `"CODE: message"` strings.

use serde::{Deserialize, Serialize};

use super::error_codes;
use crate::codec;
use crate::config::{EngineConfig, RulesConfig};
use crate::engine::build_play_result;
use crate::models::raw::decode_response;
use crate::models::{Outcome, WaypointPlay};
use crate::replay::PlayLog;
use crate::sanitize::sanitize_play;
use crate::state::{MatchState, TransitionEvent};

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::SERIALIZE_FAILED, e))
}

/// Raw model reply (either JSON form, or the compact form) to a dense
/// `PlayResult`, sanitized against the given field position.
pub fn expand_play_json(raw_reply: &str, field_position: i32) -> Result<String, String> {
    expand_play_with_config_json(raw_reply, field_position, &EngineConfig::default())
}

pub fn expand_play_with_config_json(
    raw_reply: &str,
    field_position: i32,
    config: &EngineConfig,
) -> Result<String, String> {
    let mut raw =
        decode_response(raw_reply, true).map_err(|e| err_code(error_codes::DECODE_FAILED, e))?;
    sanitize_play(&mut raw, field_position);
    let play = raw.narrow(config).map_err(|e| err_code(error_codes::DECODE_FAILED, e))?;
    to_json(&build_play_result(&play, config))
}

/// Waypoint-form JSON to the compact wire string
pub fn encode_play_json(waypoint_json: &str) -> Result<String, String> {
    let play: WaypointPlay = serde_json::from_str(waypoint_json)
        .map_err(|e| err_code(error_codes::INVALID_JSON, e))?;
    codec::encode_play(&play).map_err(|e| err_code(error_codes::ENCODE_FAILED, e))
}

/// Compact wire string to waypoint-form JSON
pub fn decode_compact_json(compact: &str) -> Result<String, String> {
    let play = codec::decode_play(compact).map_err(|e| err_code(error_codes::DECODE_FAILED, e))?;
    to_json(&play)
}

/// Play-log JSON (array of entries) to the `MatchState` it replays to
pub fn rebuild_state_json(log_json: &str) -> Result<String, String> {
    let log: PlayLog =
        serde_json::from_str(log_json).map_err(|e| err_code(error_codes::INVALID_JSON, e))?;
    to_json(&log.rebuild_state(&RulesConfig::default()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPlayRequest {
    pub state: MatchState,
    pub yards_gained: i32,
    pub outcome: Outcome,
    pub elapsed_secs: f32,
}

#[derive(Debug, Serialize)]
pub struct ApplyPlayResponse {
    pub state: MatchState,
    pub events: Vec<TransitionEvent>,
}

/// One state transition: `{state, yardsGained, outcome, elapsedSecs}` in,
/// `{state, events}` out.
pub fn apply_play_json(request_json: &str) -> Result<String, String> {
    let request: ApplyPlayRequest =
        serde_json::from_str(request_json).map_err(|e| err_code(error_codes::INVALID_JSON, e))?;
    let mut state = request.state;
    let rules = RulesConfig::default();
    let transition = state
        .apply_play(&rules, request.yards_gained, request.outcome, request.elapsed_secs)
        .map_err(|e| err_code(error_codes::MATCH_FINISHED, e))?;
    to_json(&ApplyPlayResponse { state, events: transition.events })
}
