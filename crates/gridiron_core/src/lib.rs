//! # gridiron_core - Play Expansion Engine and Match State Machine
//!
//! Turns sparse, AI-narrated descriptions of American-football plays into
//! dense per-tick animation frames, and tracks the turn-based match state
//! (downs, distance, field position, clock, score, possession) those plays
//! produce.
//!
//! ## Pipeline
//! - raw model output is decoded into a tagged [`models::raw::RawPlay`]
//! - [`sanitize`] repairs outcome/animation labels and applies the goal-line override
//! - [`engine::adapter`] gives waypoint plays a time axis
//! - [`engine::interpolation`] expands keyframes into one frame per tick
//! - [`state::MatchState`] consumes the outcome, yards and elapsed time
//! - [`replay::PlayLog`] archives every play and rebuilds state on demand

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod provider;
pub mod replay;
pub mod sanitize;
pub mod session;
pub mod state;

pub use codec::{decode_play, encode_play};
pub use config::{EngineConfig, GameConfig};
pub use engine::adapter::waypoints_to_keyframes;
pub use engine::interpolation::expand_keyframes;
pub use error::{
    CodecError, ConfigError, DecodeError, GameStateError, ProviderError, ReplayError, SessionError,
};
pub use models::{
    Animation, Frame, Keyframe, KeyframePlay, Outcome, PlayResult, PlayerPose, Team, Vec3,
    WaypointPlay,
};
pub use replay::{PlayLog, PlayLogEntry};
pub use sanitize::{extract_yards, sanitize_play};
pub use session::MatchSession;
pub use state::MatchState;
