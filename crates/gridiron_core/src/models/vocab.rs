//! Closed vocabularies shared by every stage of the pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-actor animation clip. Never interpolated, only switched.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    Idle,
    Sprint,
    Backpedal,
    Throw,
    Catch,
    Tackle,
    Fall,
    Block,
}

impl Animation {
    pub const ALL: [Animation; 8] = [
        Animation::Idle,
        Animation::Sprint,
        Animation::Backpedal,
        Animation::Throw,
        Animation::Catch,
        Animation::Tackle,
        Animation::Fall,
        Animation::Block,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::Sprint => "sprint",
            Animation::Backpedal => "backpedal",
            Animation::Throw => "throw",
            Animation::Catch => "catch",
            Animation::Tackle => "tackle",
            Animation::Fall => "fall",
            Animation::Block => "block",
        }
    }

    /// Exact canonical label lookup (no repair).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == label)
    }

    /// Single-character code used by the compact wire form
    pub fn code(self) -> char {
        match self {
            Animation::Idle => 'i',
            Animation::Sprint => 's',
            Animation::Backpedal => 'b',
            Animation::Throw => 't',
            Animation::Catch => 'c',
            Animation::Tackle => 'k',
            Animation::Fall => 'f',
            Animation::Block => 'l',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.code() == code)
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a play ended
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Touchdown,
    Tackle,
    Incomplete,
    Interception,
    Turnover,
}

impl Outcome {
    pub const ALL: [Outcome; 5] = [
        Outcome::Touchdown,
        Outcome::Tackle,
        Outcome::Incomplete,
        Outcome::Interception,
        Outcome::Turnover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Touchdown => "touchdown",
            Outcome::Tackle => "tackle",
            Outcome::Incomplete => "incomplete",
            Outcome::Interception => "interception",
            Outcome::Turnover => "turnover",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.as_str() == label)
    }

    pub fn code(self) -> char {
        match self {
            Outcome::Touchdown => 'T',
            Outcome::Tackle => 'K',
            Outcome::Incomplete => 'I',
            Outcome::Interception => 'P',
            Outcome::Turnover => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.code() == code)
    }

    /// Interceptions and fumbles hand the ball to the defense where it lies.
    pub fn is_change_of_possession(self) -> bool {
        matches!(self, Outcome::Interception | Outcome::Turnover)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}
