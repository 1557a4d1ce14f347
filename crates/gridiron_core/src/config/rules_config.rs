//! Match rule constants

use serde::{Deserialize, Serialize};

use crate::engine::timestep::DEFAULT_ELAPSED_SECS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Game-clock seconds per quarter (default: 300)
    pub quarter_length_secs: f32,
    /// Field position after a kickoff (default: 25)
    pub kickoff_spot: i32,
    /// Yards for a fresh set of downs (default: 10)
    pub first_down_distance: i32,
    /// Touchdown plus automatic extra point (default: 7)
    pub touchdown_points: u32,
    /// Field position at the opening snap (default: 50)
    pub opening_spot: i32,
    /// Game-clock seconds charged for a play that does not say (default: 15)
    pub default_elapsed_secs: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            quarter_length_secs: 300.0,
            kickoff_spot: 25,
            first_down_distance: 10,
            touchdown_points: 7,
            opening_spot: 50,
            default_elapsed_secs: DEFAULT_ELAPSED_SECS,
        }
    }
}
