//! Match state machine
//!
//! [`MatchState`] is only ever changed by [`MatchState::apply_play`], one
//! completed play at a time. Because the transition is deterministic, the
//! state is always recoverable by replaying the play log from
//! [`MatchState::new`].

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::GameStateError;
use crate::models::{Outcome, Team};

pub const FINAL_QUARTER: u8 = 4;
/// Absorbing "game over" marker
pub const FINISHED: u8 = 5;
const HALFTIME_QUARTER: u8 = 3;
const MAX_DOWN: u8 = 4;

/// Field bounds for a live ball after a normal play
const MIN_SPOT: i32 = 1;
const MAX_SPOT: i32 = 99;
/// No single play moves the ball further than the length of the field
const MAX_GAIN: i32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub down: u8,
    pub yards_to_go: i32,
    /// 0-100 in the possessing team's frame; 100 is the goal line it attacks
    pub ball_position: i32,
    pub home_score: u32,
    pub away_score: u32,
    pub possession: Team,
    /// 1-4, or [`FINISHED`]
    pub quarter: u8,
    /// Seconds left in the current quarter
    pub time_remaining: f32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Notable things a single transition did
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransitionEvent {
    QuarterEnded { quarter: u8 },
    Halftime,
    GameOver,
    Touchdown { team: Team },
    FirstDown,
    TurnoverOnDowns,
    ChangeOfPossession { to: Team },
    /// The clock ran out before the play counted
    PlayDiscarded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    pub events: Vec<TransitionEvent>,
}

impl Transition {
    pub fn contains(&self, event: TransitionEvent) -> bool {
        self.events.contains(&event)
    }

    /// Whether the play's result changed down, distance, position or score
    pub fn play_counted(&self) -> bool {
        !self.contains(TransitionEvent::PlayDiscarded)
    }
}

impl MatchState {
    /// Canonical opening state: 1st & 10 at midfield, home ball, Q1 5:00.
    pub fn new() -> Self {
        Self::opening(&RulesConfig::default())
    }

    pub fn opening(rules: &RulesConfig) -> Self {
        Self {
            down: 1,
            yards_to_go: rules.first_down_distance,
            ball_position: rules.opening_spot,
            home_score: 0,
            away_score: 0,
            possession: Team::Home,
            quarter: 1,
            time_remaining: rules.quarter_length_secs,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.quarter >= FINISHED
    }

    pub fn field_position(&self) -> i32 {
        self.ball_position
    }

    pub fn score_for(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home_score,
            Team::Away => self.away_score,
        }
    }

    /// Advance the match by one completed play.
    ///
    /// Clock first: a quarter that expires rolls over (and at halftime the
    /// play is discarded in favor of a kickoff to the other side); the end
    /// of the fourth finishes the match. Otherwise the outcome decides
    /// between a scoring kickoff, a turnover, or a normal down.
    pub fn apply_play(
        &mut self,
        rules: &RulesConfig,
        yards_gained: i32,
        outcome: Outcome,
        elapsed_secs: f32,
    ) -> Result<Transition, GameStateError> {
        if self.is_finished() {
            return Err(GameStateError::MatchFinished);
        }

        let mut transition = Transition::default();
        let elapsed = if elapsed_secs.is_finite() { elapsed_secs.max(0.0) } else { 0.0 };

        self.time_remaining -= elapsed;
        if self.time_remaining <= 0.0 {
            if self.quarter < FINAL_QUARTER {
                transition.events.push(TransitionEvent::QuarterEnded { quarter: self.quarter });
                self.quarter += 1;
                self.time_remaining = rules.quarter_length_secs;

                if self.quarter == HALFTIME_QUARTER {
                    transition.events.push(TransitionEvent::Halftime);
                    self.kickoff_to_opponent(rules, &mut transition);
                    transition.events.push(TransitionEvent::PlayDiscarded);
                    log::info!("Halftime; {} receives", self.possession.as_str());
                    return Ok(transition);
                }
            } else {
                transition.events.push(TransitionEvent::QuarterEnded { quarter: self.quarter });
                self.quarter = FINISHED;
                self.time_remaining = 0.0;
                transition.events.push(TransitionEvent::GameOver);
                transition.events.push(TransitionEvent::PlayDiscarded);
                log::info!("Final: home {} - away {}", self.home_score, self.away_score);
                return Ok(transition);
            }
        }

        match outcome {
            Outcome::Touchdown => {
                let scorer = self.possession;
                let score = match scorer {
                    Team::Home => &mut self.home_score,
                    Team::Away => &mut self.away_score,
                };
                *score = score.saturating_add(rules.touchdown_points);
                transition.events.push(TransitionEvent::Touchdown { team: scorer });
                self.kickoff_to_opponent(rules, &mut transition);
            }
            o if o.is_change_of_possession() => {
                self.turn_over(rules, &mut transition);
            }
            _ => {
                let yards_gained = yards_gained.clamp(-MAX_GAIN, MAX_GAIN);
                self.ball_position =
                    self.ball_position.saturating_add(yards_gained).clamp(MIN_SPOT, MAX_SPOT);

                if yards_gained >= self.yards_to_go {
                    self.down = 1;
                    self.yards_to_go = rules.first_down_distance;
                    transition.events.push(TransitionEvent::FirstDown);
                } else {
                    self.yards_to_go = self.yards_to_go.saturating_sub(yards_gained);
                    self.down = self.down.saturating_add(1);
                    if self.down > MAX_DOWN {
                        transition.events.push(TransitionEvent::TurnoverOnDowns);
                        self.turn_over(rules, &mut transition);
                    }
                }
            }
        }

        Ok(transition)
    }

    /// Kickoff reset with the other side receiving
    fn kickoff_to_opponent(&mut self, rules: &RulesConfig, transition: &mut Transition) {
        self.possession = self.possession.opponent();
        self.ball_position = rules.kickoff_spot;
        self.fresh_downs(rules);
        transition.events.push(TransitionEvent::ChangeOfPossession { to: self.possession });
    }

    /// Ball changes hands where it lies, mirrored into the new offense's frame
    fn turn_over(&mut self, rules: &RulesConfig, transition: &mut Transition) {
        self.possession = self.possession.opponent();
        self.ball_position = 100 - self.ball_position.clamp(0, 100);
        self.fresh_downs(rules);
        transition.events.push(TransitionEvent::ChangeOfPossession { to: self.possession });
    }

    fn fresh_downs(&mut self, rules: &RulesConfig) {
        self.down = 1;
        self.yards_to_go = rules.first_down_distance;
    }

    /// e.g. "3rd & 7 at OPP 40", "1st & Goal at OPP 6"
    pub fn down_and_distance(&self) -> String {
        if self.is_finished() {
            return "Final".to_string();
        }
        let ordinal = match self.down {
            1 => "1st",
            2 => "2nd",
            3 => "3rd",
            _ => "4th",
        };
        let to_goal = 100 - self.ball_position;
        let distance = if self.yards_to_go >= to_goal {
            "Goal".to_string()
        } else {
            self.yards_to_go.to_string()
        };
        let spot = match self.ball_position {
            50 => "midfield".to_string(),
            p if p > 50 => format!("OPP {}", 100 - p),
            p => format!("OWN {}", p),
        };
        format!("{} & {} at {}", ordinal, distance, spot)
    }

    /// e.g. "Q2 4:05"
    pub fn clock_text(&self) -> String {
        if self.is_finished() {
            return "Final".to_string();
        }
        let secs = self.time_remaining.max(0.0).ceil() as u32;
        format!("Q{} {}:{:02}", self.quarter, secs / 60, secs % 60)
    }
}
