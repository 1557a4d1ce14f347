//! Persisted play log
//!
//! One entry per completed play. The log, not a saved [`MatchState`], is
//! the source of truth: replaying it through the transition function from
//! the opening state reproduces the live state exactly.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::{GameStateError, ReplayError};
use crate::models::PlayResult;
use crate::state::MatchState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayLogEntry {
    /// Unix milliseconds
    pub timestamp: i64,
    pub offense_play: String,
    pub defense_play: String,
    pub result: PlayResult,
    /// State after this play was applied
    pub game_state: MatchState,
    pub yards_gained: i32,
}

impl PlayLogEntry {
    /// Entry stamped with the current wall-clock time
    pub fn new(
        offense_play: impl Into<String>,
        defense_play: impl Into<String>,
        result: PlayResult,
        game_state: MatchState,
        yards_gained: i32,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            offense_play: offense_play.into(),
            defense_play: defense_play.into(),
            result,
            game_state,
            yards_gained,
        }
    }

    /// "Power Run vs Cover 2: Gain of 4"
    pub fn history_line(&self) -> String {
        format!("{} vs {}: {}", self.offense_play, self.defense_play, self.result.summary)
    }

    fn apply_to(&self, state: &mut MatchState, rules: &RulesConfig) -> Result<(), GameStateError> {
        let elapsed = self.result.elapsed_or_default(rules);
        state
            .apply_play(rules, self.yards_gained, self.result.outcome, elapsed)
            .map(|_| ())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PlayLog {
    entries: Vec<PlayLogEntry>,
}

impl PlayLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: PlayLogEntry) {
        self.entries.push(entry);
    }

    /// Entries in append order
    pub fn entries(&self) -> &[PlayLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in timestamp order; ties keep append order.
    pub fn chronological(&self) -> Vec<&PlayLogEntry> {
        let mut sorted: Vec<&PlayLogEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);
        sorted
    }

    /// Last `n` plays, oldest first, as one line each
    pub fn recent_summaries(&self, n: usize) -> Vec<String> {
        let sorted = self.chronological();
        let skip = sorted.len().saturating_sub(n);
        sorted.into_iter().skip(skip).map(PlayLogEntry::history_line).collect()
    }

    /// Replay every entry from the opening state.
    ///
    /// Entries after the final whistle cannot apply and are skipped with a
    /// warning; [`PlayLog::verify`] reports them as errors instead.
    pub fn rebuild_state(&self, rules: &RulesConfig) -> MatchState {
        let mut state = MatchState::opening(rules);
        for (index, entry) in self.chronological().into_iter().enumerate() {
            if entry.apply_to(&mut state, rules).is_err() {
                log::warn!("Play log entry {} follows the final whistle; ignored", index);
            }
        }
        state
    }

    /// Check that replay reproduces every stored snapshot.
    pub fn verify(&self, rules: &RulesConfig) -> Result<(), ReplayError> {
        let mut state = MatchState::opening(rules);
        for (index, entry) in self.chronological().into_iter().enumerate() {
            entry.apply_to(&mut state, rules).map_err(|_| ReplayError::PlayAfterFinal { index })?;
            if state != entry.game_state {
                return Err(ReplayError::Diverged { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proptest_gen::outcome_strategy;
    use crate::models::Outcome;
    use proptest::prelude::*;

    fn result(outcome: Outcome, summary: &str, elapsed: f32) -> PlayResult {
        PlayResult { outcome, summary: summary.into(), time_elapsed: Some(elapsed), frames: vec![] }
    }

    /// Apply plays live and log each one the way a session does
    fn play_out(plays: &[(i32, Outcome, f32)]) -> (PlayLog, MatchState) {
        let rules = RulesConfig::default();
        let mut state = MatchState::new();
        let mut log = PlayLog::new();
        for (i, (yards, outcome, elapsed)) in plays.iter().enumerate() {
            if state.apply_play(&rules, *yards, *outcome, *elapsed).is_err() {
                break;
            }
            let mut entry = PlayLogEntry::new(
                format!("O{i}"),
                format!("D{i}"),
                result(*outcome, &format!("play {i}"), *elapsed),
                state.clone(),
                *yards,
            );
            entry.timestamp = 1_700_000_000_000 + i as i64 * 1000;
            log.append(entry);
        }
        (log, state)
    }

    #[test]
    fn test_rebuild_matches_live_state() {
        let (log, live) = play_out(&[
            (12, Outcome::Tackle, 6.0),
            (3, Outcome::Tackle, 5.0),
            (40, Outcome::Touchdown, 7.0),
            (0, Outcome::Incomplete, 4.0),
            (9, Outcome::Interception, 5.0),
        ]);
        let rules = RulesConfig::default();
        assert_eq!(log.rebuild_state(&rules), live);
        assert_eq!(log.verify(&rules), Ok(()));
    }

    #[test]
    fn test_empty_log_rebuilds_opening_state() {
        assert_eq!(PlayLog::new().rebuild_state(&RulesConfig::default()), MatchState::new());
    }

    #[test]
    fn test_replay_sorts_by_timestamp() {
        let (log, live) = play_out(&[(5, Outcome::Tackle, 6.0), (20, Outcome::Tackle, 6.0)]);
        let mut shuffled = PlayLog::new();
        for entry in log.entries().iter().rev() {
            shuffled.append(entry.clone());
        }
        assert_eq!(shuffled.rebuild_state(&RulesConfig::default()), live);
        assert_eq!(shuffled.recent_summaries(5), vec!["O0 vs D0: play 0", "O1 vs D1: play 1"]);
    }

    #[test]
    fn test_verify_reports_tampered_snapshot() {
        let (mut log, _) = play_out(&[(5, Outcome::Tackle, 6.0), (5, Outcome::Tackle, 6.0)]);
        log.entries[1].game_state.home_score = 99;
        assert_eq!(log.verify(&RulesConfig::default()), Err(ReplayError::Diverged { index: 1 }));
    }

    #[test]
    fn test_verify_rejects_play_after_final() {
        let (mut log, _) = play_out(&[(5, Outcome::Tackle, 400.0)]);
        let rules = RulesConfig::default();
        // Drain the remaining quarters
        let mut state = log.rebuild_state(&rules);
        for i in 0..4 {
            state.apply_play(&rules, 0, Outcome::Incomplete, 400.0).unwrap_or_default();
            let mut entry =
                PlayLogEntry::new("O", "D", result(Outcome::Incomplete, "", 400.0), state.clone(), 0);
            entry.timestamp = 1_800_000_000_000 + i;
            log.append(entry);
        }
        assert!(state.is_finished());
        assert!(matches!(log.verify(&rules), Err(ReplayError::PlayAfterFinal { index: 4 })));
        assert_eq!(log.rebuild_state(&rules), state);
    }

    #[test]
    fn test_recent_summaries_window() {
        let (log, _) = play_out(&[
            (1, Outcome::Tackle, 5.0),
            (2, Outcome::Tackle, 5.0),
            (3, Outcome::Tackle, 5.0),
        ]);
        assert_eq!(log.recent_summaries(2), vec!["O1 vs D1: play 1", "O2 vs D2: play 2"]);
        assert!(log.recent_summaries(0).is_empty());
    }

    #[test]
    fn test_json_is_a_plain_array() {
        let (log, _) = play_out(&[(4, Outcome::Tackle, 5.0)]);
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["offensePlay"], "O0");
        assert_eq!(json[0]["gameState"]["down"], 2);
        let back: PlayLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }

    proptest! {
        #[test]
        fn prop_replay_reproduces_every_snapshot(
            plays in prop::collection::vec((-10i32..=60, outcome_strategy(), 1u32..=90), 0..60)
        ) {
            let plays: Vec<(i32, Outcome, f32)> =
                plays.into_iter().map(|(y, o, e)| (y, o, e as f32)).collect();
            let (log, live) = play_out(&plays);
            let rules = RulesConfig::default();
            prop_assert_eq!(log.verify(&rules), Ok(()));
            prop_assert_eq!(log.rebuild_state(&rules), live);
        }
    }
}
