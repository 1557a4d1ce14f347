//! One match, one play at a time
//!
//! `provider → decode → sanitize → narrow → adapt/expand → transition → log`.
//! Everything up to the transition works on copies, so a failed play leaves
//! the match state and the log exactly as they were and can be retried.

use crate::config::GameConfig;
use crate::engine::build_play_result;
use crate::error::{GameStateError, SessionError};
use crate::models::raw::{decode_response, yards_from_raw};
use crate::models::PlayResult;
use crate::provider::{PlayProvider, PlayRequest};
use crate::replay::{PlayLog, PlayLogEntry};
use crate::sanitize::{sanitize_play_with_report, SanitizeReport};
use crate::state::{MatchState, Transition};

/// Everything one completed play produced
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub result: PlayResult,
    pub yards_gained: i32,
    pub transition: Transition,
    /// State after the play
    pub state: MatchState,
    pub sanitize: SanitizeReport,
}

pub struct MatchSession<P: PlayProvider> {
    provider: P,
    config: GameConfig,
    state: MatchState,
    log: PlayLog,
}

impl<P: PlayProvider> MatchSession<P> {
    pub fn new(provider: P, config: GameConfig) -> Self {
        let state = MatchState::opening(&config.engine.rules);
        Self { provider, config, state, log: PlayLog::new() }
    }

    /// Resume from a persisted log; the state is rebuilt by replay.
    pub fn from_log(provider: P, config: GameConfig, log: PlayLog) -> Self {
        let state = log.rebuild_state(&config.engine.rules);
        log::info!("Resumed match after {} plays: {}", log.len(), state.down_and_distance());
        Self { provider, config, state, log }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn log(&self) -> &PlayLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn into_log(self) -> PlayLog {
        self.log
    }

    pub fn play(&mut self, offense: &str, defense: &str) -> Result<PlayOutcome, SessionError> {
        if self.state.is_finished() {
            return Err(GameStateError::MatchFinished.into());
        }
        if !self.provider.is_offline() {
            self.config.provider.ensure_ready()?;
        }

        let request = PlayRequest {
            offense_play: offense.to_string(),
            defense_play: defense.to_string(),
            history: self.log.recent_summaries(self.config.engine.session.history_len),
            state: self.state.clone(),
        };
        let reply = self.provider.request_play(&request, &self.config.provider)?;

        let mut raw = decode_response(&reply, self.config.provider.use_compact_encoding)?;
        let report = sanitize_play_with_report(&mut raw, self.state.ball_position);
        let yards_gained = raw.yards_gained().map(yards_from_raw).unwrap_or(0);
        let play = raw.narrow(&self.config.engine)?;
        let result = build_play_result(&play, &self.config.engine);

        let mut next = self.state.clone();
        let transition = next.apply_play(
            &self.config.engine.rules,
            yards_gained,
            result.outcome,
            result.elapsed_or_default(&self.config.engine.rules),
        )?;

        let mut entry =
            PlayLogEntry::new(offense, defense, result.clone(), next.clone(), yards_gained);
        // Keep timestamp order equal to play order even if the wall clock steps back.
        if let Some(last) = self.log.entries().last() {
            entry.timestamp = entry.timestamp.max(last.timestamp);
        }
        self.log.append(entry);
        self.state = next;

        log::info!(
            "{} vs {}: {} ({} yds) -> {} {}",
            offense,
            defense,
            result.outcome,
            yards_gained,
            self.state.down_and_distance(),
            self.state.clock_text()
        );

        Ok(PlayOutcome {
            result,
            yards_gained,
            transition,
            state: self.state.clone(),
            sanitize: report,
        })
    }
}
