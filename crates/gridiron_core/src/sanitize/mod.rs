//! Defensive normalization of model output
//!
//! Never fails. Labels outside the closed vocabularies are mapped through
//! ordered synonym tables (first hit wins) with a fixed fallback, and a
//! gain that reaches the goal line promotes the outcome to a touchdown.
//! Running the sanitizer twice changes nothing the second time.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::raw::{yards_from_raw, RawPlay};
use crate::models::{Animation, Outcome};

/// Goal line on the 0-100 field position scale
pub const GOAL_LINE: i32 = 100;

const TACKLE_DEFAULT_YARDS: i32 = 3;

static OUTCOME_SYNONYMS: &[(&str, Outcome)] = &[
    ("intercept", Outcome::Interception),
    ("pick", Outcome::Interception),
    ("fumble", Outcome::Turnover),
    ("turnover", Outcome::Turnover),
    ("drop", Outcome::Incomplete),
    ("miss", Outcome::Incomplete),
    ("incomplet", Outcome::Incomplete),
    ("touchdown", Outcome::Touchdown),
    ("td", Outcome::Touchdown),
    ("score", Outcome::Touchdown),
    ("sack", Outcome::Tackle),
    ("loss", Outcome::Tackle),
    ("tackl", Outcome::Tackle),
];

static ANIMATION_SYNONYMS: &[(&str, Animation)] = &[
    ("receiv", Animation::Catch),
    ("catch", Animation::Catch),
    ("grab", Animation::Catch),
    ("pass", Animation::Throw),
    ("throw", Animation::Throw),
    ("tackl", Animation::Tackle),
    ("wrap", Animation::Tackle),
    ("block", Animation::Block),
    ("engag", Animation::Block),
    ("fall", Animation::Fall),
    ("dive", Animation::Fall),
    ("trip", Animation::Fall),
    ("backpedal", Animation::Backpedal),
    ("retreat", Animation::Backpedal),
    ("jog", Animation::Sprint),
    ("rush", Animation::Sprint),
    ("run", Animation::Sprint),
    ("sprint", Animation::Sprint),
    ("crouch", Animation::Idle),
    ("stance", Animation::Idle),
    ("set", Animation::Idle),
    ("stand", Animation::Idle),
];

static LOSS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bloss of (\d{1,3})").expect("loss pattern is valid"));

static GAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(-?\d{1,3})(?:\s*|-)(?:yards?|yds?|yd)\b").expect("gain pattern is valid")
});

static NO_GAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bno gain\b").expect("no-gain pattern is valid"));

/// What a sanitizer pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Original label when the outcome had to be repaired
    pub outcome_repaired: Option<String>,
    pub animations_repaired: usize,
    /// Yards were missing and recovered from the summary or a default
    pub yards_extracted: bool,
    pub promoted_to_touchdown: bool,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        *self == SanitizeReport::default()
    }
}

pub fn repair_outcome(label: &str) -> Outcome {
    let needle = label.trim().to_lowercase();
    if let Some(outcome) = Outcome::from_label(&needle) {
        return outcome;
    }
    OUTCOME_SYNONYMS
        .iter()
        .find(|(synonym, _)| needle.contains(synonym))
        .map(|(_, outcome)| *outcome)
        .unwrap_or(Outcome::Tackle)
}

pub fn repair_animation(label: &str) -> Animation {
    let needle = label.trim().to_lowercase();
    if let Some(animation) = Animation::from_label(&needle) {
        return animation;
    }
    ANIMATION_SYNONYMS
        .iter()
        .find(|(synonym, _)| needle.contains(synonym))
        .map(|(_, animation)| *animation)
        .unwrap_or(Animation::Idle)
}

/// Best-effort yards from a free-text summary.
///
/// Recognizes "loss of N" (negative), "no gain", "N yards", "N-yard" and
/// "N yds". Falls back by outcome: a touchdown covers the rest of the
/// field, a tackle is a short gain, everything else gains nothing.
pub fn extract_yards(summary: &str, outcome: Outcome, field_position: i32) -> i32 {
    if let Some(n) = capture_number(&LOSS_RE, summary) {
        return -n.abs();
    }
    if NO_GAIN_RE.is_match(summary) {
        return 0;
    }
    if let Some(n) = capture_number(&GAIN_RE, summary) {
        return n;
    }

    match outcome {
        Outcome::Touchdown => GOAL_LINE.saturating_sub(field_position).clamp(0, GOAL_LINE),
        Outcome::Tackle => TACKLE_DEFAULT_YARDS,
        Outcome::Incomplete | Outcome::Interception | Outcome::Turnover => 0,
    }
}

fn capture_number(re: &Regex, text: &str) -> Option<i32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .map(|n| n.clamp(-GOAL_LINE, GOAL_LINE))
}

/// Repair a raw play in place and return it.
pub fn sanitize_play(play: &mut RawPlay, field_position: i32) -> &mut RawPlay {
    let report = sanitize_play_with_report(play, field_position);
    if !report.is_clean() {
        log::debug!("Sanitized play: {:?}", report);
    }
    play
}

/// [`sanitize_play`] that also says what it changed.
pub fn sanitize_play_with_report(play: &mut RawPlay, field_position: i32) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    let outcome = repair_outcome(play.outcome());
    if play.outcome() != outcome.as_str() {
        report.outcome_repaired = Some(play.outcome().to_string());
    }

    report.animations_repaired = for_each_animation(play, |label| {
        let repaired = repair_animation(label);
        if label == repaired.as_str() {
            false
        } else {
            *label = repaired.as_str().to_string();
            true
        }
    });

    let yards = match play.yards_gained() {
        Some(raw) => yards_from_raw(raw),
        None => {
            report.yards_extracted = true;
            extract_yards(play.summary(), outcome, field_position)
        }
    };

    let outcome = if promotes_to_touchdown(outcome, field_position, yards) {
        if outcome != Outcome::Touchdown {
            log::info!(
                "Goal-line override: {} yards from {} promotes {} to touchdown",
                yards,
                field_position,
                outcome
            );
            report.promoted_to_touchdown = true;
        }
        Outcome::Touchdown
    } else {
        outcome
    };

    match play {
        RawPlay::Keyframes(p) => {
            p.outcome = outcome.as_str().to_string();
            p.yards_gained = Some(yards as f32);
        }
        RawPlay::Waypoints(p) => {
            p.outcome = outcome.as_str().to_string();
            p.yards_gained = Some(yards as f32);
        }
    }

    report
}

/// Position arithmetic wins over the stated category, except for plays
/// that never advance the offense.
pub fn promotes_to_touchdown(outcome: Outcome, field_position: i32, yards: i32) -> bool {
    let reaches_goal = field_position.saturating_add(yards) >= GOAL_LINE;
    reaches_goal
        && !matches!(outcome, Outcome::Interception | Outcome::Turnover | Outcome::Incomplete)
}

/// Visit every animation label; returns how many the closure changed.
fn for_each_animation(play: &mut RawPlay, mut visit: impl FnMut(&mut String) -> bool) -> usize {
    let mut changed = 0;
    match play {
        RawPlay::Keyframes(p) => {
            for pose in p.keyframes.iter_mut().flat_map(|kf| kf.players.iter_mut()) {
                changed += visit(&mut pose.animation) as usize;
            }
        }
        RawPlay::Waypoints(p) => {
            for wp in p.player_paths.iter_mut().flat_map(|path| path.waypoints.iter_mut()) {
                changed += visit(&mut wp.animation) as usize;
            }
        }
    }
    changed
}
