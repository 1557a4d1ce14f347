use thiserror::Error;

/// Compact wire form failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Expected 5 '|'-separated sections, found {found}")]
    SectionCount { found: usize },

    #[error("Empty header")]
    EmptyHeader,

    #[error("Unknown outcome code: {0}")]
    UnknownOutcomeCode(char),

    #[error("Unknown animation code: {0}")]
    UnknownAnimationCode(String),

    #[error("Invalid base-36 number: {0:?}")]
    InvalidNumber(String),

    #[error("Malformed {section} entry: {entry:?}")]
    Malformed { section: &'static str, entry: String },

    #[error("Reserved character in {field}: {value:?}")]
    ReservedCharacter { field: &'static str, value: String },
}

/// Model response decoding failures
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Empty response")]
    Empty,

    #[error("Truncated response: no complete JSON object found")]
    Truncated,

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Compact encoding: {0}")]
    Compact(#[from] CodecError),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Unknown {field} label after sanitizing: {value:?}")]
    UnknownLabel { field: &'static str, value: String },
}

/// Configuration load/validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStateError {
    #[error("Match is finished; no further plays are accepted")]
    MatchFinished,
}

/// Model-caller collaborator failures. Fatal for the play being requested.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("No scripted response left")]
    Exhausted,
}

/// Play-log consistency failures found by [`crate::replay::PlayLog::verify`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayError {
    #[error("Replayed state diverges from the stored snapshot at entry {index}")]
    Diverged { index: usize },

    #[error("Entry {index} was logged after the match finished")]
    PlayAfterFinal { index: usize },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Game state error: {0}")]
    State(#[from] GameStateError),
}

impl SessionError {
    /// Whether the same play may be requested again. Nothing was applied to
    /// the match state in either case; a finished match cannot be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Provider(ProviderError::NotConfigured(_)) => false,
            SessionError::Provider(_) => true,
            SessionError::Decode(_) => true,
            SessionError::State(GameStateError::MatchFinished) => false,
        }
    }
}
