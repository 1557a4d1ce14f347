//! Model-caller boundary
//!
//! The core never talks to a network or loads a model. A host implements
//! [`PlayProvider`] over whatever transport it has (cloud API, local
//! runtime) and the session treats any error it returns as fatal for the
//! play being requested. Retrying is the host's call.

pub mod prompt;
pub mod scripted;

pub use prompt::{build_prompt, Prompt};
pub use scripted::ScriptedProvider;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProviderError};
use crate::state::MatchState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Cloud,
    Local,
}

/// Passed explicitly to every request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    /// Empty for local runtimes
    pub api_key: String,
    pub model: String,
    /// Ask for the compact wire form instead of JSON
    pub use_compact_encoding: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Cloud,
            api_key: String::new(),
            model: "default".to_string(),
            use_compact_encoding: false,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("provider.model must not be empty".into()));
        }
        Ok(())
    }

    /// Cloud providers cannot be called without a key.
    pub fn ensure_ready(&self) -> Result<(), ProviderError> {
        if self.provider == ProviderKind::Cloud && self.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured("cloud provider needs an api key".into()));
        }
        Ok(())
    }
}

/// Everything the model needs to narrate one play
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub offense_play: String,
    pub defense_play: String,
    /// Recent plays, oldest first
    pub history: Vec<String>,
    pub state: MatchState,
}

pub trait PlayProvider {
    /// Raw model reply text for one play
    fn request_play(
        &mut self,
        request: &PlayRequest,
        config: &ProviderConfig,
    ) -> Result<String, ProviderError>;

    /// Offline providers (canned replies) skip the credential check.
    fn is_offline(&self) -> bool {
        false
    }
}

impl<P: PlayProvider + ?Sized> PlayProvider for Box<P> {
    fn request_play(
        &mut self,
        request: &PlayRequest,
        config: &ProviderConfig,
    ) -> Result<String, ProviderError> {
        (**self).request_play(request, config)
    }

    fn is_offline(&self) -> bool {
        (**self).is_offline()
    }
}
