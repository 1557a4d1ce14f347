//! Canned replies, for offline runs and tests

use std::collections::VecDeque;

use super::{PlayProvider, PlayRequest, ProviderConfig};
use crate::error::ProviderError;

/// Hands out queued replies in order. A queued `Err` is returned as is, so
/// failure paths can be scripted too.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    replies: VecDeque<Result<String, ProviderError>>,
    requests: Vec<PlayRequest>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { replies: replies.into_iter().map(|r| Ok(r.into())).collect(), requests: Vec::new() }
    }

    pub fn push_reply(&mut self, reply: impl Into<String>) {
        self.replies.push_back(Ok(reply.into()));
    }

    pub fn push_error(&mut self, error: ProviderError) {
        self.replies.push_back(Err(error));
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    /// Every request seen so far
    pub fn requests(&self) -> &[PlayRequest] {
        &self.requests
    }
}

impl PlayProvider for ScriptedProvider {
    fn request_play(
        &mut self,
        request: &PlayRequest,
        _config: &ProviderConfig,
    ) -> Result<String, ProviderError> {
        self.requests.push(request.clone());
        let reply = self.replies.pop_front().ok_or(ProviderError::Exhausted)??;
        if reply.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(reply)
    }

    fn is_offline(&self) -> bool {
        true
    }
}
