//! Playback Controller
//!
//! Walks a dense [`PlayResult`] in real time the way a renderer would:
//! load, play, pause, scrub, and a completion callback when the last frame
//! is reached.

use crate::engine::timestep::TICKS_PER_SECOND;
use crate::models::{Frame, PlayResult};

type CompletionCallback = Box<dyn FnMut(&PlayResult)>;

pub struct PlaybackController {
    result: Option<PlayResult>,
    ticks_per_second: u32,
    position_secs: f32,
    is_playing: bool,
    completed: bool,
    on_complete: Option<CompletionCallback>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

impl PlaybackController {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            result: None,
            ticks_per_second: ticks_per_second.max(1),
            position_secs: 0.0,
            is_playing: false,
            completed: false,
            on_complete: None,
        }
    }

    /// Replace the loaded play and rewind. Playback stays paused.
    pub fn load(&mut self, result: PlayResult) {
        if result.frames.len() <= 1 {
            log::warn!("Loaded play has {} frame(s); it completes immediately", result.frames.len());
        }
        self.result = Some(result);
        self.position_secs = 0.0;
        self.is_playing = false;
        self.completed = false;
    }

    pub fn set_on_complete(&mut self, callback: impl FnMut(&PlayResult) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn play(&mut self) {
        if self.result.is_some() {
            self.is_playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn position_secs(&self) -> f32 {
        self.position_secs
    }

    /// Playback length; 0 when nothing (or a single frame) is loaded
    pub fn duration_secs(&self) -> f32 {
        self.result
            .as_ref()
            .map(|r| r.duration_ticks() as f32 / self.ticks_per_second as f32)
            .unwrap_or(0.0)
    }

    /// Jump to a time, clamped to the play. Scrubbing back re-arms the
    /// completion callback.
    pub fn scrub(&mut self, secs: f32) {
        let target = if secs.is_finite() { secs } else { 0.0 };
        self.position_secs = target.clamp(0.0, self.duration_secs());
        if self.position_secs < self.duration_secs() {
            self.completed = false;
        }
    }

    /// Move forward by `delta_secs` of wall time if playing and return the
    /// frame now showing.
    pub fn advance(&mut self, delta_secs: f32) -> Option<&Frame> {
        if self.is_playing && delta_secs.is_finite() && delta_secs > 0.0 {
            let duration = self.duration_secs();
            self.position_secs = (self.position_secs + delta_secs).min(duration);
            if self.position_secs >= duration {
                self.finish();
            }
        }
        self.current_frame()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        let result = self.result.as_ref()?;
        let last = result.frames.len().checked_sub(1)?;
        let index = (self.position_secs * self.ticks_per_second as f32).round() as usize;
        result.frames.get(index.min(last))
    }

    fn finish(&mut self) {
        self.is_playing = false;
        if self.completed {
            return;
        }
        self.completed = true;
        if let (Some(callback), Some(result)) = (self.on_complete.as_mut(), self.result.as_ref()) {
            callback(result);
        }
    }
}
