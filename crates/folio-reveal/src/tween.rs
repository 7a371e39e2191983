//! Tween timing: per-entry specs and the playhead shared by a watch.
//!
//! A watch owns one [`Playhead`] running over `0..=total_ms`. Each entry of
//! the watch is a [`TrackTiming`] window inside that range, offset by its
//! stagger, so playing the playhead forward reveals siblings in order and
//! reversing it hides them again in the opposite order.

use folio_config::RevealDefaults;
use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;

/// Duration and easing of one entry's transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub duration_ms: f32,
    pub easing: EasingFunction,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            easing: EasingFunction::default(),
        }
    }
}

impl TweenSpec {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Spec from configured defaults. An unknown easing name falls back to
    /// the default curve.
    pub fn from_defaults(defaults: &RevealDefaults) -> Self {
        let easing = defaults.ease.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using power3.out");
            EasingFunction::default()
        });
        Self {
            duration_ms: defaults.duration_ms.max(0.0),
            easing,
        }
    }
}

/// Direction the playhead is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayDirection {
    #[default]
    Stopped,
    Forward,
    Backward,
}

/// Time cursor of a watch's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Playhead {
    time_ms: f32,
    total_ms: f32,
    direction: PlayDirection,
}

impl Playhead {
    pub fn new(total_ms: f32) -> Self {
        Self {
            time_ms: 0.0,
            total_ms: total_ms.max(0.0),
            direction: PlayDirection::Stopped,
        }
    }

    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    pub fn total_ms(&self) -> f32 {
        self.total_ms
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Still moving towards one of the ends.
    pub fn is_running(&self) -> bool {
        match self.direction {
            PlayDirection::Stopped => false,
            PlayDirection::Forward => self.time_ms < self.total_ms,
            PlayDirection::Backward => self.time_ms > 0.0,
        }
    }

    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Backward;
    }

    pub fn restart(&mut self) {
        self.time_ms = 0.0;
        self.direction = PlayDirection::Forward;
    }

    pub fn reset(&mut self) {
        self.time_ms = 0.0;
        self.direction = PlayDirection::Stopped;
    }

    pub fn complete(&mut self) {
        self.time_ms = self.total_ms;
        self.direction = PlayDirection::Stopped;
    }

    /// Advance by `delta_ms` in the current direction, stopping at either end.
    ///
    /// Returns `true` while the playhead is still running.
    pub fn advance(&mut self, delta_ms: f32) -> bool {
        let delta_ms = delta_ms.max(0.0);
        match self.direction {
            PlayDirection::Stopped => return false,
            PlayDirection::Forward => {
                self.time_ms = (self.time_ms + delta_ms).min(self.total_ms);
            }
            PlayDirection::Backward => {
                self.time_ms = (self.time_ms - delta_ms).max(0.0);
            }
        }
        if !self.is_running() {
            self.direction = PlayDirection::Stopped;
        }
        self.is_running()
    }
}

/// Shortest window a track may occupy; keeps start and end distinguishable
/// on the timeline so instant tweens can still be reversed.
pub const MIN_TRACK_MS: f32 = 1.0;

/// Window of one entry on its watch's timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackTiming {
    pub start_ms: f32,
    pub spec: TweenSpec,
}

impl TrackTiming {
    pub fn new(start_ms: f32, mut spec: TweenSpec) -> Self {
        spec.duration_ms = spec.duration_ms.max(MIN_TRACK_MS);
        Self {
            start_ms: start_ms.max(0.0),
            spec,
        }
    }

    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.spec.duration_ms
    }

    /// Linear progress of this window at a timeline time, in [0, 1].
    pub fn progress_at(&self, time_ms: f32) -> f32 {
        ((time_ms - self.start_ms) / self.spec.duration_ms).clamp(0.0, 1.0)
    }
}
