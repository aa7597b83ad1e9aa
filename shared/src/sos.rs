//! Slide-to-confirm emergency call.
//!
//! The user drags a knob along a track. Releasing it near the end starts a
//! short countdown that can still be cancelled; when the countdown runs out
//! the (simulated) call is active until the user ends it.
//!
//! ```text
//! Idle --release past threshold--> Counting --last tick--> Active
//!  ^                                  |                       |
//!  +------------cancel----------------+                       |
//!  +------------------------end call (+ navigation)-----------+
//! ```
//!
//! Every guarded operation is a silent no-op outside its phase. Input from
//! the gesture layer routinely arrives late (a drag delta after the release,
//! a tick after a cancel) and must never corrupt the state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::router::{NavigationRequest, Screen};
use crate::{
    DEFAULT_COUNTDOWN_FROM, DEFAULT_KNOB_WIDTH, DEFAULT_RELEASE_THRESHOLD,
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_TRACK_WIDTH,
};

/// Where the user lands after hanging up.
pub const END_CALL_DESTINATION: Screen = Screen::Dashboard;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderGeometry {
    pub track_width: f64,
    pub knob_width: f64,
}

impl Default for SliderGeometry {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            knob_width: DEFAULT_KNOB_WIDTH,
        }
    }
}

impl SliderGeometry {
    pub fn new(track_width: f64, knob_width: f64) -> Result<Self, ConfigError> {
        let geometry = Self {
            track_width,
            knob_width,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.track_width.is_finite()
            && self.knob_width.is_finite()
            && self.knob_width >= 0.0
            && self.track_width > self.knob_width;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidGeometry {
                track_width: self.track_width,
                knob_width: self.knob_width,
            })
        }
    }

    /// Free travel of the knob along the track.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.track_width - self.knob_width).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationPolicy {
    /// Fraction of the free travel the knob must reach at release.
    pub release_threshold: f64,
    pub countdown_from: u32,
    pub tick_interval_ms: u64,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            release_threshold: DEFAULT_RELEASE_THRESHOLD,
            countdown_from: DEFAULT_COUNTDOWN_FROM,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl ConfirmationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.release_threshold > 0.0 && self.release_threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(self.release_threshold));
        }
        if self.countdown_from == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

/// Identifies one countdown run within a confirmation session. Each release
/// past the threshold starts a new run; ticks addressed to an older run are
/// stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountdownId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Counting { id: CountdownId, remaining: u32 },
    Active,
}

impl Phase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Counting { .. } => "counting",
            Self::Active => "active",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub enum DragOutcome {
    Moved { offset: f64 },
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum ReleaseOutcome {
    /// Knob snapped to the end; the caller schedules the first tick.
    CountdownStarted { id: CountdownId, remaining: u32 },
    SnappedBack,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum TickOutcome {
    /// Still counting; the caller schedules the next tick.
    Counted { id: CountdownId, remaining: u32 },
    CallActivated,
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum CancelOutcome {
    /// The caller cancels whatever tick is still pending for `id`.
    Cancelled { id: CountdownId },
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum EndCallOutcome {
    Ended(NavigationRequest),
    Rejected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmationState {
    geometry: SliderGeometry,
    policy: ConfirmationPolicy,
    drag_offset: f64,
    phase: Phase,
    next_countdown: u64,
}

impl Default for ConfirmationState {
    fn default() -> Self {
        Self::new(SliderGeometry::default(), ConfirmationPolicy::default())
    }
}

impl ConfirmationState {
    #[must_use]
    pub fn new(geometry: SliderGeometry, policy: ConfirmationPolicy) -> Self {
        Self {
            geometry,
            policy,
            drag_offset: 0.0,
            phase: Phase::Idle,
            next_countdown: 0,
        }
    }

    #[must_use]
    pub const fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.geometry.max_offset()
    }

    #[must_use]
    pub fn release_offset(&self) -> f64 {
        self.policy.release_threshold * self.max_offset()
    }

    /// Knob position as a fraction of the free travel.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max > 0.0 {
            self.drag_offset / max
        } else {
            0.0
        }
    }

    /// Spacing between countdown ticks, fixed for the life of the session.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.policy.tick_interval_ms)
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        match self.phase {
            Phase::Counting { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn drag_move(&mut self, delta_x: f64) -> DragOutcome {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = self.phase.name(), "drag ignored outside idle");
            return DragOutcome::Rejected;
        }
        if delta_x.is_nan() {
            tracing::debug!("drag ignored: delta is NaN");
            return DragOutcome::Rejected;
        }
        // Infinite deltas clamp to the nearest end.
        self.drag_offset = (self.drag_offset + delta_x).clamp(0.0, self.max_offset());
        DragOutcome::Moved {
            offset: self.drag_offset,
        }
    }

    pub fn drag_release(&mut self) -> ReleaseOutcome {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = self.phase.name(), "release ignored outside idle");
            return ReleaseOutcome::Rejected;
        }

        if self.drag_offset >= self.release_offset() {
            let id = CountdownId(self.next_countdown);
            self.next_countdown += 1;
            let remaining = self.policy.countdown_from;
            self.drag_offset = self.max_offset();
            self.phase = Phase::Counting { id, remaining };
            tracing::info!(countdown = id.0, remaining, "emergency countdown started");
            ReleaseOutcome::CountdownStarted { id, remaining }
        } else {
            tracing::debug!(offset = self.drag_offset, "released below threshold");
            self.drag_offset = 0.0;
            ReleaseOutcome::SnappedBack
        }
    }

    pub fn tick(&mut self, id: CountdownId) -> TickOutcome {
        let Phase::Counting {
            id: live,
            remaining,
        } = self.phase
        else {
            tracing::debug!(phase = self.phase.name(), countdown = id.0, "tick ignored");
            return TickOutcome::Stale;
        };
        if live != id {
            tracing::debug!(countdown = id.0, live = live.0, "stale tick ignored");
            return TickOutcome::Stale;
        }

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.phase = Phase::Active;
            tracing::info!(countdown = id.0, "emergency call active");
            TickOutcome::CallActivated
        } else {
            self.phase = Phase::Counting { id, remaining };
            TickOutcome::Counted { id, remaining }
        }
    }

    pub fn cancel_countdown(&mut self) -> CancelOutcome {
        let Phase::Counting { id, .. } = self.phase else {
            tracing::debug!(phase = self.phase.name(), "cancel ignored outside counting");
            return CancelOutcome::Rejected;
        };
        self.drag_offset = 0.0;
        self.phase = Phase::Idle;
        tracing::info!(countdown = id.0, "emergency countdown cancelled");
        CancelOutcome::Cancelled { id }
    }

    pub fn end_call(&mut self) -> EndCallOutcome {
        if self.phase != Phase::Active {
            tracing::debug!(phase = self.phase.name(), "end call ignored outside active");
            return EndCallOutcome::Rejected;
        }
        self.drag_offset = 0.0;
        self.phase = Phase::Idle;
        tracing::info!("emergency call ended");
        EndCallOutcome::Ended(NavigationRequest::to(END_CALL_DESTINATION))
    }
}
