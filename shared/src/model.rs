use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capabilities::TimerId;
use crate::config::CoreConfig;
use crate::router::Router;
use crate::sos::{ConfirmationState, CountdownId};
use crate::step_task::GuidedTask;

// --- Timers ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPurpose {
    CountdownTick(CountdownId),
    SignIn,
}

/// Timers the core has asked the shell to run and still cares about.
///
/// An elapsed timer whose id is no longer tracked here is stale: it was
/// cancelled, or it belonged to a screen that has since been left.
#[derive(Debug, Default)]
pub struct PendingTimers {
    next_id: u64,
    pending: HashMap<TimerId, TimerPurpose>,
}

impl PendingTimers {
    pub fn register(&mut self, purpose: TimerPurpose) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, purpose);
        id
    }

    pub fn take(&mut self, id: TimerId) -> Option<TimerPurpose> {
        self.pending.remove(&id)
    }

    /// Stops tracking every timer matching `predicate`, returning their ids
    /// in scheduling order.
    pub fn release_where(&mut self, predicate: impl Fn(&TimerPurpose) -> bool) -> Vec<TimerId> {
        let mut ids: Vec<TimerId> = self
            .pending
            .iter()
            .filter(|(_, purpose)| predicate(purpose))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in &ids {
            self.pending.remove(id);
        }
        ids
    }

    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// --- Sign-in ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInKind {
    Login,
    Registration,
}

// --- Accessibility ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilitySetting {
    HighContrast,
    LargeText,
    SoundAlerts,
    VibrationAlerts,
    VisualAlerts,
    ReducedMotion,
    VoiceAnnouncements,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub sound_alerts: bool,
    pub vibration_alerts: bool,
    pub visual_alerts: bool,
    pub reduced_motion: bool,
    pub voice_announcements: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            large_text: true,
            sound_alerts: true,
            vibration_alerts: true,
            visual_alerts: true,
            reduced_motion: false,
            voice_announcements: true,
        }
    }
}

impl AccessibilitySettings {
    fn slot(&mut self, setting: AccessibilitySetting) -> &mut bool {
        match setting {
            AccessibilitySetting::HighContrast => &mut self.high_contrast,
            AccessibilitySetting::LargeText => &mut self.large_text,
            AccessibilitySetting::SoundAlerts => &mut self.sound_alerts,
            AccessibilitySetting::VibrationAlerts => &mut self.vibration_alerts,
            AccessibilitySetting::VisualAlerts => &mut self.visual_alerts,
            AccessibilitySetting::ReducedMotion => &mut self.reduced_motion,
            AccessibilitySetting::VoiceAnnouncements => &mut self.voice_announcements,
        }
    }

    /// Flips one setting and returns its new value.
    pub fn toggle(&mut self, setting: AccessibilitySetting) -> bool {
        let slot = self.slot(setting);
        *slot = !*slot;
        *slot
    }
}

// --- Model ---

pub struct Model {
    pub router: Router,
    pub config: CoreConfig,
    /// Present only while the SOS screen is showing.
    pub sos: Option<ConfirmationState>,
    /// Present only while the guided task screen is showing.
    pub step_task: Option<GuidedTask>,
    pub pending_sign_in: Option<SignInKind>,
    pub has_missed_tasks: bool,
    pub accessibility: AccessibilitySettings,
    pub timers: PendingTimers,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            router: Router::default(),
            config: CoreConfig::default(),
            sos: None,
            step_task: None,
            pending_sign_in: None,
            has_missed_tasks: true,
            accessibility: AccessibilitySettings::default(),
            timers: PendingTimers::default(),
        }
    }
}
