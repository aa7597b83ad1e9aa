use serde::{Deserialize, Serialize};

use crate::capabilities::TimerOutput;
use crate::config::CoreConfig;
use crate::model::AccessibilitySetting;
use crate::router::Screen;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub enum Event {
    #[default]
    Noop,

    AppStarted,
    Configure(CoreConfig),

    Navigate {
        to: Screen,
    },

    SignInSubmitted,
    RegistrationSubmitted,

    SosDragMoved {
        delta_x: f64,
    },
    SosDragReleased,
    SosCountdownCancelled,
    SosCallEnded,

    StepTaskNext,
    StepTaskPrevious,

    MissedTasksDismissed,
    AccessibilityToggled {
        setting: AccessibilitySetting,
    },

    // Shell responses
    TimerFired(TimerOutput),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AppStarted => "app_started",
            Self::Configure(_) => "configure",
            Self::Navigate { .. } => "navigate",
            Self::SignInSubmitted => "sign_in_submitted",
            Self::RegistrationSubmitted => "registration_submitted",
            Self::SosDragMoved { .. } => "sos_drag_moved",
            Self::SosDragReleased => "sos_drag_released",
            Self::SosCountdownCancelled => "sos_countdown_cancelled",
            Self::SosCallEnded => "sos_call_ended",
            Self::StepTaskNext => "step_task_next",
            Self::StepTaskPrevious => "step_task_previous",
            Self::MissedTasksDismissed => "missed_tasks_dismissed",
            Self::AccessibilityToggled { .. } => "accessibility_toggled",
            Self::TimerFired(_) => "timer_fired",
        }
    }

    /// Drag samples and timer callbacks are traced at `trace` level only.
    #[must_use]
    pub const fn is_high_frequency(&self) -> bool {
        matches!(self, Self::SosDragMoved { .. } | Self::TimerFired(_))
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::Navigate { .. }
                | Self::SignInSubmitted
                | Self::RegistrationSubmitted
                | Self::SosDragMoved { .. }
                | Self::SosDragReleased
                | Self::SosCountdownCancelled
                | Self::SosCallEnded
                | Self::StepTaskNext
                | Self::StepTaskPrevious
                | Self::MissedTasksDismissed
                | Self::AccessibilityToggled { .. }
        )
    }
}
