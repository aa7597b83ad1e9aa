use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Welcome,
    Login,
    Register,
    Dashboard,
    Medications,
    Appointments,
    AppointmentDetail,
    TaskHistory,
    Accessibility,
    AslHelp,
    StepTask,
    Sos,
    Profile,
    MissedTasks,
}

impl Screen {
    pub const ALL: [Self; 14] = [
        Self::Welcome,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Medications,
        Self::Appointments,
        Self::AppointmentDetail,
        Self::TaskHistory,
        Self::Accessibility,
        Self::AslHelp,
        Self::StepTask,
        Self::Sos,
        Self::Profile,
        Self::MissedTasks,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Medications => "medications",
            Self::Appointments => "appointments",
            Self::AppointmentDetail => "appointment-detail",
            Self::TaskHistory => "task-history",
            Self::Accessibility => "accessibility",
            Self::AslHelp => "asl-help",
            Self::StepTask => "step-task",
            Self::Sos => "sos",
            Self::Profile => "profile",
            Self::MissedTasks => "missed-tasks",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// A request, raised by a screen's own logic, to show another screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub destination: Screen,
}

impl NavigationRequest {
    #[must_use]
    pub const fn to(destination: Screen) -> Self {
        Self { destination }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteChange {
    pub from: Screen,
    pub to: Screen,
}

/// Flat screen selection. There is no history: the visible screen is the
/// only state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Router {
    current: Screen,
}

impl Router {
    #[must_use]
    pub const fn new(initial: Screen) -> Self {
        Self { current: initial }
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        self.current
    }

    /// Returns `None` when `to` is already showing.
    pub fn navigate(&mut self, to: Screen) -> Option<RouteChange> {
        if self.current == to {
            return None;
        }
        let from = std::mem::replace(&mut self.current, to);
        tracing::debug!(%from, %to, "route changed");
        Some(RouteChange { from, to })
    }
}
