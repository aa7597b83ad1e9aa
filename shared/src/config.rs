//! Shell-supplied tuning for the core.
//!
//! The shell measures the slider on screen and may override the countdown
//! policy, sending the result in `Event::Configure`. Every field has a
//! default, so an empty object deserializes to the stock configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sos::{ConfirmationPolicy, SliderGeometry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slider track ({track_width}) must be wider than its knob ({knob_width})")]
    InvalidGeometry { track_width: f64, knob_width: f64 },
    #[error("release threshold {0} must lie strictly between 0 and 1")]
    InvalidThreshold(f64),
    #[error("countdown must start above zero")]
    ZeroCountdown,
    #[error("tick interval must be above zero")]
    ZeroTickInterval,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub slider: SliderGeometry,
    pub policy: ConfirmationPolicy,
}

impl CoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slider.validate()?;
        self.policy.validate()
    }
}
