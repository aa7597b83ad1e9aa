// lib.rs - CareConnect shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod capabilities;
pub mod config;
pub mod event;
pub mod model;
pub mod router;
pub mod sos;
pub mod step_task;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ConfigError, CoreConfig};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use model::{AccessibilitySetting, AccessibilitySettings, Model};
pub use router::{NavigationRequest, Screen};

pub const DEFAULT_TRACK_WIDTH: f64 = 320.0;
pub const DEFAULT_KNOB_WIDTH: f64 = 64.0;
pub const DEFAULT_RELEASE_THRESHOLD: f64 = 0.9;
pub const DEFAULT_COUNTDOWN_FROM: u32 = 3;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const SIGN_IN_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SosStage {
    Slider,
    Countdown { remaining: u32 },
    Calling,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SosView {
    pub stage: SosStage,
    pub drag_offset: f64,
    pub max_offset: f64,
    /// Offset the knob must reach at release to start the countdown.
    pub release_offset: f64,
    pub progress: f64,
}

impl From<&sos::ConfirmationState> for SosView {
    fn from(state: &sos::ConfirmationState) -> Self {
        let stage = match state.phase() {
            sos::Phase::Idle => SosStage::Slider,
            sos::Phase::Counting { remaining, .. } => SosStage::Countdown { remaining },
            sos::Phase::Active => SosStage::Calling,
        };
        Self {
            stage,
            drag_offset: state.drag_offset(),
            max_offset: state.max_offset(),
            release_offset: state.release_offset(),
            progress: state.progress(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepTaskView {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub instruction: String,
    pub progress: f64,
    pub is_last: bool,
    pub completed: Vec<usize>,
}

impl From<&step_task::GuidedTask> for StepTaskView {
    fn from(task: &step_task::GuidedTask) -> Self {
        let (title, instruction) = task
            .current_step()
            .map(|step| (step.title.to_string(), step.instruction.to_string()))
            .unwrap_or_default();
        Self {
            index: task.current_index(),
            total: task.len(),
            title,
            instruction,
            progress: task.progress(),
            is_last: task.is_last(),
            completed: task.completed_steps().collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub screen: Screen,
    pub sos: Option<SosView>,
    pub step_task: Option<StepTaskView>,
    pub is_signing_in: bool,
    pub has_missed_tasks: bool,
    pub accessibility: AccessibilitySettings,
}

pub mod app {
    use super::*;
    use crate::capabilities::{TimerOutput, TimerId};
    use crate::model::{SignInKind, TimerPurpose};
    use crate::sos::{
        CancelOutcome, ConfirmationState, CountdownId, DragOutcome, EndCallOutcome,
        ReleaseOutcome, TickOutcome,
    };
    use crate::step_task::{GuidedTask, StepAdvance};

    #[derive(Default)]
    pub struct App;

    impl App {
        /// Returns `false` when `to` was already showing.
        fn navigate(model: &mut Model, caps: &Capabilities, to: Screen) -> bool {
            let Some(change) = model.router.navigate(to) else {
                return false;
            };
            Self::leave_screen(model, caps, change.from);
            Self::enter_screen(model, change.to);
            caps.navigator.screen_changed(change.from, change.to);
            caps.render.render();
            true
        }

        fn leave_screen(model: &mut Model, caps: &Capabilities, screen: Screen) {
            match screen {
                Screen::Sos => {
                    model.sos = None;
                    Self::cancel_timers(model, caps, |purpose| {
                        matches!(purpose, TimerPurpose::CountdownTick(_))
                    });
                }
                Screen::Login | Screen::Register => {
                    if let Some(kind) = model.pending_sign_in.take() {
                        tracing::debug!(?kind, "pending sign-in abandoned");
                        Self::cancel_timers(model, caps, |purpose| {
                            *purpose == TimerPurpose::SignIn
                        });
                    }
                }
                Screen::StepTask => model.step_task = None,
                _ => {}
            }
        }

        fn enter_screen(model: &mut Model, screen: Screen) {
            match screen {
                Screen::Sos => {
                    model.sos = Some(ConfirmationState::new(
                        model.config.slider,
                        model.config.policy,
                    ));
                }
                Screen::StepTask => model.step_task = Some(GuidedTask::default()),
                _ => {}
            }
        }

        fn cancel_timers(
            model: &mut Model,
            caps: &Capabilities,
            predicate: impl Fn(&TimerPurpose) -> bool,
        ) {
            for id in model.timers.release_where(predicate) {
                tracing::debug!(timer = %id, "timer cancelled");
                caps.timer.cancel(id);
            }
        }

        fn start_timer(model: &mut Model, caps: &Capabilities, purpose: TimerPurpose, after: Duration) {
            let id = model.timers.register(purpose);
            caps.timer.start(id, after, Event::TimerFired);
        }

        /// The running session's policy sets the spacing; a `Configure`
        /// received mid-countdown does not change it.
        fn schedule_tick(model: &mut Model, caps: &Capabilities, countdown: CountdownId) {
            let Some(interval) = model.sos.as_ref().map(ConfirmationState::tick_interval) else {
                return;
            };
            Self::start_timer(model, caps, TimerPurpose::CountdownTick(countdown), interval);
        }

        fn begin_sign_in(model: &mut Model, caps: &Capabilities, kind: SignInKind) {
            let expected = match kind {
                SignInKind::Login => Screen::Login,
                SignInKind::Registration => Screen::Register,
            };
            let screen = model.router.current();
            if screen != expected {
                tracing::debug!(?kind, %screen, "sign-in ignored on this screen");
                return;
            }
            if model.pending_sign_in.is_some() {
                tracing::debug!(?kind, "sign-in already pending");
                return;
            }

            model.pending_sign_in = Some(kind);
            Self::start_timer(model, caps, TimerPurpose::SignIn, SIGN_IN_DELAY);
            tracing::info!(?kind, "sign-in submitted");
            caps.render.render();
        }

        fn on_timer(model: &mut Model, caps: &Capabilities, output: TimerOutput) {
            let TimerOutput::Elapsed { id } = output else {
                if model.timers.take(output.id()).is_some() {
                    tracing::warn!(timer = %output.id(), "shell cancelled a live timer");
                }
                return;
            };
            let Some(purpose) = model.timers.take(id) else {
                tracing::debug!(timer = %id, "stale timer ignored");
                return;
            };

            match purpose {
                TimerPurpose::CountdownTick(countdown) => Self::on_countdown_tick(model, caps, id, countdown),
                TimerPurpose::SignIn => {
                    if let Some(kind) = model.pending_sign_in.take() {
                        tracing::info!(?kind, "signed in");
                        Self::navigate(model, caps, Screen::Dashboard);
                    }
                }
            }
        }

        fn on_countdown_tick(
            model: &mut Model,
            caps: &Capabilities,
            timer: TimerId,
            countdown: CountdownId,
        ) {
            let Some(sos) = model.sos.as_mut() else {
                tracing::debug!(timer = %timer, "tick without an SOS session");
                return;
            };
            match sos.tick(countdown) {
                TickOutcome::Counted { id, remaining } => {
                    tracing::debug!(countdown = id.0, remaining, "countdown tick");
                    Self::schedule_tick(model, caps, id);
                    caps.render.render();
                }
                TickOutcome::CallActivated => caps.render.render(),
                TickOutcome::Stale => {}
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            let screen = model.router.current();
            if event.is_high_frequency() {
                tracing::trace!(event = event.name(), %screen, "update");
            } else {
                tracing::debug!(
                    event = event.name(),
                    %screen,
                    user_initiated = event.is_user_initiated(),
                    "update"
                );
            }

            match event {
                Event::Noop => {}

                Event::AppStarted => {
                    tracing::info!(%screen, "app started");
                    caps.render.render();
                }

                Event::Configure(config) => match config.validate() {
                    Ok(()) => {
                        // Applies from the next SOS session on.
                        model.config = config;
                        tracing::info!(
                            max_offset = config.slider.max_offset(),
                            release_threshold = config.policy.release_threshold,
                            countdown_from = config.policy.countdown_from,
                            "configuration applied"
                        );
                        caps.render.render();
                    }
                    Err(e) => tracing::warn!(error = %e, "configuration rejected"),
                },

                Event::Navigate { to } => {
                    Self::navigate(model, caps, to);
                }

                Event::SignInSubmitted => Self::begin_sign_in(model, caps, SignInKind::Login),
                Event::RegistrationSubmitted => {
                    Self::begin_sign_in(model, caps, SignInKind::Registration);
                }

                Event::SosDragMoved { delta_x } => {
                    let Some(sos) = model.sos.as_mut() else {
                        return;
                    };
                    if matches!(sos.drag_move(delta_x), DragOutcome::Moved { .. }) {
                        caps.render.render();
                    }
                }

                Event::SosDragReleased => {
                    let Some(sos) = model.sos.as_mut() else {
                        return;
                    };
                    match sos.drag_release() {
                        ReleaseOutcome::CountdownStarted { id, .. } => {
                            Self::schedule_tick(model, caps, id);
                            caps.render.render();
                        }
                        ReleaseOutcome::SnappedBack => caps.render.render(),
                        ReleaseOutcome::Rejected => {}
                    }
                }

                Event::SosCountdownCancelled => {
                    let Some(sos) = model.sos.as_mut() else {
                        return;
                    };
                    if let CancelOutcome::Cancelled { id } = sos.cancel_countdown() {
                        Self::cancel_timers(model, caps, |purpose| {
                            *purpose == TimerPurpose::CountdownTick(id)
                        });
                        caps.render.render();
                    }
                }

                Event::SosCallEnded => {
                    let Some(sos) = model.sos.as_mut() else {
                        return;
                    };
                    if let EndCallOutcome::Ended(request) = sos.end_call() {
                        Self::navigate(model, caps, request.destination);
                    }
                }

                Event::StepTaskNext => {
                    let Some(task) = model.step_task.as_mut() else {
                        return;
                    };
                    match task.advance() {
                        StepAdvance::Advanced { step } => {
                            tracing::debug!(step, "guided task advanced");
                            caps.render.render();
                        }
                        StepAdvance::Finished => {
                            tracing::info!("guided task finished");
                            Self::navigate(model, caps, Screen::Dashboard);
                        }
                    }
                }

                Event::StepTaskPrevious => {
                    if model.step_task.as_mut().is_some_and(GuidedTask::step_back) {
                        caps.render.render();
                    }
                }

                Event::MissedTasksDismissed => {
                    model.has_missed_tasks = false;
                    if !Self::navigate(model, caps, Screen::Dashboard) {
                        caps.render.render();
                    }
                }

                Event::AccessibilityToggled { setting } => {
                    let enabled = model.accessibility.toggle(setting);
                    tracing::debug!(?setting, enabled, "accessibility setting toggled");
                    caps.render.render();
                }

                Event::TimerFired(output) => Self::on_timer(model, caps, output),
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel {
                screen: model.router.current(),
                sos: model.sos.as_ref().map(SosView::from),
                step_task: model.step_task.as_ref().map(StepTaskView::from),
                is_signing_in: model.pending_sign_in.is_some(),
                has_missed_tasks: model.has_missed_tasks,
                accessibility: model.accessibility,
            }
        }
    }
}
