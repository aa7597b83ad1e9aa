#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use shared::capabilities::{NavigationOperation, TimerId, TimerOperation, TimerOutput};
use shared::{App, Effect, Event, Model, Screen};

pub type Tester = AppTester<App, Effect>;

pub fn timer_requests(effects: Vec<Effect>) -> Vec<Request<TimerOperation>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Timer(request) => Some(request),
            _ => None,
        })
        .collect()
}

pub fn started_timers(requests: &[Request<TimerOperation>]) -> Vec<(TimerId, u64)> {
    requests
        .iter()
        .filter_map(|request| match request.operation {
            TimerOperation::Start { id, millis } => Some((id, millis)),
            TimerOperation::Cancel { .. } => None,
        })
        .collect()
}

pub fn cancelled_timers(requests: &[Request<TimerOperation>]) -> Vec<TimerId> {
    requests
        .iter()
        .filter_map(|request| match request.operation {
            TimerOperation::Cancel { id } => Some(id),
            TimerOperation::Start { .. } => None,
        })
        .collect()
}

pub fn screen_changes(effects: &[Effect]) -> Vec<(Screen, Screen)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Navigator(request) => match request.operation {
                NavigationOperation::ScreenChanged { from, to } => Some((from, to)),
            },
            _ => None,
        })
        .collect()
}

/// Takes the single `Start` request out of `effects`.
pub fn single_start(effects: Vec<Effect>) -> Request<TimerOperation> {
    let mut starts: Vec<_> = timer_requests(effects)
        .into_iter()
        .filter(|request| matches!(request.operation, TimerOperation::Start { .. }))
        .collect();
    assert_eq!(starts.len(), 1, "expected exactly one started timer");
    starts.remove(0)
}

/// Lets the shell report `request` as elapsed and feeds the resulting
/// events back into the app. Returns the effects of those updates.
pub fn fire(app: &Tester, model: &mut Model, request: &mut Request<TimerOperation>) -> Vec<Effect> {
    let TimerOperation::Start { id, .. } = request.operation else {
        panic!("only started timers can fire");
    };
    let update = app
        .resolve(request, TimerOutput::Elapsed { id })
        .expect("timer request resolves");

    let mut effects = Vec::new();
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

pub fn go_to(app: &Tester, model: &mut Model, to: Screen) -> Vec<Effect> {
    app.update(Event::Navigate { to }, model).effects
}
