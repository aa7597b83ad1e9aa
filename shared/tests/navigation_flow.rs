mod common;

use common::{cancelled_timers, fire, go_to, screen_changes, single_start, timer_requests, Tester};
use shared::capabilities::TimerOperation;
use shared::{AccessibilitySetting, Effect, Event, Model, Screen};

#[test]
fn navigation_notifies_shell_and_renders() {
    let app = Tester::default();
    let mut model = Model::default();

    let effects = go_to(&app, &mut model, Screen::Medications);
    assert_eq!(
        screen_changes(&effects),
        vec![(Screen::Welcome, Screen::Medications)]
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::Render(_))));
    assert_eq!(app.view(&model).screen, Screen::Medications);
}

#[test]
fn navigating_to_current_screen_is_silent() {
    let app = Tester::default();
    let mut model = Model::default();
    let effects = go_to(&app, &mut model, Screen::Welcome);
    assert!(effects.is_empty());
}

#[test]
fn login_resolves_to_dashboard_after_fixed_delay() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Login);

    let update = app.update(Event::SignInSubmitted, &mut model);
    assert!(app.view(&model).is_signing_in);
    let mut timer = single_start(update.effects);
    assert!(matches!(timer.operation, TimerOperation::Start { millis: 1500, .. }));

    let effects = fire(&app, &mut model, &mut timer);
    assert_eq!(screen_changes(&effects), vec![(Screen::Login, Screen::Dashboard)]);
    assert!(!app.view(&model).is_signing_in);
    assert!(model.timers.is_empty());
}

#[test]
fn registration_resolves_to_dashboard() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Register);

    let mut timer = single_start(app.update(Event::RegistrationSubmitted, &mut model).effects);
    fire(&app, &mut model, &mut timer);
    assert_eq!(model.router.current(), Screen::Dashboard);
}

#[test]
fn sign_in_is_only_accepted_on_its_screen() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Register);

    let update = app.update(Event::SignInSubmitted, &mut model);
    assert!(update.effects.is_empty());
    assert!(model.pending_sign_in.is_none());
}

#[test]
fn double_submit_starts_one_timer() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Login);

    app.update(Event::SignInSubmitted, &mut model);
    let update = app.update(Event::SignInSubmitted, &mut model);
    assert!(timer_requests(update.effects).is_empty());
    assert_eq!(model.timers.len(), 1);
}

#[test]
fn leaving_login_abandons_pending_sign_in() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Login);
    let mut timer = single_start(app.update(Event::SignInSubmitted, &mut model).effects);

    let effects = go_to(&app, &mut model, Screen::Welcome);
    assert_eq!(cancelled_timers(&timer_requests(effects)).len(), 1);
    assert!(model.pending_sign_in.is_none());

    let effects = fire(&app, &mut model, &mut timer);
    assert!(effects.is_empty());
    assert_eq!(model.router.current(), Screen::Welcome);
}

#[test]
fn guided_task_walks_through_steps_then_returns_to_dashboard() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Dashboard);
    go_to(&app, &mut model, Screen::StepTask);

    let view = app.view(&model).step_task.expect("task view");
    assert_eq!(view.index, 0);
    assert_eq!(view.title, "Preparation");

    app.update(Event::StepTaskNext, &mut model);
    app.update(Event::StepTaskNext, &mut model);
    app.update(Event::StepTaskPrevious, &mut model);
    let view = app.view(&model).step_task.expect("task view");
    assert_eq!(view.index, 1);
    assert_eq!(view.completed, vec![0, 1]);

    for _ in 0..4 {
        app.update(Event::StepTaskNext, &mut model);
    }
    assert!(app.view(&model).step_task.is_some_and(|v| v.is_last));

    let update = app.update(Event::StepTaskNext, &mut model);
    assert_eq!(
        screen_changes(&update.effects),
        vec![(Screen::StepTask, Screen::Dashboard)]
    );
    assert!(model.step_task.is_none());
}

#[test]
fn guided_task_restarts_on_reentry() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::StepTask);
    app.update(Event::StepTaskNext, &mut model);
    go_to(&app, &mut model, Screen::Dashboard);
    go_to(&app, &mut model, Screen::StepTask);
    assert_eq!(model.step_task.as_ref().map(|t| t.current_index()), Some(0));
}

#[test]
fn dismissing_missed_tasks_returns_to_dashboard() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::MissedTasks);

    let update = app.update(Event::MissedTasksDismissed, &mut model);
    assert_eq!(
        screen_changes(&update.effects),
        vec![(Screen::MissedTasks, Screen::Dashboard)]
    );
    assert!(!app.view(&model).has_missed_tasks);
}

#[test]
fn accessibility_toggles_are_reflected_in_view() {
    let app = Tester::default();
    let mut model = Model::default();
    go_to(&app, &mut model, Screen::Accessibility);

    let update = app.update(
        Event::AccessibilityToggled {
            setting: AccessibilitySetting::HighContrast,
        },
        &mut model,
    );
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
    assert!(app.view(&model).accessibility.high_contrast);
}
