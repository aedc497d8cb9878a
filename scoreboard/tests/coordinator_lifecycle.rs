mod support;

use scoreboard::prelude::*;
use support::Harness;

#[test]
fn startup_creates_control_then_first_scoreboard() {
    let harness = Harness::confirming();
    let control = harness.control;
    let first = harness.scoreboard(1);

    assert_eq!(
        &harness.host.calls()[..3],
        &[
            HostCall::CreateWindow(control, WindowOptions::control()),
            HostCall::LoadContent(control, ContentRef::Control),
            HostCall::InstallMenu(control, MenuRole::Control { about: true }),
        ]
    );
    assert!(harness.host.calls().contains(&HostCall::CreateWindow(
        first,
        WindowOptions::scoreboard(1)
    )));
    assert!(harness.host.calls().contains(&HostCall::InstallMenu(
        first,
        MenuRole::Scoreboard { number: 1 }
    )));
    assert_eq!(harness.created_numbers(), vec![1]);
}

#[test]
fn ready_scoreboard_gets_title_then_shows() {
    let harness = Harness::confirming();
    let first = harness.scoreboard(1);

    assert_eq!(
        harness.host.messages_to(first),
        vec![OutboundMessage::TitleSet("Scoreboard #1".to_string())]
    );
    assert!(harness.host.calls().contains(&HostCall::Show(first)));
    assert_eq!(harness.host.title(first).as_deref(), Some("Scoreboard #1"));
}

#[test]
fn control_ready_twice_creates_only_one_scoreboard() {
    let mut harness = Harness::confirming();
    let control = harness.control;
    harness.event(HostEvent::ReadyToShow(control));

    assert_eq!(harness.created_numbers(), vec![1]);
    assert_eq!(harness.coordinator.registry().scoreboard_count(), 1);
}

#[test]
fn two_scoreboards_then_destroy_first() {
    let mut harness = Harness::with_control(AppConfig::default());

    harness
        .coordinator
        .create_scoreboard(&mut harness.host)
        .expect("first scoreboard");
    harness
        .coordinator
        .create_scoreboard(&mut harness.host)
        .expect("second scoreboard");
    assert_eq!(harness.created_numbers(), vec![1, 2]);

    let first = harness.scoreboard(1);
    let second = harness.scoreboard(2);

    harness.from_control(InboundMessage::Shutdown(
        ShutdownCommand::DestroyIndex(1),
    ));

    assert_eq!(harness.host.destroyed(), vec![first]);
    assert!(harness.host.is_live(second));
    assert!(harness.host.is_live(harness.control));
    assert_eq!(harness.coordinator.registry().scoreboard_numbers(), vec![2]);
    assert_eq!(harness.host.quit_count(), 0);
}

#[test]
fn numbers_strictly_increase_across_destroys() {
    let mut harness = Harness::confirming();

    for round in 0..4 {
        harness.from_control(InboundMessage::CreateScoreboard);
        if round % 2 == 0 {
            let newest = *harness
                .coordinator
                .registry()
                .scoreboard_numbers()
                .last()
                .expect("at least one scoreboard");
            harness.from_control(InboundMessage::Shutdown(
                ShutdownCommand::DestroyIndex(newest),
            ));
        }
    }

    let numbers = harness.created_numbers();
    assert_eq!(numbers.len(), 5);
    assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn destroyed_number_is_unknown_afterwards() {
    let mut harness = Harness::confirming();
    harness.from_control(InboundMessage::Shutdown(
        ShutdownCommand::DestroyIndex(1),
    ));

    let err = harness
        .try_from_control(InboundMessage::Close(1))
        .expect_err("close of destroyed scoreboard");
    assert!(matches!(err, CoordinatorError::UnknownWindowIndex(1)));

    let err = harness
        .try_from_control(InboundMessage::Shutdown(
            ShutdownCommand::DestroyIndex(1),
        ))
        .expect_err("shutdown of destroyed scoreboard");
    assert!(matches!(err, CoordinatorError::UnknownWindowIndex(1)));

    assert_eq!(harness.host.destroyed().len(), 1);
}

#[test]
fn out_of_range_number_is_logged_not_fatal() {
    let mut harness = Harness::confirming();
    harness.from_control(InboundMessage::Close(42));
    harness.from_control(InboundMessage::Shutdown(
        ShutdownCommand::DestroyIndex(42),
    ));

    assert!(!harness.coordinator.is_terminated());
    assert!(harness.host.destroyed().is_empty());
}

#[test]
fn quit_all_destroys_everything_once_and_terminates_once() {
    let mut harness = Harness::confirming();
    harness.from_control(InboundMessage::CreateScoreboard);

    let first = harness.scoreboard(1);
    let second = harness.scoreboard(2);
    let control = harness.control;

    harness.from_control(InboundMessage::Shutdown(ShutdownCommand::QuitAll));
    harness.from_control(InboundMessage::Shutdown(ShutdownCommand::QuitAll));

    assert_eq!(harness.host.destroyed(), vec![first, second, control]);
    assert_eq!(harness.host.quit_count(), 1);
    assert_eq!(harness.host.calls().last(), Some(&HostCall::Quit));
    assert!(harness.coordinator.is_terminated());
    assert!(harness.host.live_windows().is_empty());
}

#[test]
fn destroy_self_from_scoreboard_notifies_control() {
    let mut harness = Harness::confirming();
    let first = harness.scoreboard(1);

    harness.event(HostEvent::Message {
        sender: first,
        message: InboundMessage::Shutdown(ShutdownCommand::DestroySelf),
    });

    assert_eq!(harness.host.destroyed(), vec![first]);
    assert!(
        harness
            .control_messages()
            .contains(&OutboundMessage::DestroyScoreboard(1))
    );
    assert!(!harness.coordinator.is_terminated());
}

#[test]
fn destroy_self_from_control_quits() {
    let mut harness = Harness::confirming();
    harness.from_control(InboundMessage::Shutdown(
        ShutdownCommand::DestroySelf,
    ));

    assert!(harness.coordinator.is_terminated());
    assert_eq!(harness.host.quit_count(), 1);
}

#[test]
fn second_control_window_is_rejected() {
    let mut harness = Harness::confirming();

    let err = harness
        .coordinator
        .create_control(&mut harness.host)
        .expect_err("only one control window");
    assert!(matches!(err, CoordinatorError::DuplicateControlWindow));
    assert!(err.is_fatal());

    let control_windows = harness.host.count(|call| {
        matches!(call, HostCall::CreateWindow(_, options) if *options == WindowOptions::control())
    });
    assert_eq!(control_windows, 1);
}

#[test]
fn scoreboard_before_control_is_rejected() {
    let mut host = RecordingHost::new();
    let mut coordinator = Coordinator::new(AppConfig::default());

    let err = coordinator
        .create_scoreboard(&mut host)
        .expect_err("no control window yet");
    assert!(matches!(err, CoordinatorError::ControlWindowMissing));
    assert!(host.calls().is_empty());
}

#[test]
fn failed_startup_shuts_down() {
    let mut host = RecordingHost::new();
    let mut coordinator = Coordinator::new(AppConfig::default());
    host.fail_next_create();

    coordinator.handle(&mut host, HostEvent::AppReady);

    assert!(coordinator.is_terminated());
    assert_eq!(host.quit_count(), 1);
}

#[test]
fn failed_scoreboard_setup_is_rolled_back() {
    let mut harness = Harness::confirming();
    let control = harness.control;
    let first = harness.scoreboard(1);
    harness.host.fail_next_load();

    let err = harness
        .try_from_control(InboundMessage::CreateScoreboard)
        .expect_err("scoreboard content missing");

    assert!(matches!(
        err,
        CoordinatorError::Host(HostError::Content(ref reason))
            if reason == "scoreboard.html missing"
    ));
    assert_eq!(harness.coordinator.registry().scoreboard_numbers(), vec![1]);
    assert_eq!(harness.created_numbers(), vec![1]);
    assert_eq!(harness.host.live_windows(), vec![control, first]);

    harness.from_control(InboundMessage::CreateScoreboard);
    assert_eq!(harness.created_numbers(), vec![1, 2]);
    assert_eq!(harness.coordinator.registry().scoreboard_numbers(), vec![1, 2]);
}

#[test]
fn vanished_scoreboard_is_dropped_and_reported() {
    let mut harness = Harness::confirming();
    let first = harness.scoreboard(1);

    harness.event(HostEvent::Destroyed(first));

    assert_eq!(harness.coordinator.registry().scoreboard_count(), 0);
    assert!(
        harness
            .control_messages()
            .contains(&OutboundMessage::DestroyScoreboard(1))
    );
    // The host already lost the window; nothing to destroy.
    assert!(harness.host.destroyed().is_empty());
}

#[test]
fn unknown_window_events_are_reported() {
    let mut harness = Harness::confirming();
    let stranger = WindowId::new(99);

    let err = harness
        .try_event(HostEvent::ReadyToShow(stranger))
        .expect_err("unknown window");
    assert!(matches!(err, CoordinatorError::UnknownWindow(w) if w == stranger));

    let err = harness
        .try_event(HostEvent::CloseRequested(stranger))
        .expect_err("unknown window");
    assert!(matches!(err, CoordinatorError::UnknownWindow(_)));
}

#[test]
fn dev_tools_open_on_every_window() {
    let harness = Harness::started(AppConfig::default().with_dev_tools(true));

    assert!(
        harness
            .host
            .calls()
            .contains(&HostCall::OpenDevTools(harness.control))
    );
    assert!(
        harness
            .host
            .calls()
            .contains(&HostCall::OpenDevTools(harness.scoreboard(1)))
    );
}

#[test]
fn about_shows_package_version() {
    let mut harness = Harness::confirming();
    harness.from_control(InboundMessage::OpenAbout);

    let version = harness.coordinator.config().version.clone();
    assert!(
        harness
            .host
            .calls()
            .contains(&HostCall::ShowAbout(AboutInfo::new(version)))
    );
}

#[test]
fn events_after_termination_are_ignored() {
    let mut harness = Harness::testing();
    harness.from_control(InboundMessage::Shutdown(ShutdownCommand::QuitAll));
    harness.host.clear_calls();

    harness.from_control(InboundMessage::CreateScoreboard);

    assert!(harness.host.calls().is_empty());
}
