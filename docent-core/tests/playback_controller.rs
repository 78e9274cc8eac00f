//! Integration tests for the playback controller actor.
//!
//! Timers run on Tokio's paused clock, so every timeout in these tests
//! elapses instantly and deterministically.

use std::time::Duration;

use docent_core::config::PlaybackConfig;
use docent_core::playback::{
    MessageBus, PlaybackControllerHandle, PlaybackPhase, PlayerCommand, spawn_playback_controller,
};
use docent_core::{Catalog, ControllerError, ErrorKind};
use tokio::sync::mpsc;

const READY: &str = r#"{"event":"onReady","id":1}"#;
const PLAYING: &str = r#"{"event":"onStateChange","info":1}"#;
const PAUSED: &str = r#"{"event":"onStateChange","info":2}"#;

struct ControllerFixture {
    bus: MessageBus,
    handle: PlaybackControllerHandle,
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
}

impl ControllerFixture {
    fn mount(route: &str) -> Self {
        let bus = MessageBus::new();
        let (frame, commands) = mpsc::unbounded_channel();
        let handle = spawn_playback_controller(
            route,
            &Catalog::builtin(),
            &bus,
            frame,
            &test_config(),
        );

        Self {
            bus,
            handle,
            commands,
        }
    }

    async fn mount_ready(route: &str) -> Self {
        let fixture = Self::mount(route);
        fixture.bus.publish(READY);
        fixture
            .handle
            .watch_state()
            .wait_for(|state| state.ready)
            .await
            .unwrap();
        fixture
    }
}

fn test_config() -> PlaybackConfig {
    PlaybackConfig {
        ready_timeout: Duration::from_millis(500),
        controls_hide_after: Duration::from_millis(300),
        start_muted: true,
        autoplay: true,
    }
}

#[tokio::test(start_paused = true)]
async fn test_mount_resolves_language_route() {
    let fixture = ControllerFixture::mount("exhibit01-fr");

    let resolution = fixture.handle.resolution().as_ref().unwrap();
    assert_eq!(resolution.media_ref.as_str(), "UnSwaiO-w3I");

    let state = fixture.handle.state();
    assert_eq!(state.phase(), PlaybackPhase::Loading);
    assert!(state.muted);
    assert!(state.controls_visible);
    assert_eq!(fixture.bus.subscriber_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ready_message_enters_ready_and_playing() {
    let fixture = ControllerFixture::mount("sample");
    fixture.bus.publish("unrelated chatter");
    fixture.bus.publish(READY);

    let mut watch = fixture.handle.watch_state();
    let state = watch.wait_for(|state| state.ready).await.unwrap().clone();

    assert_eq!(state.phase(), PlaybackPhase::Ready);
    assert!(state.playing);
    assert!(state.muted);
}

#[tokio::test(start_paused = true)]
async fn test_ready_timeout_forces_ready_without_player() {
    let fixture = ControllerFixture::mount("sample");
    let started = tokio::time::Instant::now();

    let mut watch = fixture.handle.watch_state();
    watch.wait_for(|state| state.ready).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(fixture.handle.state().playing);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_play_is_optimistic_then_reconciled() {
    let mut fixture = ControllerFixture::mount_ready("sample").await;

    let state = fixture.handle.toggle_play_pause().await.unwrap();
    assert!(!state.playing);
    assert_eq!(fixture.commands.recv().await, Some(PlayerCommand::PauseVideo));

    // Player ignored the pause and keeps playing
    fixture.bus.publish(PLAYING);
    let mut watch = fixture.handle.watch_state();
    watch.wait_for(|state| state.playing).await.unwrap();

    fixture.bus.publish(PAUSED);
    watch.wait_for(|state| !state.playing).await.unwrap();

    let state = fixture.handle.toggle_play_pause().await.unwrap();
    assert!(state.playing);
    assert_eq!(fixture.commands.recv().await, Some(PlayerCommand::PlayVideo));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mute_is_local() {
    let mut fixture = ControllerFixture::mount_ready("sample").await;

    let state = fixture.handle.toggle_mute().await.unwrap();
    assert!(!state.muted);
    assert_eq!(fixture.commands.recv().await, Some(PlayerCommand::UnMute));

    let state = fixture.handle.toggle_mute().await.unwrap();
    assert!(state.muted);
    assert_eq!(fixture.commands.recv().await, Some(PlayerCommand::Mute));
}

#[tokio::test(start_paused = true)]
async fn test_toggles_ignored_while_loading() {
    let mut fixture = ControllerFixture::mount("sample");

    let state = fixture.handle.toggle_play_pause().await.unwrap();
    assert_eq!(state.phase(), PlaybackPhase::Loading);
    assert!(fixture.commands.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_controls_hide_and_interaction_restarts_countdown() {
    let fixture = ControllerFixture::mount("sample");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(fixture.handle.state().controls_visible);

    fixture.handle.interact().await.unwrap();

    // Past the first countdown, inside the restarted one
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(fixture.handle.state().controls_visible);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!fixture.handle.state().controls_visible);

    let state = fixture.handle.interact().await.unwrap();
    assert!(state.controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_route_mounts_in_error_state() {
    let fixture = ControllerFixture::mount("missing-en");

    assert!(fixture.handle.resolution().is_err());
    assert_eq!(fixture.handle.state().error, Some(ErrorKind::NotFound));
    assert_eq!(fixture.bus.subscriber_count(), 0);

    fixture.bus.publish(READY);
    let state = fixture.handle.toggle_play_pause().await.unwrap();
    assert_eq!(state.phase(), PlaybackPhase::Error);
    assert!(!state.ready);
}

#[tokio::test(start_paused = true)]
async fn test_exhibit_without_media_is_unavailable() {
    let bus = MessageBus::new();
    let (frame, _commands) = mpsc::unbounded_channel();
    let catalog = Catalog::from_json_str(r#"{"empty": {"youtubeId": "  "}}"#).unwrap();

    let handle = spawn_playback_controller("empty", &catalog, &bus, frame, &test_config());

    assert_eq!(handle.state().error, Some(ErrorKind::MediaUnavailable));
}

#[tokio::test(start_paused = true)]
async fn test_player_error_is_absorbing() {
    let fixture = ControllerFixture::mount_ready("sample").await;
    fixture.bus.publish(r#"{"event":"onError","info":101}"#);

    let mut watch = fixture.handle.watch_state();
    watch.wait_for(|state| state.error.is_some()).await.unwrap();

    assert_eq!(fixture.handle.state().error, Some(ErrorKind::PlaybackFailed));
    assert_eq!(fixture.bus.subscriber_count(), 0);

    let state = fixture.handle.toggle_play_pause().await.unwrap();
    assert_eq!(state.phase(), PlaybackPhase::Error);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_stops_timers_and_subscription() {
    let fixture = ControllerFixture::mount("sample");
    fixture.handle.unmount().await;

    assert_eq!(fixture.bus.subscriber_count(), 0);
    assert!(!fixture.handle.is_mounted());

    // Neither the ready timeout nor the auto-hide may fire after unmount
    tokio::time::sleep(Duration::from_secs(1)).await;
    let state = fixture.handle.state();
    assert_eq!(state.phase(), PlaybackPhase::Loading);
    assert!(state.controls_visible);

    assert_eq!(
        fixture.handle.interact().await,
        Err(ControllerError::Unmounted)
    );
    fixture.handle.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_handle_unmounts() {
    let fixture = ControllerFixture::mount("sample");
    let bus = fixture.bus.clone();
    assert_eq!(bus.subscriber_count(), 1);

    drop(fixture);

    for _ in 0..10 {
        if bus.subscriber_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_controllers_share_page_bus() {
    let bus = MessageBus::new();
    let catalog = Catalog::builtin();
    let (first_frame, _first) = mpsc::unbounded_channel();
    let (second_frame, _second) = mpsc::unbounded_channel();

    let first = spawn_playback_controller("sample", &catalog, &bus, first_frame, &test_config());
    let second =
        spawn_playback_controller("garden-ar", &catalog, &bus, second_frame, &test_config());
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(READY);
    first.watch_state().wait_for(|state| state.ready).await.unwrap();
    second.watch_state().wait_for(|state| state.ready).await.unwrap();

    first.unmount().await;
    assert_eq!(bus.subscriber_count(), 1);
}
