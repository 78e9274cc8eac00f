//! Player socket bridge driven without a real socket

use std::time::Duration;

use docent_core::playback::PlayerCommand;
use docent_core::{Catalog, DocentConfig, ErrorKind};
use docent_web::handlers::{BridgeOutbound, PlayerBridge, ServerFrame};

const READY: &str = r#"{"event":"onReady","id":1,"channel":"widget"}"#;

fn frame(data: &str) -> String {
    serde_json::json!({ "kind": "frame", "data": data }).to_string()
}

fn mount(route: &str) -> (PlayerBridge, BridgeOutbound) {
    let config = DocentConfig::for_testing();
    PlayerBridge::mount(route, &Catalog::builtin(), &config.playback)
}

async fn next_state(outbound: &mut BridgeOutbound) -> docent_core::PlaybackState {
    loop {
        match outbound.next().await {
            Some(ServerFrame::State(state)) => return state,
            Some(ServerFrame::Command { .. }) => continue,
            None => panic!("bridge closed before a state frame"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_frame_is_current_state() {
    let (bridge, mut outbound) = mount("exhibit01-fr");

    let first = outbound.next().await.unwrap();

    match first {
        ServerFrame::State(state) => {
            assert!(!state.ready);
            assert!(state.error.is_none());
        }
        other => panic!("expected state frame, got {other:?}"),
    }
    bridge.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_forwarded_ready_event_reaches_controller() {
    let (bridge, mut outbound) = mount("exhibit01-fr");
    next_state(&mut outbound).await;

    bridge.handle_client_text(&frame(READY)).await.unwrap();

    let mut state = bridge.handle().watch_state();
    let ready = state.wait_for(|state| state.ready).await.unwrap().clone();
    assert!(ready.playing);
    bridge.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mute_emits_player_command() {
    let (bridge, mut outbound) = mount("exhibit01-fr");
    next_state(&mut outbound).await;
    bridge.handle_client_text(&frame(READY)).await.unwrap();
    let mut state = bridge.handle().watch_state();
    state.wait_for(|state| state.ready).await.unwrap();

    bridge
        .handle_client_text(r#"{"kind":"toggle_mute"}"#)
        .await
        .unwrap();

    let expected = PlayerCommand::UnMute.to_message();
    let mut saw_command = false;
    for _ in 0..8 {
        match tokio::time::timeout(Duration::from_millis(50), outbound.next()).await {
            Ok(Some(ServerFrame::Command { message })) if message == expected => {
                saw_command = true;
                break;
            }
            Ok(Some(_)) => continue,
            _ => break,
        }
    }
    assert!(saw_command);
    assert!(!bridge.handle().state().muted);
    bridge.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_malformed_messages_are_ignored() {
    let (bridge, _outbound) = mount("exhibit01-fr");

    assert!(bridge.handle_client_text("not json").await.is_ok());
    assert!(bridge.handle_client_text(r#"{"kind":"seek"}"#).await.is_ok());
    assert!(bridge.handle().is_mounted());
    bridge.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_unknown_route_reports_error_state() {
    let (bridge, mut outbound) = mount("nowhere");

    let state = next_state(&mut outbound).await;

    assert_eq!(state.error, Some(ErrorKind::NotFound));
    bridge.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_unmount_closes_outbound() {
    let (bridge, mut outbound) = mount("exhibit01-fr");
    next_state(&mut outbound).await;

    bridge.unmount().await;
    drop(bridge);

    let drained = tokio::time::timeout(Duration::from_secs(1), async {
        while outbound.next().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
}
