use pairwire_client::rtc::{IceConnectionState, PeerEventKind};

use crate::integration::{create_room_client, init_tracing};

#[tokio::test]
async fn test_stale_session_events() {
    init_tracing();

    let mut client = create_room_client("mu").await;
    let old = client.peers.last().expect("first session");

    client.client.create_room("nu").await.expect("create");
    client.next_sent_event("create").await.expect("create sent");
    client
        .wait_for(|s| s.generation.is_none())
        .await
        .expect("session discarded");
    assert!(old.state().closed);

    // The old connection keeps firing callbacks after it was replaced.
    old.emit_local_candidate("candidate:stale");
    old.emit_track("stale-stream", "stale-track");
    old.emit(PeerEventKind::IceConnectionState(
        IceConnectionState::Connected,
    ));
    client.settle().await;

    assert!(client.transport.sent_events("ice-candidate").await.is_empty());
    assert!(client.render.attached().is_empty());
    assert_ne!(client.client.status_text(), "Call connected!");

    // Same holds once a newer session is live.
    client
        .deliver(pairwire_core::SignalMessage::RoomCreated {
            room_id: "nu".into(),
        })
        .await;
    let snapshot = client
        .wait_for(|s| s.generation.is_some())
        .await
        .expect("new session");
    assert_ne!(snapshot.generation, Some(old.generation()));

    old.emit_local_candidate("candidate:still-stale");
    old.emit_track("stale-stream", "stale-track");
    client.settle().await;

    assert!(client.transport.sent_events("ice-candidate").await.is_empty());
    assert!(client.render.attached().is_empty());
    assert!(!client.client.snapshot().await.expect("snapshot").remote_attached);
}
