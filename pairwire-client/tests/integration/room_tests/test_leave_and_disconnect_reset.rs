use pairwire_client::NegotiationPhase;
use pairwire_client::room::Role;
use pairwire_core::SignalMessage;

use crate::integration::{candidate_msg, create_room_client, init_tracing, offer_msg};
use crate::utils::TestClient;

#[tokio::test]
async fn test_leave_resets_room() {
    init_tracing();

    let mut client = create_room_client("gone").await;
    client.deliver(candidate_msg("gone", "candidate:1")).await;
    client
        .wait_for(|s| s.queued_candidates == 1)
        .await
        .expect("candidate queued");

    client.client.leave().await.expect("leave");

    let snapshot = client.client.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.role, Role::None);
    assert!(snapshot.room_id.is_none());
    assert!(snapshot.generation.is_none());
    assert_eq!(snapshot.queued_candidates, 0);
    assert_eq!(snapshot.phase, NegotiationPhase::Uninitialized);
    assert!(client.peers.last().expect("session").state().closed);
    assert_eq!(client.client.status_text(), "Left room gone.");
    assert_eq!(
        client.next_sent_event("leave").await.expect("leave sent"),
        SignalMessage::Leave {
            room_id: "gone".into()
        }
    );
}

#[tokio::test]
async fn test_leave_outside_room_sends_nothing() {
    init_tracing();

    let client = TestClient::start();
    client.client.leave().await.expect("leave");
    client.settle().await;

    assert!(client.transport.sent().await.is_empty());
}

#[tokio::test]
async fn test_old_room_traffic_ignored_after_leave() {
    init_tracing();

    let mut client = create_room_client("a").await;
    client.client.leave().await.expect("leave");

    // Late traffic from the room we left.
    client.deliver(candidate_msg("a", "candidate:from-room-a")).await;
    client.deliver(offer_msg("a", "v=0 stale-offer")).await;
    client.settle().await;

    let snapshot = client.client.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.queued_candidates, 0);
    assert!(snapshot.generation.is_none());
    assert_eq!(client.peers.created_count(), 1);
    assert!(client.transport.sent_events("answer").await.is_empty());

    client.client.create_room("b").await.expect("create b");
    client.next_sent_event("create").await.expect("create sent");
    client
        .deliver(SignalMessage::RoomCreated {
            room_id: "b".into(),
        })
        .await;
    client
        .wait_for(|s| s.generation.is_some())
        .await
        .expect("session for b");

    client.deliver(offer_msg("b", "v=0 offer-b")).await;
    assert!(matches!(
        client.next_sent_event("answer").await.expect("answer sent"),
        SignalMessage::Answer { room_id, .. } if room_id == "b"
    ));
    client.settle().await;

    let session = client.peers.last().expect("session for b");
    assert!(session.state().applied_candidates.is_empty());
}

#[tokio::test]
async fn test_shutdown_closes_transport() {
    init_tracing();

    let TestClient {
        client, transport, ..
    } = create_room_client("bye").await;
    assert!(!transport.is_closed());

    client.shutdown().await;
    assert!(transport.is_closed());
}

#[tokio::test]
async fn test_server_disconnect_resets_room() {
    init_tracing();

    let client = create_room_client("lost").await;
    client.disconnect().await;

    client
        .wait_for_status("Disconnected from server.")
        .await
        .expect("status");
    let snapshot = client
        .wait_for(|s| s.generation.is_none())
        .await
        .expect("session dropped");
    assert!(snapshot.room_id.is_none());
    assert!(client.peers.last().expect("session").state().closed);
}
