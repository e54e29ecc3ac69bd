use pairwire_client::NegotiationPhase;
use pairwire_client::room::Role;
use pairwire_client::rtc::SignalingState;
use pairwire_core::{SdpType, SignalMessage};

use crate::integration::{answer_msg, create_room_client, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_joiner_offers_on_start_call() {
    init_tracing();

    let mut client = TestClient::start();
    client.client.join_room("beta").await.expect("join");
    client.next_sent_event("join").await.expect("join sent");

    client
        .deliver(SignalMessage::RoomJoined {
            room_id: "beta".into(),
        })
        .await;
    client.wait_for_status("Joined room beta.").await.expect("status");
    assert_eq!(client.peers.created_count(), 0);

    client.deliver(SignalMessage::StartCall).await;

    let SignalMessage::Offer { room_id, offer } =
        client.next_sent_event("offer").await.expect("offer sent")
    else {
        unreachable!()
    };
    assert_eq!(room_id, "beta");
    let offer = offer.expect("offer body");
    assert_eq!(offer.sdp_type.as_deref(), Some("offer"));

    let peer = client.peers.last().expect("session");
    let state = peer.state();
    assert_eq!(state.signaling, SignalingState::HaveLocalOffer);
    assert_eq!(state.local.as_ref().map(|d| d.sdp_type), Some(SdpType::Offer));
    assert_eq!(state.offers_created, 1);

    let snapshot = client.client.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.role, Role::Joiner);
    assert_eq!(snapshot.phase, NegotiationPhase::AwaitingRemoteDescription);

    client.deliver(answer_msg("beta", "v=0 remote-answer")).await;
    let snapshot = client
        .wait_for(|s| s.phase == NegotiationPhase::Negotiating)
        .await
        .expect("answer applied");
    assert_eq!(snapshot.signaling_state, Some(SignalingState::Stable));
    assert_eq!(
        peer.state().remote.map(|d| d.payload),
        Some("v=0 remote-answer".to_owned())
    );
}

#[tokio::test]
async fn test_creator_ignores_start_call() {
    init_tracing();

    let client = create_room_client("gamma").await;
    client.deliver(SignalMessage::StartCall).await;
    client.settle().await;

    assert!(client.transport.sent_events("offer").await.is_empty());
    let peer = client.peers.last().expect("session");
    assert_eq!(peer.state().offers_created, 0);
    assert_eq!(peer.state().signaling, SignalingState::Stable);
    assert_eq!(client.peers.created_count(), 1);
}

#[tokio::test]
async fn test_start_call_without_room_ignored() {
    init_tracing();

    let client = TestClient::start();
    client.deliver(SignalMessage::StartCall).await;
    client.settle().await;

    assert_eq!(client.peers.created_count(), 0);
    assert!(client.transport.sent().await.is_empty());
}
