use pairwire_client::NegotiationPhase;
use pairwire_client::rtc::SignalingState;
use pairwire_core::{RawDescription, SignalMessage};

use crate::integration::{answer_msg, create_room_client, init_tracing, joined_room_client};
use crate::utils::TestClient;

#[tokio::test]
async fn test_answer_without_local_offer_ignored() {
    init_tracing();

    let client = create_room_client("iota").await;
    client.deliver(answer_msg("iota", "v=0 unsolicited")).await;
    client.settle().await;

    let state = client.peers.last().expect("session").state();
    assert!(state.remote.is_none());
    assert_eq!(state.signaling, SignalingState::Stable);

    let snapshot = client.client.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.phase, NegotiationPhase::AwaitingRemoteDescription);
}

#[tokio::test]
async fn test_duplicate_answer_ignored() {
    init_tracing();

    let client = joined_room_client("kappa").await;
    client.deliver(answer_msg("kappa", "v=0 first")).await;
    client
        .wait_for(|s| s.phase == NegotiationPhase::Negotiating)
        .await
        .expect("answer applied");

    client.deliver(answer_msg("kappa", "v=0 second")).await;
    client.settle().await;

    let state = client.peers.last().expect("session").state();
    assert_eq!(state.remote.map(|d| d.payload), Some("v=0 first".to_owned()));
    assert_eq!(state.signaling, SignalingState::Stable);
}

#[tokio::test]
async fn test_answer_without_session_ignored() {
    init_tracing();

    let client = TestClient::start();
    client.deliver(answer_msg("", "v=0 orphan")).await;
    client.settle().await;

    assert_eq!(client.peers.created_count(), 0);
}

#[tokio::test]
async fn test_malformed_answer_rejected() {
    init_tracing();

    let client = joined_room_client("lambda").await;
    client
        .deliver(SignalMessage::Answer {
            room_id: "lambda".into(),
            answer: Some(RawDescription {
                sdp_type: Some("offer".into()),
                payload: "v=0".into(),
            }),
        })
        .await;

    client
        .wait_for_status("Received invalid answer.")
        .await
        .expect("status");
    let state = client.peers.last().expect("session").state();
    assert_eq!(state.signaling, SignalingState::HaveLocalOffer);
    assert!(state.remote.is_none());
}
