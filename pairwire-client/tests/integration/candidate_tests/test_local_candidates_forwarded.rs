use pairwire_client::rtc::PeerEventKind;
use pairwire_core::SignalMessage;

use crate::integration::{create_room_client, init_tracing};

#[tokio::test]
async fn test_local_candidates_forwarded() {
    init_tracing();

    let mut client = create_room_client("omicron").await;
    let peer = client.peers.last().expect("session");

    peer.emit_local_candidate("candidate:local-1");
    let SignalMessage::IceCandidate { room_id, candidate } = client
        .next_sent_event("ice-candidate")
        .await
        .expect("candidate sent")
    else {
        unreachable!()
    };
    assert_eq!(room_id, "omicron");
    assert_eq!(
        candidate.map(|c| c.candidate),
        Some("candidate:local-1".to_owned())
    );

    // End of gathering is not signaled to the other side.
    peer.emit(PeerEventKind::IceCandidate(None));
    client.settle().await;
    assert_eq!(client.transport.sent_events("ice-candidate").await.len(), 1);
}
