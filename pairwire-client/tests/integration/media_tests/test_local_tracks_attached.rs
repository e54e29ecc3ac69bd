use pairwire_client::media::SampleTracks;
use pairwire_core::SignalMessage;
use std::sync::Arc;

use crate::integration::init_tracing;
use crate::utils::TestClient;

#[tokio::test]
async fn test_local_tracks_attached() {
    init_tracing();

    let mut client = TestClient::start_with_media(Arc::new(SampleTracks::new("local")));
    client
        .wait_for_status("Local media started.")
        .await
        .expect("capture");

    client.client.create_room("pi").await.expect("create");
    client.next_sent_event("create").await.expect("create sent");
    client
        .deliver(SignalMessage::RoomCreated {
            room_id: "pi".into(),
        })
        .await;
    client
        .wait_for(|s| s.generation.is_some())
        .await
        .expect("session");

    let tracks = client.peers.last().expect("session").state().tracks;
    assert_eq!(tracks, vec!["audio".to_owned(), "video".to_owned()]);
}
