use crate::integration::{create_room_client, init_tracing};

#[tokio::test]
async fn test_remote_stream_attached_once() {
    init_tracing();

    let client = create_room_client("sigma").await;
    let peer = client.peers.last().expect("session");

    peer.emit_track("remote", "audio");
    peer.emit_track("remote", "video");
    client
        .wait_for(|s| s.remote_attached)
        .await
        .expect("attached");
    client.settle().await;

    let attached = client.render.attached();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].stream_id, "remote");
    assert_eq!(attached[0].track_id, "audio");
}
