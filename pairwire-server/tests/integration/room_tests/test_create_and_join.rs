use pairwire_core::SignalMessage;

use crate::integration::init_tracing;
use crate::utils::{TestServer, TestSocket};

#[tokio::test]
async fn test_create_and_join() {
    init_tracing();

    let server = TestServer::start().await.expect("server");
    let mut creator = TestSocket::connect(&server.url).await.expect("creator");
    let mut joiner = TestSocket::connect(&server.url).await.expect("joiner");

    creator
        .send(&SignalMessage::Create {
            room_id: "room1".into(),
        })
        .await
        .expect("create");
    assert_eq!(
        creator.recv().await.expect("room_created"),
        SignalMessage::RoomCreated {
            room_id: "room1".into()
        }
    );

    joiner
        .send(&SignalMessage::Join {
            room_id: "room1".into(),
        })
        .await
        .expect("join");

    let joined = SignalMessage::RoomJoined {
        room_id: "room1".into(),
    };
    assert_eq!(creator.recv().await.expect("creator notified"), joined);
    assert_eq!(joiner.recv().await.expect("joiner notified"), joined);
    assert_eq!(joiner.recv().await.expect("start_call"), SignalMessage::StartCall);

    // Only the joiner is told to start the call.
    creator.expect_quiet().await.expect("creator quiet");
}
