use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, ServerEvent};
use beacon_server::RoomStore;

#[tokio::test]
async fn chat_reaches_every_member_including_the_sender() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::Message {
                from: "u1".into(),
                text: "hello there".into(),
            },
        )
        .await;

    for conn in [&user_conn, &companion_conn] {
        let events = harness.output.events_for(conn).await;
        assert_eq!(events.len(), 1, "each member hears the message once");
        match &events[0] {
            ServerEvent::Message { from, text, .. } => {
                assert_eq!(from, "u1");
                assert_eq!(text, "hello there");
            }
            other => panic!("expected message event, got {other:?}"),
        }
    }

    let history = harness
        .store
        .recent_chat(&room.room_id, 10)
        .await
        .expect("chat history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "hello there");
}
