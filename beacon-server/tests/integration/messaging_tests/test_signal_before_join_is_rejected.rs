use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, ServerEvent};
use beacon_server::RoomStore;

#[tokio::test]
async fn signaling_while_merely_connected_is_a_conflict() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;

    let conn = harness.connect();
    harness
        .router
        .handle(
            conn,
            ClientEvent::Offer {
                room_id: room.room_id,
                from: "u1".into(),
                sdp: "v=0".into(),
            },
        )
        .await;

    let events = harness.output.events_for(&conn).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "conflict"),
        other => panic!("expected error event, got {other:?}"),
    }

    // Nothing was recorded for the room.
    let signals = harness.store.signals(&room.room_id).await.expect("signals");
    assert!(signals.is_empty());
}
