use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, RoomStatus, ServerEvent};
use beacon_server::RoomStore;

#[tokio::test]
async fn end_notifies_everyone_and_deactivates_the_room() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::End {
                room_id: room.room_id,
                reason: Some("done".into()),
            },
        )
        .await;

    // Unlike negotiation relays, call_ended reaches the caller too.
    for conn in [&user_conn, &companion_conn] {
        let events = harness.output.events_for(conn).await;
        assert_eq!(
            events,
            vec![ServerEvent::CallEnded {
                reason: Some("done".into())
            }]
        );
    }

    let stored = harness.store.get(&room.room_id).await.expect("room");
    assert_eq!(stored.status, RoomStatus::Inactive);
    // Ending never rewrites the expiry clock.
    assert_eq!(stored.expires_at, room.expires_at);
}

#[tokio::test]
async fn end_on_an_expired_room_still_notifies_peers() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    // The room expires under the members' feet.
    harness
        .store
        .set_status(&room.room_id, RoomStatus::Expired)
        .await
        .expect("expire");

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::End {
                room_id: room.room_id,
                reason: None,
            },
        )
        .await;

    // Peers still hear the call end even though the status write was
    // rejected; the caller additionally gets the store error.
    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(companion_events, vec![ServerEvent::CallEnded { reason: None }]);

    let user_events = harness.output.events_for(&user_conn).await;
    assert_eq!(user_events.len(), 2);
    assert_eq!(user_events[0], ServerEvent::CallEnded { reason: None });
    match &user_events[1] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "conflict"),
        other => panic!("expected error event, got {other:?}"),
    }
}
