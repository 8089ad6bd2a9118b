use crate::utils::TestHarness;
use beacon_core::RoomId;
use beacon_core::model::{ClientEvent, ServerEvent, UserRole};
use std::time::Duration;

#[tokio::test]
async fn join_to_missing_room_errors_and_leaves_no_state_behind() {
    let harness = TestHarness::new();
    let missing = RoomId::new();

    let conn = harness.connect();
    harness.join(conn, missing, "u1", UserRole::User).await;

    let events = harness.output.take_events(&conn).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "not_found"),
        other => panic!("expected error event, got {other:?}"),
    }

    // No partial join state: the room has no members, and the connection
    // still cannot signal.
    assert!(harness.router.participants(&missing).is_empty());
    harness
        .router
        .handle(
            conn,
            ClientEvent::Offer {
                room_id: missing,
                from: "u1".into(),
                sdp: "v=0".into(),
            },
        )
        .await;

    let events = harness.output.take_events(&conn).await;
    match &events[0] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "conflict"),
        other => panic!("expected error event, got {other:?}"),
    }
}

#[tokio::test]
async fn join_to_expired_room_is_rejected() {
    let harness = TestHarness::new();
    let room = harness.create_room_with_ttl(Duration::ZERO).await;

    tokio::time::sleep(Duration::from_millis(5)).await;

    let conn = harness.connect();
    harness.join(conn, room.room_id, "u1", UserRole::User).await;

    let events = harness.output.events_for(&conn).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "expired"),
        other => panic!("expected error event, got {other:?}"),
    }
    assert!(harness.router.participants(&room.room_id).is_empty());
}
