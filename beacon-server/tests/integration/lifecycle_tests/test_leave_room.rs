use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, ServerEvent, UserRole};

#[tokio::test]
async fn leave_notifies_remaining_members_and_allows_rejoin() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::Leave {
                room_id: room.room_id,
                user_id: "u1".into(),
            },
        )
        .await;

    let companion_events = harness.output.take_events(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::UserLeft {
            user_id: "u1".into()
        }]
    );
    assert!(harness.output.events_for(&user_conn).await.is_empty());

    let participants = harness.router.participants(&room.room_id);
    assert_eq!(participants.len(), 1);

    // Back to Connected: the same connection may join again.
    harness
        .join(user_conn, room.room_id, "u1", UserRole::User)
        .await;

    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::UserJoined {
            user_id: "u1".into(),
            role: UserRole::User,
        }]
    );
    assert_eq!(harness.router.participants(&room.room_id).len(), 2);
}

#[tokio::test]
async fn leave_without_membership_is_a_conflict() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;

    let conn = harness.connect();
    harness
        .router
        .handle(
            conn,
            ClientEvent::Leave {
                room_id: room.room_id,
                user_id: "u1".into(),
            },
        )
        .await;

    let events = harness.output.events_for(&conn).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::Error { kind, .. } => assert_eq!(kind, "conflict"),
        other => panic!("expected error event, got {other:?}"),
    }
}
