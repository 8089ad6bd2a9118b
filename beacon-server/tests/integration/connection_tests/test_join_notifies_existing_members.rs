use crate::utils::TestHarness;
use beacon_core::model::{ServerEvent, UserRole};

#[tokio::test]
async fn join_notifies_existing_members_but_not_the_joiner() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;

    let user_conn = harness.connect();
    harness
        .join(user_conn, room.room_id, "u1", UserRole::User)
        .await;

    // Alone in the room: nothing to hear yet.
    assert!(harness.output.events_for(&user_conn).await.is_empty());

    let companion_conn = harness.connect();
    harness
        .join(companion_conn, room.room_id, "c1", UserRole::Companion)
        .await;

    let user_events = harness.output.events_for(&user_conn).await;
    assert_eq!(
        user_events,
        vec![ServerEvent::UserJoined {
            user_id: "c1".into(),
            role: UserRole::Companion,
        }]
    );

    // The joiner hears nothing about its own join.
    assert!(harness.output.events_for(&companion_conn).await.is_empty());

    let participants = harness.router.participants(&room.room_id);
    assert_eq!(participants.len(), 2);
}
