use crate::utils::TestHarness;
use beacon_core::model::{ServerEvent, UserRole};

#[tokio::test]
async fn second_join_implicitly_leaves_the_first_room() {
    let harness = TestHarness::new();
    let first = harness.create_room().await;
    let second = harness.create_room().await;

    let (user_conn, companion_conn) = harness.joined_pair(first.room_id).await;

    harness
        .join(user_conn, second.room_id, "u1", UserRole::User)
        .await;

    // The abandoned room hears the implicit leave.
    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::UserLeft {
            user_id: "u1".into()
        }]
    );

    let first_participants = harness.router.participants(&first.room_id);
    assert_eq!(first_participants.len(), 1);
    assert_eq!(first_participants[0].user_id, "c1");

    let second_participants = harness.router.participants(&second.room_id);
    assert_eq!(second_participants.len(), 1);
    assert_eq!(second_participants[0].user_id, "u1");
}
