use crate::utils::TestHarness;
use beacon_core::model::ServerEvent;

#[tokio::test]
async fn disconnect_sends_exactly_one_user_left_to_each_remaining_member() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness.router.on_disconnect(user_conn).await;

    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::UserLeft {
            user_id: "u1".into()
        }]
    );

    // The dropped connection is out of the broadcast group.
    let participants = harness.router.participants(&room.room_id);
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].user_id, "c1");

    // And it received nothing on the way out.
    assert!(harness.output.events_for(&user_conn).await.is_empty());
}
