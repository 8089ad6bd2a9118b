use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, ServerEvent, SignalKind};
use beacon_server::RoomStore;

#[tokio::test]
async fn offer_reaches_the_peer_but_never_the_sender() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::Offer {
                room_id: room.room_id,
                from: "u1".into(),
                sdp: "v=0 o=- 46117317 2 IN IP4 127.0.0.1".into(),
            },
        )
        .await;

    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::Offer {
            from: "u1".into(),
            sdp: "v=0 o=- 46117317 2 IN IP4 127.0.0.1".into(),
        }]
    );

    assert!(harness.output.events_for(&user_conn).await.is_empty());

    // The exchange is retained for diagnostics.
    let signals = harness.store.signals(&room.room_id).await.expect("signals");
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::Offer);
    assert_eq!(signals[0].from, "u1");
}
