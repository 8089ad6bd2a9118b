use crate::utils::TestHarness;
use beacon_core::model::{ClientEvent, ServerEvent};

#[tokio::test]
async fn answer_relays_opaque_sdp() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    harness
        .router
        .handle(
            companion_conn,
            ClientEvent::Answer {
                room_id: room.room_id,
                from: "c1".into(),
                sdp: "v=0 a=sendrecv".into(),
            },
        )
        .await;

    let user_events = harness.output.events_for(&user_conn).await;
    assert_eq!(
        user_events,
        vec![ServerEvent::Answer {
            from: "c1".into(),
            sdp: "v=0 a=sendrecv".into(),
        }]
    );
    assert!(harness.output.events_for(&companion_conn).await.is_empty());
}

#[tokio::test]
async fn candidate_payload_is_forwarded_unchanged() {
    let harness = TestHarness::new();
    let room = harness.create_room().await;
    let (user_conn, companion_conn) = harness.joined_pair(room.room_id).await;

    let candidate = serde_json::json!({
        "candidate": "candidate:1 1 UDP 2122252543 192.0.2.1 54400 typ host",
        "sdpMid": "0",
        "sdpMLineIndex": 0,
    });

    harness
        .router
        .handle(
            user_conn,
            ClientEvent::Candidate {
                room_id: room.room_id,
                from: "u1".into(),
                candidate: candidate.clone(),
            },
        )
        .await;

    let companion_events = harness.output.events_for(&companion_conn).await;
    assert_eq!(
        companion_events,
        vec![ServerEvent::Candidate {
            from: "u1".into(),
            candidate,
        }]
    );
}
