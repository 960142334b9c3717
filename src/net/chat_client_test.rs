use super::*;

#[test]
fn topic_and_destination_are_scoped_per_debate() {
    assert_eq!(topic(42), "/topic/debate/42");
    assert_eq!(destination(42), "/app/chat/42");
    assert_ne!(topic(1), topic(2));
}

#[test]
fn subscribe_frame_round_trips() {
    let frame = ChatFrame::Subscribe { topic: topic(7) };
    let json = frame.to_json().expect("encode");
    let back: ChatFrame = serde_json::from_str(&json).expect("decode");
    assert_eq!(back, frame);
}

#[test]
fn send_frame_carries_kind_tag_and_fresh_id() {
    let frame = send_frame(7, chat_event(7, 3, "alice", "hello"));
    let json = frame.to_json().expect("encode");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(value["kind"], "SEND");
    assert_eq!(value["destination"], "/app/chat/7");
    assert_eq!(value["body"]["message"], "hello");
    assert_eq!(value["body"]["type"], "CHAT");
    assert!(!value["id"].as_str().unwrap_or_default().is_empty());
}

#[test]
fn inbound_message_accepts_matching_topic_only() {
    let broadcast = ChatFrame::Message {
        topic: topic(7),
        body: chat_event(7, 3, "alice", "hi"),
    };
    let json = broadcast.to_json().expect("encode");

    let msg = ChatFrame::inbound_message(&json, 7).expect("matching room");
    assert_eq!(msg.message.as_deref(), Some("hi"));

    assert!(ChatFrame::inbound_message(&json, 8).is_none());
}

#[test]
fn inbound_message_ignores_other_frames_and_garbage() {
    let heartbeat = ChatFrame::Heartbeat.to_json().expect("encode");
    assert!(ChatFrame::inbound_message(&heartbeat, 7).is_none());
    assert!(ChatFrame::inbound_message("not json", 7).is_none());
}

#[test]
fn join_and_leave_events_carry_the_user() {
    let join = join_event(7, 3, "alice");
    assert_eq!(join.kind, crate::net::types::ChatKind::Join);
    assert_eq!(join.user_id, Some(3));
    assert_eq!(join.nickname.as_deref(), Some("alice"));
    assert!(join.message.is_none());

    let leave = leave_event(7, 3, "alice");
    assert_eq!(leave.kind, crate::net::types::ChatKind::Leave);
    assert_eq!(leave.debate_id, 7);
}
