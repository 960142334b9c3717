use super::types::*;

#[test]
fn envelope_with_page_parses_backend_shape() {
    let raw = serde_json::json!({
        "success": true,
        "message": "ok",
        "data": {
            "content": [
                {"id": 1, "title": "Ban homework?", "status": "ACTIVE", "commentCount": 3}
            ],
            "totalPages": 5,
            "totalElements": 93
        }
    });

    let env: ApiEnvelope<Page<Debate>> = serde_json::from_value(raw).expect("parse");
    assert!(env.success);
    let page = env.data.expect("data");
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.total_elements, 93);
    assert_eq!(page.content[0].title, "Ban homework?");
    assert_eq!(page.content[0].status, DebateStatus::Active);
    assert_eq!(page.content[0].comment_count, 3);
}

#[test]
fn comment_defaults_missing_fields() {
    let raw = serde_json::json!({"id": 10, "content": "first"});
    let c: Comment = serde_json::from_value(raw).expect("parse");
    assert_eq!(c.id, 10);
    assert!(c.replies.is_empty());
    assert!(!c.liked);
    assert!(!c.is_deleted);
    assert!(c.parent_id.is_none());
}

#[test]
fn comment_parses_nested_replies() {
    let raw = serde_json::json!({
        "id": 1,
        "content": "root",
        "replies": [
            {"id": 2, "parentId": 1, "content": "reply", "likeCount": 4, "liked": true}
        ]
    });
    let c: Comment = serde_json::from_value(raw).expect("parse");
    assert_eq!(c.replies.len(), 1);
    assert_eq!(c.replies[0].parent_id, Some(1));
    assert_eq!(c.replies[0].like_count, 4);
    assert!(c.replies[0].liked);
}

#[test]
fn opinion_side_uses_screaming_case() {
    assert_eq!(serde_json::to_string(&OpinionSide::For).unwrap(), "\"FOR\"");
    assert_eq!(serde_json::to_string(&OpinionSide::Against).unwrap(), "\"AGAINST\"");
}

#[test]
fn chat_message_kind_maps_type_field() {
    let raw = serde_json::json!({
        "debateId": 9,
        "userId": 2,
        "nickname": "bob",
        "type": "JOIN"
    });
    let msg: ChatMessage = serde_json::from_value(raw).expect("parse");
    assert_eq!(msg.kind, ChatKind::Join);
    assert_eq!(msg.debate_id, 9);
}

#[test]
fn notification_maps_type_field() {
    let raw = serde_json::json!({
        "id": 4,
        "type": "comment",
        "message": "New comment on your debate",
        "isRead": false,
        "url": "/debate/12"
    });
    let n: Notification = serde_json::from_value(raw).expect("parse");
    assert_eq!(n.kind, "comment");
    assert!(!n.is_read);
    assert_eq!(n.url.as_deref(), Some("/debate/12"));
}
