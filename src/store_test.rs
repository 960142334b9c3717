use super::*;

fn user(id: i64, nickname: &str) -> BlockedUser {
    BlockedUser { id, nickname: nickname.to_owned(), blocked_at: None }
}

#[test]
fn block_list_blocks_and_unblocks() {
    let mut list = BlockList::default();
    assert!(!list.contains(3));

    list.block(user(3, "troll"));
    assert!(list.contains(3));

    list.unblock(3);
    assert!(!list.contains(3));
}

#[test]
fn blocking_twice_keeps_one_entry() {
    let mut list = BlockList::default();
    list.block(user(3, "troll"));
    list.block(user(3, "troll"));
    assert_eq!(list.0.len(), 1);
}

#[test]
fn block_list_round_trips_through_json() {
    let mut list = BlockList::default();
    list.block(BlockedUser {
        id: 9,
        nickname: "spammer".to_owned(),
        blocked_at: Some("2026-01-01T00:00:00".to_owned()),
    });

    let raw = serde_json::to_string(&list.0).unwrap();
    let parsed: Vec<BlockedUser> = serde_json::from_str(&raw).unwrap();
    assert_eq!(BlockList(parsed), list);
}

#[test]
fn theme_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
}
