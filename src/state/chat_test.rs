use super::*;
use crate::net::types::ChatKind;

fn message(id: i64, text: &str) -> ChatMessage {
    ChatMessage {
        id: Some(id),
        debate_id: 7,
        user_id: Some(1),
        nickname: Some("alice".to_owned()),
        message: Some(text.to_owned()),
        kind: ChatKind::Chat,
        created_at: None,
    }
}

#[test]
fn chat_state_default_is_disconnected_and_empty() {
    let state = ChatState::default();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert!(state.messages.is_empty());
    assert_eq!(state.unread_count, 0);
    assert!(!state.panel_open);
}

#[test]
fn lifecycle_walks_connecting_then_connected_then_disconnected() {
    let mut state = ChatState::default();
    state.begin_connect();
    assert_eq!(state.connection_status, ConnectionStatus::Connecting);
    state.mark_connected();
    assert!(state.is_connected());
    state.mark_disconnected();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
}

#[test]
fn mark_disconnected_is_idempotent() {
    let mut state = ChatState::default();
    state.mark_disconnected();
    state.mark_disconnected();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
}

#[test]
fn messages_append_in_arrival_order() {
    let mut state = ChatState::default();
    state.open_panel();
    state.push(message(1, "first"));
    state.push(message(2, "second"));
    let ids: Vec<Option<i64>> = state.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn unread_counts_only_while_panel_hidden() {
    let mut state = ChatState::default();
    state.push(message(1, "while hidden"));
    state.push(message(2, "also hidden"));
    assert_eq!(state.unread_count, 2);

    state.open_panel();
    assert_eq!(state.unread_count, 0);

    state.push(message(3, "while visible"));
    assert_eq!(state.unread_count, 0);

    state.close_panel();
    state.push(message(4, "hidden again"));
    assert_eq!(state.unread_count, 1);
}

#[test]
fn open_then_immediate_close_leaves_unread_at_zero() {
    let mut state = ChatState::default();
    state.reset(7);
    state.open_panel();
    state.close_panel();
    assert_eq!(state.unread_count, 0);

    // a subsequent open succeeds cleanly on fresh state
    state.reset(7);
    state.open_panel();
    assert!(state.messages.is_empty());
    assert_eq!(state.unread_count, 0);
}

#[test]
fn reset_clears_previous_room() {
    let mut state = ChatState::default();
    state.mark_connected();
    state.push(message(1, "old room"));
    state.reset(9);

    assert_eq!(state.debate_id, Some(9));
    assert!(state.messages.is_empty());
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert_eq!(state.unread_count, 0);
}

#[test]
fn history_load_does_not_touch_unread() {
    let mut state = ChatState::default();
    state.loading_history = true;
    state.load_history(vec![message(1, "a"), message(2, "b")]);
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.unread_count, 0);
    assert!(!state.loading_history);
}
