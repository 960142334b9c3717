#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::ChatMessage;

/// WebSocket connection status for a chat room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// State for one debate's chat room.
///
/// The message log is append-only and ordered; dedup relies on unique
/// message ids assigned by the server. Unread counting only runs while
/// the panel is hidden and resets when it becomes visible.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub debate_id: Option<i64>,
    pub connection_status: ConnectionStatus,
    pub messages: Vec<ChatMessage>,
    pub unread_count: u32,
    pub panel_open: bool,
    pub loading_history: bool,
}

impl ChatState {
    /// Reset for a new room. Everything from the previous room is gone.
    pub fn reset(&mut self, debate_id: i64) {
        *self = Self { debate_id: Some(debate_id), ..Self::default() };
    }

    pub fn begin_connect(&mut self) {
        self.connection_status = ConnectionStatus::Connecting;
    }

    pub fn mark_connected(&mut self) {
        self.connection_status = ConnectionStatus::Connected;
    }

    /// Errors and teardown both land here; safe to call when already
    /// disconnected.
    pub fn mark_disconnected(&mut self) {
        self.connection_status = ConnectionStatus::Disconnected;
    }

    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }

    /// Replace the log with fetched history. Does not affect unread:
    /// history predates the panel being opened.
    pub fn load_history(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.loading_history = false;
    }

    /// Append an inbound message, counting it as unread while the panel
    /// is hidden.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if !self.panel_open {
            self.unread_count += 1;
        }
    }

    /// The panel became visible: unread resets.
    pub fn open_panel(&mut self) {
        self.panel_open = true;
        self.unread_count = 0;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }
}
