//! WebSocket pub/sub client for per-debate chat rooms.
//!
//! One logical endpoint (`/ws`) carries every room. A client subscribes
//! to the room's broadcast topic and publishes outbound messages to the
//! room's application destination. The connection loop reconnects after
//! a fixed delay until the handle is shut down; shutdown is idempotent.
//!
//! All WebSocket transport is gated behind `#[cfg(feature = "hydrate")]`
//! since it requires a browser environment. The frame model and topic
//! naming are plain Rust and unit-tested natively.

#[cfg(test)]
#[path = "chat_client_test.rs"]
mod chat_client_test;

use serde::{Deserialize, Serialize};

use super::types::{ChatKind, ChatMessage};
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::chat::ChatState;
#[cfg(feature = "hydrate")]
use leptos::prelude::{GetUntracked, RwSignal, Update};

/// Delay before the transport retries a dropped connection.
pub const RECONNECT_DELAY_MS: u32 = 5000;
/// Outgoing heartbeat cadence while a connection is up.
pub const HEARTBEAT_INTERVAL_MS: u32 = 4000;

/// Broadcast topic for a debate's chat room.
pub fn topic(debate_id: i64) -> String {
    format!("/topic/debate/{debate_id}")
}

/// Application destination for publishing into a debate's chat room.
pub fn destination(debate_id: i64) -> String {
    format!("/app/chat/{debate_id}")
}

/// A frame on the `/ws` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatFrame {
    /// Start receiving broadcasts for `topic`.
    Subscribe { topic: String },
    /// Stop receiving broadcasts for `topic`.
    Unsubscribe { topic: String },
    /// Publish `body` to an application destination. `id` is a
    /// client-assigned frame id.
    Send { id: String, destination: String, body: ChatMessage },
    /// A broadcast delivered on a subscribed topic.
    Message { topic: String, body: ChatMessage },
    /// Keep-alive; carries nothing.
    Heartbeat,
}

/// Wrap an outbound chat message in a publish frame for this debate.
pub fn send_frame(debate_id: i64, body: ChatMessage) -> ChatFrame {
    ChatFrame::Send {
        id: uuid::Uuid::new_v4().to_string(),
        destination: destination(debate_id),
        body,
    }
}

impl ChatFrame {
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Parse an inbound frame, returning the chat message if it is a
    /// broadcast for the given debate's topic.
    pub fn inbound_message(raw: &str, debate_id: i64) -> Option<ChatMessage> {
        match serde_json::from_str::<ChatFrame>(raw).ok()? {
            ChatFrame::Message { topic: t, body } if t == topic(debate_id) => Some(body),
            _ => None,
        }
    }
}

/// The synthetic event announcing a user entered the room.
pub fn join_event(debate_id: i64, user_id: i64, nickname: &str) -> ChatMessage {
    room_event(debate_id, user_id, nickname, ChatKind::Join)
}

/// The synthetic event announcing a user left the room.
pub fn leave_event(debate_id: i64, user_id: i64, nickname: &str) -> ChatMessage {
    room_event(debate_id, user_id, nickname, ChatKind::Leave)
}

/// A user-authored chat message ready to publish.
pub fn chat_event(debate_id: i64, user_id: i64, nickname: &str, message: &str) -> ChatMessage {
    ChatMessage {
        id: None,
        debate_id,
        user_id: Some(user_id),
        nickname: Some(nickname.to_owned()),
        message: Some(message.to_owned()),
        kind: ChatKind::Chat,
        created_at: None,
    }
}

fn room_event(debate_id: i64, user_id: i64, nickname: &str, kind: ChatKind) -> ChatMessage {
    ChatMessage {
        id: None,
        debate_id,
        user_id: Some(user_id),
        nickname: Some(nickname.to_owned()),
        message: None,
        kind,
        created_at: None,
    }
}

/// Handle to a room connection. Cloneable; any clone can publish or
/// shut the connection down.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct ChatHandle {
    debate_id: i64,
    tx: futures::channel::mpsc::UnboundedSender<String>,
    closed: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(feature = "hydrate")]
impl ChatHandle {
    /// Publish a message to the room. Returns `false` when the
    /// connection is gone.
    pub fn publish(&self, body: ChatMessage) -> bool {
        if self.closed.get() {
            return false;
        }
        match send_frame(self.debate_id, body).to_json() {
            Some(json) => self.tx.unbounded_send(json).is_ok(),
            None => false,
        }
    }

    /// Tear the connection down: publish the optional leave event,
    /// cancel the topic subscription, and stop the loop. Safe to call
    /// repeatedly; only the first call does anything.
    pub fn shutdown(&self, leave: Option<ChatMessage>) {
        if self.closed.replace(true) {
            return;
        }
        if let Some(body) = leave {
            if let Some(json) = send_frame(self.debate_id, body).to_json() {
                let _ = self.tx.unbounded_send(json);
            }
        }
        if let Some(json) = (ChatFrame::Unsubscribe { topic: topic(self.debate_id) }).to_json() {
            let _ = self.tx.unbounded_send(json);
        }
        self.tx.close_channel();
    }
}

/// Spawn the room connection loop as a local async task.
///
/// The loop keeps `chat`'s connection status current, appends inbound
/// broadcasts, and publishes the join event once per (re)connection
/// while the user is authenticated.
#[cfg(feature = "hydrate")]
pub fn spawn_chat_client(
    debate_id: i64,
    auth: RwSignal<AuthState>,
    chat: RwSignal<ChatState>,
) -> ChatHandle {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    let handle = ChatHandle {
        debate_id,
        tx,
        closed: std::rc::Rc::new(std::cell::Cell::new(false)),
    };

    leptos::task::spawn_local(room_loop(debate_id, auth, chat, handle.clone(), rx));

    handle
}

#[cfg(feature = "hydrate")]
async fn room_loop(
    debate_id: i64,
    auth: RwSignal<AuthState>,
    chat: RwSignal<ChatState>,
    handle: ChatHandle,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let rx = Rc::new(RefCell::new(rx));

    while !handle.closed.get() {
        chat.update(crate::state::chat::ChatState::begin_connect);

        match connect_and_run(debate_id, auth, chat, &handle, &rx).await {
            Ok(()) => leptos::logging::log!("chat room {debate_id} disconnected cleanly"),
            Err(e) => leptos::logging::warn!("chat room {debate_id} error: {e}"),
        }

        chat.update(crate::state::chat::ChatState::mark_disconnected);

        if handle.closed.get() {
            break;
        }
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
            RECONNECT_DELAY_MS,
        )))
        .await;
    }
}

#[cfg(feature = "hydrate")]
async fn connect_and_run(
    debate_id: i64,
    auth: RwSignal<AuthState>,
    chat: RwSignal<ChatState>,
    handle: &ChatHandle,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let proto = web_sys::window()
        .and_then(|w| w.location().protocol().ok())
        .unwrap_or_default();
    let ws_proto = if proto == "https:" { "wss" } else { "ws" };
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let url = format!("{ws_proto}://{host}/ws");

    let ws = WebSocket::open(&url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    // Subscribe to the room topic before anything else goes out.
    {
        use futures::SinkExt;
        let subscribe = (ChatFrame::Subscribe { topic: topic(debate_id) })
            .to_json()
            .ok_or("encode subscribe")?;
        ws_write
            .send(Message::Text(subscribe))
            .await
            .map_err(|e| e.to_string())?;
    }

    chat.update(crate::state::chat::ChatState::mark_connected);

    // Announce the user before any authored messages on this connection.
    if let Some(user) = auth.get_untracked().user {
        handle.publish(join_event(debate_id, user.id, &user.nickname));
    }

    // Forward outgoing frames from the handle's channel to the socket.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(json) = rx_borrow.next().await {
            if ws_write.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    };

    // Append inbound broadcasts to the room log.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Some(message) = ChatFrame::inbound_message(&text, debate_id) {
                        chat.update(|c| c.push(message));
                    }
                }
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("chat recv error: {e}");
                    break;
                }
            }
        }
    };

    // Keep-alives ride the same outbound channel.
    let heartbeat_task = async {
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
                HEARTBEAT_INTERVAL_MS,
            )))
            .await;
            let Some(json) = ChatFrame::Heartbeat.to_json() else {
                break;
            };
            if handle.tx.unbounded_send(json).is_err() {
                break;
            }
        }
    };

    // When any task finishes, the connection is done.
    futures::future::select(
        Box::pin(futures::future::select(Box::pin(send_task), Box::pin(recv_task))),
        Box::pin(heartbeat_task),
    )
    .await;

    Ok(())
}
