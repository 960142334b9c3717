//! Floating real-time chat widget for a debate room.
//!
//! Opening the panel fetches history and brings up the room connection;
//! closing (or unmount) publishes the leave event while still connected,
//! then tears the subscription down. Teardown is idempotent, so closing
//! an already-closed panel is safe. Messages from users on the viewer's
//! block list are skipped at render time; the viewer's own messages are
//! always shown.

use leptos::prelude::*;

use crate::net::types::{ChatKind, ChatMessage};
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::store;

#[cfg(feature = "hydrate")]
use crate::net::chat_client::{ChatHandle, chat_event, leave_event, spawn_chat_client};

/// Floating chat button plus the chat window for one debate.
#[component]
pub fn ChatWidget(debate_id: i64) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());
    let active_menu = RwSignal::new(None::<(i64, String)>);
    let dm_target = RwSignal::new(None::<String>);
    let dm_draft = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    let handle_slot: StoredValue<Option<ChatHandle>, LocalStorage> =
        StoredValue::new_local(None);

    let teardown = move || {
        active_menu.set(None);
        #[cfg(feature = "hydrate")]
        {
            if let Some(handle) = handle_slot.get_value() {
                let leave = auth
                    .get_untracked()
                    .user
                    .filter(|_| chat.get_untracked().is_connected())
                    .map(|user| leave_event(debate_id, user.id, &user.nickname));
                handle.shutdown(leave);
                handle_slot.set_value(None);
            }
        }
        chat.update(|c| {
            c.close_panel();
            c.mark_disconnected();
        });
    };

    let open_panel = move || {
        chat.update(|c| {
            c.reset(debate_id);
            c.open_panel();
            c.loading_history = true;
        });

        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_chat_history(debate_id, 50).await {
                    Ok(messages) => chat.update(|c| c.load_history(messages)),
                    Err(e) => {
                        leptos::logging::warn!("chat history fetch failed: {e}");
                        chat.update(|c| c.load_history(Vec::new()));
                    }
                }
            });
            handle_slot.set_value(Some(spawn_chat_client(debate_id, auth, chat)));
        }
    };

    let on_toggle = move |_| {
        if chat.get_untracked().panel_open {
            teardown();
        } else {
            open_panel();
        }
    };

    on_cleanup(teardown);

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked().trim().to_owned();
        if text.is_empty() || !chat.get_untracked().is_connected() {
            return;
        }
        let Some(_user) = auth.get_untracked().user else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            if let Some(handle) = handle_slot.get_value() {
                if handle.publish(chat_event(debate_id, _user.id, &_user.nickname, &text)) {
                    input.set(String::new());
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = text;
        }
    };

    let send_dm = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(_nickname) = dm_target.get_untracked() else {
            return;
        };
        let content = dm_draft.get_untracked().trim().to_owned();
        if content.is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::send_direct_message(&_nickname, &content).await {
                Ok(()) => {
                    dm_target.set(None);
                    dm_draft.set(String::new());
                }
                Err(e) => leptos::logging::warn!("direct message failed: {e}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = content;
        }
    };

    let block_user = move |user_id: i64, nickname: String| {
        let mut list = store::blocked_users();
        list.block(store::BlockedUser { id: user_id, nickname, blocked_at: None });
        store::set_blocked_users(&list);
        active_menu.set(None);
    };

    let message_row = move |msg: ChatMessage| {
        let mine = auth
            .get_untracked()
            .user
            .is_some_and(|u| msg.user_id == Some(u.id));
        let nickname = msg.nickname.clone().unwrap_or_else(|| "unknown".to_owned());

        if msg.kind != ChatKind::Chat {
            let text = match msg.kind {
                ChatKind::Join => format!("{nickname} joined the room"),
                _ => format!("{nickname} left the room"),
            };
            return view! { <div class="chat-message chat-message--system">{text}</div> }
                .into_any();
        }

        let user_id = msg.user_id;
        let menu_nickname = nickname.clone();
        let row_class = if mine { "chat-message chat-message--mine" } else { "chat-message" };

        view! {
            <div class=row_class>
                {(!mine)
                    .then(|| {
                        let menu_nickname = menu_nickname.clone();
                        view! {
                            <button
                                class="chat-message__nickname"
                                on:click=move |_| {
                                    let Some(user_id) = user_id else { return };
                                    if !auth.get_untracked().is_authenticated() {
                                        return;
                                    }
                                    active_menu.set(Some((user_id, menu_nickname.clone())));
                                }
                            >
                                {nickname.clone()}
                            </button>
                        }
                    })}
                <div class="chat-message__bubble">{msg.message.clone().unwrap_or_default()}</div>
                {msg.created_at.clone().map(|t| view! { <span class="chat-message__time">{t}</span> })}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="chat-widget">
            <Show when=move || dm_target.get().is_some()>
                <div class="dm-popup-overlay" on:click=move |_| dm_target.set(None)>
                    <div class="dm-popup" on:click=move |ev| ev.stop_propagation()>
                        <h3>{move || format!("Message {}", dm_target.get().unwrap_or_default())}</h3>
                        <form on:submit=send_dm>
                            <textarea
                                class="dm-popup__input"
                                maxlength="500"
                                placeholder="Write your message..."
                                prop:value=move || dm_draft.get()
                                on:input=move |ev| dm_draft.set(event_target_value(&ev))
                            />
                            <div class="dm-popup__actions">
                                <button type="button" class="btn" on:click=move |_| dm_target.set(None)>
                                    "Cancel"
                                </button>
                                <button
                                    type="submit"
                                    class="btn btn--primary"
                                    disabled=move || dm_draft.get().trim().is_empty()
                                >
                                    "Send"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>

            <Show when=move || active_menu.get().is_some()>
                <div class="user-action-menu">
                    <button
                        class="user-action-item"
                        on:click=move |_| {
                            if let Some((_, nickname)) = active_menu.get_untracked() {
                                dm_target.set(Some(nickname));
                            }
                            active_menu.set(None);
                        }
                    >
                        "Send message"
                    </button>
                    <button
                        class="user-action-item user-action-item--danger"
                        on:click=move |_| {
                            if let Some((user_id, nickname)) = active_menu.get_untracked() {
                                block_user(user_id, nickname);
                            }
                        }
                    >
                        "Block user"
                    </button>
                </div>
            </Show>

            <Show when=move || chat.get().panel_open>
                <div class="chat-window">
                    <div class="chat-window__header">
                        <span class="chat-window__title">"Live chat"</span>
                        <Show when=move || chat.get().is_connected()>
                            <span class="chat-window__status">"\u{25cf}"</span>
                        </Show>
                        <button class="chat-window__close" on:click=on_toggle>
                            "\u{2715}"
                        </button>
                    </div>

                    <div class="chat-window__messages">
                        {move || {
                            let snapshot = chat.get();
                            if snapshot.loading_history {
                                return view! { <div class="chat-window__loading">"Loading messages..."</div> }
                                    .into_any();
                            }
                            let blocked = store::blocked_users();
                            let me = auth.get_untracked().user.map(|u| u.id);
                            let visible: Vec<ChatMessage> = snapshot
                                .messages
                                .into_iter()
                                .filter(|m| {
                                    m.user_id == me
                                        || !m.user_id.is_some_and(|id| blocked.contains(id))
                                })
                                .collect();
                            if visible.is_empty() {
                                return view! { <div class="chat-window__empty">"Say hello!"</div> }
                                    .into_any();
                            }
                            visible.into_iter().map(message_row).collect::<Vec<_>>().into_any()
                        }}
                    </div>

                    <form class="chat-window__input-row" on:submit=on_send>
                        <Show
                            when=move || auth.get().is_authenticated()
                            fallback=|| view! { <div class="chat-window__login-prompt">"Log in to join the chat"</div> }
                        >
                            <input
                                type="text"
                                class="chat-window__input"
                                maxlength="500"
                                placeholder="Type a message..."
                                prop:value=move || input.get()
                                on:input=move |ev| input.set(event_target_value(&ev))
                                disabled=move || !chat.get().is_connected()
                            />
                            <button
                                type="submit"
                                class="btn btn--primary"
                                disabled=move || !chat.get().is_connected() || input.get().trim().is_empty()
                            >
                                "Send"
                            </button>
                        </Show>
                    </form>
                </div>
            </Show>

            <button class="chat-fab" on:click=on_toggle title="Live chat">
                {move || if chat.get().panel_open { "\u{2715}" } else { "\u{1f4ac}" }}
                {move || {
                    let state = chat.get();
                    (!state.panel_open && state.unread_count > 0)
                        .then(|| {
                            let label = if state.unread_count > 99 {
                                "99+".to_owned()
                            } else {
                                state.unread_count.to_string()
                            };
                            view! { <span class="unread-badge">{label}</span> }
                        })
                }}
            </button>
        </div>
    }
}
