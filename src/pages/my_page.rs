//! My page: the signed-in user's activity, inbox, and settings.

use leptos::prelude::*;

use crate::components::debate_card::DebateCard;
use crate::components::require_auth::RequireAuth;
use crate::components::user_avatar::UserAvatar;
use crate::net::types::{Comment, Debate, DirectMessage, Opinion, OpinionSide};
use crate::state::auth::AuthState;
use crate::store;

#[cfg(feature = "hydrate")]
use crate::state::optimistic::Tentative;

#[derive(Clone, Copy, PartialEq, Eq)]
enum MyTab {
    Debates,
    Comments,
    Opinions,
    Likes,
    Messages,
    Settings,
}

impl MyTab {
    fn label(self) -> &'static str {
        match self {
            Self::Debates => "My debates",
            Self::Comments => "My comments",
            Self::Opinions => "My votes",
            Self::Likes => "Liked",
            Self::Messages => "Messages",
            Self::Settings => "Settings",
        }
    }
}

/// Account hub behind the auth gate.
#[component]
pub fn MyPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <MyPageInner/>
        </RequireAuth>
    }
}

#[component]
fn MyPageInner() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let tab = RwSignal::new(MyTab::Debates);
    let my_debates = RwSignal::new(Vec::<Debate>::new());
    let my_comments = RwSignal::new(Vec::<Comment>::new());
    let my_opinions = RwSignal::new(Vec::<Opinion>::new());
    let liked_debates = RwSignal::new(Vec::<Debate>::new());
    let received = RwSignal::new(Vec::<DirectMessage>::new());
    let sent = RwSignal::new(Vec::<DirectMessage>::new());
    let alert = RwSignal::new(None::<String>);

    // Fetch the active tab's data on demand.
    Effect::new(move || {
        let active = tab.get();
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let outcome: Result<(), crate::net::api::ApiError> = async {
                    match active {
                        MyTab::Debates => {
                            my_debates.set(crate::net::api::fetch_my_debates(0, 20).await?.content);
                        }
                        MyTab::Comments => {
                            my_comments
                                .set(crate::net::api::fetch_my_comments(0, 20).await?.content);
                        }
                        MyTab::Opinions => {
                            my_opinions.set(crate::net::api::fetch_my_opinions().await?);
                        }
                        MyTab::Likes => {
                            liked_debates
                                .set(crate::net::api::fetch_my_liked_debates(0, 20).await?.content);
                        }
                        MyTab::Messages => {
                            received
                                .set(crate::net::api::fetch_received_messages(0, 10).await?.content);
                            sent.set(crate::net::api::fetch_sent_messages(0, 10).await?.content);
                        }
                        MyTab::Settings => {}
                    }
                    Ok(())
                }
                .await;
                if let Err(e) = outcome {
                    alert.set(Some(e.user_message()));
                    if e.is_auth() {
                        crate::state::auth::force_login_redirect();
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = active;
        }
    });

    let debate_grid = move |debates: Vec<Debate>, empty: &'static str| {
        if debates.is_empty() {
            return view! { <p class="list-empty">{empty}</p> }.into_any();
        }
        view! {
            <div class="debate-list-grid">
                {debates.into_iter().map(|d| view! { <DebateCard debate=d/> }).collect::<Vec<_>>()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="my-page">
            <header class="my-page__header">
                {move || {
                    auth.get()
                        .user
                        .map(|user| {
                            view! {
                                <div class="my-page__identity">
                                    <UserAvatar src=user.profile_image.clone() nickname=user.nickname.clone()/>
                                    <div>
                                        <h1>{user.nickname.clone()}</h1>
                                        {user.bio.clone().map(|bio| view! { <p class="my-page__bio">{bio}</p> })}
                                        <p class="my-page__counts">
                                            {user.debate_count} " debates · " {user.comment_count}
                                            " comments · " {user.opinion_count} " votes"
                                        </p>
                                    </div>
                                </div>
                            }
                        })
                }}
            </header>

            {move || {
                alert.get().map(|msg| view! { <div class="alert alert--error">{msg}</div> })
            }}

            <div class="my-page__tabs">
                {[
                    MyTab::Debates,
                    MyTab::Comments,
                    MyTab::Opinions,
                    MyTab::Likes,
                    MyTab::Messages,
                    MyTab::Settings,
                ]
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class="sort-tab"
                                class:active=move || tab.get() == t
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>

            {move || match tab.get() {
                MyTab::Debates => debate_grid(my_debates.get(), "You have not started any debates."),
                MyTab::Likes => debate_grid(liked_debates.get(), "No liked debates yet."),
                MyTab::Comments => {
                    let comments = my_comments.get();
                    if comments.is_empty() {
                        view! { <p class="list-empty">"No comments yet."</p> }.into_any()
                    } else {
                        view! {
                            <ul class="my-comment-list">
                                {comments
                                    .into_iter()
                                    .map(|c| {
                                        let href = format!("/debate/{}", c.debate_id);
                                        view! {
                                            <li class="my-comment-item">
                                                <a href=href>{c.content.clone()}</a>
                                                {c.created_at.clone().map(|t| view! { <span class="my-comment-date">{t}</span> })}
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                        .into_any()
                    }
                }
                MyTab::Opinions => {
                    let opinions = my_opinions.get();
                    if opinions.is_empty() {
                        view! { <p class="list-empty">"You have not voted yet."</p> }.into_any()
                    } else {
                        view! {
                            <ul class="my-opinion-list">
                                {opinions
                                    .into_iter()
                                    .map(|o| {
                                        let href = format!("/debate/{}", o.debate_id);
                                        let side = match o.side {
                                            OpinionSide::For => "FOR",
                                            OpinionSide::Against => "AGAINST",
                                        };
                                        view! {
                                            <li class="my-opinion-item">
                                                <span class="my-opinion-side">{side}</span>
                                                <a href=href>{o.content.clone().unwrap_or_else(|| "(no comment)".to_owned())}</a>
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                        .into_any()
                    }
                }
                MyTab::Messages => view! {
                    <MessagesTab received=received sent=sent alert=alert/>
                }
                    .into_any(),
                MyTab::Settings => view! { <SettingsTab alert=alert/> }.into_any(),
            }}
        </div>
    }
}

/// Inbox and sent box with read/delete actions.
#[component]
fn MessagesTab(
    received: RwSignal<Vec<DirectMessage>>,
    sent: RwSignal<Vec<DirectMessage>>,
    alert: RwSignal<Option<String>>,
) -> impl IntoView {
    let unread_count = RwSignal::new(0u32);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_unread_message_count().await {
            Ok(count) => unread_count.set(count),
            Err(e) => leptos::logging::warn!("unread count fetch failed: {e}"),
        }
    });

    let read_message = move |id: i64| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::read_message(id).await {
                Ok(full) => {
                    received.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|m| m.id == id) {
                            if !slot.is_read {
                                unread_count.update(|c| *c = c.saturating_sub(1));
                            }
                            *slot = full;
                        }
                    });
                }
                Err(e) => alert.set(Some(e.user_message())),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    };

    let delete_message = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let guard = Tentative::capture(&received.get_untracked());
            received.update(|list| list.retain(|m| m.id != id));
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::delete_message(id).await {
                    received.set(guard.revert());
                    alert.set(Some(e.user_message()));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    };

    let message_list = move |messages: Vec<DirectMessage>, inbox: bool| {
        if messages.is_empty() {
            return view! { <p class="list-empty">"No messages."</p> }.into_any();
        }
        messages
            .into_iter()
            .map(|m| {
                let id = m.id;
                let who = if inbox {
                    m.sender_nickname.clone().unwrap_or_else(|| "unknown".to_owned())
                } else {
                    m.receiver_nickname.clone().unwrap_or_else(|| "unknown".to_owned())
                };
                let unread = inbox && !m.is_read;
                view! {
                    <li class="message-item" class:unread=unread>
                        <span class="message-item__who">{who}</span>
                        <span class="message-item__content">{m.content.clone()}</span>
                        {inbox
                            .then(|| {
                                view! {
                                    <button class="comment-action" on:click=move |_| read_message(id)>
                                        "Read"
                                    </button>
                                    <button
                                        class="comment-action comment-action--danger"
                                        on:click=move |_| delete_message(id)
                                    >
                                        "Delete"
                                    </button>
                                }
                            })}
                    </li>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="messages-tab">
            <section>
                <h2 class="section-title">
                    "Inbox"
                    {move || {
                        let count = unread_count.get();
                        (count > 0).then(|| format!(" ({count} unread)"))
                    }}
                </h2>
                <ul class="message-list">{move || message_list(received.get(), true)}</ul>
            </section>
            <section>
                <h2 class="section-title">"Sent"</h2>
                <ul class="message-list">{move || message_list(sent.get(), false)}</ul>
            </section>
        </div>
    }
}

/// Profile edit plus the client-side block list.
#[component]
fn SettingsTab(alert: RwSignal<Option<String>>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let current = auth.get_untracked().user.unwrap_or_default();
    let nickname = RwSignal::new(current.nickname.clone());
    let bio = RwSignal::new(current.bio.clone().unwrap_or_default());
    let image_url = RwSignal::new(current.profile_image.clone().unwrap_or_default());
    let saving = RwSignal::new(false);
    let blocked = RwSignal::new(store::blocked_users());

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let nickname_value = nickname.get_untracked().trim().to_owned();
        if nickname_value.is_empty() {
            alert.set(Some("Nickname cannot be empty.".to_owned()));
            return;
        }
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let bio_value = bio.get_untracked();
            let image_value = image_url.get_untracked();
            leptos::task::spawn_local(async move {
                let image = (!image_value.is_empty()).then_some(image_value);
                match crate::net::api::update_profile(
                    Some(&nickname_value),
                    Some(&bio_value),
                    image.as_deref(),
                )
                .await
                {
                    Ok(user) => auth.update(|a| a.update_user(user)),
                    Err(e) => alert.set(Some(e.user_message())),
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = nickname_value;
        }
    };

    let on_file_picked = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::net::api::upload_profile_image(&file).await {
                    Ok(url) => image_url.set(url),
                    Err(e) => alert.set(Some(e.user_message())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let unblock = move |user_id: i64| {
        blocked.update(|list| list.unblock(user_id));
        store::set_blocked_users(&blocked.get_untracked());
    };

    view! {
        <div class="settings-tab">
            <form class="settings-form" on:submit=on_save>
                <h2 class="section-title">"Profile"</h2>
                <label class="auth-form__label">
                    "Nickname"
                    <input
                        type="text"
                        class="auth-form__input"
                        prop:value=move || nickname.get()
                        on:input=move |ev| nickname.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Bio"
                    <textarea
                        class="auth-form__input"
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Profile image"
                    <input type="file" accept="image/*" on:change=on_file_picked/>
                </label>
                <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save profile" }}
                </button>
            </form>

            <section class="block-list">
                <h2 class="section-title">"Blocked users"</h2>
                {move || {
                    let list = blocked.get();
                    if list.0.is_empty() {
                        return view! { <p class="list-empty">"Nobody is blocked."</p> }.into_any();
                    }
                    view! {
                        <ul>
                            {list
                                .0
                                .into_iter()
                                .map(|u| {
                                    let id = u.id;
                                    view! {
                                        <li class="block-list__item">
                                            <span>{u.nickname.clone()}</span>
                                            <button class="comment-action" on:click=move |_| unblock(id)>
                                                "Unblock"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                    .into_any()
                }}
            </section>
        </div>
    }
}
