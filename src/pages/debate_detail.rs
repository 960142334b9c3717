//! Debate detail page: content, voting, comments, and live chat.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::chat_widget::ChatWidget;
use crate::components::comment_thread::CommentThread;
use crate::components::user_avatar::UserAvatar;
use crate::net::types::{DebateStatus, OpinionSide};
use crate::state::auth::AuthState;
use crate::state::debate::{DebateState, VoteTally};

/// Detail view for one debate.
///
/// The full fetch (debate + comments + opinions + liked flag) runs on
/// mount and again whenever an optimistic comment create is confirmed;
/// the refetch is authoritative and replaces any optimistic state.
#[component]
pub fn DebateDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let navigate = use_navigate();

    let state = RwSignal::new(DebateState { loading: true, ..DebateState::default() });
    let opinion_draft = RwSignal::new(String::new());
    let menu_open = RwSignal::new(false);
    let edit_open = RwSignal::new(false);
    let edit_title = RwSignal::new(String::new());
    let edit_content = RwSignal::new(String::new());

    let debate_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    };

    let reload_comments = move || {
        #[cfg(feature = "hydrate")]
        {
            let Some(id) = debate_id() else { return };
            let snapshot = state.get_untracked();
            let sort = snapshot.comment_sort.as_param();
            let page = snapshot.comment_page;
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_comments(id, page, 20, sort).await {
                    Ok(fetched) => state.update(|s| {
                        s.load_comments(fetched.content, fetched.total_pages);
                    }),
                    Err(e) => leptos::logging::warn!("comment fetch failed: {e}"),
                }
            });
        }
    };

    let load_all = move || {
        #[cfg(feature = "hydrate")]
        {
            let Some(id) = debate_id() else { return };
            state.update(|s| {
                s.loading = true;
                s.error = None;
            });
            let authed = auth.get_untracked().is_authenticated();
            leptos::task::spawn_local(async move {
                let debate = crate::net::api::fetch_debate(id).await;
                match debate {
                    Ok(debate) => state.update(|s| s.debate = Some(debate)),
                    Err(e) => {
                        state.update(|s| {
                            s.loading = false;
                            s.error = Some(e.user_message());
                        });
                        return;
                    }
                }

                let snapshot = state.get_untracked();
                match crate::net::api::fetch_comments(id, 0, 20, snapshot.comment_sort.as_param())
                    .await
                {
                    Ok(fetched) => state.update(|s| {
                        s.load_comments(fetched.content, fetched.total_pages);
                    }),
                    Err(e) => leptos::logging::warn!("comment fetch failed: {e}"),
                }

                match crate::net::api::fetch_opinions(id).await {
                    Ok(opinions) => state.update(|s| s.opinions = opinions),
                    Err(e) => leptos::logging::warn!("opinion fetch failed: {e}"),
                }

                if authed {
                    match crate::net::api::is_debate_liked(id).await {
                        Ok(liked) => state.update(|s| s.liked = liked),
                        Err(e) => leptos::logging::warn!("liked check failed: {e}"),
                    }
                }

                state.update(|s| s.loading = false);
            });
        }
    };

    Effect::new(move || {
        let _ = debate_id();
        load_all();
    });

    let on_like = move |_| {
        if !auth.get_untracked().is_authenticated() {
            state.update(|s| s.error = Some("Please log in to like debates.".to_owned()));
            return;
        }
        let Some(id) = debate_id() else { return };
        state.update(DebateState::toggle_debate_like);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::toggle_debate_like(id).await {
                // symmetric undo
                state.update(|s| {
                    s.toggle_debate_like();
                    s.error = Some(e.user_message());
                });
                if e.is_auth() {
                    crate::state::auth::force_login_redirect();
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    };

    let on_vote = move |side: OpinionSide| {
        if !auth.get_untracked().is_authenticated() {
            state.update(|s| s.error = Some("Please log in to vote.".to_owned()));
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(id) = debate_id() else { return };
            let content = opinion_draft.get_untracked().trim().to_owned();
            let content = (!content.is_empty()).then_some(content);
            leptos::task::spawn_local(async move {
                match crate::net::api::create_opinion(id, side, content.as_deref()).await {
                    Ok(_) => {
                        opinion_draft.set(String::new());
                        match crate::net::api::fetch_opinions(id).await {
                            Ok(opinions) => state.update(|s| s.opinions = opinions),
                            Err(e) => leptos::logging::warn!("opinion fetch failed: {e}"),
                        }
                    }
                    Err(e) => {
                        state.update(|s| s.error = Some(e.user_message()));
                        if e.is_auth() {
                            crate::state::auth::force_login_redirect();
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = side;
        }
    };

    let on_delete = {
        let navigate = navigate.clone();
        move |_| {
            #[cfg(feature = "hydrate")]
            {
                let Some(id) = debate_id() else { return };
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    match crate::net::api::delete_debate(id).await {
                        Ok(()) => navigate("/debate", NavigateOptions::default()),
                        Err(e) => state.update(|s| s.error = Some(e.user_message())),
                    }
                });
            }
        }
    };

    let open_edit = move |_| {
        menu_open.set(false);
        let Some(debate) = state.get_untracked().debate else { return };
        edit_title.set(debate.title);
        edit_content.set(debate.content);
        edit_open.set(true);
    };

    let save_edit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let title = edit_title.get_untracked().trim().to_owned();
        let content = edit_content.get_untracked().trim().to_owned();
        if title.is_empty() || content.is_empty() {
            state.update(|s| s.error = Some("Title and topic cannot be empty.".to_owned()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let Some(id) = debate_id() else { return };
            leptos::task::spawn_local(async move {
                let body = serde_json::json!({ "title": title, "content": content });
                match crate::net::api::update_debate(id, &body).await {
                    Ok(updated) => state.update(|s| {
                        s.debate = Some(updated);
                        s.error = None;
                    }),
                    Err(e) => state.update(|s| s.error = Some(e.user_message())),
                }
                edit_open.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (title, content);
        }
    };

    let vote_box = move |side: OpinionSide| {
        let (title, class) = match side {
            OpinionSide::For => ("FOR", "vote-box vote-box--for"),
            OpinionSide::Against => ("AGAINST", "vote-box vote-box--against"),
        };
        view! {
            <div class=class>
                <h3>{title}</h3>
                {move || {
                    let snapshot = state.get();
                    let tally = VoteTally::from_opinions(&snapshot.opinions);
                    let (percent, count) = match side {
                        OpinionSide::For => (tally.for_percent(), tally.for_count),
                        OpinionSide::Against => (tally.against_percent(), tally.against_count),
                    };
                    let can_vote = snapshot
                        .debate
                        .as_ref()
                        .is_some_and(|d| d.status == DebateStatus::Active);
                    view! {
                        <div class="vote-box__bar-track">
                            <div class="vote-box__bar" style:height=format!("{percent}%")></div>
                            <span class="vote-box__percent">{percent} "%"</span>
                        </div>
                        <p class="vote-box__count">{count} " votes"</p>
                        {can_vote
                            .then(|| {
                                view! {
                                    <button class="btn btn--vote" on:click=move |_| on_vote(side)>
                                        {match side {
                                            OpinionSide::For => "Vote FOR",
                                            OpinionSide::Against => "Vote AGAINST",
                                        }}
                                    </button>
                                }
                            })}
                    }
                }}
            </div>
        }
    };

    let reload_cb = Callback::new(move |()| reload_comments());

    view! {
        <div class="debate-detail-page">
            {move || {
                let snapshot = state.get();
                if snapshot.loading {
                    return view! { <div class="page-loading">"Loading debate..."</div> }.into_any();
                }
                let Some(debate) = snapshot.debate.clone() else {
                    return view! {
                        <div class="error-panel">
                            <h2>"Debate not found"</h2>
                            <p>{snapshot.error.clone().unwrap_or_default()}</p>
                        </div>
                    }
                        .into_any();
                };

                let is_owner = auth
                    .get_untracked()
                    .user
                    .is_some_and(|u| debate.user_id == Some(u.id));
                let status_class = format!(
                    "badge status-badge status-badge--{}",
                    debate.status.label().to_lowercase()
                );
                let liked_class = if snapshot.liked { "btn-like active" } else { "btn-like" };

                view! {
                    <article class="detail-card">
                        <div class="detail-card__top">
                            <div class="detail-card__badges">
                                {debate
                                    .category_name
                                    .clone()
                                    .map(|name| view! { <span class="badge category-badge">{name}</span> })}
                                <span class=status_class>{debate.status.label()}</span>
                            </div>
                            {is_owner
                                .then(|| {
                                    view! {
                                        <div class="more-menu">
                                            <button class="icon-btn" on:click=move |_| menu_open.update(|open| *open = !*open)>
                                                "\u{22ee}"
                                            </button>
                                            <Show when=move || menu_open.get()>
                                                <div class="dropdown-menu">
                                                    <button class="dropdown-item" on:click=open_edit>
                                                        "Edit debate"
                                                    </button>
                                                    <button class="dropdown-item dropdown-item--danger" on:click=on_delete.clone()>
                                                        "Delete debate"
                                                    </button>
                                                </div>
                                            </Show>
                                        </div>
                                    }
                                })}
                        </div>

                        <h1 class="detail-card__title">{debate.title.clone()}</h1>

                        <div class="detail-card__meta">
                            <div class="detail-card__author">
                                <UserAvatar
                                    src=None
                                    nickname=debate.nickname.clone().unwrap_or_else(|| "?".to_owned())
                                    size="small"
                                />
                                <span>{debate.nickname.clone().unwrap_or_else(|| "unknown".to_owned())}</span>
                                {debate.created_at.clone().map(|t| view! { <span class="detail-card__date">{t}</span> })}
                            </div>
                            <div class="detail-card__stats">
                                <span>"views " {debate.view_count}</span>
                                <span>"comments " {debate.comment_count}</span>
                                <span>"likes " {debate.like_count}</span>
                            </div>
                        </div>

                        <div class="detail-card__content" inner_html=debate.content.clone()></div>

                        <div class="detail-card__footer">
                            <button class=liked_class on:click=on_like>
                                "\u{1f44d} Like"
                            </button>
                        </div>
                    </article>
                }
                    .into_any()
            }}

            {move || {
                let snapshot = state.get();
                snapshot
                    .debate
                    .as_ref()
                    .filter(|d| d.status == DebateStatus::Active)
                    .map(|_| {
                        view! {
                            <section class="vote-section">
                                <h2 class="section-title">"Where do you stand?"</h2>
                                <textarea
                                    class="vote-section__input"
                                    placeholder="Add a short reason (optional)..."
                                    prop:value=move || opinion_draft.get()
                                    on:input=move |ev| opinion_draft.set(event_target_value(&ev))
                                />
                                <div class="vote-section__boxes">
                                    {vote_box(OpinionSide::For)}
                                    <div class="vote-section__vs">"VS"</div>
                                    {vote_box(OpinionSide::Against)}
                                </div>
                            </section>
                        }
                    })
            }}

            <Show when=move || state.get().debate.is_some()>
                <CommentThread state=state on_reload=reload_cb/>
            </Show>

            <Show when=move || edit_open.get()>
                <div class="dialog-backdrop" on:click=move |_| edit_open.set(false)>
                    <form
                        class="dialog"
                        on:click=move |ev| ev.stop_propagation()
                        on:submit=save_edit
                    >
                        <h2>"Edit debate"</h2>
                        <label class="dialog__label">
                            "Title"
                            <input
                                class="dialog__input"
                                type="text"
                                prop:value=move || edit_title.get()
                                on:input=move |ev| edit_title.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="dialog__label">
                            "Topic"
                            <textarea
                                class="dialog__input"
                                prop:value=move || edit_content.get()
                                on:input=move |ev| edit_content.set(event_target_value(&ev))
                            />
                        </label>
                        <div class="dialog__actions">
                            <button type="button" class="btn" on:click=move |_| edit_open.set(false)>
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn--primary">
                                "Save"
                            </button>
                        </div>
                    </form>
                </div>
            </Show>

            {move || debate_id().map(|id| view! { <ChatWidget debate_id=id/> })}
        </div>
    }
}
