//! Comment section for the debate detail page.
//!
//! Create, edit, delete, and like are all local-first: the tree (and the
//! debate's comment counter) change immediately, the REST call runs in
//! the background, and a failure puts the captured pre-mutation state
//! back. A successful create triggers the authoritative reload that
//! swaps the fabricated id for the server-assigned one.

use leptos::prelude::*;

use crate::components::user_avatar::UserAvatar;
use crate::net::types::Comment;
use crate::state::auth::AuthState;
use crate::state::comments::CommentSort;
use crate::state::debate::DebateState;

#[cfg(feature = "hydrate")]
use crate::state::optimistic::Tentative;

/// Comment list with sort tabs, a create form, and per-comment actions.
#[component]
pub fn CommentThread(state: RwSignal<DebateState>, on_reload: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let draft = RwSignal::new(String::new());
    let reply_target = RwSignal::new(None::<i64>);
    let reply_draft = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<i64>);
    let edit_draft = RwSignal::new(String::new());

    let set_sort = move |sort: CommentSort| {
        if state.get_untracked().comment_sort == sort {
            return;
        }
        state.update(|s| {
            s.comment_sort = sort;
            s.comment_page = 0;
        });
        on_reload.run(());
    };

    let submit_comment = move |parent_id: Option<i64>, content: String| {
        let content = content.trim().to_owned();
        if content.is_empty() {
            return;
        }
        let Some(user) = auth.get_untracked().user else {
            state.update(|s| s.error = Some("Please log in to comment.".to_owned()));
            return;
        };

        let temp_id =
            state.try_update(|s| s.optimistic_create(&content, parent_id, &user)).flatten();

        #[cfg(feature = "hydrate")]
        {
            let debate_id = state.get_untracked().debate.as_ref().map_or(0, |d| d.id);
            leptos::task::spawn_local(async move {
                match crate::net::api::create_comment(debate_id, &content, parent_id).await {
                    Ok(_) => on_reload.run(()),
                    Err(e) => {
                        state.update(|s| {
                            if let Some(temp_id) = temp_id {
                                s.rollback_create(temp_id);
                            }
                            s.error = Some(e.user_message());
                        });
                        if e.is_auth() {
                            crate::state::auth::force_login_redirect();
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = temp_id;
        }
    };

    let on_submit_root = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let content = draft.get_untracked();
        draft.set(String::new());
        submit_comment(None, content);
    };

    let on_submit_reply = move |root_id: i64| {
        let content = reply_draft.get_untracked();
        reply_draft.set(String::new());
        reply_target.set(None);
        submit_comment(Some(root_id), content);
    };

    let save_edit = move |id: i64| {
        let content = edit_draft.get_untracked().trim().to_owned();
        editing.set(None);
        if content.is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let guard = Tentative::capture(&state.get_untracked().comments);
            let changed = state.try_update(|s| s.comments.edit(id, &content)).unwrap_or(false);
            if !changed {
                return;
            }
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::update_comment(id, &content).await {
                    state.update(|s| {
                        s.comments = guard.revert();
                        s.error = Some(e.user_message());
                    });
                    if e.is_auth() {
                        crate::state::auth::force_login_redirect();
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, content);
        }
    };

    let delete_comment = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let before = state.get_untracked();
            let guard = Tentative::capture(&(
                before.comments,
                before.debate.as_ref().map_or(0, |d| d.comment_count),
            ));
            let removed = state.try_update(|s| s.optimistic_delete(id)).unwrap_or(false);
            if !removed {
                return;
            }
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::delete_comment(id).await {
                    state.update(|s| {
                        let (comments, count) = guard.revert();
                        s.comments = comments;
                        if let Some(debate) = s.debate.as_mut() {
                            debate.comment_count = count;
                        }
                        s.error = Some(e.user_message());
                    });
                    if e.is_auth() {
                        crate::state::auth::force_login_redirect();
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    };

    let like_comment = move |id: i64| {
        if !auth.get_untracked().is_authenticated() {
            state.update(|s| s.error = Some("Please log in to like comments.".to_owned()));
            return;
        }
        let toggled = state.try_update(|s| s.comments.toggle_like(id)).unwrap_or(false);
        if !toggled {
            return;
        }

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::toggle_comment_like(id).await {
                // symmetric undo: re-apply the same toggle
                state.update(|s| {
                    s.comments.toggle_like(id);
                    s.error = Some(e.user_message());
                });
                if e.is_auth() {
                    crate::state::auth::force_login_redirect();
                }
            }
        });
    };

    let comment_row = move |comment: Comment, is_reply: bool| {
        let id = comment.id;
        let own = auth
            .get_untracked()
            .user
            .is_some_and(|u| comment.user_id == Some(u.id));
        let row_class = if is_reply { "comment-row comment-row--reply" } else { "comment-row" };
        let body: AnyView = if comment.is_deleted {
            view! { <p class="comment-text comment-text--deleted">"This comment was deleted."</p> }
                .into_any()
        } else if comment.is_hidden {
            view! { <p class="comment-text comment-text--hidden">"This comment is hidden."</p> }
                .into_any()
        } else if editing.get() == Some(id) {
            view! {
                <div class="comment-edit">
                    <textarea
                        class="comment-edit__input"
                        prop:value=move || edit_draft.get()
                        on:input=move |ev| edit_draft.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" on:click=move |_| save_edit(id)>
                        "Save"
                    </button>
                    <button class="btn" on:click=move |_| editing.set(None)>
                        "Cancel"
                    </button>
                </div>
            }
            .into_any()
        } else {
            view! { <p class="comment-text">{comment.content.clone()}</p> }.into_any()
        };

        let edit_content = comment.content.clone();
        let like_label = format!(
            "{} {}",
            if comment.liked { "\u{2764}" } else { "\u{1f90d}" },
            comment.like_count
        );

        view! {
            <div class=row_class>
                <UserAvatar
                    src=comment.profile_image.clone()
                    nickname=comment.nickname.clone().unwrap_or_else(|| "?".to_owned())
                    size="small"
                />
                <div class="comment-main">
                    <div class="comment-meta">
                        <span class="comment-author">
                            {comment.nickname.clone().unwrap_or_else(|| "unknown".to_owned())}
                        </span>
                        {comment.created_at.clone().map(|t| view! { <span class="comment-date">{t}</span> })}
                    </div>
                    {body}
                    <div class="comment-actions">
                        <button class="comment-like" on:click=move |_| like_comment(id)>
                            {like_label}
                        </button>
                        {(!is_reply)
                            .then(|| {
                                view! {
                                    <button
                                        class="comment-action"
                                        on:click=move |_| {
                                            reply_target.set(Some(id));
                                            reply_draft.set(String::new());
                                        }
                                    >
                                        "Reply"
                                    </button>
                                }
                            })}
                        {own.then(|| {
                            let edit_content = edit_content.clone();
                            view! {
                                <button
                                    class="comment-action"
                                    on:click=move |_| {
                                        edit_draft.set(edit_content.clone());
                                        editing.set(Some(id));
                                    }
                                >
                                    "Edit"
                                </button>
                                <button class="comment-action comment-action--danger" on:click=move |_| delete_comment(id)>
                                    "Delete"
                                </button>
                            }
                        })}
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <section class="comments-section">
            <div class="comments-section__header">
                <h2 class="section-title">
                    "Comments ("
                    {move || state.get().debate.as_ref().map_or(0, |d| d.comment_count)}
                    ")"
                </h2>
                <div class="sort-tabs">
                    {[CommentSort::Latest, CommentSort::Oldest, CommentSort::Replies]
                        .into_iter()
                        .map(|sort| {
                            view! {
                                <button
                                    class="sort-tab"
                                    class:active=move || state.get().comment_sort == sort
                                    on:click=move |_| set_sort(sort)
                                >
                                    {sort.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>

            {move || {
                state
                    .get()
                    .error
                    .map(|message| view! { <div class="alert alert--error">{message}</div> })
            }}

            <form class="comment-form" on:submit=on_submit_root>
                <textarea
                    class="comment-form__input"
                    placeholder=move || {
                        if auth.get().is_authenticated() {
                            "Keep it civil and add your comment."
                        } else {
                            "Log in to join the discussion."
                        }
                    }
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    disabled=move || !auth.get().is_authenticated()
                />
                <button
                    type="submit"
                    class="btn btn--primary"
                    disabled=move || !auth.get().is_authenticated() || draft.get().trim().is_empty()
                >
                    "Post"
                </button>
            </form>

            <div class="comments-list">
                {move || {
                    let snapshot = state.get();
                    if snapshot.comments.is_empty() {
                        return view! { <p class="no-comments">"Be the first to comment."</p> }
                            .into_any();
                    }
                    snapshot
                        .comments
                        .to_comments()
                        .into_iter()
                        .map(|root| {
                            let root_id = root.id;
                            let replies = root.replies.clone();
                            view! {
                                <div class="comment-block">
                                    {comment_row(root, false)}
                                    {(!replies.is_empty())
                                        .then(|| {
                                            view! {
                                                <div class="comment-replies">
                                                    {replies
                                                        .into_iter()
                                                        .map(|reply| comment_row(reply, true))
                                                        .collect::<Vec<_>>()}
                                                </div>
                                            }
                                        })}
                                    <Show when=move || reply_target.get() == Some(root_id)>
                                        <div class="reply-form">
                                            <textarea
                                                class="reply-form__input"
                                                placeholder="Write a reply..."
                                                prop:value=move || reply_draft.get()
                                                on:input=move |ev| reply_draft.set(event_target_value(&ev))
                                            />
                                            <button class="btn btn--primary" on:click=move |_| on_submit_reply(root_id)>
                                                "Reply"
                                            </button>
                                            <button class="btn" on:click=move |_| reply_target.set(None)>
                                                "Cancel"
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </section>
    }
}
