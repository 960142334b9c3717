//! Public profile page for another user.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::debate_card::DebateCard;
use crate::components::user_avatar::UserAvatar;
use crate::net::types::{Comment, Debate, UserProfile};

/// Read-only profile: bio, activity counters, debates, and comments.
#[component]
pub fn UserProfilePage() -> impl IntoView {
    let params = use_params_map();

    let profile = RwSignal::new(None::<UserProfile>);
    let debates = RwSignal::new(Vec::<Debate>::new());
    let comments = RwSignal::new(Vec::<Comment>::new());
    let loading = RwSignal::new(true);

    let user_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    };

    Effect::new(move || {
        let Some(id) = user_id() else { return };
        loading.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_user(id).await {
                Ok(user) => profile.set(Some(user)),
                Err(e) => leptos::logging::warn!("profile fetch failed: {e}"),
            }
            match crate::net::api::fetch_user_debates(id, 0, 10).await {
                Ok(page) => debates.set(page.content),
                Err(e) => leptos::logging::warn!("profile debates fetch failed: {e}"),
            }
            match crate::net::api::fetch_user_comments(id, 0, 10).await {
                Ok(page) => comments.set(page.content),
                Err(e) => leptos::logging::warn!("profile comments fetch failed: {e}"),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    });

    view! {
        <div class="user-profile-page">
            {move || {
                if loading.get() {
                    return view! { <div class="page-loading">"Loading profile..."</div> }.into_any();
                }
                let Some(user) = profile.get() else {
                    return view! {
                        <div class="error-panel">
                            <h2>"User not found"</h2>
                        </div>
                    }
                        .into_any();
                };
                view! {
                    <header class="user-profile__header">
                        <UserAvatar src=user.profile_image.clone() nickname=user.nickname.clone()/>
                        <div>
                            <h1>{user.nickname.clone()}</h1>
                            {user.bio.clone().map(|bio| view! { <p class="user-profile__bio">{bio}</p> })}
                            <p class="user-profile__counts">
                                {user.debate_count} " debates · " {user.comment_count}
                                " comments · " {user.opinion_count} " votes"
                            </p>
                        </div>
                    </header>
                }
                    .into_any()
            }}

            <section class="user-profile__section">
                <h2 class="section-title">"Debates"</h2>
                {move || {
                    let list = debates.get();
                    if list.is_empty() {
                        return view! { <p class="list-empty">"No debates."</p> }.into_any();
                    }
                    view! {
                        <div class="debate-list-grid">
                            {list.into_iter().map(|d| view! { <DebateCard debate=d/> }).collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }}
            </section>

            <section class="user-profile__section">
                <h2 class="section-title">"Comments"</h2>
                {move || {
                    let list = comments.get();
                    if list.is_empty() {
                        return view! { <p class="list-empty">"No comments."</p> }.into_any();
                    }
                    view! {
                        <ul class="my-comment-list">
                            {list
                                .into_iter()
                                .map(|c| {
                                    let href = format!("/debate/{}", c.debate_id);
                                    view! {
                                        <li class="my-comment-item">
                                            <a href=href>{c.content.clone()}</a>
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
