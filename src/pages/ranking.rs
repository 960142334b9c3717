//! User ranking page: podium for the top three, a list for the rest.

use leptos::prelude::*;

use crate::components::user_avatar::UserAvatar;
use crate::net::types::RankedUser;

const PERIODS: [(&str, &str); 4] =
    [("all", "All time"), ("daily", "Today"), ("monthly", "This month"), ("yearly", "This year")];
const CRITERIA: [(&str, &str); 3] =
    [("likes", "Likes received"), ("votes", "Votes cast"), ("comments", "Comments")];

/// Leaderboard with period and criteria selectors.
#[component]
pub fn RankingPage() -> impl IntoView {
    let period = RwSignal::new("all");
    let criteria = RwSignal::new("likes");
    let users = RwSignal::new(Vec::<RankedUser>::new());
    let loading = RwSignal::new(true);

    Effect::new(move || {
        let period_value = period.get();
        let criteria_value = criteria.get();
        loading.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_ranking(10, period_value, criteria_value).await {
                Ok(list) => users.set(list),
                Err(e) => leptos::logging::warn!("ranking fetch failed: {e}"),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (period_value, criteria_value);
        }
    });

    let rank_row = move |index: usize, user: RankedUser| {
        let href = format!("/users/{}", user.id);
        view! {
            <li class="ranking-row">
                <span class="ranking-row__rank">{index + 1}</span>
                <UserAvatar src=user.profile_image.clone() nickname=user.nickname.clone() size="small"/>
                <a class="ranking-row__name" href=href>
                    {user.nickname.clone()}
                </a>
                <span class="ranking-row__score">{user.score}</span>
            </li>
        }
    };

    view! {
        <div class="ranking-page">
            <h1>"Ranking"</h1>

            <div class="ranking-controls">
                <div class="sort-tabs">
                    {PERIODS
                        .into_iter()
                        .map(|(value, label)| {
                            view! {
                                <button
                                    class="sort-tab"
                                    class:active=move || period.get() == value
                                    on:click=move |_| period.set(value)
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
                <div class="sort-tabs">
                    {CRITERIA
                        .into_iter()
                        .map(|(value, label)| {
                            view! {
                                <button
                                    class="sort-tab"
                                    class:active=move || criteria.get() == value
                                    on:click=move |_| criteria.set(value)
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>

            {move || {
                if loading.get() {
                    return view! { <div class="page-loading">"Loading ranking..."</div> }.into_any();
                }
                let list = users.get();
                if list.is_empty() {
                    return view! { <p class="list-empty">"No ranked users yet."</p> }.into_any();
                }

                let podium: Vec<RankedUser> = list.iter().take(3).cloned().collect();
                let rest: Vec<RankedUser> = list.iter().skip(3).cloned().collect();

                view! {
                    <div class="ranking-results">
                    <div class="ranking-podium">
                        {podium
                            .into_iter()
                            .enumerate()
                            .map(|(i, user)| {
                                let href = format!("/users/{}", user.id);
                                let class = format!("podium-spot podium-spot--{}", i + 1);
                                view! {
                                    <a class=class href=href>
                                        <UserAvatar src=user.profile_image.clone() nickname=user.nickname.clone()/>
                                        <span class="podium-spot__name">{user.nickname.clone()}</span>
                                        <span class="podium-spot__score">{user.score}</span>
                                    </a>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                    <ol class="ranking-list">
                        {rest
                            .into_iter()
                            .enumerate()
                            .map(|(i, user)| rank_row(i + 3, user))
                            .collect::<Vec<_>>()}
                    </ol>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
