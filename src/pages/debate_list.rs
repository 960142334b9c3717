//! Debate browsing page: category tabs, search, sort, and paging.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::debate_card::DebateCard;
use crate::state::debates::{DebateSort, DebatesState};

/// Paged debate list with filters.
#[component]
pub fn DebateListPage() -> impl IntoView {
    let state = RwSignal::new(DebatesState::default());
    let search_input = RwSignal::new(String::new());
    let categories = LocalResource::new(|| async {
        crate::net::api::fetch_categories().await.unwrap_or_else(|e| {
            leptos::logging::warn!("category fetch failed: {e}");
            Vec::new()
        })
    });

    let reload = move || {
        state.update(|s| s.loading = true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let snapshot = state.get_untracked();
            let sort = snapshot.sort.as_param();
            let result = if !snapshot.keyword.is_empty() {
                crate::net::api::search_debates(
                    &snapshot.keyword,
                    snapshot.category_id,
                    snapshot.status.as_deref(),
                    Some(sort),
                    snapshot.page,
                    20,
                )
                .await
            } else if let Some(category_id) = snapshot.category_id {
                crate::net::api::fetch_debates_by_category(category_id, snapshot.page, 20, sort)
                    .await
            } else {
                crate::net::api::fetch_debates(snapshot.page, 20, sort, snapshot.status.as_deref())
                    .await
            };

            match result {
                Ok(page) => state.update(|s| s.load_page(page)),
                Err(e) => {
                    leptos::logging::warn!("debate list fetch failed: {e}");
                    state.update(|s| s.loading = false);
                }
            }
        });
    };

    // initial load; subsequent loads run from the handlers below
    Effect::new(move || reload());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        state.update(|s| s.set_keyword(search_input.get_untracked().trim().to_owned()));
        reload();
    };

    let set_sort = move |sort: DebateSort| {
        state.update(|s| s.set_sort(sort));
        reload();
    };

    let set_category = move |category_id: Option<i64>| {
        state.update(|s| s.set_category(category_id));
        reload();
    };

    let set_status = move |status: Option<&'static str>| {
        state.update(|s| s.set_status(status.map(str::to_owned)));
        reload();
    };

    let category_tab = move |id: Option<i64>, name: String| {
        view! {
            <button
                class="category-tab"
                class:active=move || state.get().category_id == id
                on:click=move |_| set_category(id)
            >
                {name}
            </button>
        }
    };

    view! {
        <div class="debate-list-page">
            <div class="debate-list-page__header">
                <h1>"Debates"</h1>
                <A href="/debate/create">
                    <span class="btn btn--primary">"+ New debate"</span>
                </A>
            </div>

            <form class="search-bar" on:submit=on_search>
                <input
                    type="text"
                    class="search-bar__input"
                    placeholder="Search by title or content..."
                    prop:value=move || search_input.get()
                    on:input=move |ev| search_input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn">
                    "Search"
                </button>
            </form>

            <div class="category-tabs">
                {move || category_tab(None, "All".to_owned())}
                <Suspense fallback=|| ()>
                    {move || {
                        categories
                            .get()
                            .map(|list| {
                                list.into_iter()
                                    .map(|c| category_tab(Some(c.id), c.name))
                                    .collect::<Vec<_>>()
                            })
                    }}
                </Suspense>
            </div>

            <div class="list-controls">
                <div class="sort-tabs">
                    {[DebateSort::Latest, DebateSort::Popular, DebateSort::Comments, DebateSort::Views]
                        .into_iter()
                        .map(|sort| {
                            view! {
                                <button
                                    class="sort-tab"
                                    class:active=move || state.get().sort == sort
                                    on:click=move |_| set_sort(sort)
                                >
                                    {sort.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
                <select
                    class="status-filter"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_status(match value.as_str() {
                            "SCHEDULED" => Some("SCHEDULED"),
                            "ACTIVE" => Some("ACTIVE"),
                            "ENDED" => Some("ENDED"),
                            _ => None,
                        });
                    }
                >
                    <option value="">"All statuses"</option>
                    <option value="SCHEDULED">"Scheduled"</option>
                    <option value="ACTIVE">"Active"</option>
                    <option value="ENDED">"Ended"</option>
                </select>
            </div>

            {move || {
                let snapshot = state.get();
                if snapshot.loading {
                    return view! { <div class="page-loading">"Loading debates..."</div> }.into_any();
                }
                if snapshot.items.is_empty() {
                    return view! { <p class="list-empty">"No debates match."</p> }.into_any();
                }
                view! {
                    <div class="debate-list-results">
                        <p class="list-total">{snapshot.total_elements} " debates"</p>
                        <div class="debate-list-grid">
                            {snapshot
                                .items
                                .into_iter()
                                .map(|d| view! { <DebateCard debate=d/> })
                                .collect::<Vec<_>>()}
                        </div>
                    </div>
                }
                .into_any()
            }}

            {move || {
                let snapshot = state.get();
                (snapshot.total_pages > 1)
                    .then(|| {
                        view! {
                            <div class="pagination">
                                <button
                                    class="btn"
                                    disabled=move || state.get().page == 0
                                    on:click=move |_| {
                                        state.update(DebatesState::prev_page);
                                        reload();
                                    }
                                >
                                    "Prev"
                                </button>
                                <span class="pagination__info">
                                    {snapshot.page + 1} " / " {snapshot.total_pages}
                                </span>
                                <button
                                    class="btn"
                                    disabled=move || {
                                        let s = state.get();
                                        s.page + 1 >= s.total_pages
                                    }
                                    on:click=move |_| {
                                        state.update(DebatesState::next_page);
                                        reload();
                                    }
                                >
                                    "Next"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
