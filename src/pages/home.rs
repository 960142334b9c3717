//! Landing page: the freshest and the most popular debates.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::debate_card::DebateCard;
use crate::net::types::Debate;

async fn load_section(sort: &str) -> Vec<Debate> {
    match crate::net::api::fetch_debates(0, 6, sort, None).await {
        Ok(page) => page.content,
        Err(e) => {
            leptos::logging::warn!("home feed ({sort}) failed: {e}");
            Vec::new()
        }
    }
}

/// Home page with two curated debate rows.
#[component]
pub fn HomePage() -> impl IntoView {
    let latest = LocalResource::new(|| load_section("latest"));
    let popular = LocalResource::new(|| load_section("popular"));

    let section = move |title: &'static str, resource: LocalResource<Vec<Debate>>| {
        view! {
            <section class="home-section">
                <div class="home-section__header">
                    <h2>{title}</h2>
                    <A href="/debate">"See all"</A>
                </div>
                <Suspense fallback=move || view! { <p>"Loading debates..."</p> }>
                    {move || {
                        resource
                            .get()
                            .map(|debates| {
                                if debates.is_empty() {
                                    view! { <p class="home-section__empty">"Nothing here yet."</p> }
                                        .into_any()
                                } else {
                                    view! {
                                        <div class="home-section__grid">
                                            {debates
                                                .into_iter()
                                                .map(|d| view! { <DebateCard debate=d/> })
                                                .collect::<Vec<_>>()}
                                        </div>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </section>
        }
    };

    view! {
        <div class="home-page">
            <section class="home-hero">
                <h1>"Pick a side. Make your case."</h1>
                <p>"Join live debates, vote FOR or AGAINST, and argue it out in real time."</p>
                <A href="/debate/create">
                    <span class="btn btn--primary">"Start a debate"</span>
                </A>
            </section>
            {section("Latest debates", latest)}
            {section("Popular now", popular)}
        </div>
    }
}
