//! Card summarizing a debate in list views.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Debate;

/// Debate summary card linking to the detail page.
#[component]
pub fn DebateCard(debate: Debate) -> impl IntoView {
    let href = format!("/debate/{}", debate.id);
    let status_class = format!(
        "badge status-badge status-badge--{}",
        debate.status.label().to_lowercase()
    );

    view! {
        <A href=href>
            <article class="debate-card">
                <div class="debate-card__badges">
                    {debate
                        .category_name
                        .clone()
                        .map(|name| view! { <span class="badge category-badge">{name}</span> })}
                    <span class=status_class>{debate.status.label()}</span>
                </div>
                <h3 class="debate-card__title">{debate.title.clone()}</h3>
                <div class="debate-card__meta">
                    <span class="debate-card__author">
                        {debate.nickname.clone().unwrap_or_else(|| "unknown".to_owned())}
                    </span>
                    <div class="debate-card__stats">
                        <span>"views " {debate.view_count}</span>
                        <span>"comments " {debate.comment_count}</span>
                        <span>"likes " {debate.like_count}</span>
                    </div>
                </div>
            </article>
        </A>
    }
}
