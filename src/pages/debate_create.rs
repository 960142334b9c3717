//! Debate creation form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::require_auth::RequireAuth;

/// New-debate form behind the auth gate.
#[component]
pub fn DebateCreatePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <DebateCreateForm/>
        </RequireAuth>
    }
}

#[component]
fn DebateCreateForm() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let category_id = RwSignal::new(None::<i64>);
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let field_error = RwSignal::new(None::<String>);
    let submit_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let categories = LocalResource::new(|| async {
        crate::net::api::fetch_categories().await.unwrap_or_else(|e| {
            leptos::logging::warn!("category fetch failed: {e}");
            Vec::new()
        })
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // all validation happens before anything is dispatched
        let title_value = title.get_untracked().trim().to_owned();
        let content_value = content.get_untracked().trim().to_owned();
        let start_value = start_date.get_untracked();
        let end_value = end_date.get_untracked();

        if title_value.is_empty() {
            field_error.set(Some("Give your debate a title.".to_owned()));
            return;
        }
        if content_value.is_empty() {
            field_error.set(Some("Describe the debate topic.".to_owned()));
            return;
        }
        let Some(category) = category_id.get_untracked() else {
            field_error.set(Some("Pick a category.".to_owned()));
            return;
        };
        if start_value.is_empty() || end_value.is_empty() {
            field_error.set(Some("Set both start and end dates.".to_owned()));
            return;
        }
        if end_value <= start_value {
            field_error.set(Some("The end date must come after the start.".to_owned()));
            return;
        }
        field_error.set(None);
        submit_error.set(None);
        pending.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_debate(
                    &title_value,
                    &content_value,
                    category,
                    &start_value,
                    &end_value,
                )
                .await
                {
                    Ok(debate) => {
                        navigate(&format!("/debate/{}", debate.id), NavigateOptions::default());
                    }
                    Err(e) => {
                        pending.set(false);
                        submit_error.set(Some(e.user_message()));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (title_value, content_value, category, start_value, end_value);
        }
    };

    view! {
        <div class="debate-create-page">
            <h1>"Start a debate"</h1>

            {move || {
                field_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })
            }}
            {move || {
                submit_error
                    .get()
                    .map(|msg| view! { <div class="alert alert--error">{msg}</div> })
            }}

            <form class="debate-form" on:submit=on_submit>
                <label class="auth-form__label">
                    "Title"
                    <input
                        type="text"
                        class="auth-form__input"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>

                <label class="auth-form__label">
                    "Topic"
                    <textarea
                        class="auth-form__input debate-form__content"
                        placeholder="Lay out the question and any background..."
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    />
                </label>

                <label class="auth-form__label">
                    "Category"
                    <select
                        class="auth-form__input"
                        on:change=move |ev| {
                            category_id.set(event_target_value(&ev).parse::<i64>().ok());
                        }
                    >
                        <option value="">"Choose a category"</option>
                        <Suspense fallback=|| ()>
                            {move || {
                                categories
                                    .get()
                                    .map(|list| {
                                        list.into_iter()
                                            .map(|c| {
                                                view! {
                                                    <option value=c.id.to_string()>{c.name}</option>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                    })
                            }}
                        </Suspense>
                    </select>
                </label>

                <div class="debate-form__dates">
                    <label class="auth-form__label">
                        "Starts"
                        <input
                            type="datetime-local"
                            class="auth-form__input"
                            prop:value=move || start_date.get()
                            on:input=move |ev| start_date.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__label">
                        "Ends"
                        <input
                            type="datetime-local"
                            class="auth-form__input"
                            prop:value=move || end_date.get()
                            on:input=move |ev| end_date.set(event_target_value(&ev))
                        />
                    </label>
                </div>

                <button type="submit" class="btn btn--primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Creating..." } else { "Create debate" }}
                </button>
            </form>
        </div>
    }
}
