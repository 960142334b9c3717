//! Site header: navigation, theme toggle, notifications, session menu.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::notifications::NotificationsState;
use crate::state::ui::UiState;
use crate::store::Theme;

/// Top navigation bar.
///
/// Shows the notification bell with its unread badge for signed-in
/// users; clicking an entry marks it read (optimistically, confirmed in
/// the background) and navigates to its target.
#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let notifications = expect_context::<RwSignal<NotificationsState>>();
    let navigate = use_navigate();

    // Load the notification feed whenever a session appears.
    Effect::new(move || {
        if !auth.get().is_authenticated() {
            notifications.set(NotificationsState::default());
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_notifications().await {
                    Ok(feed) => notifications.update(|n| n.load(feed)),
                    Err(e) => leptos::logging::warn!("notification fetch failed: {e}"),
                }
            });
        }
    });

    let on_theme_toggle = move |_| {
        let current = ui.get_untracked().theme;
        let next = crate::util::theme::toggle(current);
        ui.update(|u| u.set_theme(next));
    };

    let on_logout = {
        let navigate = navigate.clone();
        move |_| {
            crate::state::auth::end_session();
            auth.update(AuthState::sign_out);
            navigate("/", NavigateOptions::default());
        }
    };

    let on_notification_click = StoredValue::new({
        let navigate = navigate.clone();
        move |id: i64| {
            let url = notifications.try_update(|n| n.mark_read(id)).flatten();

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::mark_notification_read(id).await {
                    leptos::logging::warn!("mark notification read failed: {e}");
                }
            });

            notifications.update(|n| n.open = false);
            if let Some(url) = url {
                navigate(&url, NavigateOptions::default());
            }
        }
    });

    view! {
        <header class="site-header">
            <div class="site-header__left">
                <A href="/">
                    <span class="site-header__logo">"Debate"</span>
                </A>
                <nav class="site-header__nav">
                    <A href="/debate">"Debates"</A>
                    <A href="/ranking">"Ranking"</A>
                </nav>
            </div>

            <div class="site-header__right">
                <button class="icon-btn theme-btn" on:click=on_theme_toggle title="Toggle theme">
                    {move || if ui.get().theme == Theme::Dark { "\u{263e}" } else { "\u{2600}" }}
                </button>

                <Show
                    when=move || auth.get().is_authenticated()
                    fallback=move || {
                        view! {
                            <nav class="site-header__auth">
                                <A href="/auth/login">"Log in"</A>
                                <A href="/auth/register">"Sign up"</A>
                            </nav>
                        }
                    }
                >
                    <div class="notification-wrapper">
                        <button
                            class="icon-btn notification-btn"
                            on:click=move |_| notifications.update(NotificationsState::toggle_open)
                        >
                            "\u{1f514}"
                            {move || {
                                let unread = notifications.get().unread_count;
                                (unread > 0)
                                    .then(|| {
                                        let label = if unread > 99 {
                                            "99+".to_owned()
                                        } else {
                                            unread.to_string()
                                        };
                                        view! { <span class="notification-badge">{label}</span> }
                                    })
                            }}
                        </button>

                        <Show when=move || notifications.get().open>
                            {move || {
                                let items = notifications.get().items;
                                if items.is_empty() {
                                    return view! {
                                        <div class="notification-dropdown">
                                            <p class="no-notifications">"No notifications yet"</p>
                                        </div>
                                    }
                                        .into_any();
                                }
                                view! {
                                    <div class="notification-dropdown">
                                        {items
                                            .into_iter()
                                            .map(|n| {
                                                let id = n.id;
                                                let unread = !n.is_read;
                                                view! {
                                                    <button
                                                        class="notification-item"
                                                        class:unread=unread
                                                        on:click=move |_| {
                                                            on_notification_click.with_value(|f| f(id));
                                                        }
                                                    >
                                                        <span class="notification-text">{n.message.clone()}</span>
                                                        {n.time.clone().map(|t| view! { <span class="notification-time">{t}</span> })}
                                                    </button>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }}
                        </Show>
                    </div>

                    <A href="/my">
                        <span class="site-header__nickname">
                            {move || auth.get().user.map(|u| u.nickname).unwrap_or_default()}
                        </span>
                    </A>
                    <button class="btn btn--ghost" on:click=on_logout.clone()>
                        "Log out"
                    </button>
                </Show>
            </div>
        </header>
    }
}
