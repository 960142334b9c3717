//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::header::Header;
use crate::pages::{
    debate_create::DebateCreatePage, debate_detail::DebateDetailPage,
    debate_list::DebateListPage, home::HomePage, login::LoginPage, my_page::MyPage,
    ranking::RankingPage, register::RegisterPage, user_profile::UserProfilePage,
};
use crate::state::{auth::AuthState, notifications::NotificationsState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the process-wide contexts (auth session, theme/UI,
/// notifications), restores the persisted session and theme on startup,
/// and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let ui = RwSignal::new(UiState::default());
    let notifications = RwSignal::new(NotificationsState::default());

    provide_context(auth);
    provide_context(ui);
    provide_context(notifications);

    #[cfg(feature = "hydrate")]
    {
        let theme = crate::util::theme::read_preference();
        crate::util::theme::apply(theme);
        ui.update(|u| u.set_theme(theme));

        leptos::task::spawn_local(initialize_session(auth));
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/debate-ui.css"/>
        <Title text="Debate"/>

        <Router>
            <Header/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("debate") view=DebateListPage/>
                    <Route path=(StaticSegment("debate"), StaticSegment("create")) view=DebateCreatePage/>
                    <Route path=(StaticSegment("debate"), ParamSegment("id")) view=DebateDetailPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                    <Route path=StaticSegment("my") view=MyPage/>
                    <Route path=StaticSegment("ranking") view=RankingPage/>
                    <Route path=(StaticSegment("users"), ParamSegment("id")) view=UserProfilePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Restore the persisted session, if the stored token is still good.
///
/// An expired or malformed token is discarded without a network call;
/// otherwise the current user is fetched and a failure clears the
/// session the same way.
#[cfg(feature = "hydrate")]
async fn initialize_session(auth: RwSignal<AuthState>) {
    use crate::state::auth::{end_session, session_valid};

    if !session_valid(crate::util::jwt::now_secs()) {
        end_session();
        auth.update(AuthState::sign_out);
        return;
    }

    match crate::net::api::fetch_current_user().await {
        Ok(user) => auth.update(|a| a.sign_in(user)),
        Err(e) => {
            leptos::logging::warn!("session restore failed: {e}");
            end_session();
            auth.update(AuthState::sign_out);
        }
    }
}
