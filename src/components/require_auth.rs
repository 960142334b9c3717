//! Gate for pages that need a live session.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Wraps authenticated-only content.
///
/// The stored token's `exp` claim is checked locally before the route is
/// trusted; an expired token forces a logout and a `/auth/login`
/// redirect without any network call. Unauthenticated visitors are
/// redirected the same way once session restore settles.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if state.loading {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            if !crate::state::auth::session_valid(crate::util::jwt::now_secs()) {
                crate::state::auth::end_session();
                auth.update(AuthState::sign_out);
                navigate("/auth/login", NavigateOptions::default());
                return;
            }
        }

        if !state.is_authenticated() {
            navigate("/auth/login", NavigateOptions::default());
        }
    });

    view! {
        <Show when=move || auth.get().is_authenticated() fallback=|| view! { <div class="page-loading">"Loading..."</div> }>
            {children()}
        </Show>
    }
}
