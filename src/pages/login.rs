//! Login page with inline validation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Email/password login form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_error = RwSignal::new(None::<String>);
    let submit_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // validation errors are caught before dispatch
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        if email_value.is_empty() || !email_value.contains('@') {
            field_error.set(Some("Enter a valid email address.".to_owned()));
            return;
        }
        if password_value.is_empty() {
            field_error.set(Some("Enter your password.".to_owned()));
            return;
        }
        field_error.set(None);
        submit_error.set(None);
        pending.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&email_value, &password_value).await {
                    Ok(payload) => {
                        crate::state::auth::begin_session(&payload);
                        auth.update(|a| a.sign_in(payload.user));
                        navigate("/", NavigateOptions::default());
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
            let _ = (email_value, password_value);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Log in"</h1>

                {move || {
                    field_error
                        .get()
                        .map(|msg| view! { <p class="field-error">{msg}</p> })
                }}
                {move || {
                    submit_error
                        .get()
                        .map(|msg| view! { <div class="alert alert--error">{msg}</div> })
                }}

                <label class="auth-form__label">
                    "Email"
                    <input
                        type="email"
                        class="auth-form__input"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Password"
                    <input
                        type="password"
                        class="auth-form__input"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                <button type="submit" class="btn btn--primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Logging in..." } else { "Log in" }}
                </button>

                <p class="auth-form__switch">
                    "New here? " <A href="/auth/register">"Create an account"</A>
                </p>
            </form>
        </div>
    }
}
