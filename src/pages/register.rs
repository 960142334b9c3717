//! Registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Sign-up form with field-level validation.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let nickname = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let field_error = RwSignal::new(None::<String>);
    let submit_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        let nickname_value = nickname.get_untracked().trim().to_owned();
        let bio_value = bio.get_untracked().trim().to_owned();

        if email_value.is_empty() || !email_value.contains('@') {
            field_error.set(Some("Enter a valid email address.".to_owned()));
            return;
        }
        if password_value.len() < 8 {
            field_error.set(Some("Password must be at least 8 characters.".to_owned()));
            return;
        }
        if password_value != password_confirm.get_untracked() {
            field_error.set(Some("Passwords do not match.".to_owned()));
            return;
        }
        if nickname_value.is_empty() {
            field_error.set(Some("Pick a nickname.".to_owned()));
            return;
        }
        field_error.set(None);
        submit_error.set(None);
        pending.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let bio = (!bio_value.is_empty()).then_some(bio_value);
                match crate::net::api::register(
                    &email_value,
                    &password_value,
                    &nickname_value,
                    bio.as_deref(),
                )
                .await
                {
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
            let _ = (email_value, password_value, nickname_value, bio_value);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Create account"</h1>

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
                <label class="auth-form__label">
                    "Confirm password"
                    <input
                        type="password"
                        class="auth-form__input"
                        prop:value=move || password_confirm.get()
                        on:input=move |ev| password_confirm.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Nickname"
                    <input
                        type="text"
                        class="auth-form__input"
                        prop:value=move || nickname.get()
                        on:input=move |ev| nickname.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Bio (optional)"
                    <textarea
                        class="auth-form__input"
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    />
                </label>

                <button type="submit" class="btn btn--primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Creating..." } else { "Sign up" }}
                </button>

                <p class="auth-form__switch">
                    "Already registered? " <A href="/auth/login">"Log in"</A>
                </p>
            </form>
        </div>
    }
}
