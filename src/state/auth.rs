#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{AuthPayload, UserProfile};
use crate::store;
use crate::util::jwt;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true from startup until the stored session has been
/// checked (and the user fetched, when the token is still good).
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Record a successful login or registration.
    pub fn sign_in(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.loading = false;
    }

    /// Drop the session state. Storage teardown is [`end_session`].
    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Merge updated profile fields after an edit.
    pub fn update_user(&mut self, updated: UserProfile) {
        self.user = Some(updated);
    }
}

/// Persist the session from a login/register response.
pub fn begin_session(payload: &AuthPayload) {
    store::set_token(&payload.token);
}

/// Remove the persisted session. Safe when none exists.
pub fn end_session() {
    store::clear_token();
}

/// Forced logout: drop the persisted session and send the browser to
/// the login page. Used when the server rejects the session mid-action.
#[cfg(feature = "hydrate")]
pub fn force_login_redirect() {
    end_session();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/auth/login");
    }
}

/// Whether a stored token exists and its `exp` claim has not passed.
///
/// Decides locally, without a network call: an expired token forces
/// logout before any protected request goes out.
pub fn session_valid(now_secs: u64) -> bool {
    match store::token() {
        Some(token) => jwt::valid_at(&token, now_secs),
        None => false,
    }
}
