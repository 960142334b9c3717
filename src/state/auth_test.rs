use super::*;

fn user(id: i64, nickname: &str) -> UserProfile {
    UserProfile { id, nickname: nickname.to_owned(), ..UserProfile::default() }
}

#[test]
fn auth_state_default_is_signed_out() {
    let state = AuthState::default();
    assert!(!state.is_authenticated());
    assert!(state.user.is_none());
}

#[test]
fn sign_in_and_out_round_trip() {
    let mut state = AuthState { loading: true, ..AuthState::default() };
    state.sign_in(user(1, "alice"));
    assert!(state.is_authenticated());
    assert!(!state.loading);

    state.sign_out();
    assert!(!state.is_authenticated());
}

#[test]
fn update_user_replaces_profile() {
    let mut state = AuthState::default();
    state.sign_in(user(1, "alice"));
    state.update_user(user(1, "alice2"));
    assert_eq!(state.user.unwrap().nickname, "alice2");
}

#[test]
fn session_invalid_without_stored_token() {
    // Native tests have no browser storage, so no token can exist.
    assert!(!session_valid(1_700_000_000));
}
