use super::*;

#[test]
fn ui_state_defaults_to_light_theme() {
    let s = UiState::default();
    assert_eq!(s.theme, Theme::Light);
}

#[test]
fn set_theme_switches() {
    let mut s = UiState::default();
    s.set_theme(Theme::Dark);
    assert_eq!(s.theme, Theme::Dark);
}
