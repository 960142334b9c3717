#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::store::Theme;

/// UI chrome state, currently just the active theme.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub theme: Theme,
}

impl UiState {
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
