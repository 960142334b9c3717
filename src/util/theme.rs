//! Theme initialization and toggle.
//!
//! Reads the stored preference through the typed store and applies the
//! `.dark-mode` class to the `<html>` element. Toggling writes the new
//! preference back and updates the class. Requires a browser environment.

use crate::store::{self, Theme};

/// Read the theme preference.
///
/// Falls back to the system `prefers-color-scheme` when nothing is stored.
pub fn read_preference() -> Theme {
    if let Some(theme) = store::theme() {
        return theme;
    }

    #[cfg(feature = "hydrate")]
    {
        let prefers_dark = web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
            .flatten()
            .map_or(false, |mq| mq.matches());
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}

/// Apply or remove the `.dark-mode` class on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let class_list = el.class_list();
                if theme == Theme::Dark {
                    let _ = class_list.add_1("dark-mode");
                } else {
                    let _ = class_list.remove_1("dark-mode");
                }
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}

/// Toggle the theme, persist the new preference, and apply it.
pub fn toggle(current: Theme) -> Theme {
    let next = match current {
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::Light,
    };
    apply(next);
    store::set_theme(next);
    next
}
