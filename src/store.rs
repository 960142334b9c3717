//! Typed browser-storage store.
//!
//! All persisted client state lives behind these accessors: the session
//! token, the theme preference, and the per-user chat block list. Keys
//! are namespaced under one prefix; no other module touches storage
//! directly. Reads tolerate absent or corrupt values, writes are
//! best-effort (storage may be unavailable or full).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "debate_ui_token";
const THEME_KEY: &str = "debate_ui_theme";
const BLOCKED_KEY: &str = "debate_ui_blocked";

/// Color theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// A chat user the viewer has blocked, kept client-side only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedUser {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub blocked_at: Option<String>,
}

/// The client-only block list, keyed by user id.
///
/// Pure container; persistence goes through [`blocked_users`] /
/// [`set_blocked_users`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockList(pub Vec<BlockedUser>);

impl BlockList {
    pub fn contains(&self, user_id: i64) -> bool {
        self.0.iter().any(|u| u.id == user_id)
    }

    /// Add a user; a second block of the same id is a no-op.
    pub fn block(&mut self, user: BlockedUser) {
        if !self.contains(user.id) {
            self.0.push(user);
        }
    }

    pub fn unblock(&mut self, user_id: i64) {
        self.0.retain(|u| u.id != user_id);
    }
}

/// The persisted session token, if any.
pub fn token() -> Option<String> {
    read_raw(TOKEN_KEY)
}

pub fn set_token(token: &str) {
    write_raw(TOKEN_KEY, token);
}

/// Drop the session. Safe to call when no session exists.
pub fn clear_token() {
    remove_raw(TOKEN_KEY);
}

/// The stored theme preference, if one was saved.
pub fn theme() -> Option<Theme> {
    match read_raw(THEME_KEY)?.as_str() {
        "dark" => Some(Theme::Dark),
        "light" => Some(Theme::Light),
        _ => None,
    }
}

pub fn set_theme(theme: Theme) {
    write_raw(THEME_KEY, if theme == Theme::Dark { "dark" } else { "light" });
}

/// The persisted block list; corrupt or absent data yields an empty list.
pub fn blocked_users() -> BlockList {
    read_raw(BLOCKED_KEY)
        .and_then(|raw| serde_json::from_str::<Vec<BlockedUser>>(&raw).ok())
        .map(BlockList)
        .unwrap_or_default()
}

pub fn set_blocked_users(list: &BlockList) {
    if let Ok(raw) = serde_json::to_string(&list.0) {
        write_raw(BLOCKED_KEY, &raw);
    }
}

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read_raw(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

fn write_raw(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

fn remove_raw(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}
