//! Circular user avatar with an initial-letter fallback.

use leptos::prelude::*;

/// Avatar image, falling back to the first character of the nickname
/// when no profile image is set.
#[component]
pub fn UserAvatar(
    src: Option<String>,
    nickname: String,
    #[prop(default = "medium")] size: &'static str,
) -> impl IntoView {
    let class = format!("user-avatar user-avatar--{size}");
    let initial = nickname.chars().next().unwrap_or('?').to_string();

    match src {
        Some(url) if !url.is_empty() => {
            view! { <img class=class src=url alt=nickname/> }.into_any()
        }
        _ => view! { <span class=class>{initial}</span> }.into_any(),
    }
}
