//! REST data types shared between the API layer and client state.
//!
//! These mirror the backend's camelCase JSON verbatim. Timestamps are
//! passed through as the ISO-8601 strings the server sends; the client
//! never re-interprets them beyond display formatting.

use serde::{Deserialize, Serialize};

/// Standard response envelope wrapping every REST payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// A page of results as the backend returns them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { content: Vec::new(), total_pages: 0, total_elements: 0 }
    }
}

/// Lifecycle status of a debate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebateStatus {
    #[default]
    Scheduled,
    Active,
    Ended,
}

impl DebateStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Ended => "Ended",
        }
    }
}

/// A debate as returned by the debates resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debate {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Rich-text HTML body, rendered as-is.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: DebateStatus,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A comment, optionally carrying one level of replies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub debate_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Which side of a debate an opinion takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpinionSide {
    For,
    Against,
}

/// A user's recorded stance on a debate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opinion {
    pub id: i64,
    #[serde(default)]
    pub debate_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    pub side: OpinionSide,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A direct message between two users, addressed by nickname.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    pub id: i64,
    #[serde(default)]
    pub sender_nickname: Option<String>,
    #[serde(default)]
    pub receiver_nickname: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A notification shown in the header dropdown.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    /// Discriminator the backend sends: "comment", "like", "message", ...
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    /// In-app path to navigate to when the notification is clicked.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Notification list payload: entries plus the unread tally.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub unread_count: u32,
}

/// A user profile with activity counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub debate_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub opinion_count: i64,
}

/// A ranked user row from the ranking endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    pub id: i64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub score: i64,
}

/// A debate category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Kind of a chat room event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatKind {
    Join,
    Leave,
    #[default]
    Chat,
}

/// A chat message broadcast on a debate room topic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub debate_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ChatKind,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Login/register response payload: the bearer token plus the user.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}
