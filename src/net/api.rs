//! REST API wrappers for the debate backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! `/api`-relative resource paths, with the bearer token attached when a
//! session exists. Server-side (SSR): stubs returning
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every wrapper returns `Result` so pages handle failures at the call
//! site: validation happens before dispatch, network errors surface as
//! transient alerts with optimistic state rolled back, and a 401 clears
//! the stored session so the caller can redirect to `/login`. Nothing is
//! retried here.

#![allow(clippy::unused_async)]

use serde::de::DeserializeOwned;

use super::types::{
    ApiEnvelope, AuthPayload, Category, ChatMessage, Comment, Debate, DirectMessage,
    NotificationFeed, Opinion, OpinionSide, Page, RankedUser, UserProfile,
};
#[cfg(feature = "hydrate")]
use crate::store;

/// Failure modes of a REST call, handled at the nearest call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    Request(String),
    /// Non-2xx status, with the envelope message when one was sent.
    Status { status: u16, message: String },
    /// The session is missing, expired, or was rejected by the server.
    Unauthorized,
    /// The response body did not decode as expected.
    Decode(String),
    /// A 2xx envelope with `success == false`.
    Rejected(String),
    /// Not reachable outside the browser (SSR build).
    Unavailable,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(e) => write!(f, "request failed: {e}"),
            Self::Status { status, message } => write!(f, "server error {status}: {message}"),
            Self::Unauthorized => write!(f, "authentication required"),
            Self::Decode(e) => write!(f, "malformed response: {e}"),
            Self::Rejected(message) => write!(f, "{message}"),
            Self::Unavailable => write!(f, "not available on server"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Whether the caller should force a logout and redirect to `/login`.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// User-facing text for transient alerts.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(m) | Self::Status { message: m, .. } if !m.is_empty() => m.clone(),
            Self::Unauthorized => "Please log in to continue.".to_owned(),
            _ => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------
// Transport helpers
// ---------------------------------------------------------------

#[cfg(feature = "hydrate")]
async fn read_envelope<T: DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> ApiResult<ApiEnvelope<T>> {
    let status = resp.status();
    if status == 401 {
        // The stored session is no longer trusted by the server.
        store::clear_token();
        return Err(ApiError::Unauthorized);
    }
    if !resp.ok() {
        let message = resp
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_default();
        return Err(ApiError::Status { status, message });
    }
    resp.json::<ApiEnvelope<T>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn authorize(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match store::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn send_get<T: DeserializeOwned>(
    path: &str,
    params: &[(&str, String)],
) -> ApiResult<ApiEnvelope<T>> {
    #[cfg(feature = "hydrate")]
    {
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let resp = authorize(gloo_net::http::Request::get(path).query(pairs))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_envelope(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, params);
        Err(ApiError::Unavailable)
    }
}

#[derive(Clone, Copy)]
enum Method {
    Post,
    Put,
    Delete,
}

async fn send_json<T: DeserializeOwned>(
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> ApiResult<ApiEnvelope<T>> {
    #[cfg(feature = "hydrate")]
    {
        let builder = match method {
            Method::Post => gloo_net::http::Request::post(path),
            Method::Put => gloo_net::http::Request::put(path),
            Method::Delete => gloo_net::http::Request::delete(path),
        };
        let builder = authorize(builder);
        let request = match body {
            Some(body) => builder.json(body).map_err(|e| ApiError::Request(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Request(e.to_string()))?,
        };
        let resp = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        read_envelope(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, path, body);
        Err(ApiError::Unavailable)
    }
}

/// Unwrap an envelope that must carry a payload.
fn unwrap_data<T>(env: ApiEnvelope<T>) -> ApiResult<T> {
    if !env.success {
        return Err(ApiError::Rejected(env.message.unwrap_or_default()));
    }
    env.data
        .ok_or_else(|| ApiError::Decode("envelope missing data".to_owned()))
}

/// Unwrap an envelope where only the acknowledgement matters.
fn unwrap_ack(env: ApiEnvelope<serde_json::Value>) -> ApiResult<()> {
    if env.success {
        Ok(())
    } else {
        Err(ApiError::Rejected(env.message.unwrap_or_default()))
    }
}

fn page_params(page: u32, size: u32, sort: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string()), ("size", size.to_string())];
    if let Some(sort) = sort {
        params.push(("sort", sort.to_owned()));
    }
    params
}

// ---------------------------------------------------------------
// Auth
// ---------------------------------------------------------------

pub async fn login(email: &str, password: &str) -> ApiResult<AuthPayload> {
    let body = serde_json::json!({ "email": email, "password": password });
    send_json(Method::Post, "/api/auth/login", Some(&body)).await.and_then(unwrap_data)
}

pub async fn register(
    email: &str,
    password: &str,
    nickname: &str,
    bio: Option<&str>,
) -> ApiResult<AuthPayload> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "nickname": nickname,
        "bio": bio,
    });
    send_json(Method::Post, "/api/auth/register", Some(&body)).await.and_then(unwrap_data)
}

/// Fetch the currently authenticated user. Requires a stored token.
pub async fn fetch_current_user() -> ApiResult<UserProfile> {
    send_get("/api/auth/me", &[]).await.and_then(unwrap_data)
}

// ---------------------------------------------------------------
// Debates
// ---------------------------------------------------------------

pub async fn fetch_debates(
    page: u32,
    size: u32,
    sort: &str,
    status: Option<&str>,
) -> ApiResult<Page<Debate>> {
    let mut params = page_params(page, size, Some(sort));
    if let Some(status) = status {
        params.push(("status", status.to_owned()));
    }
    send_get("/api/debate", &params).await.and_then(unwrap_data)
}

pub async fn fetch_debate(id: i64) -> ApiResult<Debate> {
    send_get(&format!("/api/debate/{id}"), &[]).await.and_then(unwrap_data)
}

pub async fn fetch_debates_by_category(
    category_id: i64,
    page: u32,
    size: u32,
    sort: &str,
) -> ApiResult<Page<Debate>> {
    let params = page_params(page, size, Some(sort));
    send_get(&format!("/api/debate/category/{category_id}"), &params)
        .await
        .and_then(unwrap_data)
}

pub async fn search_debates(
    keyword: &str,
    category_id: Option<i64>,
    status: Option<&str>,
    sort: Option<&str>,
    page: u32,
    size: u32,
) -> ApiResult<Page<Debate>> {
    let mut params = page_params(page, size, sort);
    params.push(("keyword", keyword.to_owned()));
    if let Some(category_id) = category_id {
        params.push(("categoryId", category_id.to_string()));
    }
    if let Some(status) = status {
        params.push(("status", status.to_owned()));
    }
    send_get("/api/debate/search", &params).await.and_then(unwrap_data)
}

pub async fn create_debate(
    title: &str,
    content: &str,
    category_id: i64,
    start_date: &str,
    end_date: &str,
) -> ApiResult<Debate> {
    let body = serde_json::json!({
        "title": title,
        "content": content,
        "categoryId": category_id,
        "startDate": start_date,
        "endDate": end_date,
    });
    send_json(Method::Post, "/api/debate", Some(&body)).await.and_then(unwrap_data)
}

pub async fn update_debate(id: i64, body: &serde_json::Value) -> ApiResult<Debate> {
    send_json(Method::Put, &format!("/api/debate/{id}"), Some(body)).await.and_then(unwrap_data)
}

pub async fn delete_debate(id: i64) -> ApiResult<()> {
    send_json(Method::Delete, &format!("/api/debate/{id}"), None).await.and_then(unwrap_ack)
}

// ---------------------------------------------------------------
// Comments
// ---------------------------------------------------------------

pub async fn fetch_comments(
    debate_id: i64,
    page: u32,
    size: u32,
    sort: &str,
) -> ApiResult<Page<Comment>> {
    let params = page_params(page, size, Some(sort));
    send_get(&format!("/api/comments/debate/{debate_id}"), &params)
        .await
        .and_then(unwrap_data)
}

pub async fn create_comment(
    debate_id: i64,
    content: &str,
    parent_id: Option<i64>,
) -> ApiResult<Comment> {
    let body = serde_json::json!({
        "debateId": debate_id,
        "content": content,
        "parentId": parent_id,
    });
    send_json(Method::Post, "/api/comments", Some(&body)).await.and_then(unwrap_data)
}

pub async fn update_comment(id: i64, content: &str) -> ApiResult<Comment> {
    let body = serde_json::json!({ "content": content });
    send_json(Method::Put, &format!("/api/comments/{id}"), Some(&body))
        .await
        .and_then(unwrap_data)
}

pub async fn delete_comment(id: i64) -> ApiResult<()> {
    send_json(Method::Delete, &format!("/api/comments/{id}"), None).await.and_then(unwrap_ack)
}

pub async fn toggle_comment_like(id: i64) -> ApiResult<()> {
    send_json(Method::Post, &format!("/api/comments/{id}/like"), None).await.and_then(unwrap_ack)
}

// ---------------------------------------------------------------
// Opinions and debate likes
// ---------------------------------------------------------------

pub async fn create_opinion(
    debate_id: i64,
    side: OpinionSide,
    content: Option<&str>,
) -> ApiResult<Opinion> {
    let body = serde_json::json!({
        "debateId": debate_id,
        "side": side,
        "content": content,
    });
    send_json(Method::Post, "/api/opinions", Some(&body)).await.and_then(unwrap_data)
}

pub async fn fetch_opinions(debate_id: i64) -> ApiResult<Vec<Opinion>> {
    send_get(&format!("/api/opinions/debate/{debate_id}"), &[])
        .await
        .and_then(unwrap_data)
}

pub async fn toggle_debate_like(debate_id: i64) -> ApiResult<()> {
    send_json(Method::Post, &format!("/api/likes/debate/{debate_id}"), None)
        .await
        .and_then(unwrap_ack)
}

pub async fn is_debate_liked(debate_id: i64) -> ApiResult<bool> {
    send_get(&format!("/api/likes/debate/{debate_id}"), &[])
        .await
        .and_then(unwrap_data)
}

// ---------------------------------------------------------------
// Direct messages
// ---------------------------------------------------------------

pub async fn send_direct_message(receiver_nickname: &str, content: &str) -> ApiResult<()> {
    let body = serde_json::json!({
        "receiverNickname": receiver_nickname,
        "content": content,
    });
    send_json(Method::Post, "/api/messages", Some(&body)).await.and_then(unwrap_ack)
}

pub async fn fetch_received_messages(page: u32, size: u32) -> ApiResult<Page<DirectMessage>> {
    send_get("/api/messages/received", &page_params(page, size, None))
        .await
        .and_then(unwrap_data)
}

pub async fn fetch_sent_messages(page: u32, size: u32) -> ApiResult<Page<DirectMessage>> {
    send_get("/api/messages/sent", &page_params(page, size, None))
        .await
        .and_then(unwrap_data)
}

/// Fetch one message; the backend marks it read as a side effect.
pub async fn read_message(id: i64) -> ApiResult<DirectMessage> {
    send_get(&format!("/api/messages/{id}"), &[]).await.and_then(unwrap_data)
}

pub async fn delete_message(id: i64) -> ApiResult<()> {
    send_json(Method::Delete, &format!("/api/messages/{id}"), None).await.and_then(unwrap_ack)
}

pub async fn fetch_unread_message_count() -> ApiResult<u32> {
    send_get("/api/messages/unread-count", &[]).await.and_then(unwrap_data)
}

// ---------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------

pub async fn fetch_notifications() -> ApiResult<NotificationFeed> {
    send_get("/api/notifications", &[]).await.and_then(unwrap_data)
}

pub async fn mark_notification_read(id: i64) -> ApiResult<()> {
    send_json(Method::Post, &format!("/api/notifications/{id}/read"), None)
        .await
        .and_then(unwrap_ack)
}

// ---------------------------------------------------------------
// Users, ranking, my page
// ---------------------------------------------------------------

pub async fn fetch_user(id: i64) -> ApiResult<UserProfile> {
    send_get(&format!("/api/users/{id}"), &[]).await.and_then(unwrap_data)
}

pub async fn update_profile(
    nickname: Option<&str>,
    bio: Option<&str>,
    profile_image: Option<&str>,
) -> ApiResult<UserProfile> {
    let mut params = Vec::new();
    if let Some(nickname) = nickname {
        params.push(("nickname", nickname.to_owned()));
    }
    if let Some(bio) = bio {
        params.push(("bio", bio.to_owned()));
    }
    if let Some(profile_image) = profile_image {
        params.push(("profileImage", profile_image.to_owned()));
    }
    #[cfg(feature = "hydrate")]
    {
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let request = authorize(gloo_net::http::Request::put("/api/users/me").query(pairs))
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        read_envelope(resp).await.and_then(unwrap_data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = params;
        Err(ApiError::Unavailable)
    }
}

pub async fn fetch_user_debates(user_id: i64, page: u32, size: u32) -> ApiResult<Page<Debate>> {
    send_get(&format!("/api/users/{user_id}/debates"), &page_params(page, size, None))
        .await
        .and_then(unwrap_data)
}

pub async fn fetch_user_comments(user_id: i64, page: u32, size: u32) -> ApiResult<Page<Comment>> {
    send_get(&format!("/api/users/{user_id}/comments"), &page_params(page, size, None))
        .await
        .and_then(unwrap_data)
}

pub async fn fetch_ranking(limit: u32, period: &str, criteria: &str) -> ApiResult<Vec<RankedUser>> {
    let params = [
        ("limit", limit.to_string()),
        ("period", period.to_owned()),
        ("criteria", criteria.to_owned()),
    ];
    send_get("/api/users/ranking", &params).await.and_then(unwrap_data)
}

pub async fn fetch_my_debates(page: u32, size: u32) -> ApiResult<Page<Debate>> {
    send_get("/api/my/debate", &page_params(page, size, None)).await.and_then(unwrap_data)
}

pub async fn fetch_my_comments(page: u32, size: u32) -> ApiResult<Page<Comment>> {
    send_get("/api/my/comments", &page_params(page, size, None)).await.and_then(unwrap_data)
}

pub async fn fetch_my_opinions() -> ApiResult<Vec<Opinion>> {
    send_get("/api/my/opinions", &[]).await.and_then(unwrap_data)
}

pub async fn fetch_my_liked_debates(page: u32, size: u32) -> ApiResult<Page<Debate>> {
    send_get("/api/my/likes", &page_params(page, size, None)).await.and_then(unwrap_data)
}

// ---------------------------------------------------------------
// Categories, uploads, chat history
// ---------------------------------------------------------------

pub async fn fetch_categories() -> ApiResult<Vec<Category>> {
    send_get("/api/categories", &[]).await.and_then(unwrap_data)
}

/// Upload a profile image and return its served URL.
#[cfg(feature = "hydrate")]
pub async fn upload_profile_image(file: &web_sys::File) -> ApiResult<String> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Request("form".to_owned()))?;
    form.append_with_blob("file", file)
        .map_err(|_| ApiError::Request("form".to_owned()))?;
    let request = authorize(gloo_net::http::Request::post("/api/upload/profile"))
        .body(form)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
    read_envelope(resp).await.and_then(unwrap_data)
}

/// One-shot history fetch for a debate's chat room.
pub async fn fetch_chat_history(debate_id: i64, limit: u32) -> ApiResult<Vec<ChatMessage>> {
    let params = [("limit", limit.to_string())];
    send_get(&format!("/api/chat/{debate_id}"), &params).await.and_then(unwrap_data)
}
