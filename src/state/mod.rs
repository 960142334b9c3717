//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `debate`, `chat`, etc.) so
//! individual components can depend on small focused models. Every
//! mutation here is a synchronous single-threaded transform; network
//! outcomes commit or revert it afterwards.

pub mod auth;
pub mod chat;
pub mod comments;
pub mod debate;
pub mod debates;
pub mod notifications;
pub mod optimistic;
pub mod ui;
