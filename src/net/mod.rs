//! Network layer: REST wrappers, shared DTOs, and the chat socket.

pub mod api;
pub mod chat_client;
pub mod types;

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
