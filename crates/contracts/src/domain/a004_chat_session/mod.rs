//! Chat/call session register.
//!
//! A session row carries the amounts that were actually credited when
//! it settled. Those figures are historical fact: editing a user's
//! split later never rewrites them, and reports only ever sum them.

pub mod aggregate;

pub use aggregate::{
    ChatMessage, ChatSession, SessionDetailResponse, SessionId, SessionKind, SessionListItem,
};
