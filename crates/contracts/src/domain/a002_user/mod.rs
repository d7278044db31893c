//! Performing users (chat/call hosts).
//!
//! Each user carries the commission split that divides what a client
//! pays per minute between the platform, the recruiting agent and the
//! user. The split record store lives in the backend; the shapes and
//! the ingestion rules live here.

pub mod aggregate;

pub use aggregate::{
    avatar_initials, CommissionHistoryEntry, ReviewDecision, ReviewDecisionDto, User,
    UserCommissionResponse, UserId, UserKind, UserListItem, UserStats, UserStatus,
};
