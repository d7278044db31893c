//! System-level contracts: operator auth and accounts.

pub mod auth;
pub mod users;
