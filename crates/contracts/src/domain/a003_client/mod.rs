//! Paying clients.

pub mod aggregate;

pub use aggregate::{Client, ClientId, ClientListItem, ClientStats};
