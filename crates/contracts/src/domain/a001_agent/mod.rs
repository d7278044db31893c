//! Recruiting agents.
//!
//! Agents bring performing users onto the platform and earn a per-minute
//! cut of every session their recruits serve, fixed by each user's
//! commission split. Team and earnings figures on the agent row are
//! settled facts, bumped by the write side and never recomputed.

pub mod aggregate;

pub use aggregate::{Agent, AgentId, AgentListItem, AgentStats, AgentStatus};
