//! Shared contracts between the Bindass admin backend and its API consumers.
//!
//! Everything that crosses the wire lives here: domain aggregates, the
//! commission split engine, report/dashboard response shapes and the
//! system (auth + admin account) DTOs.

pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod shared;
pub mod system;
