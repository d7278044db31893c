//! Earnings register projection.
//!
//! Read-only rollups over settled sessions. The arithmetic lives in
//! [`report`]; the backend service only fetches rows and decorates them
//! with display names.

pub mod dto;
pub mod report;

pub use dto::{
    EarningsReportRequest, EarningsReportResponse, EarningsTotals, UserEarningsReportResponse,
    UserEarningsRow, UserEarningsTotals,
};
pub use report::{summarize, summarize_by_user};
