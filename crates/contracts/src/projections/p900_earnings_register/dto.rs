use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::money::Paise;

/// Optional filters for the earnings report. Open-ended when a bound
/// is absent; `user_id` narrows the register to one performer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsReportRequest {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub user_id: Option<String>,
}

/// Platform-wide earnings totals, summed from the recorded session
/// amounts. All zeros when no session matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsTotals {
    pub total_client_spent: Paise,
    pub total_admin_earned: Paise,
    pub total_agent_earned: Paise,
    pub total_user_earned: Paise,
    pub session_count: i64,
    pub total_minutes: i64,
}

/// Per-user totals keyed by the session's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEarningsTotals {
    pub user_id: String,
    #[serde(flatten)]
    pub totals: EarningsTotals,
}

/// Per-user report row, decorated with the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEarningsRow {
    pub user_id: String,
    pub user_name: String,
    #[serde(flatten)]
    pub totals: EarningsTotals,
}

/// Response of `GET /api/reports/earnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReportResponse {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub totals: EarningsTotals,
}

/// Response of `GET /api/reports/earnings/by-user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEarningsReportResponse {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub rows: Vec<UserEarningsRow>,
}
