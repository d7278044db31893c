use serde::{Deserialize, Serialize};

use crate::domain::a004_chat_session::SessionListItem;
use crate::domain::a005_recharge::RechargeListItem;
use crate::shared::money::Paise;

/// Everything the admin landing page renders in one response.
///
/// The four money figures are all-time sums of the realized session
/// amounts; the live commission splits play no part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_revenue: Paise,
    pub admin_earnings: Paise,
    pub agent_payouts: Paise,
    pub user_payouts: Paise,
    pub active_agents: i64,
    pub active_users: i64,
    pub pending_users: i64,
    pub total_clients: i64,
    pub recent_sessions: Vec<SessionListItem>,
    pub recent_recharges: Vec<RechargeListItem>,
}
