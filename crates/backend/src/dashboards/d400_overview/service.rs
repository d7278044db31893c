use contracts::dashboards::d400_overview::OverviewResponse;
use contracts::domain::a001_agent::AgentStatus;
use contracts::domain::a002_user::UserStatus;
use contracts::projections::p900_earnings_register::report;

use crate::domain::a001_agent::repository as agent_repository;
use crate::domain::a002_user::repository as user_repository;
use crate::domain::a003_client::repository as client_repository;
use crate::domain::a004_chat_session::repository as session_repository;
use crate::domain::a004_chat_session::service as session_service;
use crate::domain::a005_recharge::service as recharge_service;

const RECENT_ROWS: u64 = 5;

/// One response for the landing page: all-time money totals, account
/// counts and the two recent-activity feeds.
pub async fn overview() -> anyhow::Result<OverviewResponse> {
    let sessions = session_repository::list_asc().await?;
    let totals = report::summarize(&sessions);

    let active_agents = agent_repository::list_all()
        .await?
        .into_iter()
        .filter(|agent| agent.status == AgentStatus::Active)
        .count() as i64;
    let active_users = user_repository::count_by_status(UserStatus::Active).await?;
    let pending_users = user_repository::count_by_status(UserStatus::Pending).await?;
    let total_clients = client_repository::stats().await?.total_clients;

    Ok(OverviewResponse {
        total_revenue: totals.total_client_spent,
        admin_earnings: totals.total_admin_earned,
        agent_payouts: totals.total_agent_earned,
        user_payouts: totals.total_user_earned,
        active_agents,
        active_users,
        pending_users,
        total_clients,
        recent_sessions: session_service::recent(RECENT_ROWS).await?,
        recent_recharges: recharge_service::recent(RECENT_ROWS).await?,
    })
}
