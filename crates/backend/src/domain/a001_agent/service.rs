use contracts::domain::a001_agent::{Agent, AgentListItem, AgentStats};
use contracts::domain::a002_user::User;
use uuid::Uuid;

use super::repository;
use crate::domain::a002_user::repository as user_repository;

pub async fn list_items() -> anyhow::Result<Vec<AgentListItem>> {
    let agents = repository::list_all().await?;
    Ok(agents.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Agent>> {
    repository::get_by_id(id).await
}

/// Users recruited by this agent, `None` for an unknown agent. A known
/// agent with an empty roster gets an empty list.
pub async fn team(id: Uuid) -> anyhow::Result<Option<Vec<User>>> {
    if repository::get_by_id(id).await?.is_none() {
        return Ok(None);
    }
    let members = user_repository::list_by_agent(id).await?;
    Ok(Some(members))
}

/// Card figures: the team-member count comes from the user register,
/// not from the agents' stored `team_size` columns.
pub async fn stats() -> anyhow::Result<AgentStats> {
    let (total_agents, total_earnings) = repository::count_and_earnings().await?;
    let total_team_members = user_repository::count_agent_recruited().await?;
    Ok(AgentStats {
        total_agents,
        total_team_members,
        total_earnings,
    })
}
