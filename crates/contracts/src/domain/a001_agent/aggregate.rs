use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::money::Paise;

/// Unique agent identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// Agent account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl AgentStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "active" => Ok(AgentStatus::Active),
            "inactive" => Ok(AgentStatus::Inactive),
            _ => Err(format!("Unknown agent status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
        }
    }
}

/// Recruiting agent.
///
/// `team_size`, `total_earnings` and `wallet_balance` are settled facts
/// maintained by the write side (recruitment, session settlement,
/// payouts); they only ever grow or are drawn down explicitly, and list
/// views read them as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub phone: String,
    pub team_size: i64,
    pub total_earnings: Paise,
    pub wallet_balance: Paise,
    /// Headline recruitment cut in whole percent. Display only; the
    /// money actually moves by each recruit's commission split.
    pub commission_rate: i64,
    pub status: AgentStatus,
    pub joined_at: NaiveDate,
}

impl Agent {
    /// Create a new agent for insertion into the database.
    pub fn new_for_insert(name: String, phone: String, commission_rate: i64) -> Self {
        Self {
            id: AgentId::new_v4(),
            name,
            phone,
            team_size: 0,
            total_earnings: Paise::ZERO,
            wallet_balance: Paise::ZERO,
            commission_rate,
            status: AgentStatus::Active,
            joined_at: Utc::now().date_naive(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Agent name cannot be empty".into());
        }
        if self.phone.trim().is_empty() {
            return Err("Agent phone cannot be empty".into());
        }
        if !(0..=100).contains(&self.commission_rate) {
            return Err(format!(
                "Agent commission rate must be between 0 and 100: {}",
                self.commission_rate
            ));
        }
        if self.team_size < 0 {
            return Err(format!("Agent team size cannot be negative: {}", self.team_size));
        }
        if self.total_earnings.is_negative() || self.wallet_balance.is_negative() {
            return Err("Agent earnings figures cannot be negative".into());
        }
        Ok(())
    }
}

/// Agent row for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentListItem {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub team_size: i64,
    pub total_earnings: Paise,
    pub wallet_balance: Paise,
    pub commission_rate: i64,
    pub status: AgentStatus,
    pub joined_at: NaiveDate,
}

impl From<Agent> for AgentListItem {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id.as_string(),
            name: agent.name,
            phone: agent.phone,
            team_size: agent.team_size,
            total_earnings: agent.total_earnings,
            wallet_balance: agent.wallet_balance,
            commission_rate: agent.commission_rate,
            status: agent.status,
            joined_at: agent.joined_at,
        }
    }
}

/// Card figures for the agents page. `total_team_members` counts
/// agent-recruited users in the user register, not the stored
/// `team_size` columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStats {
    pub total_agents: i64,
    pub total_team_members: i64,
    pub total_earnings: Paise,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_rate_must_be_a_percentage() {
        let mut agent = Agent::new_for_insert("Rahul Sharma".into(), "+91 98765 43210".into(), 10);
        assert!(agent.validate().is_ok());

        agent.commission_rate = 101;
        assert!(agent.validate().is_err());

        agent.commission_rate = -1;
        assert!(agent.validate().is_err());
    }
}
