use contracts::domain::a001_agent::{Agent, AgentId, AgentStatus};
use contracts::shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, QueryOrder, Set, Statement};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_agent")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub team_size: i64,
    pub total_earnings: i64,
    pub wallet_balance: i64,
    pub commission_rate: i64,
    pub status: String,
    pub joined_at: chrono::NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Agent {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        Agent {
            id: AgentId(uuid),
            name: m.name,
            phone: m.phone,
            team_size: m.team_size,
            total_earnings: Paise(m.total_earnings),
            wallet_balance: Paise(m.wallet_balance),
            commission_rate: m.commission_rate,
            status: AgentStatus::from_str(&m.status).unwrap_or(AgentStatus::Active),
            joined_at: m.joined_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Agent>> {
    let models = Entity::find()
        .order_by_asc(Column::JoinedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Agent>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(agent: &Agent) -> anyhow::Result<Uuid> {
    if let Err(reason) = agent.validate() {
        anyhow::bail!("invalid agent: {}", reason);
    }
    let uuid = agent.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        name: Set(agent.name.clone()),
        phone: Set(agent.phone.clone()),
        team_size: Set(agent.team_size),
        total_earnings: Set(agent.total_earnings.value()),
        wallet_balance: Set(agent.wallet_balance.value()),
        commission_rate: Set(agent.commission_rate),
        status: Set(agent.status.as_str().to_string()),
        joined_at: Set(agent.joined_at),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Agent count and summed lifetime earnings for the stats card.
pub async fn count_and_earnings() -> anyhow::Result<(i64, Paise)> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS total, COALESCE(SUM(total_earnings), 0) AS earnings FROM a001_agent"
                .to_string(),
        ))
        .await?;
    match row {
        Some(row) => {
            let total: i64 = row.try_get("", "total")?;
            let earnings: i64 = row.try_get("", "earnings")?;
            Ok((total, Paise(earnings)))
        }
        None => Ok((0, Paise::ZERO)),
    }
}
