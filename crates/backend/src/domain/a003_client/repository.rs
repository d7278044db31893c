use contracts::domain::a003_client::{Client, ClientId, ClientStats};
use contracts::shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, Set, Statement};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub coin_balance: i64,
    pub total_spent: i64,
    pub recharge_count: i64,
    pub last_active: chrono::NaiveDate,
    pub joined_at: chrono::NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        Client {
            id: ClientId(uuid),
            name: m.name,
            phone: m.phone,
            coin_balance: m.coin_balance,
            total_spent: Paise(m.total_spent),
            recharge_count: m.recharge_count,
            last_active: m.last_active,
            joined_at: m.joined_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All clients in insertion order; ranking happens in the service so
/// equal spenders keep a stable order.
pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    let models = Entity::find().all(conn()).await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(client: &Client) -> anyhow::Result<Uuid> {
    if let Err(reason) = client.validate() {
        anyhow::bail!("invalid client: {}", reason);
    }
    let uuid = client.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        name: Set(client.name.clone()),
        phone: Set(client.phone.clone()),
        coin_balance: Set(client.coin_balance),
        total_spent: Set(client.total_spent.value()),
        recharge_count: Set(client.recharge_count),
        last_active: Set(client.last_active),
        joined_at: Set(client.joined_at),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn stats() -> anyhow::Result<ClientStats> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS total, COALESCE(SUM(total_spent), 0) AS spent, \
             COALESCE(SUM(coin_balance), 0) AS coins FROM a003_client"
                .to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(ClientStats {
            total_clients: row.try_get("", "total")?,
            total_spent: Paise(row.try_get("", "spent")?),
            total_coin_balance: row.try_get("", "coins")?,
        }),
        None => Ok(ClientStats {
            total_clients: 0,
            total_spent: Paise::ZERO,
            total_coin_balance: 0,
        }),
    }
}
