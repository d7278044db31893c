use contracts::domain::a003_client::ClientId;
use contracts::domain::a005_recharge::{
    PaymentMethod, Recharge, RechargeId, RechargeStats, RechargeStatus,
};
use contracts::shared::money::Paise;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, QueryOrder, QuerySelect, Set, Statement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_recharge")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_id: String,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub recharged_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Recharge {
    fn from(m: Model) -> Self {
        Recharge {
            id: RechargeId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            client_id: ClientId::new(
                Uuid::parse_str(&m.client_id).unwrap_or_else(|_| Uuid::new_v4()),
            ),
            amount: Paise(m.amount),
            method: PaymentMethod::from_str(&m.method).unwrap_or(PaymentMethod::Upi),
            status: RechargeStatus::from_str(&m.status).unwrap_or(RechargeStatus::Success),
            recharged_at: m.recharged_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All recharges, newest first. `limit` caps the result when given.
pub async fn list_desc(limit: Option<u64>) -> anyhow::Result<Vec<Recharge>> {
    let mut query = Entity::find().order_by_desc(Column::RechargedAt);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    let models = query.all(conn()).await?;
    Ok(models.into_iter().map(Recharge::from).collect())
}

/// The `n` most recent recharges.
pub async fn recent(n: u64) -> anyhow::Result<Vec<Recharge>> {
    list_desc(Some(n)).await
}

pub async fn insert(recharge: &Recharge) -> anyhow::Result<Uuid> {
    if let Err(reason) = recharge.validate() {
        anyhow::bail!("invalid recharge: {}", reason);
    }
    let id = recharge.id.value();
    let model = ActiveModel {
        id: Set(id.to_string()),
        client_id: Set(recharge.client_id.as_string()),
        amount: Set(recharge.amount.0),
        method: Set(recharge.method.as_str().to_string()),
        status: Set(recharge.status.as_str().to_string()),
        recharged_at: Set(recharge.recharged_at),
    };
    model.insert(conn()).await?;
    Ok(id)
}

/// Counts and the collected total in one pass. Failed and pending
/// attempts count as rows but contribute nothing to the total.
pub async fn stats() -> anyhow::Result<RechargeStats> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(CASE WHEN status = 'success' THEN amount ELSE 0 END), 0) AS collected,
                   COALESCE(SUM(CASE WHEN status = 'failed' THEN 1 ELSE 0 END), 0) AS failed
            FROM a005_recharge
            "#
            .to_string(),
        ))
        .await?;

    match row {
        Some(row) => Ok(RechargeStats {
            total_recharges: row.try_get("", "total")?,
            total_collected: Paise(row.try_get("", "collected")?),
            failed_count: row.try_get("", "failed")?,
        }),
        None => Ok(RechargeStats {
            total_recharges: 0,
            total_collected: Paise(0),
            failed_count: 0,
        }),
    }
}
