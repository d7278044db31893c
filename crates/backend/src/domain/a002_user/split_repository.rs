use chrono::Utc;
use contracts::domain::a002_user::CommissionHistoryEntry;
use contracts::shared::commission::CommissionSplit;
use contracts::shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

/// Split assignments, one row per write. The row with a null
/// `superseded_at` is the split currently in force for its user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_commission_split")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub client_rate: i64,
    pub admin_share: i64,
    pub agent_share: i64,
    pub user_share: i64,
    pub set_by: String,
    pub set_at: chrono::DateTime<chrono::Utc>,
    pub superseded_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CommissionHistoryEntry {
    fn from(m: Model) -> Self {
        CommissionHistoryEntry {
            id: m.id,
            user_id: m.user_id,
            split: CommissionSplit {
                client_rate_per_minute: Paise(m.client_rate),
                admin_share: Paise(m.admin_share),
                agent_share: Paise(m.agent_share),
                user_share: Paise(m.user_share),
            },
            set_by: m.set_by,
            set_at: m.set_at,
            superseded_at: m.superseded_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn current_for_user(user_id: Uuid) -> anyhow::Result<Option<CommissionHistoryEntry>> {
    let result = Entity::find()
        .filter(Column::UserId.eq(user_id.to_string()))
        .filter(Column::SupersededAt.is_null())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Every split currently in force, for decorating user lists in one
/// query instead of one per row.
pub async fn current_splits() -> anyhow::Result<Vec<CommissionHistoryEntry>> {
    let models = Entity::find()
        .filter(Column::SupersededAt.is_null())
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Full write history for one user, newest first. Superseded rows are
/// kept forever.
pub async fn history_for_user(user_id: Uuid) -> anyhow::Result<Vec<CommissionHistoryEntry>> {
    let models = Entity::find()
        .filter(Column::UserId.eq(user_id.to_string()))
        .order_by_desc(Column::SetAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Archive whatever split is in force for `user_id` and store `split`
/// as the new current one. The archive and the insert commit together.
pub async fn replace_current(
    user_id: Uuid,
    split: &CommissionSplit,
    set_by: &str,
) -> anyhow::Result<CommissionHistoryEntry> {
    use sea_orm::sea_query::Expr;

    let now = Utc::now();
    let txn = conn().begin().await?;

    Entity::update_many()
        .col_expr(Column::SupersededAt, Expr::value(now))
        .filter(Column::UserId.eq(user_id.to_string()))
        .filter(Column::SupersededAt.is_null())
        .exec(&txn)
        .await?;

    let id = Uuid::new_v4().to_string();
    let active = ActiveModel {
        id: Set(id.clone()),
        user_id: Set(user_id.to_string()),
        client_rate: Set(split.client_rate_per_minute.value()),
        admin_share: Set(split.admin_share.value()),
        agent_share: Set(split.agent_share.value()),
        user_share: Set(split.user_share.value()),
        set_by: Set(set_by.to_string()),
        set_at: Set(now),
        superseded_at: Set(None),
    };
    active.insert(&txn).await?;

    txn.commit().await?;
    Ok(CommissionHistoryEntry {
        id,
        user_id: user_id.to_string(),
        split: *split,
        set_by: set_by.to_string(),
        set_at: now,
        superseded_at: None,
    })
}

/// Insert a history row as given, superseded or not. The demo seed uses
/// this to lay down past assignments with their original timestamps.
pub async fn insert_entry(entry: &CommissionHistoryEntry) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(entry.id.clone()),
        user_id: Set(entry.user_id.clone()),
        client_rate: Set(entry.split.client_rate_per_minute.value()),
        admin_share: Set(entry.split.admin_share.value()),
        agent_share: Set(entry.split.agent_share.value()),
        user_share: Set(entry.split.user_share.value()),
        set_by: Set(entry.set_by.clone()),
        set_at: Set(entry.set_at),
        superseded_at: Set(entry.superseded_at),
    };
    active.insert(conn()).await?;
    Ok(())
}
