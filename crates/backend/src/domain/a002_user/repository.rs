use contracts::domain::a001_agent::AgentId;
use contracts::domain::a002_user::{User, UserId, UserKind, UserStats, UserStatus};
use contracts::shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, QueryOrder, Set, Statement};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub phone: String,
    pub kind: String,
    pub agent_id: Option<String>,
    pub total_minutes: i64,
    pub total_earned: i64,
    pub rating: f32,
    pub status: String,
    pub audio_intro_url: Option<String>,
    pub joined_at: chrono::NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        User {
            id: UserId(uuid),
            name: m.name,
            avatar: m.avatar,
            phone: m.phone,
            kind: UserKind::parse(&m.kind).unwrap_or(UserKind::Independent),
            agent_id: m
                .agent_id
                .and_then(|s| Uuid::parse_str(&s).ok())
                .map(AgentId::new),
            total_minutes: m.total_minutes,
            total_earned: Paise(m.total_earned),
            rating: m.rating,
            status: UserStatus::from_str(&m.status).unwrap_or(UserStatus::Pending),
            audio_intro_url: m.audio_intro_url,
            joined_at: m.joined_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<User>> {
    let models = Entity::find()
        .order_by_asc(Column::JoinedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<User>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_agent(agent_id: Uuid) -> anyhow::Result<Vec<User>> {
    let models = Entity::find()
        .filter(Column::AgentId.eq(agent_id.to_string()))
        .order_by_asc(Column::JoinedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Independent users still waiting on their audio intro verdict.
pub async fn list_pending_independent() -> anyhow::Result<Vec<User>> {
    let models = Entity::find()
        .filter(Column::Kind.eq(UserKind::Independent.as_str()))
        .filter(Column::Status.eq(UserStatus::Pending.as_str()))
        .order_by_asc(Column::JoinedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn insert(user: &User) -> anyhow::Result<Uuid> {
    if let Err(reason) = user.validate() {
        anyhow::bail!("invalid user: {}", reason);
    }
    let uuid = user.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        name: Set(user.name.clone()),
        avatar: Set(user.avatar.clone()),
        phone: Set(user.phone.clone()),
        kind: Set(user.kind.as_str().to_string()),
        agent_id: Set(user.agent_id.map(|id| id.as_string())),
        total_minutes: Set(user.total_minutes),
        total_earned: Set(user.total_earned.value()),
        rating: Set(user.rating),
        status: Set(user.status.as_str().to_string()),
        audio_intro_url: Set(user.audio_intro_url.clone()),
        joined_at: Set(user.joined_at),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update_status(id: Uuid, status: UserStatus) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.as_str()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Agent-recruited head count across the whole register.
pub async fn count_agent_recruited() -> anyhow::Result<i64> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS total FROM a002_user WHERE agent_id IS NOT NULL".to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get("", "total")?),
        None => Ok(0),
    }
}

pub async fn count_by_status(status: UserStatus) -> anyhow::Result<i64> {
    let row = conn()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS total FROM a002_user WHERE status = ?",
            [status.as_str().into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get("", "total")?),
        None => Ok(0),
    }
}

/// Card figures for the users page in one pass.
pub async fn stats() -> anyhow::Result<UserStats> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS total, COALESCE(SUM(total_minutes), 0) AS minutes, \
             COALESCE(AVG(rating), 0.0) AS rating FROM a002_user"
                .to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(UserStats {
            total_users: row.try_get("", "total")?,
            total_minutes: row.try_get("", "minutes")?,
            average_rating: row.try_get("", "rating")?,
        }),
        None => Ok(UserStats {
            total_users: 0,
            total_minutes: 0,
            average_rating: 0.0,
        }),
    }
}
