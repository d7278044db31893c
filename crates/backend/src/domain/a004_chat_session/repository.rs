use contracts::domain::a001_agent::AgentId;
use contracts::domain::a002_user::UserId;
use contracts::domain::a003_client::ClientId;
use contracts::domain::a004_chat_session::{ChatMessage, ChatSession, SessionId, SessionKind};
use contracts::shared::money::Paise;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

/// Settled sessions. The four amounts were captured at settlement time
/// and are read back as stored; `messages` is the transcript as a JSON
/// array, `[]` for calls.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_chat_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub user_id: String,
    pub client_id: String,
    pub agent_id: Option<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub minutes: i64,
    pub client_spent: i64,
    pub admin_earned: i64,
    pub agent_earned: i64,
    pub user_earned: i64,
    pub messages: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChatSession {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let messages: Vec<ChatMessage> = serde_json::from_str(&m.messages).unwrap_or_default();
        ChatSession {
            id: SessionId(uuid),
            kind: SessionKind::from_str(&m.kind).unwrap_or(SessionKind::Chat),
            user_id: UserId(Uuid::parse_str(&m.user_id).unwrap_or_else(|_| Uuid::new_v4())),
            client_id: ClientId(Uuid::parse_str(&m.client_id).unwrap_or_else(|_| Uuid::new_v4())),
            agent_id: m
                .agent_id
                .and_then(|s| Uuid::parse_str(&s).ok())
                .map(AgentId::new),
            started_at: m.started_at,
            minutes: m.minutes,
            client_spent: Paise(m.client_spent),
            admin_earned: Paise(m.admin_earned),
            agent_earned: Paise(m.agent_earned),
            user_earned: Paise(m.user_earned),
            messages,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All sessions, newest first.
pub async fn list_desc() -> anyhow::Result<Vec<ChatSession>> {
    let models = Entity::find()
        .order_by_desc(Column::StartedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Oldest first, for chronological rollups.
pub async fn list_asc() -> anyhow::Result<Vec<ChatSession>> {
    let models = Entity::find()
        .order_by_asc(Column::StartedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(ChatSession::from).collect())
}

/// The `n` most recent sessions.
pub async fn recent(n: u64) -> anyhow::Result<Vec<ChatSession>> {
    let models = Entity::find()
        .order_by_desc(Column::StartedAt)
        .limit(n)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ChatSession>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(session: &ChatSession) -> anyhow::Result<Uuid> {
    if let Err(reason) = session.validate() {
        anyhow::bail!("invalid session: {}", reason);
    }
    let uuid = session.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        kind: Set(session.kind.as_str().to_string()),
        user_id: Set(session.user_id.as_string()),
        client_id: Set(session.client_id.as_string()),
        agent_id: Set(session.agent_id.map(|id| id.as_string())),
        started_at: Set(session.started_at),
        minutes: Set(session.minutes),
        client_spent: Set(session.client_spent.value()),
        admin_earned: Set(session.admin_earned.value()),
        agent_earned: Set(session.agent_earned.value()),
        user_earned: Set(session.user_earned.value()),
        messages: Set(serde_json::to_string(&session.messages)?),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}
