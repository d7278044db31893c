use std::collections::HashMap;

use contracts::domain::a004_chat_session::{ChatSession, SessionDetailResponse, SessionListItem};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_agent::repository as agent_repository;
use crate::domain::a002_user::repository as user_repository;
use crate::domain::a003_client::repository as client_repository;

/// Display names for the three parties a session row references.
struct NameIndex {
    users: HashMap<String, String>,
    clients: HashMap<String, String>,
    agents: HashMap<String, String>,
}

async fn name_index() -> anyhow::Result<NameIndex> {
    let users = user_repository::list_all()
        .await?
        .into_iter()
        .map(|user| (user.id.as_string(), user.name))
        .collect();
    let clients = client_repository::list_all()
        .await?
        .into_iter()
        .map(|client| (client.id.as_string(), client.name))
        .collect();
    let agents = agent_repository::list_all()
        .await?
        .into_iter()
        .map(|agent| (agent.id.as_string(), agent.name))
        .collect();
    Ok(NameIndex {
        users,
        clients,
        agents,
    })
}

fn decorate(session: ChatSession, names: &NameIndex) -> SessionListItem {
    let user_id = session.user_id.as_string();
    let client_id = session.client_id.as_string();
    let agent_id = session.agent_id.map(|id| id.as_string());
    SessionListItem {
        id: session.id.as_string(),
        kind: session.kind,
        user_name: names.users.get(&user_id).cloned().unwrap_or_default(),
        user_id,
        client_name: names.clients.get(&client_id).cloned().unwrap_or_default(),
        client_id,
        agent_name: agent_id
            .as_ref()
            .and_then(|id| names.agents.get(id).cloned()),
        agent_id,
        started_at: session.started_at,
        minutes: session.minutes,
        client_spent: session.client_spent,
        admin_earned: session.admin_earned,
        agent_earned: session.agent_earned,
        user_earned: session.user_earned,
        has_transcript: !session.messages.is_empty(),
    }
}

/// Session log, newest first. `search` matches the client or user name
/// case-insensitively, `user_id` narrows to one performer, `limit` caps
/// the result after filtering.
pub async fn list(
    search: Option<String>,
    user_id: Option<Uuid>,
    limit: Option<u64>,
) -> anyhow::Result<Vec<SessionListItem>> {
    let mut sessions = repository::list_desc().await?;
    if let Some(user_id) = user_id {
        sessions.retain(|session| session.user_id.value() == user_id);
    }
    let names = name_index().await?;
    let mut items: Vec<SessionListItem> = sessions
        .into_iter()
        .map(|session| decorate(session, &names))
        .collect();
    if let Some(needle) = search {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() {
            items.retain(|item| {
                item.user_name.to_lowercase().contains(&needle)
                    || item.client_name.to_lowercase().contains(&needle)
            });
        }
    }
    if let Some(limit) = limit {
        items.truncate(limit as usize);
    }
    Ok(items)
}

/// The `n` most recent sessions, for the dashboard.
pub async fn recent(n: u64) -> anyhow::Result<Vec<SessionListItem>> {
    let sessions = repository::recent(n).await?;
    let names = name_index().await?;
    Ok(sessions
        .into_iter()
        .map(|session| decorate(session, &names))
        .collect())
}

/// One session with its transcript. Calls come back with an empty
/// message list.
pub async fn detail(id: Uuid) -> anyhow::Result<Option<SessionDetailResponse>> {
    let session = match repository::get_by_id(id).await? {
        Some(session) => session,
        None => return Ok(None),
    };
    let names = name_index().await?;
    let messages = session.messages.clone();
    Ok(Some(SessionDetailResponse {
        session: decorate(session, &names),
        messages,
    }))
}
