use axum::{extract::Path, Json};

use contracts::domain::a001_agent::{Agent, AgentListItem, AgentStats};
use contracts::domain::a002_user::User;

use crate::domain::a001_agent as agent;

/// GET /api/agents
pub async fn list() -> Result<Json<Vec<AgentListItem>>, axum::http::StatusCode> {
    match agent::service::list_items().await {
        Ok(agents) => Ok(Json(agents)),
        Err(e) => {
            tracing::error!("Failed to list agents: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/agents/stats
pub async fn stats() -> Result<Json<AgentStats>, axum::http::StatusCode> {
    match agent::service::stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Failed to compute agent stats: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/agents/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Agent>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };

    match agent::service::get_by_id(uuid).await {
        Ok(Some(found)) => Ok(Json(found)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load agent {}: {}", uuid, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/agents/:id/team
pub async fn team(Path(id): Path<String>) -> Result<Json<Vec<User>>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };

    match agent::service::team(uuid).await {
        Ok(Some(team)) => Ok(Json(team)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load team for agent {}: {}", uuid, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
