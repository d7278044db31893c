use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use contracts::domain::a004_chat_session::{SessionDetailResponse, SessionListItem};

use crate::domain::a004_chat_session as chat_session;

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub search: Option<String>,
    pub user_id: Option<String>,
    pub limit: Option<u64>,
}

/// GET /api/sessions
pub async fn list(
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionListItem>>, StatusCode> {
    let user_id = match query.user_id {
        Some(raw) => match uuid::Uuid::parse_str(&raw) {
            Ok(uuid) => Some(uuid),
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => None,
    };

    match chat_session::service::list(query.search, user_id, query.limit).await {
        Ok(sessions) => Ok(Json(sessions)),
        Err(e) => {
            tracing::error!("Failed to list sessions: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/sessions/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<SessionDetailResponse>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match chat_session::service::detail(uuid).await {
        Ok(Some(detail)) => Ok(Json(detail)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load session {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
