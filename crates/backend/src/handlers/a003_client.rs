use axum::Json;

use contracts::domain::a003_client::{ClientListItem, ClientStats};

use crate::domain::a003_client as client;

/// GET /api/clients
pub async fn list() -> Result<Json<Vec<ClientListItem>>, axum::http::StatusCode> {
    match client::service::list_items().await {
        Ok(clients) => Ok(Json(clients)),
        Err(e) => {
            tracing::error!("Failed to list clients: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/clients/stats
pub async fn stats() -> Result<Json<ClientStats>, axum::http::StatusCode> {
    match client::service::stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Failed to compute client stats: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
