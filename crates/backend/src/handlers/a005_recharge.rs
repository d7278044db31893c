use axum::{extract::Query, http::StatusCode, Json};
use serde::Deserialize;

use contracts::domain::a005_recharge::{RechargeListItem, RechargeStats};

use crate::domain::a005_recharge as recharge;

#[derive(Debug, Deserialize)]
pub struct RechargeListQuery {
    pub limit: Option<u64>,
}

/// GET /api/recharges
pub async fn list(
    Query(query): Query<RechargeListQuery>,
) -> Result<Json<Vec<RechargeListItem>>, StatusCode> {
    match recharge::service::list(query.limit).await {
        Ok(recharges) => Ok(Json(recharges)),
        Err(e) => {
            tracing::error!("Failed to list recharges: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/recharges/stats
pub async fn stats() -> Result<Json<RechargeStats>, StatusCode> {
    match recharge::service::stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Failed to compute recharge stats: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
