use axum::{http::StatusCode, Json};

use contracts::dashboards::d400_overview::OverviewResponse;

use crate::dashboards::d400_overview as overview;

/// GET /api/dashboard/overview
pub async fn overview_data() -> Result<Json<OverviewResponse>, StatusCode> {
    match overview::service::overview().await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            tracing::error!("Failed to build dashboard overview: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
