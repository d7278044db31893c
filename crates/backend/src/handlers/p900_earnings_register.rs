use axum::{extract::Query, http::StatusCode, Json};

use contracts::projections::p900_earnings_register::{
    EarningsReportRequest, EarningsReportResponse, UserEarningsReportResponse,
};

use crate::projections::p900_earnings_register as earnings_register;

/// GET /api/reports/earnings
///
/// `from`/`to` bound the window by session start date, both inclusive;
/// either may be omitted. `user_id` narrows to one performer.
pub async fn earnings(
    Query(request): Query<EarningsReportRequest>,
) -> Result<Json<EarningsReportResponse>, StatusCode> {
    match earnings_register::service::earnings(request).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Failed to build earnings report: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/reports/earnings/by-user
pub async fn earnings_by_user(
    Query(request): Query<EarningsReportRequest>,
) -> Result<Json<UserEarningsReportResponse>, StatusCode> {
    match earnings_register::service::earnings_by_user(request).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Failed to build per-user earnings report: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
