use std::collections::HashMap;

use contracts::domain::a004_chat_session::ChatSession;
use contracts::projections::p900_earnings_register::{
    report, EarningsReportRequest, EarningsReportResponse, UserEarningsReportResponse,
    UserEarningsRow,
};

use crate::domain::a002_user::repository as user_repository;
use crate::domain::a004_chat_session::repository as session_repository;

/// Sessions matching the request, oldest first so per-user rows come
/// out in chronological first-appearance order.
async fn matching_sessions(request: &EarningsReportRequest) -> anyhow::Result<Vec<ChatSession>> {
    let mut sessions = session_repository::list_asc().await?;
    if let Some(from) = request.from {
        sessions.retain(|session| session.started_at.date_naive() >= from);
    }
    if let Some(to) = request.to {
        sessions.retain(|session| session.started_at.date_naive() <= to);
    }
    if let Some(ref user_id) = request.user_id {
        sessions.retain(|session| session.user_id.as_string() == *user_id);
    }
    Ok(sessions)
}

/// Platform-wide totals over the requested window.
pub async fn earnings(request: EarningsReportRequest) -> anyhow::Result<EarningsReportResponse> {
    let sessions = matching_sessions(&request).await?;
    Ok(EarningsReportResponse {
        from: request.from,
        to: request.to,
        totals: report::summarize(&sessions),
    })
}

/// Per-user totals over the requested window, decorated with names.
pub async fn earnings_by_user(
    request: EarningsReportRequest,
) -> anyhow::Result<UserEarningsReportResponse> {
    let sessions = matching_sessions(&request).await?;
    let names: HashMap<String, String> = user_repository::list_all()
        .await?
        .into_iter()
        .map(|user| (user.id.as_string(), user.name))
        .collect();

    let rows = report::summarize_by_user(&sessions)
        .into_iter()
        .map(|row| UserEarningsRow {
            user_name: names.get(&row.user_id).cloned().unwrap_or_default(),
            user_id: row.user_id,
            totals: row.totals,
        })
        .collect();

    Ok(UserEarningsReportResponse {
        from: request.from,
        to: request.to,
        rows,
    })
}
