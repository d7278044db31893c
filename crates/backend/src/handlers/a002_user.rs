use axum::{extract::Path, http::StatusCode, Json};
use serde_json::json;

use contracts::domain::a002_user::{
    CommissionHistoryEntry, ReviewDecisionDto, User, UserCommissionResponse, UserListItem,
    UserStats,
};
use contracts::shared::commission::CommissionSplit;

use crate::domain::a002_user as user;
use crate::domain::a002_user::service::SetSplitError;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/users
pub async fn list() -> Result<Json<Vec<UserListItem>>, StatusCode> {
    match user::service::list_items().await {
        Ok(users) => Ok(Json(users)),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/users/stats
pub async fn stats() -> Result<Json<UserStats>, StatusCode> {
    match user::service::stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Failed to compute user stats: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match user::service::get_by_id(uuid).await {
        Ok(Some(found)) => Ok(Json(found)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load user {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/users/:id/commission
///
/// Answers with the stored split, or the kind template when none has
/// been set yet; `isDefault` tells the two apart.
pub async fn get_commission(
    Path(id): Path<String>,
) -> Result<Json<UserCommissionResponse>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match user::service::get_split(uuid).await {
        Ok(Some(response)) => Ok(Json(response)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load commission for user {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/users/:id/commission
///
/// The body carries the candidate split. It is validated against the
/// user's kind before anything is stored; a refused candidate comes
/// back as 422 with the engine's diagnostic.
pub async fn set_commission(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(split): Json<CommissionSplit>,
) -> Result<Json<CommissionHistoryEntry>, (StatusCode, Json<serde_json::Value>)> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid user id" })),
            ))
        }
    };

    match user::service::set_split(uuid, split, &claims.username).await {
        Ok(entry) => Ok(Json(entry)),
        Err(SetSplitError::UserNotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "user not found" })),
        )),
        Err(SetSplitError::Invalid(e)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )),
        Err(SetSplitError::Db(e)) => {
            tracing::error!("Failed to store commission split for {}: {}", uuid, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            ))
        }
    }
}

/// GET /api/users/:id/commission/history
pub async fn commission_history(
    Path(id): Path<String>,
) -> Result<Json<Vec<CommissionHistoryEntry>>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match user::service::split_history(uuid).await {
        Ok(Some(history)) => Ok(Json(history)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load commission history for {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/users/audio-review
pub async fn audio_review() -> Result<Json<Vec<User>>, StatusCode> {
    match user::service::audio_review_queue().await {
        Ok(queue) => Ok(Json(queue)),
        Err(e) => {
            tracing::error!("Failed to load audio review queue: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/users/:id/review
pub async fn review(
    Path(id): Path<String>,
    Json(dto): Json<ReviewDecisionDto>,
) -> Result<Json<User>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    match user::service::review(uuid, dto.decision).await {
        Ok(Some(reviewed)) => Ok(Json(reviewed)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to record review for {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
