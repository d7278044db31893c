use axum::{http::StatusCode, Json};
use serde_json::json;

use contracts::shared::commission::{PreviewSplitRequest, SplitPreview, ValidateSplitRequest};

/// POST /api/commission/validate
///
/// Stateless check for the split editor. `independent` marks a
/// candidate for a user with no recruiting agent, whose agent share
/// must stay zero.
pub async fn validate(
    Json(request): Json<ValidateSplitRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match request.split.validate(!request.independent) {
        Ok(()) => Ok(Json(json!({ "valid": true }))),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "valid": false, "error": e.to_string() })),
        )),
    }
}

/// POST /api/commission/preview
///
/// Projects a candidate over a hypothetical duration. Any share set is
/// accepted here; validity is the validate endpoint's business, and a
/// negative duration is the only thing the projection refuses.
pub async fn preview(
    Json(request): Json<PreviewSplitRequest>,
) -> Result<Json<SplitPreview>, (StatusCode, Json<serde_json::Value>)> {
    match request.split.project(request.minutes) {
        Ok(projection) => Ok(Json(SplitPreview {
            per_minute: request.split,
            percentages: request.split.percentages(),
            minutes: request.minutes,
            projection,
        })),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
