use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ApiError;
use crate::db::Account;
use crate::services::StatusError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub id: i32,
    /// Accepted as raw JSON so a non-numeric status reads as an unknown
    /// status value rather than a deserialization failure.
    pub status: serde_json::Value,
}

/// Bare ack for status updates. The client only checks the flag, so this
/// envelope carries nothing else.
#[derive(Serialize)]
struct StatusAck {
    success: bool,
}

/// POST /update-recipe-status
/// Set the caller's status for a recipe. Unknown recipes and unknown status
/// values both answer with a not-found ack.
pub async fn update_recipe_status(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Response {
    let Some(value) = payload.status.as_i64() else {
        tracing::warn!(
            account_id = account.id,
            recipe_id = payload.id,
            raw = %payload.status,
            "Rejected non-numeric status value"
        );
        return failure_ack();
    };

    match state
        .statuses
        .set_status(account.id, payload.id, value)
        .await
    {
        Ok(applied) => {
            tracing::info!(
                account_id = account.id,
                recipe_id = payload.id,
                status = applied.value(),
                "Recipe status updated"
            );
            (StatusCode::OK, Json(StatusAck { success: true })).into_response()
        }
        Err(err @ (StatusError::InvalidStatus(_) | StatusError::RecipeNotFound(_))) => {
            tracing::warn!(
                account_id = account.id,
                recipe_id = payload.id,
                error = %err,
                "Rejected status update"
            );
            failure_ack()
        }
        Err(StatusError::Database(msg)) => ApiError::DatabaseError(msg).into_response(),
        Err(StatusError::Internal(msg)) => ApiError::internal(msg).into_response(),
    }
}

fn failure_ack() -> Response {
    (StatusCode::NOT_FOUND, Json(StatusAck { success: false })).into_response()
}
