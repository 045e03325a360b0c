use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{
    ApiError, ApiResponse,
    types::{RecipeDetailDto, RecipeDto, StatusChoiceDto},
};
use crate::api::auth::load_session_account;
use crate::services::StatusValue;
use crate::state::AppState;

/// GET /
/// The full recipe catalogue in stable id order
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RecipeDto>>>, ApiError> {
    let recipes = state.store.list_recipes().await?;

    let results = recipes
        .into_iter()
        .map(|recipe| RecipeDto {
            id: recipe.id,
            name: recipe.name,
        })
        .collect();

    Ok(Json(ApiResponse::success(results)))
}

/// GET /recipe/{id}
/// One recipe with its aggregated ingredient line. Signed-in callers also get
/// their own status for it; anonymous callers see the default.
pub async fn recipe_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<RecipeDetailDto>>, ApiError> {
    // A non-numeric id segment is just another recipe that does not exist.
    let Ok(Path(recipe_id)) = path else {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    };

    let recipe = state
        .store
        .get_recipe_with_ingredients(recipe_id)
        .await?
        .ok_or_else(|| ApiError::recipe_not_found(recipe_id))?;

    let account = load_session_account(&state, &session).await?;

    let status = match &account {
        Some(account) => state.statuses.status_for(account.id, recipe_id).await?,
        None => StatusValue::default(),
    };

    Ok(Json(ApiResponse::success(RecipeDetailDto {
        id: recipe.id,
        name: recipe.name,
        ingredients: recipe.ingredients,
        status: status.value(),
        status_label: status.label(),
        status_choices: StatusValue::ALL
            .iter()
            .copied()
            .map(StatusChoiceDto::from)
            .collect(),
        authenticated: account.is_some(),
    })))
}
